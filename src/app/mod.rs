pub mod actions;
pub mod events;
pub mod state;

use crate::config::Config;
use crate::input;
use crate::karaoke;
use crate::lyrics::Resolver;
use crate::player::AudioDeck;
use crate::tui::{self, TuiTerminal};
use actions::Action;
use events::{AudioEvent, Event, NetworkEvent, PlayerEvent};
use state::{AppState, LyricsMode, SearchFocus, Toast, View};
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

const SEEK_STEP_SECS: f64 = 5.0;
const PAGE_LINES: isize = 10;
/// Audio and lyric clocks further apart than this get re-aligned.
const MAX_DRIFT_SECS: f64 = 0.5;

pub struct App {
    cfg: Config,
    config_path: PathBuf,
    state: AppState,
    resolver: Resolver,
    audio_file: Option<PathBuf>,
    deck: Option<AudioDeck>,
    /// Bumped whenever the deck is released; older loads are discarded.
    audio_generation: u64,
}

impl App {
    pub fn new(
        cfg: Config,
        config_path: PathBuf,
        audio_file: Option<PathBuf>,
    ) -> anyhow::Result<Self> {
        let resolver = Resolver::new(&cfg)?;

        let mut state = AppState::new();
        state.audio_name = audio_file
            .as_deref()
            .and_then(|p| p.file_name())
            .map(|n| n.to_string_lossy().into_owned());

        // Lyrics are not kept between runs, so that view falls back to search.
        if let Some(view) = cfg.ui.last_view.as_deref().and_then(View::from_name)
            && view != View::Lyrics
        {
            state.view = view;
        }

        Ok(Self {
            cfg,
            config_path,
            state,
            resolver,
            audio_file,
            deck: None,
            audio_generation: 0,
        })
    }

    pub async fn run(&mut self, terminal: &mut TuiTerminal) -> anyhow::Result<()> {
        let (tx, mut rx) = mpsc::channel::<Event>(256);

        input::spawn_input_task(tx.clone());

        let mut ticker =
            tokio::time::interval(Duration::from_millis(self.cfg.karaoke.tick_ms.max(10)));
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        tui::draw(terminal, &mut self.state)?;

        while !self.state.should_quit {
            let redraw = tokio::select! {
                ev = rx.recv() => match ev {
                    Some(ev) => {
                        self.handle_event(ev, &tx).await;
                        true
                    }
                    None => {
                        self.state.should_quit = true;
                        false
                    }
                },
                _ = ticker.tick() => self.on_tick(Instant::now()),
            };

            if redraw && !self.state.should_quit {
                tui::draw(terminal, &mut self.state)?;
            }
        }

        self.release_audio();
        self.save_state_on_quit();
        Ok(())
    }

    /// Advance the karaoke clock. Returns whether the screen needs a redraw.
    fn on_tick(&mut self, now: Instant) -> bool {
        self.state.tick = self.state.tick.wrapping_add(1);

        let mut redraw = self.state.resolving
            || self.state.results.loading
            || self.state.toast.as_ref().is_some_and(Toast::is_expired);

        if self.state.karaoke.is_playing() {
            if let Some(index) = self.state.karaoke.tick(now) {
                tracing::trace!(index, "active line");
                if self.cfg.karaoke.auto_scroll {
                    self.state.focus_line = Some(index);
                }
            }
            redraw = true;
        }
        redraw
    }

    async fn handle_event(&mut self, ev: Event, tx: &mpsc::Sender<Event>) {
        match ev {
            Event::Input(input_ev) => {
                if let Some(action) = input::map_input_to_action(&self.state, input_ev) {
                    self.handle_action(action, tx).await;
                    self.request_thumbnail(tx);
                }
            }
            Event::Player(pe) => self.handle_player(pe),
            Event::Audio(ae) => self.handle_audio(ae).await,
            Event::Network(ne) => self.handle_network(ne, tx),
        }
    }

    fn save_state_on_quit(&mut self) {
        self.cfg.ui.last_view = Some(self.state.view.name().to_string());
        if let Err(e) = crate::config::save(&self.cfg, Some(&self.config_path)) {
            tracing::warn!("failed to save config: {e:#}");
        }
    }

    async fn handle_action(&mut self, action: Action, tx: &mpsc::Sender<Event>) {
        let now = Instant::now();
        match action {
            Action::StartSearch => self.spawn_search(tx),
            Action::Activate => self.spawn_resolve(tx),
            Action::Back if self.state.view == View::Lyrics => {
                self.release_audio();
                self.state.close_lyrics();
                self.state.search_focus = if self.state.results.items.is_empty() {
                    SearchFocus::Input
                } else {
                    SearchFocus::Results
                };
            }
            Action::ToggleMode => self.toggle_mode(),
            Action::TogglePlay => {
                if !self.state.has_timed_lines() {
                    self.state.toast = Some(Toast::error("No synced lyrics for this version"));
                    return;
                }
                self.state.mode = LyricsMode::Karaoke;
                let playing = self.state.karaoke.toggle(now);
                tracing::debug!(playing, "karaoke transport");
                self.push_transport(now, false).await;
            }
            Action::ResetKaraoke => {
                self.state.karaoke.reset();
                self.state.focus_line = None;
                self.state.scroll = 0;
                self.push_transport(now, true).await;
            }
            Action::PitchUp | Action::PitchDown => {
                let pitch = if action == Action::PitchUp {
                    self.state.karaoke.pitch_up()
                } else {
                    self.state.karaoke.pitch_down()
                };
                self.push_pitch(pitch).await;
            }
            Action::SeekForward | Action::SeekBack => {
                if !self.state.has_timed_lines() {
                    return;
                }
                let delta = if action == Action::SeekForward {
                    SEEK_STEP_SECS
                } else {
                    -SEEK_STEP_SECS
                };
                let target = (self.state.karaoke.current_time(now) + delta).max(0.0);
                self.state.karaoke.seek(target, now);
                self.state.focus_line = karaoke::active_line(self.state.karaoke.lines(), target);
                self.push_transport(now, true).await;
            }
            Action::ToggleVariant => {
                if self.state.toggle_variant() {
                    self.state.status = format!("Showing {} lyrics", self.state.variant.label());
                    self.push_transport(now, true).await;
                } else {
                    self.state.toast = Some(Toast::error("No second version for this song"));
                }
            }
            Action::ToggleLocalize => {
                self.state.toggle_localize();
                self.state.status = if self.state.localized {
                    "Localized to Latin script".into()
                } else {
                    "Original script".into()
                };
            }
            _ => self.reduce(action),
        }
    }

    fn toggle_mode(&mut self) {
        match self.state.mode {
            LyricsMode::Text if !self.state.has_timed_lines() => {
                self.state.toast = Some(Toast::error("No synced lyrics for this version"));
            }
            LyricsMode::Text => {
                self.state.mode = LyricsMode::Karaoke;
                self.state.focus_line = self.state.karaoke.active_index();
            }
            LyricsMode::Karaoke => self.state.mode = LyricsMode::Text,
        }
    }

    fn reduce(&mut self, action: Action) {
        match action {
            Action::Quit => self.state.should_quit = true,
            Action::Back => {
                if self.state.view == View::Help {
                    self.state.view = self.state.return_view;
                }
            }
            Action::ToggleHelp => {
                if self.state.view == View::Help {
                    self.state.view = self.state.return_view;
                } else {
                    self.state.return_view = self.state.view;
                    self.state.view = View::Help;
                }
            }
            Action::SetSearchFocus(focus) => self.state.search_focus = focus,

            Action::ListUp => self.move_selection(-1),
            Action::ListDown => self.move_selection(1),
            Action::PageUp => self.move_selection(-PAGE_LINES),
            Action::PageDown => self.move_selection(PAGE_LINES),
            Action::GoTop => match self.state.view {
                View::Lyrics => {
                    self.state.focus_line = None;
                    self.state.scroll = 0;
                }
                _ => {
                    self.state.results.selected = 0;
                    self.state.results.scroll_offset = 0;
                }
            },
            Action::GoBottom => match self.state.view {
                View::Lyrics => self.move_selection(isize::MAX / 2),
                _ => self.state.results.select_last(),
            },

            Action::InputChar(c) => self.state.search_query.push(c),
            Action::Backspace => {
                self.state.search_query.pop();
            }
            Action::ClearInput => self.state.search_query.clear(),

            _ => {}
        }
    }

    fn move_selection(&mut self, delta: isize) {
        if self.state.view == View::Lyrics {
            self.state.scroll_by(delta);
            return;
        }
        let list = &mut self.state.results;
        if delta < 0 {
            for _ in 0..delta.unsigned_abs() {
                list.select_prev();
            }
        } else {
            list.selected = list
                .selected
                .saturating_add(delta.unsigned_abs())
                .min(list.items.len().saturating_sub(1));
        }
    }

    fn spawn_search(&mut self, tx: &mpsc::Sender<Event>) {
        if self.state.results.loading {
            return;
        }
        let query = self.state.search_query.trim().to_string();
        if query.is_empty() {
            self.state.status = "Type a song or artist first".into();
            return;
        }
        self.state.results.loading = true;
        self.state.status = format!("Searching: {query}");

        let resolver = self.resolver.clone();
        let tx = tx.clone();
        tokio::spawn(async move {
            let ev = match resolver.search_songs(&query).await {
                Ok(items) => NetworkEvent::SearchResults { query, items },
                Err(e) => NetworkEvent::Error(e.to_string()),
            };
            let _ = tx.send(Event::Network(ev)).await;
        });
    }

    fn spawn_resolve(&mut self, tx: &mpsc::Sender<Event>) {
        if self.state.resolving {
            return;
        }
        let Some(candidate) = self.state.results.selected_candidate().cloned() else {
            return;
        };
        self.state.resolving = true;
        self.state.status = format!(
            "Loading lyrics: {} - {}",
            candidate.track_name, candidate.artist_name
        );

        let resolver = self.resolver.clone();
        let tx = tx.clone();
        tokio::spawn(async move {
            let artist = candidate.artist_name.clone();
            let title = candidate.track_name.clone();
            let ev = match resolver.resolve(&artist, &title, Some(candidate)).await {
                Ok(lyrics) => NetworkEvent::Resolved {
                    lyrics: Box::new(lyrics),
                },
                Err(e) => NetworkEvent::ResolveFailed(e.to_string()),
            };
            let _ = tx.send(Event::Network(ev)).await;
        });
    }

    /// Fetch the thumbnail of the selected result once per search.
    fn request_thumbnail(&mut self, tx: &mpsc::Sender<Event>) {
        if self.state.view != View::Search {
            return;
        }
        let Some(query) = self.state.last_search.clone() else {
            return;
        };
        let index = self.state.results.selected;
        if self.state.results.artwork.contains_key(&index) {
            return;
        }
        let Some(candidate) = self.state.results.items.get(index) else {
            return;
        };
        let artist = candidate.artist_name.clone();
        let title = candidate.track_name.clone();
        self.state.results.artwork.insert(index, None);

        let resolver = self.resolver.clone();
        let tx = tx.clone();
        tokio::spawn(async move {
            let url = resolver.thumbnail(&artist, &title).await;
            let ev = NetworkEvent::Thumbnail { query, index, url };
            let _ = tx.send(Event::Network(ev)).await;
        });
    }

    fn handle_network(&mut self, ne: NetworkEvent, tx: &mpsc::Sender<Event>) {
        match ne {
            NetworkEvent::Error(e) => {
                self.state.results.loading = false;
                self.state.toast = Some(Toast::error(e.clone()));
                self.state.status = format!("Error: {e}");
            }
            NetworkEvent::SearchResults { query, items } => {
                tracing::debug!(%query, count = items.len(), "search results");
                self.state.last_search = Some(query);
                self.state.results.set_items(items);
                if self.state.results.items.is_empty() {
                    self.state.toast = Some(Toast::error("No songs found."));
                    self.state.search_focus = SearchFocus::Input;
                } else {
                    self.state.search_focus = SearchFocus::Results;
                }
                self.state.status = format!("Results: {}", self.state.results.items.len());
                self.request_thumbnail(tx);
            }
            NetworkEvent::Thumbnail { query, index, url } => {
                if self.state.last_search.as_deref() == Some(query.as_str())
                    && index < self.state.results.items.len()
                {
                    self.state.results.artwork.insert(index, url);
                }
            }
            NetworkEvent::Resolved { lyrics } => {
                self.state.resolving = false;
                self.release_audio();
                self.state.status = format!(
                    "{} - {} ({})",
                    lyrics.title, lyrics.artist, lyrics.genre
                );
                self.state.open_lyrics(*lyrics);
                self.load_audio(tx);
            }
            NetworkEvent::ResolveFailed(e) => {
                tracing::warn!("lyrics resolution failed: {e}");
                self.state.resolving = false;
                self.state.toast = Some(Toast::error(
                    "Could not load lyrics for this song. Try another version.",
                ));
                self.state.status = format!("Error: {e}");
            }
        }
    }

    fn handle_player(&mut self, pe: PlayerEvent) {
        let now = Instant::now();
        match pe {
            PlayerEvent::Position { seconds } => {
                let karaoke = &mut self.state.karaoke;
                if karaoke.is_playing()
                    && (karaoke.current_time(now) - seconds).abs() > MAX_DRIFT_SECS
                {
                    tracing::debug!(seconds, "re-aligning karaoke clock to audio");
                    karaoke.seek(seconds, now);
                }
            }
            PlayerEvent::Ended => {
                self.state.karaoke.stop(now);
                self.state.status = "Backing track ended".into();
            }
            PlayerEvent::Started | PlayerEvent::Paused => {}
            PlayerEvent::Error(e) => {
                tracing::warn!("{e}");
                self.state.status = format!("Player error: {e}");
            }
        }
    }

    /// Start mpv for the backing track of the song now on screen.
    ///
    /// Runs in the background and reports back with an [`AudioEvent`].
    fn load_audio(&mut self, tx: &mpsc::Sender<Event>) {
        let Some(path) = self.audio_file.clone() else {
            return;
        };
        let generation = self.audio_generation;
        let log_file = self.cfg.paths.data_dir.join("mpv.log");
        let audio_device = self.cfg.player.audio_device.clone();
        let volume = self.cfg.player.volume;
        let tx = tx.clone();
        tokio::spawn(async move {
            let loaded = async {
                let deck =
                    AudioDeck::spawn(tx.clone(), audio_device.as_deref(), Some(&log_file)).await?;
                deck.load(&path).await?;
                deck.set_volume(volume).await?;
                anyhow::Ok(deck)
            }
            .await;
            let ev = match loaded {
                Ok(deck) => AudioEvent::Ready { generation, deck },
                Err(e) => AudioEvent::Failed {
                    generation,
                    error: format!("{e:#}"),
                },
            };
            let _ = tx.send(Event::Audio(ev)).await;
        });
    }

    async fn handle_audio(&mut self, ae: AudioEvent) {
        match ae {
            AudioEvent::Ready { generation, deck } if generation == self.audio_generation => {
                self.deck = Some(deck);
                self.state.audio_ready = true;
                self.state.toast = Some(Toast::success("Backing track loaded"));
                // Catch up with whatever happened while mpv was starting.
                let pitch = self.state.karaoke.pitch();
                self.push_pitch(pitch).await;
                self.push_transport(Instant::now(), true).await;
            }
            AudioEvent::Failed { generation, error } if generation == self.audio_generation => {
                self.state.toast = Some(Toast::error(format!("audio disabled: {error}")));
            }
            AudioEvent::Ready { generation, .. } | AudioEvent::Failed { generation, .. } => {
                tracing::debug!(generation, "discarding backing track of a closed song");
            }
        }
    }

    fn release_audio(&mut self) {
        self.deck = None;
        self.audio_generation = self.audio_generation.wrapping_add(1);
        self.state.audio_ready = false;
    }

    /// Mirror the karaoke transport on the deck, optionally seeking it too.
    async fn push_transport(&mut self, now: Instant, seek: bool) {
        let Some(deck) = &self.deck else {
            return;
        };
        let playback = self.state.karaoke.state(now);
        let result = async {
            if seek {
                deck.seek_to(playback.current_time).await?;
            }
            deck.set_paused(!playback.is_playing).await
        }
        .await;
        if let Err(e) = result {
            self.state.toast = Some(Toast::error(format!("{e:#}")));
        }
    }

    async fn push_pitch(&mut self, pitch: i8) {
        let Some(deck) = &self.deck else {
            return;
        };
        if let Err(e) = deck.set_pitch(pitch).await {
            self.state.toast = Some(Toast::error(format!("{e:#}")));
        }
    }
}
