use crate::karaoke::KaraokeModel;
use crate::lyrics::{parser, LyricCandidate, LyricLine, ResolvedLyrics};
use crate::translit;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Search,
    Lyrics,
    Help,
}

impl View {
    pub fn name(self) -> &'static str {
        match self {
            View::Search => "search",
            View::Lyrics => "lyrics",
            View::Help => "help",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "search" => Some(View::Search),
            "lyrics" => Some(View::Lyrics),
            "help" => Some(View::Help),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchFocus {
    Input,
    Results,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LyricsMode {
    #[default]
    Text,
    Karaoke,
}

impl LyricsMode {
    pub fn label(self) -> &'static str {
        match self {
            LyricsMode::Text => "Text",
            LyricsMode::Karaoke => "Karaoke",
        }
    }
}

/// Which of the two selected lyric texts is on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Variant {
    #[default]
    Primary,
    Secondary,
}

impl Variant {
    pub fn label(self) -> &'static str {
        match self {
            Variant::Primary => "Primary",
            Variant::Secondary => "Original",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    pub kind: ToastKind,
    pub created_at: std::time::Instant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

impl Toast {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: ToastKind::Success,
            created_at: std::time::Instant::now(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: ToastKind::Error,
            created_at: std::time::Instant::now(),
        }
    }

    pub fn is_expired(&self) -> bool {
        self.created_at.elapsed() > std::time::Duration::from_secs(3)
    }
}

/// Search results with their own selection and scroll.
#[derive(Debug, Clone, Default)]
pub struct ResultList {
    pub items: Vec<LyricCandidate>,
    pub selected: usize,
    pub scroll_offset: usize,
    pub loading: bool,
    pub loaded: bool,
    /// Thumbnail per result index. `None` while pending or when there is no art.
    pub artwork: HashMap<usize, Option<String>>,
}

impl ResultList {
    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn select_next(&mut self) {
        if !self.items.is_empty() {
            self.selected = (self.selected + 1).min(self.items.len() - 1);
        }
    }

    pub fn select_last(&mut self) {
        self.selected = self.items.len().saturating_sub(1);
    }

    pub fn selected_candidate(&self) -> Option<&LyricCandidate> {
        self.items.get(self.selected)
    }

    pub fn set_items(&mut self, items: Vec<LyricCandidate>) {
        self.items = items;
        self.selected = 0;
        self.scroll_offset = 0;
        self.artwork.clear();
        self.loaded = true;
        self.loading = false;
    }

    pub fn update_scroll(&mut self, visible_height: usize) {
        if visible_height == 0 {
            return;
        }
        if self.selected < self.scroll_offset {
            self.scroll_offset = self.selected;
        } else if self.selected >= self.scroll_offset + visible_height {
            self.scroll_offset = self.selected - visible_height + 1;
        }
    }
}

pub struct AppState {
    pub should_quit: bool,
    pub tick: u64,

    pub view: View,
    /// Where `Back` from the help view goes.
    pub return_view: View,

    // Search
    pub search_query: String,
    pub last_search: Option<String>,
    pub search_focus: SearchFocus,
    pub results: ResultList,

    // Lyrics
    pub resolving: bool,
    pub lyrics: Option<ResolvedLyrics>,
    pub mode: LyricsMode,
    pub variant: Variant,
    pub localized: bool,
    /// Text-mode lines for the current variant and localization.
    pub text_lines: Vec<String>,
    pub scroll: usize,
    pub karaoke: KaraokeModel,
    /// Line to keep in view in karaoke mode.
    pub focus_line: Option<usize>,

    // Audio
    pub audio_name: Option<String>,
    pub audio_ready: bool,

    pub toast: Option<Toast>,
    pub status: String,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        Self {
            should_quit: false,
            tick: 0,
            view: View::Search,
            return_view: View::Search,
            search_query: String::new(),
            last_search: None,
            search_focus: SearchFocus::Input,
            results: ResultList::default(),
            resolving: false,
            lyrics: None,
            mode: LyricsMode::default(),
            variant: Variant::default(),
            localized: false,
            text_lines: Vec::new(),
            scroll: 0,
            karaoke: KaraokeModel::default(),
            focus_line: None,
            audio_name: None,
            audio_ready: false,
            toast: None,
            status: String::new(),
        }
    }

    /// Show freshly resolved lyrics, starting over in text mode.
    pub fn open_lyrics(&mut self, lyrics: ResolvedLyrics) {
        self.lyrics = Some(lyrics);
        self.mode = LyricsMode::Text;
        self.variant = Variant::Primary;
        self.localized = false;
        self.scroll = 0;
        self.focus_line = None;
        self.karaoke.set_pitch(0);
        self.refresh_display(false);
        self.view = View::Lyrics;
    }

    pub fn close_lyrics(&mut self) {
        self.lyrics = None;
        self.text_lines.clear();
        self.karaoke.set_lines(Vec::new());
        self.focus_line = None;
        self.mode = LyricsMode::Text;
        self.view = View::Search;
    }

    /// Plain and synced text of the variant on screen.
    fn variant_texts(&self) -> (Option<&str>, Option<&str>) {
        let Some(l) = &self.lyrics else {
            return (None, None);
        };
        match self.variant {
            Variant::Primary => (l.primary_plain.as_deref(), l.primary_synced.as_deref()),
            Variant::Secondary => (l.secondary_plain.as_deref(), l.secondary_synced.as_deref()),
        }
    }

    /// Rebuild what the lyrics view shows after a variant or localization change.
    ///
    /// With `keep_clock` the karaoke clock survives when the timings line up.
    pub fn refresh_display(&mut self, keep_clock: bool) {
        let (plain, synced) = self.variant_texts();

        let text_lines: Vec<String> = plain
            .unwrap_or_default()
            .lines()
            .map(|line| {
                if self.localized {
                    translit::localize(line)
                } else {
                    line.to_string()
                }
            })
            .collect();

        let timed: Vec<LyricLine> = match synced {
            Some(s) if self.localized => parser::parse_synced(&translit::localize_synced(s)),
            Some(s) => parser::parse_synced(s),
            None => Vec::new(),
        };

        self.text_lines = text_lines;
        if keep_clock {
            self.karaoke.relabel(timed);
        } else {
            self.karaoke.set_lines(timed);
            self.focus_line = None;
        }
    }

    pub fn has_secondary(&self) -> bool {
        self.lyrics.as_ref().is_some_and(|l| l.has_secondary)
    }

    pub fn has_timed_lines(&self) -> bool {
        !self.karaoke.lines().is_empty()
    }

    /// Flip between the two texts. Returns `false` if there is only one.
    pub fn toggle_variant(&mut self) -> bool {
        if !self.has_secondary() {
            return false;
        }
        self.variant = match self.variant {
            Variant::Primary => Variant::Secondary,
            Variant::Secondary => Variant::Primary,
        };
        self.scroll = 0;
        self.refresh_display(false);
        if !self.has_timed_lines() {
            self.mode = LyricsMode::Text;
        }
        true
    }

    pub fn toggle_localize(&mut self) {
        self.localized = !self.localized;
        self.refresh_display(true);
    }

    /// Move the lyrics view by `delta` lines. In karaoke mode this starts
    /// from the followed line and stops following it.
    pub fn scroll_by(&mut self, delta: isize) {
        let (len, from) = match self.mode {
            LyricsMode::Text => (self.text_lines.len(), self.scroll),
            LyricsMode::Karaoke => (
                self.karaoke.lines().len(),
                self.focus_line.take().unwrap_or(self.scroll),
            ),
        };
        self.scroll = from.saturating_add_signed(delta).min(len.saturating_sub(1));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolved(secondary: bool) -> ResolvedLyrics {
        ResolvedLyrics {
            primary_plain: Some("naan adichaa\nnaalu maasam".to_string()),
            primary_synced: Some("[00:01.00] naan adichaa\n[00:03.00] naalu maasam".to_string()),
            has_secondary: secondary,
            secondary_plain: secondary.then(|| "நான் அடிச்சா".to_string()),
            secondary_synced: None,
            title: "Naan Adichaa".to_string(),
            artist: "Anirudh".to_string(),
            artwork: None,
            external_link: String::new(),
            genre: "Tamil".to_string(),
        }
    }

    fn candidate(name: &str) -> LyricCandidate {
        LyricCandidate {
            track_name: name.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_view_names_round_trip() {
        for view in [View::Search, View::Lyrics, View::Help] {
            assert_eq!(View::from_name(view.name()), Some(view));
        }
        assert_eq!(View::from_name("library"), None);
    }

    #[test]
    fn test_result_list_navigation() {
        let mut list = ResultList::default();
        list.select_next();
        assert_eq!(list.selected, 0);

        list.set_items(vec![candidate("a"), candidate("b"), candidate("c")]);
        list.select_next();
        list.select_next();
        list.select_next();
        assert_eq!(list.selected, 2);
        list.update_scroll(2);
        assert_eq!(list.scroll_offset, 1);
        list.select_prev();
        list.select_prev();
        list.update_scroll(2);
        assert_eq!(list.scroll_offset, 0);
        assert_eq!(list.selected_candidate().map(|c| c.track_name.as_str()), Some("a"));
    }

    #[test]
    fn test_open_lyrics_resets_view_state() {
        let mut state = AppState::new();
        state.karaoke.set_pitch(5);
        state.localized = true;
        state.open_lyrics(resolved(false));

        assert_eq!(state.view, View::Lyrics);
        assert_eq!(state.mode, LyricsMode::Text);
        assert!(!state.localized);
        assert_eq!(state.karaoke.pitch(), 0);
        assert_eq!(state.text_lines, vec!["naan adichaa", "naalu maasam"]);
        assert_eq!(state.karaoke.lines().len(), 2);
    }

    #[test]
    fn test_toggle_variant() {
        let mut state = AppState::new();
        state.open_lyrics(resolved(false));
        assert!(!state.toggle_variant());
        assert_eq!(state.variant, Variant::Primary);

        state.open_lyrics(resolved(true));
        state.mode = LyricsMode::Karaoke;
        assert!(state.toggle_variant());
        assert_eq!(state.variant, Variant::Secondary);
        assert_eq!(state.text_lines, vec!["நான் அடிச்சா"]);
        // the secondary text has no timings
        assert_eq!(state.mode, LyricsMode::Text);
    }

    #[test]
    fn test_toggle_localize() {
        let mut state = AppState::new();
        state.open_lyrics(resolved(true));
        state.toggle_variant();
        state.toggle_localize();
        assert_eq!(state.text_lines, vec!["naan adichaa"]);
        state.toggle_localize();
        assert_eq!(state.text_lines, vec!["நான் அடிச்சா"]);
    }

    #[test]
    fn test_close_lyrics() {
        let mut state = AppState::new();
        state.open_lyrics(resolved(false));
        state.close_lyrics();
        assert!(state.lyrics.is_none());
        assert!(!state.has_timed_lines());
        assert_eq!(state.view, View::Search);
    }

    #[test]
    fn test_scroll_is_bounded() {
        let mut state = AppState::new();
        state.open_lyrics(resolved(false));
        state.scroll_by(10);
        assert_eq!(state.scroll, 1);
        state.scroll_by(-5);
        assert_eq!(state.scroll, 0);

        state.mode = LyricsMode::Karaoke;
        state.focus_line = Some(1);
        state.scroll_by(-1);
        assert_eq!(state.scroll, 0);
        assert!(state.focus_line.is_none());
    }
}
