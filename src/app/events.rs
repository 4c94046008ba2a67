use crate::lyrics::{LyricCandidate, ResolvedLyrics};
use crate::player::AudioDeck;

#[derive(Debug)]
pub enum Event {
    Input(InputEvent),
    Player(PlayerEvent),
    Audio(AudioEvent),
    Network(NetworkEvent),
}

#[derive(Debug, Clone)]
pub enum InputEvent {
    Key(crossterm::event::KeyEvent),
    Mouse(crossterm::event::MouseEvent),
    Resize,
}

#[derive(Debug, Clone)]
pub enum PlayerEvent {
    Started,
    Paused,
    Position { seconds: f64 },
    Ended,
    Error(String),
}

/// Outcome of a background backing-track load. `generation` names the song
/// the load was started for.
#[derive(Debug)]
pub enum AudioEvent {
    Ready { generation: u64, deck: AudioDeck },
    Failed { generation: u64, error: String },
}

#[derive(Debug, Clone)]
pub enum NetworkEvent {
    Error(String),
    SearchResults { query: String, items: Vec<LyricCandidate> },
    /// Artwork for the result at `index` of the search for `query`.
    Thumbnail { query: String, index: usize, url: Option<String> },
    Resolved { lyrics: Box<ResolvedLyrics> },
    ResolveFailed(String),
}
