//! Error type for lyrics acquisition.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LyricsError {
    /// No search result carries usable lyric text.
    #[error("lyrics not found")]
    NoCandidates,

    /// A non-essential collaborator (catalog, romanized search) failed.
    #[error("upstream unavailable: {0}")]
    UpstreamUnavailable(String),

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{service} returned {status}")]
    Status {
        service: &'static str,
        status: reqwest::StatusCode,
    },
}

pub type Result<T> = std::result::Result<T, LyricsError>;
