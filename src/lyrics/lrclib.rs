//! LRCLIB API client
//!
//! LRCLIB is a free lyrics API that provides synchronized (LRC format) lyrics.
//! API Documentation: https://lrclib.net/docs

use crate::config::LyricsConfig;
use crate::error::{LyricsError, Result};
use serde::{Deserialize, Serialize};

/// One LRCLIB search record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LyricCandidate {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(rename = "trackName", default)]
    pub track_name: String,
    #[serde(rename = "artistName", default)]
    pub artist_name: String,
    #[serde(rename = "albumName", default)]
    pub album_name: Option<String>,
    #[serde(default)]
    pub duration: Option<f64>,
    #[serde(rename = "plainLyrics", default)]
    pub plain_lyrics: Option<String>,
    #[serde(rename = "syncedLyrics", default)]
    pub synced_lyrics: Option<String>,
}

impl LyricCandidate {
    pub fn plain(&self) -> Option<&str> {
        self.plain_lyrics.as_deref().filter(|s| !s.is_empty())
    }

    pub fn synced(&self) -> Option<&str> {
        self.synced_lyrics.as_deref().filter(|s| !s.is_empty())
    }

    /// Carries some lyric text at all.
    pub fn is_usable(&self) -> bool {
        self.plain().is_some() || self.synced().is_some()
    }

    /// Plain text when present, synced text otherwise.
    pub fn lyric_text(&self) -> Option<&str> {
        self.plain().or_else(|| self.synced())
    }
}

/// LRCLIB API client
#[derive(Debug, Clone)]
pub struct LrclibClient {
    client: reqwest::Client,
    base_url: String,
}

impl LrclibClient {
    pub fn new(cfg: &LyricsConfig) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(cfg.user_agent.as_str())
            .timeout(std::time::Duration::from_secs(cfg.timeout_secs))
            .build()?;
        Ok(Self {
            client,
            base_url: cfg.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Search for lyrics by free-text query
    pub async fn search(&self, query: &str) -> Result<Vec<LyricCandidate>> {
        let url = format!("{}/search?q={}", self.base_url, urlencoding::encode(query));
        tracing::debug!(%query, "lrclib search");

        let response = self.client.get(&url).send().await?;

        if response.status().is_success() {
            let results: Vec<LyricCandidate> = response.json().await?;
            tracing::debug!(%query, count = results.len(), "lrclib results");
            Ok(results)
        } else if response.status() == reqwest::StatusCode::NOT_FOUND {
            Ok(Vec::new())
        } else {
            Err(LyricsError::Status {
                service: "LRCLIB",
                status: response.status(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_search_records() {
        let raw = r#"[
            {"id": 7, "trackName": "Song", "artistName": "Artist", "albumName": null,
             "duration": 201.0, "plainLyrics": "hello", "syncedLyrics": null},
            {"trackName": "Bare", "artistName": "Nobody", "instrumental": true}
        ]"#;
        let records: Vec<LyricCandidate> = serde_json::from_str(raw).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, Some(7));
        assert_eq!(records[0].lyric_text(), Some("hello"));
        assert!(records[0].is_usable());
        assert!(!records[1].is_usable());
    }

    #[test]
    fn test_empty_strings_are_not_usable() {
        let c = LyricCandidate {
            plain_lyrics: Some(String::new()),
            synced_lyrics: Some("[00:01.00] x".to_string()),
            ..Default::default()
        };
        assert!(c.is_usable());
        assert_eq!(c.plain(), None);
        assert_eq!(c.lyric_text(), Some("[00:01.00] x"));
    }
}
