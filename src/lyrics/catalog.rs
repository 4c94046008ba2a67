//! iTunes Search API client, used for artwork, canonical names and genre.

use crate::config::CatalogConfig;
use crate::error::{LyricsError, Result};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(rename = "resultCount", default)]
    result_count: u32,
    #[serde(default)]
    results: Vec<CatalogTrack>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct CatalogTrack {
    #[serde(rename = "artworkUrl100")]
    pub artwork_url_100: Option<String>,
    #[serde(rename = "trackName")]
    pub track_name: String,
    #[serde(rename = "artistName")]
    pub artist_name: String,
    #[serde(rename = "primaryGenreName")]
    pub primary_genre_name: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtworkSize {
    /// Large art on the lyrics screen
    Display,
    /// Result list thumbnail
    Thumbnail,
}

impl ArtworkSize {
    fn token(self) -> &'static str {
        match self {
            ArtworkSize::Display => "600x600",
            ArtworkSize::Thumbnail => "300x300",
        }
    }
}

/// Swap the `100x100` size token for the requested size.
pub fn artwork_url(url_100: &str, size: ArtworkSize) -> String {
    url_100.replace("100x100", size.token())
}

#[derive(Debug, Clone)]
pub struct CatalogClient {
    client: reqwest::Client,
    base_url: String,
}

impl CatalogClient {
    pub fn new(cfg: &CatalogConfig) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(cfg.timeout_secs))
            .build()?;
        Ok(Self {
            client,
            base_url: cfg.base_url.clone(),
        })
    }

    /// Look up the single best song match for a free-text term.
    pub async fn lookup(&self, term: &str) -> Result<Option<CatalogTrack>> {
        let url = format!(
            "{}?term={}&entity=song&limit=1",
            self.base_url,
            urlencoding::encode(term)
        );

        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(LyricsError::Status {
                service: "catalog",
                status: response.status(),
            });
        }

        let body: SearchResponse = response.json().await?;
        Ok(first_track(body))
    }
}

fn first_track(body: SearchResponse) -> Option<CatalogTrack> {
    if body.result_count == 0 {
        return None;
    }
    body.results.into_iter().next()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_artwork_sizes() {
        let url = "https://is1.mzstatic.com/image/thumb/abc/100x100bb.jpg";
        assert_eq!(
            artwork_url(url, ArtworkSize::Display),
            "https://is1.mzstatic.com/image/thumb/abc/600x600bb.jpg"
        );
        assert_eq!(
            artwork_url(url, ArtworkSize::Thumbnail),
            "https://is1.mzstatic.com/image/thumb/abc/300x300bb.jpg"
        );
    }

    #[test]
    fn test_decode_response() {
        let raw = r#"{"resultCount":1,"results":[{"artworkUrl100":"http://a/100x100.jpg",
            "trackName":"Tum Hi Ho","artistName":"Arijit Singh","primaryGenreName":"Bollywood",
            "trackId": 1}]}"#;
        let body: SearchResponse = serde_json::from_str(raw).unwrap();
        let track = first_track(body).unwrap();
        assert_eq!(track.track_name, "Tum Hi Ho");
        assert_eq!(track.primary_genre_name.as_deref(), Some("Bollywood"));
    }

    #[test]
    fn test_zero_results() {
        let body: SearchResponse =
            serde_json::from_str(r#"{"resultCount":0,"results":[]}"#).unwrap();
        assert!(first_track(body).is_none());
    }
}
