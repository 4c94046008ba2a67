//! Lyrics acquisition
//!
//! This module provides:
//! - LRCLIB and catalog API clients
//! - LRC timestamp parsing
//! - Candidate ranking and primary/secondary selection
//! - The resolver tying them together for one song

pub mod catalog;
pub mod lrclib;
pub mod parser;
pub mod rank;
pub mod select;

pub use catalog::CatalogClient;
pub use lrclib::{LrclibClient, LyricCandidate};
pub use parser::LyricLine;

use crate::config::Config;
use crate::error::{LyricsError, Result};
use catalog::{ArtworkSize, CatalogTrack};
use rank::RankedCandidate;

const UNKNOWN_GENRE: &str = "Unknown";
const VIDEO_SEARCH_URL: &str = "https://www.youtube.com/results?search_query=";

/// Lyrics and metadata for one resolved song.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedLyrics {
    pub primary_plain: Option<String>,
    pub primary_synced: Option<String>,
    pub has_secondary: bool,
    pub secondary_plain: Option<String>,
    pub secondary_synced: Option<String>,
    pub title: String,
    pub artist: String,
    pub artwork: Option<String>,
    pub external_link: String,
    pub genre: String,
}

impl ResolvedLyrics {
    fn build(
        artist: &str,
        title: &str,
        primary: &LyricCandidate,
        secondary: Option<&LyricCandidate>,
        metadata: Option<CatalogTrack>,
    ) -> Self {
        let link = external_link(artist, title);
        let mut display_title = primary.track_name.clone();
        let mut display_artist = primary.artist_name.clone();
        let mut artwork = None;
        let mut genre = UNKNOWN_GENRE.to_string();

        if let Some(track) = metadata {
            artwork = track
                .artwork_url_100
                .as_deref()
                .map(|url| catalog::artwork_url(url, ArtworkSize::Display));
            display_title = track.track_name;
            display_artist = track.artist_name;
            if let Some(g) = track.primary_genre_name {
                genre = g;
            }
        }

        Self {
            primary_plain: display_text(primary),
            primary_synced: primary.synced().map(str::to_string),
            has_secondary: secondary.is_some(),
            secondary_plain: secondary.and_then(display_text),
            secondary_synced: secondary.and_then(|c| c.synced()).map(str::to_string),
            title: display_title,
            artist: display_artist,
            artwork,
            external_link: link,
            genre,
        }
    }
}

/// Readable text for a candidate: plain lyrics, or synced lyrics without markers.
fn display_text(candidate: &LyricCandidate) -> Option<String> {
    if let Some(plain) = candidate.plain() {
        return Some(plain.to_string());
    }
    candidate.synced().map(parser::strip_line_markers)
}

/// "Watch video" search link for a song.
pub fn external_link(artist: &str, title: &str) -> String {
    let query = format!("{artist} {title}");
    format!("{VIDEO_SEARCH_URL}{}", urlencoding::encode(&query))
}

/// Issues the lyric and catalog requests for one song and picks the result.
#[derive(Debug, Clone)]
pub struct Resolver {
    lrclib: LrclibClient,
    catalog: CatalogClient,
}

impl Resolver {
    pub fn new(cfg: &Config) -> anyhow::Result<Self> {
        Ok(Self {
            lrclib: LrclibClient::new(&cfg.lyrics)?,
            catalog: CatalogClient::new(&cfg.catalog)?,
        })
    }

    /// Result list for a free-text search.
    pub async fn search_songs(&self, query: &str) -> Result<Vec<LyricCandidate>> {
        self.lrclib.search(query).await
    }

    /// List-sized artwork for a search result. Lookup failures mean no art.
    pub async fn thumbnail(&self, artist: &str, title: &str) -> Option<String> {
        match self.catalog.lookup(&format!("{artist} {title}")).await {
            Ok(track) => track
                .and_then(|t| t.artwork_url_100)
                .map(|url| catalog::artwork_url(&url, ArtworkSize::Thumbnail)),
            Err(e) => {
                tracing::debug!("thumbnail lookup failed: {e}");
                None
            }
        }
    }

    /// Resolve lyrics for a song.
    ///
    /// `cached` is the record picked from a result list; when it already
    /// carries lyrics the standard search is skipped.
    pub async fn resolve(
        &self,
        artist: &str,
        title: &str,
        cached: Option<LyricCandidate>,
    ) -> Result<ResolvedLyrics> {
        let query = format!("{artist} {title}");
        let romanized_query = format!("{query} romanized");
        tracing::info!(%query, "resolving lyrics");

        // Fired right away; only joined if the selector asks for it.
        let speculative = {
            let lrclib = self.lrclib.clone();
            tokio::spawn(async move { lrclib.search(&romanized_query).await })
        };

        let standard = async {
            match cached.filter(LyricCandidate::is_usable) {
                Some(c) => Ok(vec![c]),
                None => self.lrclib.search(&query).await,
            }
        };
        let metadata = async {
            self.catalog
                .lookup(&query)
                .await
                .map_err(|e| LyricsError::UpstreamUnavailable(e.to_string()))
        };

        let (standard, metadata) = tokio::join!(standard, metadata);
        let metadata = metadata.unwrap_or_else(|e| {
            tracing::warn!("catalog lookup failed: {e}");
            None
        });

        let ranked = match standard.and_then(rank::rank) {
            Ok(ranked) => ranked,
            Err(e) => {
                speculative.abort();
                return Err(e);
            }
        };

        let abort = speculative.abort_handle();
        let romanized = async move {
            match speculative.await {
                Ok(Ok(results)) => results,
                Ok(Err(e)) => {
                    tracing::warn!("{}", LyricsError::UpstreamUnavailable(e.to_string()));
                    Vec::new()
                }
                Err(e) => {
                    tracing::warn!("romanized search task failed: {e}");
                    Vec::new()
                }
            }
        };

        let selection = select::select(ranked, romanized)
            .await
            .ok_or(LyricsError::NoCandidates)?;
        abort.abort();

        Ok(assemble(artist, title, selection, metadata))
    }
}

fn assemble(
    artist: &str,
    title: &str,
    selection: select::Selection,
    metadata: Option<CatalogTrack>,
) -> ResolvedLyrics {
    let select::Selection { primary, secondary } = selection;
    let RankedCandidate { candidate: primary, .. } = primary;
    let secondary = secondary.map(|s| s.candidate);
    ResolvedLyrics::build(artist, title, &primary, secondary.as_ref(), metadata)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(plain: Option<&str>, synced: Option<&str>) -> LyricCandidate {
        LyricCandidate {
            track_name: "Naan Adichaa".to_string(),
            artist_name: "Anirudh".to_string(),
            plain_lyrics: plain.map(str::to_string),
            synced_lyrics: synced.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn test_external_link_is_url_safe() {
        assert_eq!(
            external_link("Arijit Singh", "Tum Hi Ho"),
            "https://www.youtube.com/results?search_query=Arijit%20Singh%20Tum%20Hi%20Ho"
        );
        assert!(external_link("a&b", "c?").ends_with("a%26b%20c%3F"));
    }

    #[test]
    fn test_build_without_metadata() {
        let primary = candidate(None, Some("[00:01.00] naan\n[00:02.00] adichaa"));
        let resolved = ResolvedLyrics::build("Anirudh", "Naan Adichaa", &primary, None, None);
        assert_eq!(resolved.primary_plain.as_deref(), Some("naan\nadichaa"));
        assert!(resolved.primary_synced.is_some());
        assert!(!resolved.has_secondary);
        assert_eq!(resolved.title, "Naan Adichaa");
        assert_eq!(resolved.genre, "Unknown");
        assert!(resolved.artwork.is_none());
    }

    #[test]
    fn test_build_with_metadata_and_secondary() {
        let primary = candidate(Some("naan adichaa"), None);
        let secondary = candidate(Some("நான் அடிச்சா"), Some("[00:01.00] நான்"));
        let meta = CatalogTrack {
            artwork_url_100: Some("http://x/100x100bb.jpg".to_string()),
            track_name: "Naan Adicha".to_string(),
            artist_name: "Anirudh Ravichander".to_string(),
            primary_genre_name: Some("Tamil".to_string()),
        };
        let resolved = ResolvedLyrics::build("Anirudh", "Naan Adichaa", &primary, Some(&secondary), Some(meta));
        assert!(resolved.has_secondary);
        assert_eq!(resolved.secondary_plain.as_deref(), Some("நான் அடிச்சா"));
        assert_eq!(resolved.secondary_synced.as_deref(), Some("[00:01.00] நான்"));
        assert_eq!(resolved.artwork.as_deref(), Some("http://x/600x600bb.jpg"));
        assert_eq!(resolved.artist, "Anirudh Ravichander");
        assert_eq!(resolved.genre, "Tamil");
    }

    #[test]
    fn test_link_uses_requested_names_when_catalog_renames() {
        let primary = candidate(Some("naan adichaa"), None);
        let meta = CatalogTrack {
            artwork_url_100: None,
            track_name: "Naan Adicha (From \"Vettaiyan\")".to_string(),
            artist_name: "Anirudh Ravichander".to_string(),
            primary_genre_name: None,
        };
        let resolved = ResolvedLyrics::build("Anirudh", "Naan Adichaa", &primary, None, Some(meta));
        assert_eq!(resolved.title, "Naan Adicha (From \"Vettaiyan\")");
        assert_eq!(resolved.external_link, external_link("Anirudh", "Naan Adichaa"));
        assert!(resolved.external_link.ends_with("Anirudh%20Naan%20Adichaa"));
    }

    /// A resolver whose collaborators all refuse connections.
    fn offline_resolver() -> Resolver {
        let mut cfg = Config::default();
        cfg.lyrics.base_url = "http://127.0.0.1:1".to_string();
        cfg.catalog.base_url = "http://127.0.0.1:1".to_string();
        Resolver::new(&cfg).unwrap()
    }

    #[tokio::test]
    async fn test_cached_candidate_survives_failed_collaborators() {
        // Native-script text makes the selector wait on the romanized search,
        // which fails like the catalog does; both are absorbed.
        let cached = candidate(Some("நான் அடிச்சா"), None);
        let resolved = offline_resolver()
            .resolve("Anirudh", "Naan Adichaa", Some(cached))
            .await
            .unwrap();
        assert_eq!(resolved.genre, "Unknown");
        assert!(resolved.artwork.is_none());
        assert!(!resolved.has_secondary);
        assert_eq!(resolved.primary_plain.as_deref(), Some("நான் அடிச்சா"));
        assert_eq!(resolved.title, "Naan Adichaa");
    }

    #[tokio::test]
    async fn test_failed_standard_search_propagates() {
        let err = offline_resolver()
            .resolve("A", "T", None)
            .await
            .unwrap_err();
        assert!(matches!(err, LyricsError::Http(_)), "{err}");
    }

    #[tokio::test]
    async fn test_unusable_cached_candidate_falls_back_to_search() {
        let empty = candidate(None, None);
        let err = offline_resolver()
            .resolve("A", "T", Some(empty))
            .await
            .unwrap_err();
        assert!(matches!(err, LyricsError::Http(_)), "{err}");
    }

    #[tokio::test]
    async fn test_thumbnail_without_catalog_is_none() {
        let thumb = offline_resolver().thumbnail("Anirudh", "Naan Adichaa").await;
        assert!(thumb.is_none());
    }

    #[tokio::test]
    async fn test_assemble_from_selection() {
        let ranked = rank::rank(vec![
            candidate(Some("naan adichaa"), None),
            candidate(Some("நான் அடிச்சா"), None),
        ])
        .unwrap();
        let selection = select::select(ranked, async { Vec::new() }).await.unwrap();
        let resolved = assemble("Anirudh", "Naan Adichaa", selection, None);
        assert_eq!(resolved.primary_plain.as_deref(), Some("naan adichaa"));
        assert!(resolved.has_secondary);
    }
}
