//! Primary/secondary lyric selection.
//!
//! The standard search result is trusted when it already reads as Latin text.
//! When it looks native-script the speculative "romanized" search is consulted;
//! when it is clearly romanized, a native-script alternative from the same
//! result set is kept for toggling.

use super::lrclib::LyricCandidate;
use super::rank::{rank_lenient, RankedCandidate};
use std::future::Future;

/// Below this the best standard result counts as native script.
pub const NATIVE_THRESHOLD: f64 = 0.5;
/// A result above this counts as properly romanized.
pub const ROMANIZED_THRESHOLD: f64 = 0.8;
/// The worst standard result must fall below this to be offered as secondary.
pub const SECONDARY_THRESHOLD: f64 = 0.6;

#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub primary: RankedCandidate,
    pub secondary: Option<RankedCandidate>,
}

impl Selection {
    pub fn has_secondary(&self) -> bool {
        self.secondary.is_some()
    }
}

/// Pick primary and secondary lyrics.
///
/// `standard` must be non-empty and ranked. `romanized` is only awaited when
/// the best standard candidate is native-script dominant.
pub async fn select<F>(mut standard: Vec<RankedCandidate>, romanized: F) -> Option<Selection>
where
    F: Future<Output = Vec<LyricCandidate>>,
{
    if standard.is_empty() {
        return None;
    }
    let worst = standard.pop()?;
    let best = if standard.is_empty() {
        worst.clone()
    } else {
        standard.swap_remove(0)
    };

    if best.score < NATIVE_THRESHOLD {
        tracing::info!(score = best.score, "standard result is native script, checking romanized search");
        let alternatives = rank_lenient(romanized.await);
        if let Some(alt) = alternatives.into_iter().next()
            && alt.score > ROMANIZED_THRESHOLD
        {
            tracing::info!(score = alt.score, "romanized search provided better lyrics");
            return Some(Selection {
                primary: alt,
                secondary: Some(best),
            });
        }
        return Some(Selection {
            primary: best,
            secondary: None,
        });
    }

    let secondary = (best.score > ROMANIZED_THRESHOLD && worst.score < SECONDARY_THRESHOLD)
        .then_some(worst);
    if secondary.is_some() {
        tracing::debug!("keeping native-script alternative as secondary");
    }

    Some(Selection {
        primary: best,
        secondary,
    })
}
