//! Readability scoring and candidate ranking.
//!
//! The score is the share of ASCII characters in a lyric text once timestamps
//! and whitespace are removed. It is the only signal used to tell romanized
//! lyrics from native-script ones.

use super::lrclib::LyricCandidate;
use super::parser::strip_timestamps;
use crate::error::{LyricsError, Result};

#[derive(Debug, Clone, PartialEq)]
pub struct RankedCandidate {
    pub candidate: LyricCandidate,
    pub score: f64,
}

/// ASCII share of the non-whitespace, non-timestamp characters; 0 for empty text.
pub fn readability_score(text: &str) -> f64 {
    let cleaned = strip_timestamps(text);
    let (total, ascii) = cleaned
        .chars()
        .filter(|c| !c.is_whitespace())
        .fold((0usize, 0usize), |(total, ascii), c| {
            (total + 1, ascii + usize::from(c.is_ascii()))
        });

    if total == 0 {
        return 0.0;
    }
    ascii as f64 / total as f64
}

pub fn candidate_score(candidate: &LyricCandidate) -> f64 {
    candidate.lyric_text().map(readability_score).unwrap_or(0.0)
}

/// Filter, score and order candidates, most readable first.
///
/// Ties keep their input order.
pub fn rank(results: Vec<LyricCandidate>) -> Result<Vec<RankedCandidate>> {
    let ranked = rank_lenient(results);
    if ranked.is_empty() {
        return Err(LyricsError::NoCandidates);
    }
    Ok(ranked)
}

/// Like [`rank`], but an empty result is not an error.
pub fn rank_lenient(results: Vec<LyricCandidate>) -> Vec<RankedCandidate> {
    let mut ranked: Vec<RankedCandidate> = results
        .into_iter()
        .filter(LyricCandidate::is_usable)
        .map(|candidate| RankedCandidate {
            score: candidate_score(&candidate),
            candidate,
        })
        .collect();

    // sort_by is stable
    ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
    ranked
}
