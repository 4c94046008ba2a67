//! Native-script to Latin conversion.
//!
//! `localize` classifies a fragment, transliterates it with the scheme that
//! suits the script, and runs the readability rewrite. Text in no known
//! script goes through a generic Unicode-to-ASCII fold instead.

pub mod rewrite;
pub mod scheme;
pub mod script;

pub use scheme::Scheme;
pub use script::{classify, Script};

use crate::lyrics::parser::LEADING_TIMESTAMP;
use any_ascii::any_ascii;

/// Scheme used to build the skeleton for `script`.
///
/// Harvard-Kyoto keeps ṅ, ṉ and ṟ apart, which the Tamil rules depend on.
pub fn scheme_for(script: Script) -> Scheme {
    match script {
        Script::Tamil => Scheme::HarvardKyoto,
        _ => Scheme::Itrans,
    }
}

/// Fold text of no recognized script to ASCII, keeping case.
pub fn normalize_latin(text: &str) -> String {
    any_ascii(&rewrite::strip_marks(text))
}

/// Readable Latin rendering of a lyric fragment.
pub fn localize(text: &str) -> String {
    match classify(text) {
        None => normalize_latin(text),
        Some(script) => {
            let skeleton = scheme::transliterate(text, script, scheme_for(script));
            tracing::trace!(script = script.name(), %skeleton, "transliterated");
            rewrite::rewrite(&skeleton, script)
        }
    }
}

/// [`localize`] the text of every timed line, leaving markers alone.
///
/// Lines without a leading marker are copied unchanged.
pub fn localize_synced(synced: &str) -> String {
    synced
        .lines()
        .map(|line| match LEADING_TIMESTAMP.captures(line) {
            Some(caps) => {
                let text = caps[2].trim();
                if text.is_empty() {
                    caps[1].to_string()
                } else {
                    format!("{} {}", &caps[1], localize(text))
                }
            }
            None => line.to_string(),
        })
        .collect::<Vec<_>>()
        .join("\n")
}
