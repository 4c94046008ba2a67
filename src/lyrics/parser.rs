//! LRC format parser
//!
//! Parses synchronized lyrics in LRC format:
//! [mm:ss.xx] Lyrics line here
//!
//! Example:
//! [00:12.34] Hello world
//! [00:15.00] Another line

use once_cell::sync::Lazy;
use regex::Regex;

/// `[mm:ss.ff]` or `[mm:ss.fff]`, anywhere in a line.
pub static TIMESTAMP: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[(\d{2}):(\d{2})\.(\d{2,3})\]").unwrap());

/// A timestamp at the very start of a line (after optional whitespace).
pub static LEADING_TIMESTAMP: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(\[\d{2}:\d{2}\.\d{2,3}\])(.*)$").unwrap());

static LEADING_MARKERS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:\s*\[\d{2}:\d{2}\.\d{2,3}\])+").unwrap());

/// A single line of lyrics with timestamp
#[derive(Debug, Clone, PartialEq)]
pub struct LyricLine {
    /// Offset from the start of the song, in seconds
    pub time_secs: f64,
    /// The lyrics text
    pub text: String,
}

impl LyricLine {
    pub fn new(time_secs: f64, text: String) -> Self {
        Self { time_secs, text }
    }
}

/// Parse a synced lyric block into timed lines.
///
/// Lines without a marker, or with nothing left after the marker, are
/// skipped. Output keeps source order and is never re-sorted.
pub fn parse_synced(content: &str) -> Vec<LyricLine> {
    content.lines().filter_map(parse_line).collect()
}

fn parse_line(line: &str) -> Option<LyricLine> {
    let caps = TIMESTAMP.captures(line)?;
    let whole = caps.get(0)?;

    let min: u32 = caps[1].parse().ok()?;
    let sec: u32 = caps[2].parse().ok()?;
    // Fraction is read as hundredths even when three digits are present.
    let frac: u32 = caps[3].parse().ok()?;
    let time_secs = f64::from(min) * 60.0 + f64::from(sec) + f64::from(frac) / 100.0;

    let mut text = String::with_capacity(line.len());
    text.push_str(&line[..whole.start()]);
    text.push_str(LEADING_MARKERS.replace(&line[whole.end()..], "").as_ref());
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    Some(LyricLine::new(time_secs, text.to_string()))
}

/// Remove every timestamp marker from the text.
pub fn strip_timestamps(text: &str) -> String {
    TIMESTAMP.replace_all(text, "").into_owned()
}

/// Remove the leading marker of each line, keeping the rest of the line.
///
/// Used to show synced-only lyrics as plain text.
pub fn strip_line_markers(text: &str) -> String {
    text.lines()
        .map(|line| match LEADING_TIMESTAMP.captures(line) {
            Some(caps) => caps[2].trim_start().to_string(),
            None => line.to_string(),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// `mm:ss` clock display.
pub fn format_timestamp(secs: f64) -> String {
    let total = if secs.is_finite() && secs > 0.0 {
        secs.floor() as u64
    } else {
        0
    };
    format!("{:02}:{:02}", total / 60, total % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_lrc() {
        let lrc = r#"
[ti:Test Song]
[ar:Test Artist]
[00:12.34]First line
[00:15.00] Second line
"#;
        let parsed = parse_synced(lrc);
        assert_eq!(parsed.len(), 2);
        assert!((parsed[0].time_secs - 12.34).abs() < 1e-9);
        assert_eq!(parsed[0].text, "First line");
        assert_eq!(parsed[1].text, "Second line");
    }

    #[test]
    fn test_three_digit_fraction_is_hundredths() {
        let parsed = parse_synced("[01:02.500] hello");
        assert_eq!(parsed.len(), 1);
        assert!((parsed[0].time_secs - (62.0 + 5.0)).abs() < 1e-9);
    }

    #[test]
    fn test_drops_empty_and_unmarked_lines() {
        let lrc = "[00:01.00]\nno marker here\n[00:02.00]   \n[0:03.00] bad\n[00:04.00] ok";
        let parsed = parse_synced(lrc);
        assert_eq!(parsed, vec![LyricLine::new(4.0, "ok".to_string())]);
    }

    #[test]
    fn test_keeps_source_order() {
        let parsed = parse_synced("[00:10.00] b\n[00:05.00] a");
        assert_eq!(parsed[0].text, "b");
        assert_eq!(parsed[1].text, "a");
    }

    #[test]
    fn test_repeated_markers_use_first_time() {
        let parsed = parse_synced("[00:01.00][00:30.00] chorus");
        assert_eq!(parsed.len(), 1);
        assert!((parsed[0].time_secs - 1.0).abs() < 1e-9);
        assert_eq!(parsed[0].text, "chorus");
    }

    #[test]
    fn test_parse_is_pure() {
        let lrc = "[00:01.00] a\nskip\n[00:02.50] b\n[00:03.00]";
        let first = parse_synced(lrc);
        let second = parse_synced(lrc);
        assert_eq!(first, second);
        assert!(first.len() <= lrc.lines().count());
        assert!(first.iter().all(|l| l.time_secs >= 0.0));
        assert!(parse_synced("").is_empty());
    }

    #[test]
    fn test_strip_helpers() {
        assert_eq!(strip_timestamps("[00:01.00]a [00:02.123]b"), "a b");
        assert_eq!(
            strip_line_markers("[00:01.00] first\nplain\n[00:02.00]second"),
            "first\nplain\nsecond"
        );
    }

    #[test]
    fn test_format_timestamp() {
        assert_eq!(format_timestamp(0.0), "00:00");
        assert_eq!(format_timestamp(75.9), "01:15");
        assert_eq!(format_timestamp(-3.0), "00:00");
    }
}
