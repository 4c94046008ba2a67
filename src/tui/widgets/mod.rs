pub mod controls;
pub mod help;
pub mod lyrics_view;
pub mod root;
pub mod search;

/// Cut `s` to `max_len` characters, ending in "..." when there is room.
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if max_len == 0 {
        return String::new();
    }
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len > 3 {
        let truncated: String = s.chars().take(max_len - 3).collect();
        format!("{truncated}...")
    } else {
        s.chars().take(max_len).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_str() {
        assert_eq!(truncate_str("Tum Hi Ho", 20), "Tum Hi Ho");
        assert_eq!(truncate_str("Tum Hi Ho", 6), "Tum...");
        assert_eq!(truncate_str("Tum Hi Ho", 2), "Tu");
        assert_eq!(truncate_str("Tum Hi Ho", 0), "");
        // counts characters, not bytes
        assert_eq!(truncate_str("நான் அடிச்சா", 12), "நான் அடிச்சா");
    }
}
