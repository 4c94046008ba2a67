//! Script detection for Brahmic lyric text.

/// Writing systems the transliterator understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Script {
    Devanagari,
    Tamil,
    Telugu,
    Kannada,
    Malayalam,
    Bengali,
}

impl Script {
    /// Order in which blocks are checked. The first block present wins.
    pub const PRIORITY: [Script; 6] = [
        Script::Malayalam,
        Script::Devanagari,
        Script::Tamil,
        Script::Telugu,
        Script::Kannada,
        Script::Bengali,
    ];

    /// First code point of the script's 128-wide Unicode block.
    pub fn block_start(self) -> u32 {
        match self {
            Script::Devanagari => 0x0900,
            Script::Bengali => 0x0980,
            Script::Tamil => 0x0B80,
            Script::Telugu => 0x0C00,
            Script::Kannada => 0x0C80,
            Script::Malayalam => 0x0D00,
        }
    }

    pub fn contains(self, c: char) -> bool {
        let start = self.block_start();
        (start..start + 0x80).contains(&(c as u32))
    }

    /// Offset of `c` inside this script's block.
    pub fn offset(self, c: char) -> Option<u8> {
        self.contains(c).then(|| (c as u32 - self.block_start()) as u8)
    }

    pub fn name(self) -> &'static str {
        match self {
            Script::Devanagari => "devanagari",
            Script::Tamil => "tamil",
            Script::Telugu => "telugu",
            Script::Kannada => "kannada",
            Script::Malayalam => "malayalam",
            Script::Bengali => "bengali",
        }
    }
}

/// Detect the script of a fragment.
///
/// A single code point of a block is enough; `None` means Latin or some
/// other script this crate does not handle.
pub fn classify(text: &str) -> Option<Script> {
    Script::PRIORITY
        .into_iter()
        .find(|script| text.chars().any(|c| script.contains(c)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_each_script() {
        assert_eq!(classify("तुम ही हो"), Some(Script::Devanagari));
        assert_eq!(classify("நான் அடிச்சா"), Some(Script::Tamil));
        assert_eq!(classify("నువ్వే"), Some(Script::Telugu));
        assert_eq!(classify("ನೀನೇ"), Some(Script::Kannada));
        assert_eq!(classify("മലരേ മൗനമാ"), Some(Script::Malayalam));
        assert_eq!(classify("আমার"), Some(Script::Bengali));
    }

    #[test]
    fn test_classify_none() {
        assert_eq!(classify(""), None);
        assert_eq!(classify("tum hi ho"), None);
        assert_eq!(classify("Beyoncé 東京"), None);
    }

    #[test]
    fn test_single_code_point_is_enough() {
        assert_eq!(classify("mostly latin text ம"), Some(Script::Tamil));
    }

    #[test]
    fn test_priority_order_for_mixed_text() {
        // Tamil appears first in the text, Malayalam is checked first.
        assert_eq!(classify("நான് മലരേ"), Some(Script::Malayalam));
        assert_eq!(classify("আমার नमस्ते"), Some(Script::Devanagari));
    }

    #[test]
    fn test_offsets() {
        assert_eq!(Script::Tamil.offset('க'), Some(0x15));
        assert_eq!(Script::Devanagari.offset('क'), Some(0x15));
        assert_eq!(Script::Tamil.offset('क'), None);
    }
}
