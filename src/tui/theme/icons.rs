//! Nerd Font icons for TUI display
//! Requires a Nerd Font to be installed (https://www.nerdfonts.com)

#[derive(Debug, Clone)]
pub struct Icons {
    // Transport
    pub play: &'static str,
    pub pause: &'static str,
    pub pitch: &'static str,

    // Views
    pub search: &'static str,
    pub lyrics: &'static str,
    pub help: &'static str,

    // Status
    pub success: &'static str,
    pub error: &'static str,

    // Song
    pub music: &'static str,
    pub artist: &'static str,
    pub album: &'static str,
    pub link: &'static str,
    pub language: &'static str,
    pub synced: &'static str,

    // Progress bar
    pub progress_full: &'static str,
    pub progress_empty: &'static str,
    pub progress_head: &'static str,
}

impl Icons {
    pub const fn nerd() -> Self {
        Self {
            play: "\u{f04b}",     // nf-fa-play
            pause: "\u{f04c}",    // nf-fa-pause
            pitch: "\u{f130}",    // nf-fa-microphone

            search: "\u{f002}",   // nf-fa-search
            lyrics: "\u{f15c}",   // nf-fa-file_text_o
            help: "\u{f059}",     // nf-fa-question_circle

            success: "\u{f00c}",  // nf-fa-check
            error: "\u{f00d}",    // nf-fa-times

            music: "\u{f001}",    // nf-fa-music
            artist: "\u{f007}",   // nf-fa-user
            album: "\u{f51f}",    // nf-md-album
            link: "\u{f0c1}",     // nf-fa-link
            language: "\u{f1ab}", // nf-fa-language
            synced: "\u{f017}",   // nf-fa-clock_o

            progress_full: "━",
            progress_empty: "─",
            progress_head: "●",
        }
    }
}

impl Default for Icons {
    fn default() -> Self {
        Self::nerd()
    }
}

/// Loading spinner frames
pub struct LoadingSpinner;

impl LoadingSpinner {
    pub const BRAILLE: [&'static str; 8] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧"];

    pub fn frame(tick: u64) -> &'static str {
        let idx = (tick / 2) as usize % Self::BRAILLE.len();
        Self::BRAILLE[idx]
    }
}
