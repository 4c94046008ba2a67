//! Colour palettes, one per genre family

use ratatui::style::Color;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub bg_primary: Color,
    pub bg_secondary: Color,
    pub bg_highlight: Color,
    pub fg_primary: Color,
    pub fg_secondary: Color,
    pub accent: Color,
    pub accent_alt: Color,
    pub border: Color,
    pub error: Color,
}

impl Palette {
    /// Slate and violet, for anything unrecognised
    pub const AURORA: Self = Self {
        bg_primary: Color::Rgb(15, 23, 42),     // slate-900
        bg_secondary: Color::Rgb(30, 27, 58),
        bg_highlight: Color::Rgb(59, 7, 100),   // purple-950
        fg_primary: Color::Rgb(255, 255, 255),
        fg_secondary: Color::Rgb(148, 163, 184), // slate-400
        accent: Color::Rgb(192, 132, 252),      // purple-400
        accent_alt: Color::Rgb(216, 180, 254),  // purple-300
        border: Color::Rgb(71, 85, 105),        // slate-600
        error: Color::Rgb(248, 113, 113),
    };

    pub const POP: Self = Self {
        bg_primary: Color::Rgb(76, 5, 25),      // rose-950
        bg_secondary: Color::Rgb(131, 24, 67),  // pink-900
        bg_highlight: Color::Rgb(190, 24, 93),  // pink-700
        fg_primary: Color::Rgb(255, 255, 255),
        fg_secondary: Color::Rgb(251, 207, 232), // pink-200
        accent: Color::Rgb(255, 255, 255),
        accent_alt: Color::Rgb(234, 179, 8),    // yellow-500
        border: Color::Rgb(236, 72, 153),       // pink-500
        error: Color::Rgb(254, 240, 138),
    };

    pub const ROCK: Self = Self {
        bg_primary: Color::Rgb(0, 0, 0),
        bg_secondary: Color::Rgb(17, 24, 39),   // gray-900
        bg_highlight: Color::Rgb(127, 29, 29),  // red-900
        fg_primary: Color::Rgb(243, 244, 246),
        fg_secondary: Color::Rgb(156, 163, 175),
        accent: Color::Rgb(239, 68, 68),        // red-500
        accent_alt: Color::Rgb(252, 165, 165),
        border: Color::Rgb(127, 29, 29),
        error: Color::Rgb(250, 204, 21),
    };

    pub const HIP_HOP: Self = Self {
        bg_primary: Color::Rgb(30, 27, 75),     // indigo-950
        bg_secondary: Color::Rgb(49, 46, 129),  // indigo-900
        bg_highlight: Color::Rgb(88, 28, 135),  // purple-900
        fg_primary: Color::Rgb(255, 255, 255),
        fg_secondary: Color::Rgb(165, 180, 252),
        accent: Color::Rgb(250, 204, 21),       // yellow-400
        accent_alt: Color::Rgb(253, 224, 71),
        border: Color::Rgb(67, 56, 202),        // indigo-700
        error: Color::Rgb(248, 113, 113),
    };

    pub const CLASSICAL: Self = Self {
        bg_primary: Color::Rgb(26, 26, 26),
        bg_secondary: Color::Rgb(44, 44, 44),
        bg_highlight: Color::Rgb(61, 61, 61),
        fg_primary: Color::Rgb(250, 250, 249),
        fg_secondary: Color::Rgb(168, 162, 158),
        accent: Color::Rgb(253, 230, 138),      // amber-200
        accent_alt: Color::Rgb(252, 211, 77),
        border: Color::Rgb(87, 83, 78),
        error: Color::Rgb(248, 113, 113),
    };

    pub const ELECTRONIC: Self = Self {
        bg_primary: Color::Rgb(8, 51, 68),      // cyan-950
        bg_secondary: Color::Rgb(23, 37, 84),   // blue-950
        bg_highlight: Color::Rgb(22, 78, 99),   // cyan-900
        fg_primary: Color::Rgb(236, 254, 255),
        fg_secondary: Color::Rgb(103, 232, 249),
        accent: Color::Rgb(34, 211, 238),       // cyan-400
        accent_alt: Color::Rgb(167, 139, 250),  // violet-400
        border: Color::Rgb(14, 116, 144),       // cyan-700
        error: Color::Rgb(244, 114, 182),
    };

    pub const WORLD: Self = Self {
        bg_primary: Color::Rgb(69, 10, 10),     // red-950
        bg_secondary: Color::Rgb(124, 45, 18),  // orange-900
        bg_highlight: Color::Rgb(153, 27, 27),  // red-800
        fg_primary: Color::Rgb(255, 247, 237),
        fg_secondary: Color::Rgb(254, 215, 170),
        accent: Color::Rgb(253, 186, 116),      // orange-300
        accent_alt: Color::Rgb(251, 146, 60),
        border: Color::Rgb(194, 65, 12),        // orange-700
        error: Color::Rgb(254, 240, 138),
    };
}

impl Default for Palette {
    fn default() -> Self {
        Self::AURORA
    }
}
