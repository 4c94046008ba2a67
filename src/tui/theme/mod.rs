//! Genre-driven theme
//!
//! The catalog genre of the song on screen picks a palette and a short
//! "vibe" label for the header. Anything unrecognised gets Aurora.

pub mod icons;
pub mod palette;

pub use icons::{Icons, LoadingSpinner};
pub use palette::Palette;

#[derive(Debug, Clone)]
pub struct Theme {
    pub name: &'static str,
    pub vibe: &'static str,
    pub palette: Palette,
    pub icons: Icons,
}

/// Genre keywords, checked in order against the lowercased genre.
const GENRE_THEMES: &[(&[&str], &str, &str, Palette)] = &[
    (&["pop", "dance"], "Pop", "Energetic & Vibrant", Palette::POP),
    (&["rock", "metal", "alternative"], "Rock", "Intense & Bold", Palette::ROCK),
    (&["hip-hop", "rap", "r&b"], "Hip-Hop", "Urban & Cool", Palette::HIP_HOP),
    (
        &["classical", "jazz", "instrumental"],
        "Classical",
        "Timeless & Elegant",
        Palette::CLASSICAL,
    ),
    (
        &["electronic", "techno", "house"],
        "Electronic",
        "Futuristic & Electric",
        Palette::ELECTRONIC,
    ),
    (&["bollywood", "world", "indian"], "World", "Warm & Rich", Palette::WORLD),
];

impl Theme {
    pub fn new() -> Self {
        Self {
            name: "Aurora",
            vibe: "Ethereal & Dreamy",
            palette: Palette::AURORA,
            icons: Icons::nerd(),
        }
    }

    pub fn for_genre(genre: &str) -> Self {
        let genre = genre.to_lowercase();
        GENRE_THEMES
            .iter()
            .find(|(keys, ..)| keys.iter().any(|k| genre.contains(k)))
            .map(|&(_, name, vibe, palette)| Self {
                name,
                vibe,
                palette,
                icons: Icons::nerd(),
            })
            .unwrap_or_default()
    }

    pub fn border_set(&self) -> ratatui::symbols::border::Set<'static> {
        ratatui::symbols::border::ROUNDED
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_genre_families() {
        let cases = [
            ("Pop", "Pop"),
            ("K-Pop", "Pop"),
            ("Dance", "Pop"),
            ("Hard Rock", "Rock"),
            ("Alternative", "Rock"),
            ("Hip-Hop/Rap", "Hip-Hop"),
            ("R&B/Soul", "Hip-Hop"),
            ("Jazz", "Classical"),
            ("House", "Electronic"),
            ("Bollywood", "World"),
            ("Indian", "World"),
        ];
        for (genre, expected) in cases {
            assert_eq!(Theme::for_genre(genre).name, expected, "{genre}");
        }
    }

    #[test]
    fn test_first_matching_family_wins() {
        // "pop" is checked before "indian"
        assert_eq!(Theme::for_genre("Indian Pop").name, "Pop");
    }

    #[test]
    fn test_unknown_genre_is_aurora() {
        for genre in ["Unknown", "", "Tamil", "Soundtrack"] {
            let theme = Theme::for_genre(genre);
            assert_eq!(theme.name, "Aurora");
            assert_eq!(theme.vibe, "Ethereal & Dreamy");
            assert_eq!(theme.palette, Palette::AURORA);
        }
    }
}
