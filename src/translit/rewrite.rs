//! Readability rewrite over scheme skeletons.
//!
//! Rules are plain substring replacements applied globally and strictly in
//! order. A rule sees the output of every rule before it, so several entries
//! only make sense as a pair (e.g. `t→th` followed later by `thh→th`).

use super::script::Script;
use any_ascii::any_ascii;
use unicode_normalization::UnicodeNormalization;

pub type Rule = (&'static str, &'static str);

/// Tamil-only rules, run before the general set.
pub const TAMIL_RULES: &[Rule] = &[
    // geminate ச்ச is an affricate, single ச a sibilant
    ("jhjh", "ch"),
    ("Jjh", "nj"),
    ("jh", "s"),
    ("J", "nj"),
    ("n2", "n"),
    ("r2r2", "Tr"),
    ("r2", "r"),
    ("dh", "th"),
    ("gh", "k"),
    ("bh", "p"),
    ("G", "ng"),
    // `T` survives the general `t→th` and is lowered by `T→t`
    ("DhDh", "TT"),
    ("Dh", "d"),
];

/// Rules shared by every script.
pub const GENERAL_RULES: &[Rule] = &[
    ("R^i", "ri"),
    ("R^I", "ri"),
    ("L^i", "li"),
    ("L^I", "li"),
    ("t", "th"),
    ("T", "t"),
    ("D", "d"),
    ("L", "l"),
    (".N", "n"),
    ("N", "n"),
    ("R", "r"),
    ("S", "sh"),
    ("~n", "n"),
    ("~N", "n"),
    ("^", ""),
    ("~", ""),
    ("M", "n"),
    ("A", "aa"),
    ("I", "ee"),
    ("U", "oo"),
    ("ii", "ee"),
    ("uu", "oo"),
    ("thh", "th"),
    ("shh", "sh"),
    ("ngk", "ng"),
];

/// Script-specific rules for `script`; empty for most scripts.
pub fn script_rules(script: Script) -> &'static [Rule] {
    match script {
        Script::Tamil => TAMIL_RULES,
        _ => &[],
    }
}

/// Apply `rules` in order, each to every occurrence.
pub fn apply_rules(mut text: String, rules: &[Rule]) -> String {
    for (pattern, replacement) in rules {
        if text.contains(pattern) {
            text = text.replace(pattern, replacement);
        }
    }
    text
}

/// Unicode combining diacritics.
pub fn is_combining_mark(c: char) -> bool {
    matches!(c as u32, 0x0300..=0x036F | 0x1AB0..=0x1AFF | 0x1DC0..=0x1DFF | 0x20D0..=0x20FF | 0xFE20..=0xFE2F)
}

/// Decompose and drop combining marks.
pub fn strip_marks(text: &str) -> String {
    text.nfd().filter(|c| !is_combining_mark(*c)).collect()
}

/// Turn a scheme skeleton into readable lowercase ASCII.
pub fn rewrite(skeleton: &str, script: Script) -> String {
    let text = apply_rules(skeleton.to_string(), script_rules(script));
    let text = apply_rules(text, GENERAL_RULES);
    any_ascii(&strip_marks(&text)).to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn position(rules: &[Rule], pattern: &str) -> usize {
        rules.iter().position(|(p, _)| *p == pattern).unwrap()
    }

    #[test]
    fn test_geminate_before_single() {
        assert!(position(TAMIL_RULES, "jhjh") < position(TAMIL_RULES, "jh"));
        assert!(position(TAMIL_RULES, "r2r2") < position(TAMIL_RULES, "r2"));
        assert!(position(TAMIL_RULES, "DhDh") < position(TAMIL_RULES, "Dh"));
        assert!(position(GENERAL_RULES, "t") < position(GENERAL_RULES, "thh"));
    }

    #[test]
    fn test_tamil_affricate_vs_sibilant() {
        let adichcha = rewrite("aDhijhjhA", Script::Tamil);
        let maasam = rewrite("mAjham", Script::Tamil);
        assert_eq!(adichcha, "adichaa");
        assert_eq!(maasam, "maasam");
    }

    #[test]
    fn test_rule_order_matters() {
        let reversed: Vec<Rule> = TAMIL_RULES.iter().rev().copied().collect();
        let wrong = apply_rules("aDhijhjhA".to_string(), &reversed);
        let right = apply_rules("aDhijhjhA".to_string(), TAMIL_RULES);
        assert_ne!(wrong, right);
        assert!(wrong.contains("ss"));
    }

    #[test]
    fn test_tamil_rules_pinned() {
        let cases = [
            ("vaJjhi", "vanji"),
            ("nAn2", "naan"),
            ("ghAr2r2u", "kaatru"),
            ("dhAGgha", "thaanga"),
            ("mADhDha", "maatta"),
            ("dhamizh", "thamizh"),
            ("ghaNNoDhu", "kannodu"),
            ("bhAr2u", "paaru"),
        ];
        for (input, expected) in cases {
            assert_eq!(rewrite(input, Script::Tamil), expected, "{input}");
        }
    }

    #[test]
    fn test_general_rules_pinned() {
        let cases = [
            ("tum hii ho", "thum hee ho"),
            ("Thokar", "thokar"),
            ("paaTh", "paath"),
            ("maiM", "main"),
            ("maa.N", "maan"),
            ("kR^iShNa", "krishna"),
            ("~naana", "naana"),
            ("Sh", "sh"),
            ("puuja", "pooja"),
        ];
        for (input, expected) in cases {
            assert_eq!(rewrite(input, Script::Devanagari), expected, "{input}");
        }
    }

    #[test]
    fn test_output_is_lowercase_ascii() {
        for script in Script::PRIORITY {
            let out = rewrite("ĀḌhé ñ 東 X", script);
            assert!(out.is_ascii(), "{out}");
            assert_eq!(out, out.to_lowercase());
        }
    }

    #[test]
    fn test_strip_marks() {
        assert_eq!(strip_marks("naïve café"), "naive cafe");
    }
}
