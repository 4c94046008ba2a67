//! Scheme transliteration for Brahmic scripts.
//!
//! Every supported block follows the same 128 code point layout, so a
//! character is reduced to its offset inside its block and spelled from one
//! shared table. Output is a diacritic-free skeleton in ITRANS or
//! Harvard-Kyoto notation (case-sensitive, e.g. `T` retroflex vs `t` dental).

use super::script::Script;
use unicode_normalization::UnicodeNormalization;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scheme {
    Itrans,
    HarvardKyoto,
}

#[derive(Debug, Clone, Copy)]
struct Spelling {
    itrans: &'static str,
    hk: &'static str,
}

const fn sp(itrans: &'static str, hk: &'static str) -> Spelling {
    Spelling { itrans, hk }
}

impl Spelling {
    fn get(self, scheme: Scheme) -> &'static str {
        match scheme {
            Scheme::Itrans => self.itrans,
            Scheme::HarvardKyoto => self.hk,
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Glyph {
    /// Independent vowel, by vowel slot
    Vowel(u8),
    /// Dependent vowel sign, by vowel slot
    Sign(u8),
    /// Consonant with inherent `a`, by consonant slot
    Consonant(u8),
    Virama,
    Nukta,
    /// Anusvara, visarga and friends: attach to the syllable
    Mark(Spelling),
    /// Dead consonant forms (chillu, khanda ta) that never take a vowel
    Final(Spelling),
    /// Danda: ends a word
    Punct(Spelling),
    Digit(char),
    Ignored,
}

fn lookup(script: Script, off: u8) -> Option<Glyph> {
    let glyph = match (script, off) {
        (Script::Malayalam, 0x7A) => Glyph::Final(sp("N", "N")),
        (Script::Malayalam, 0x7B) => Glyph::Final(sp("n", "n")),
        (Script::Malayalam, 0x7C) => Glyph::Final(sp("r", "r")),
        (Script::Malayalam, 0x7D) => Glyph::Final(sp("l", "l")),
        (Script::Malayalam, 0x7E) => Glyph::Final(sp("L", "L")),
        (Script::Malayalam, 0x7F) => Glyph::Final(sp("k", "k")),
        (Script::Malayalam, 0x4E) => Glyph::Final(sp("r", "r")),
        (Script::Bengali, 0x4E) => Glyph::Final(sp("t", "t")),
        (Script::Bengali, 0x70) => Glyph::Consonant(0x30),
        (Script::Bengali, 0x71) => Glyph::Consonant(0x35),
        // Tamil writes its unvoiced stops with the letters sitting in the
        // voiced-aspirate slots of the shared layout.
        (Script::Tamil, 0x15 | 0x1A | 0x1F | 0x24 | 0x2A) => Glyph::Consonant(off + 3),
        _ => shared(off)?,
    };
    Some(glyph)
}

fn shared(off: u8) -> Option<Glyph> {
    let glyph = match off {
        0x01 => Glyph::Mark(sp(".N", "~")),
        0x02 => Glyph::Mark(sp("M", "M")),
        0x03 => Glyph::Mark(sp("H", "H")),
        0x05..=0x14 | 0x60 | 0x61 => Glyph::Vowel(off),
        0x15..=0x39 | 0x58..=0x5F => Glyph::Consonant(off),
        0x3C => Glyph::Nukta,
        0x3D => Glyph::Mark(sp("'", "'")),
        0x3E => Glyph::Sign(0x06),
        0x3F => Glyph::Sign(0x07),
        0x40 => Glyph::Sign(0x08),
        0x41 => Glyph::Sign(0x09),
        0x42 => Glyph::Sign(0x0A),
        0x43 => Glyph::Sign(0x0B),
        0x44 => Glyph::Sign(0x60),
        0x45..=0x47 => Glyph::Sign(0x0F),
        0x48 => Glyph::Sign(0x10),
        0x49..=0x4B => Glyph::Sign(0x13),
        0x4C | 0x57 => Glyph::Sign(0x14),
        0x4D => Glyph::Virama,
        0x50 => Glyph::Mark(sp("om", "om")),
        0x51..=0x56 => Glyph::Ignored,
        0x62 => Glyph::Sign(0x0C),
        0x63 => Glyph::Sign(0x61),
        0x64 => Glyph::Punct(sp(".", ".")),
        0x65 => Glyph::Punct(sp("..", "..")),
        0x66..=0x6F => Glyph::Digit(char::from(b'0' + (off - 0x66))),
        _ => return None,
    };
    Some(glyph)
}

fn vowel(slot: u8) -> Spelling {
    match slot {
        0x05 => sp("a", "a"),
        0x06 => sp("aa", "A"),
        0x07 => sp("i", "i"),
        0x08 => sp("ii", "I"),
        0x09 => sp("u", "u"),
        0x0A => sp("uu", "U"),
        0x0B => sp("R^i", "R"),
        0x0C => sp("L^i", "lR"),
        0x0D..=0x0F => sp("e", "e"),
        0x10 => sp("ai", "ai"),
        0x11..=0x13 => sp("o", "o"),
        0x14 => sp("au", "au"),
        0x60 => sp("R^I", "RR"),
        0x61 => sp("L^I", "lRR"),
        _ => sp("", ""),
    }
}

fn consonant(slot: u8) -> Spelling {
    match slot {
        0x15 => sp("k", "k"),
        0x16 => sp("kh", "kh"),
        0x17 => sp("g", "g"),
        0x18 => sp("gh", "gh"),
        0x19 => sp("~N", "G"),
        0x1A => sp("ch", "c"),
        0x1B => sp("Ch", "ch"),
        0x1C => sp("j", "j"),
        0x1D => sp("jh", "jh"),
        0x1E => sp("~n", "J"),
        0x1F => sp("T", "T"),
        0x20 => sp("Th", "Th"),
        0x21 => sp("D", "D"),
        0x22 => sp("Dh", "Dh"),
        0x23 => sp("N", "N"),
        0x24 => sp("t", "t"),
        0x25 => sp("th", "th"),
        0x26 => sp("d", "d"),
        0x27 => sp("dh", "dh"),
        0x28 => sp("n", "n"),
        0x29 => sp("^n", "n2"),
        0x2A => sp("p", "p"),
        0x2B => sp("ph", "ph"),
        0x2C => sp("b", "b"),
        0x2D => sp("bh", "bh"),
        0x2E => sp("m", "m"),
        0x2F => sp("y", "y"),
        0x30 => sp("r", "r"),
        0x31 => sp("^r", "r2"),
        0x32 => sp("l", "l"),
        0x33 => sp("L", "L"),
        0x34 => sp("zh", "zh"),
        0x35 => sp("v", "v"),
        0x36 => sp("sh", "z"),
        0x37 => sp("Sh", "S"),
        0x38 => sp("s", "s"),
        0x39 => sp("h", "h"),
        0x58 => sp("q", "q"),
        0x59 => sp("K", "K"),
        0x5A => sp("G", "G"),
        0x5B => sp("z", "z"),
        0x5C => sp("R", "R"),
        0x5D => sp("Rh", "Rh"),
        0x5E => sp("f", "f"),
        0x5F => sp("Y", "Y"),
        _ => sp("", ""),
    }
}

/// Consonant slot a nukta turns `slot` into.
fn nukta_form(slot: u8) -> Option<u8> {
    match slot {
        0x15 => Some(0x58),
        0x16 => Some(0x59),
        0x17 => Some(0x5A),
        0x1C => Some(0x5B),
        0x21 => Some(0x5C),
        0x22 => Some(0x5D),
        0x2B => Some(0x5E),
        0x2F => Some(0x5F),
        _ => None,
    }
}

struct Writer {
    out: String,
    scheme: Scheme,
    /// A consonant is waiting to learn whether it keeps its inherent `a`.
    pending: Option<Pending>,
}

#[derive(Clone, Copy)]
struct Pending {
    start: usize,
    slot: u8,
}

impl Writer {
    fn push(&mut self, s: &str) {
        self.out.push_str(s);
    }

    /// Give a waiting consonant its inherent vowel, word-final ones included.
    fn settle(&mut self) {
        if self.pending.take().is_some() {
            self.out.push('a');
        }
    }

    fn consonant(&mut self, slot: u8) {
        self.settle();
        let start = self.out.len();
        self.out.push_str(consonant(slot).get(self.scheme));
        self.pending = Some(Pending { start, slot });
    }

    fn nukta(&mut self) {
        let Some(p) = self.pending else { return };
        if let Some(slot) = nukta_form(p.slot) {
            self.out.truncate(p.start);
            self.out.push_str(consonant(slot).get(self.scheme));
            self.pending = Some(Pending { start: p.start, slot });
        }
    }
}

/// Transliterate `text` written in `script` into a `scheme` skeleton.
///
/// Characters outside the script's block are copied through unchanged.
pub fn transliterate(text: &str, script: Script, scheme: Scheme) -> String {
    let text: String = text.nfc().collect();
    let mut w = Writer {
        out: String::with_capacity(text.len() * 2),
        scheme,
        pending: None,
    };

    for c in text.chars() {
        let Some(glyph) = script.offset(c).and_then(|off| lookup(script, off)) else {
            w.settle();
            w.out.push(c);
            continue;
        };

        match glyph {
            Glyph::Consonant(slot) => w.consonant(slot),
            Glyph::Vowel(slot) => {
                w.settle();
                w.push(vowel(slot).get(scheme));
            }
            Glyph::Sign(slot) => {
                w.pending = None;
                w.push(vowel(slot).get(scheme));
            }
            Glyph::Virama => w.pending = None,
            Glyph::Nukta => w.nukta(),
            Glyph::Mark(s) | Glyph::Final(s) => {
                w.settle();
                w.push(s.get(scheme));
            }
            Glyph::Punct(s) => {
                w.settle();
                w.push(s.get(scheme));
            }
            Glyph::Digit(d) => {
                w.settle();
                w.out.push(d);
            }
            Glyph::Ignored => {}
        }
    }
    w.settle();
    w.out
}
