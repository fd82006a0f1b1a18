//! Pitch classes and note names — the chromatic table underlying scale spelling.
//!
//! Each of the 12 pitch classes (C=0 .. B=11) has an ordered candidate
//! spelling set (one name for naturals, sharp-then-flat for the black keys)
//! and a single canonical display spelling. The canonical row mirrors the
//! conventional mixed-accidental chromatic scale:
//! C, C#, D, Eb, E, F, F#, G, Ab, A, Bb, B.

use std::fmt;

use serde::{Serialize, Serializer};

/// One of the seven note letters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Letter {
    C,
    D,
    E,
    F,
    G,
    A,
    B,
}

impl Letter {
    /// All seven letters in cyclic order.
    pub const ALL: [Letter; 7] = [
        Letter::C,
        Letter::D,
        Letter::E,
        Letter::F,
        Letter::G,
        Letter::A,
        Letter::B,
    ];

    /// Semitone of the natural note for this letter (C=0 .. B=11).
    pub const fn semitone(self) -> u8 {
        match self {
            Letter::C => 0,
            Letter::D => 2,
            Letter::E => 4,
            Letter::F => 5,
            Letter::G => 7,
            Letter::A => 9,
            Letter::B => 11,
        }
    }

    /// The next letter in the cycle, wrapping B back to C.
    pub const fn next(self) -> Letter {
        match self {
            Letter::C => Letter::D,
            Letter::D => Letter::E,
            Letter::E => Letter::F,
            Letter::F => Letter::G,
            Letter::G => Letter::A,
            Letter::A => Letter::B,
            Letter::B => Letter::C,
        }
    }

    const fn as_char(self) -> char {
        match self {
            Letter::C => 'C',
            Letter::D => 'D',
            Letter::E => 'E',
            Letter::F => 'F',
            Letter::G => 'G',
            Letter::A => 'A',
            Letter::B => 'B',
        }
    }

    const fn from_char(c: char) -> Option<Letter> {
        match c {
            'C' => Some(Letter::C),
            'D' => Some(Letter::D),
            'E' => Some(Letter::E),
            'F' => Some(Letter::F),
            'G' => Some(Letter::G),
            'A' => Some(Letter::A),
            'B' => Some(Letter::B),
            _ => None,
        }
    }
}

/// Optional accidental on a note name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Accidental {
    Natural,
    Sharp,
    Flat,
}

impl Accidental {
    /// Semitone offset relative to the natural letter.
    pub const fn offset(self) -> i8 {
        match self {
            Accidental::Natural => 0,
            Accidental::Sharp => 1,
            Accidental::Flat => -1,
        }
    }
}

/// A spelled note: letter plus optional accidental.
///
/// Every name resolves to exactly one pitch class. Enharmonic partners
/// (C# and Db, D# and Eb, ...) are distinct names for the same class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NoteName {
    pub letter: Letter,
    pub accidental: Accidental,
}

impl NoteName {
    pub const fn natural(letter: Letter) -> Self {
        Self {
            letter,
            accidental: Accidental::Natural,
        }
    }

    pub const fn sharp(letter: Letter) -> Self {
        Self {
            letter,
            accidental: Accidental::Sharp,
        }
    }

    pub const fn flat(letter: Letter) -> Self {
        Self {
            letter,
            accidental: Accidental::Flat,
        }
    }

    /// Pitch class of this name (0..=11). Cb wraps to 11, B# wraps to 0.
    pub fn pitch_class(self) -> u8 {
        (self.letter.semitone() as i8 + self.accidental.offset()).rem_euclid(12) as u8
    }

    /// Parse a note name: `<letter><optional # or b>`.
    ///
    /// Accepts "C", "F#", "Bb". Returns `None` for anything else.
    pub fn parse(name: &str) -> Option<NoteName> {
        let mut chars = name.chars();
        let letter = Letter::from_char(chars.next()?)?;
        let accidental = match chars.next() {
            None => Accidental::Natural,
            Some('#') => Accidental::Sharp,
            Some('b') => Accidental::Flat,
            Some(_) => return None,
        };
        if chars.next().is_some() {
            return None;
        }
        Some(NoteName { letter, accidental })
    }
}

impl fmt::Display for NoteName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.accidental {
            Accidental::Natural => write!(f, "{}", self.letter.as_char()),
            Accidental::Sharp => write!(f, "{}#", self.letter.as_char()),
            Accidental::Flat => write!(f, "{}b", self.letter.as_char()),
        }
    }
}

impl Serialize for NoteName {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Candidate spellings per pitch class, sharp name first for black keys.
/// The first entry is the fallback when letter-matched spelling fails.
const SPELLINGS: [&[NoteName]; 12] = [
    &[NoteName::natural(Letter::C)],
    &[NoteName::sharp(Letter::C), NoteName::flat(Letter::D)],
    &[NoteName::natural(Letter::D)],
    &[NoteName::sharp(Letter::D), NoteName::flat(Letter::E)],
    &[NoteName::natural(Letter::E)],
    &[NoteName::natural(Letter::F)],
    &[NoteName::sharp(Letter::F), NoteName::flat(Letter::G)],
    &[NoteName::natural(Letter::G)],
    &[NoteName::sharp(Letter::G), NoteName::flat(Letter::A)],
    &[NoteName::natural(Letter::A)],
    &[NoteName::sharp(Letter::A), NoteName::flat(Letter::B)],
    &[NoteName::natural(Letter::B)],
];

/// Canonical display spelling per pitch class.
const CANONICAL: [NoteName; 12] = [
    NoteName::natural(Letter::C),
    NoteName::sharp(Letter::C),
    NoteName::natural(Letter::D),
    NoteName::flat(Letter::E),
    NoteName::natural(Letter::E),
    NoteName::natural(Letter::F),
    NoteName::sharp(Letter::F),
    NoteName::natural(Letter::G),
    NoteName::flat(Letter::A),
    NoteName::natural(Letter::A),
    NoteName::flat(Letter::B),
    NoteName::natural(Letter::B),
];

/// Candidate spellings for a pitch class.
pub fn spellings(pitch_class: u8) -> &'static [NoteName] {
    SPELLINGS[pitch_class as usize % 12]
}

/// Canonical display spelling for a pitch class.
pub fn canonical(pitch_class: u8) -> NoteName {
    CANONICAL[pitch_class as usize % 12]
}
