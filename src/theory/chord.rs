//! Triad construction and roman-numeral labeling.
//!
//! Triads are stacked by scale step (degree, degree+2, degree+4 mod 7),
//! not by fixed semitone offsets. For diminished degrees the fifth is
//! computed chromatically — one semitone below the perfect fifth above the
//! chord root — and re-spelled via the canonical chromatic name, never
//! re-derived through the scale.

use serde::Serialize;

use super::pitch::{self, NoteName};
use super::scale::ScaleDegree;

/// Quality of a diatonic triad.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChordQuality {
    Major,
    Minor,
    Diminished,
}

impl ChordQuality {
    /// Short tag used in the serialized record ("maj" / "min" / "dim").
    pub const fn as_str(self) -> &'static str {
        match self {
            ChordQuality::Major => "maj",
            ChordQuality::Minor => "min",
            ChordQuality::Diminished => "dim",
        }
    }
}

impl Serialize for ChordQuality {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

const NUMERALS: [&str; 7] = ["I", "II", "III", "IV", "V", "VI", "VII"];

/// Roman-numeral label for a degree/quality pair.
///
/// Major stays uppercase, minor is lowercased, diminished is lowercased
/// with a trailing degree mark. No inversion or key-signature notation.
pub fn roman_numeral(degree: usize, quality: ChordQuality) -> String {
    let numeral = NUMERALS[degree % 7];
    match quality {
        ChordQuality::Major => numeral.to_string(),
        ChordQuality::Minor => numeral.to_lowercase(),
        ChordQuality::Diminished => format!("{}°", numeral.to_lowercase()),
    }
}

/// A labeled diatonic triad.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Chord {
    pub degree: usize,
    pub roman: String,
    pub quality: ChordQuality,
    pub notes: [NoteName; 3],
}

impl Chord {
    /// Build the labeled triad on the given scale degree.
    pub fn at_degree(scale: &[ScaleDegree; 7], degree: usize) -> Chord {
        let quality = scale[degree % 7].quality;
        Chord {
            degree,
            roman: roman_numeral(degree, quality),
            quality,
            notes: triad_notes(scale, degree, quality),
        }
    }
}

/// The three notes of the triad on `degree`: root, third, fifth.
pub fn triad_notes(
    scale: &[ScaleDegree; 7],
    degree: usize,
    quality: ChordQuality,
) -> [NoteName; 3] {
    let root = scale[degree % 7].note;
    let third = scale[(degree + 2) % 7].note;
    let fifth = scale[(degree + 4) % 7].note;
    if quality == ChordQuality::Diminished {
        // Perfect fifth above the root, lowered one semitone, in the
        // canonical spelling for that pitch class.
        let lowered = (root.pitch_class() + 7 + 11) % 12;
        [root, third, pitch::canonical(lowered)]
    } else {
        [root, third, fifth]
    }
}
