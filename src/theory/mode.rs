//! Mode definitions — weights, interval patterns, diatonic chord qualities,
//! and the circle-of-fifths key pools.
//!
//! Mode weights reflect real-world usage (major/minor take half the mass
//! between them) and are relative, not normalized. The two key pools pin
//! down which enharmonic spelling serves as a valid root at each circle
//! position: the minor pool uses the natural-minor relative spelling
//! (F#, C#, G#, D# rather than Gb, Db, Ab, Eb).

use std::fmt;

use serde::{Serialize, Serializer};

use super::chord::ChordQuality;
use super::pitch::{Letter, NoteName};

/// The seven diatonic modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    Ionian,
    Aeolian,
    Dorian,
    Mixolydian,
    Phrygian,
    Lydian,
    Locrian,
}

impl Mode {
    /// All modes in sampling order. The first entry doubles as the
    /// fallback when weighted selection runs off the end.
    pub const ALL: [Mode; 7] = [
        Mode::Ionian,
        Mode::Aeolian,
        Mode::Dorian,
        Mode::Mixolydian,
        Mode::Phrygian,
        Mode::Lydian,
        Mode::Locrian,
    ];

    /// Display name, matching the generator's UI strings.
    pub const fn name(self) -> &'static str {
        match self {
            Mode::Ionian => "Major (Ionian)",
            Mode::Aeolian => "Minor (Aeolian)",
            Mode::Dorian => "Dorian",
            Mode::Mixolydian => "Mixolydian",
            Mode::Phrygian => "Phrygian",
            Mode::Lydian => "Lydian",
            Mode::Locrian => "Locrian",
        }
    }

    /// Relative sampling weight.
    pub const fn weight(self) -> f64 {
        match self {
            Mode::Ionian => 0.25,
            Mode::Aeolian => 0.25,
            Mode::Dorian => 0.15,
            Mode::Mixolydian => 0.15,
            Mode::Phrygian => 0.10,
            Mode::Lydian => 0.08,
            Mode::Locrian => 0.07,
        }
    }

    /// Ascending semitone offsets from the root, starting at 0.
    pub const fn intervals(self) -> [u8; 7] {
        match self {
            Mode::Ionian => [0, 2, 4, 5, 7, 9, 11],
            Mode::Aeolian => [0, 2, 3, 5, 7, 8, 10],
            Mode::Dorian => [0, 2, 3, 5, 7, 9, 10],
            Mode::Mixolydian => [0, 2, 4, 5, 7, 9, 10],
            Mode::Phrygian => [0, 1, 3, 5, 7, 8, 10],
            Mode::Lydian => [0, 2, 4, 6, 7, 9, 11],
            Mode::Locrian => [0, 1, 3, 5, 6, 8, 10],
        }
    }

    /// Diatonic triad quality at each scale degree.
    pub const fn chord_qualities(self) -> [ChordQuality; 7] {
        use ChordQuality::{Diminished as Dim, Major as Maj, Minor as Min};
        match self {
            Mode::Ionian => [Maj, Min, Min, Maj, Maj, Min, Dim],
            Mode::Aeolian => [Min, Dim, Maj, Min, Min, Maj, Maj],
            Mode::Dorian => [Min, Min, Maj, Maj, Min, Dim, Maj],
            Mode::Mixolydian => [Maj, Min, Dim, Maj, Min, Maj, Maj],
            Mode::Phrygian => [Min, Maj, Maj, Min, Dim, Maj, Min],
            Mode::Lydian => [Maj, Maj, Min, Dim, Maj, Min, Min],
            Mode::Locrian => [Dim, Maj, Min, Min, Maj, Maj, Min],
        }
    }

    /// Whether this mode draws its roots from the major-family key pool.
    pub const fn is_major_family(self) -> bool {
        matches!(self, Mode::Ionian | Mode::Lydian | Mode::Mixolydian)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for Mode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Major-family roots in circle-of-fifths order.
pub const MAJOR_KEYS: [NoteName; 12] = [
    NoteName::natural(Letter::C),
    NoteName::natural(Letter::G),
    NoteName::natural(Letter::D),
    NoteName::natural(Letter::A),
    NoteName::natural(Letter::E),
    NoteName::natural(Letter::B),
    NoteName::sharp(Letter::F),
    NoteName::flat(Letter::D),
    NoteName::flat(Letter::A),
    NoteName::flat(Letter::E),
    NoteName::flat(Letter::B),
    NoteName::natural(Letter::F),
];

/// Minor-family roots in circle-of-fifths order, spelled as the
/// natural-minor relative at each position.
pub const MINOR_KEYS: [NoteName; 12] = [
    NoteName::natural(Letter::A),
    NoteName::natural(Letter::E),
    NoteName::natural(Letter::B),
    NoteName::sharp(Letter::F),
    NoteName::sharp(Letter::C),
    NoteName::sharp(Letter::G),
    NoteName::sharp(Letter::D),
    NoteName::flat(Letter::B),
    NoteName::natural(Letter::F),
    NoteName::natural(Letter::C),
    NoteName::natural(Letter::G),
    NoteName::natural(Letter::D),
];

/// The two root pools used for key selection. Replaceable from user
/// configuration; validated at load time, never during generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPools {
    pub major: [NoteName; 12],
    pub minor: [NoteName; 12],
}

impl Default for KeyPools {
    fn default() -> Self {
        Self {
            major: MAJOR_KEYS,
            minor: MINOR_KEYS,
        }
    }
}

impl KeyPools {
    /// The pool a mode draws its root from.
    pub fn pool_for(&self, mode: Mode) -> &[NoteName; 12] {
        if mode.is_major_family() {
            &self.major
        } else {
            &self.minor
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weights_are_positive_and_sum_to_one() {
        let total: f64 = Mode::ALL.iter().map(|m| m.weight()).sum();
        assert!((total - 1.0).abs() < 1e-12);
        for mode in Mode::ALL {
            assert!(mode.weight() > 0.0, "{mode} weight must be positive");
        }
    }

    #[test]
    fn intervals_start_at_zero_and_ascend() {
        for mode in Mode::ALL {
            let iv = mode.intervals();
            assert_eq!(iv[0], 0, "{mode}");
            for w in iv.windows(2) {
                assert!(w[0] < w[1], "{mode} intervals must ascend");
            }
            assert!(iv[6] < 12, "{mode}");
        }
    }

    #[test]
    fn family_split() {
        let majors: Vec<Mode> = Mode::ALL
            .into_iter()
            .filter(|m| m.is_major_family())
            .collect();
        assert_eq!(majors, [Mode::Ionian, Mode::Mixolydian, Mode::Lydian]);
    }

    #[test]
    fn qualities_follow_diatonic_stacking() {
        // A degree is diminished exactly when the stacked third is 3
        // semitones and the stacked fifth 6 semitones above its root.
        for mode in Mode::ALL {
            let iv = mode.intervals();
            for degree in 0..7 {
                let third = (12 + iv[(degree + 2) % 7] - iv[degree]) % 12;
                let fifth = (12 + iv[(degree + 4) % 7] - iv[degree]) % 12;
                let expected = match (third, fifth) {
                    (4, 7) => ChordQuality::Major,
                    (3, 7) => ChordQuality::Minor,
                    (3, 6) => ChordQuality::Diminished,
                    other => panic!("{mode} degree {degree}: unexpected stack {other:?}"),
                };
                assert_eq!(
                    mode.chord_qualities()[degree],
                    expected,
                    "{mode} degree {degree}"
                );
            }
        }
    }

    #[test]
    fn key_pools_are_circle_of_fifths() {
        // Adjacent entries in each pool are a perfect fifth (7 semitones) apart.
        for pool in [&MAJOR_KEYS, &MINOR_KEYS] {
            for w in pool.windows(2) {
                let step = (12 + w[1].pitch_class() - w[0].pitch_class()) % 12;
                assert_eq!(step, 7, "{} -> {}", w[0], w[1]);
            }
        }
    }

    #[test]
    fn minor_pool_is_relative_of_major_pool() {
        // Each minor root sits a minor third below its major counterpart.
        for (major, minor) in MAJOR_KEYS.iter().zip(MINOR_KEYS.iter()) {
            let gap = (12 + major.pitch_class() - minor.pitch_class()) % 12;
            assert_eq!(gap, 3, "{major} / {minor}");
        }
    }

    #[test]
    fn default_pools_match_constants() {
        let pools = KeyPools::default();
        assert_eq!(pools.pool_for(Mode::Ionian), &MAJOR_KEYS);
        assert_eq!(pools.pool_for(Mode::Lydian), &MAJOR_KEYS);
        assert_eq!(pools.pool_for(Mode::Aeolian), &MINOR_KEYS);
        assert_eq!(pools.pool_for(Mode::Locrian), &MINOR_KEYS);
    }

    #[test]
    fn display_names() {
        assert_eq!(Mode::Ionian.to_string(), "Major (Ionian)");
        assert_eq!(Mode::Aeolian.to_string(), "Minor (Aeolian)");
        assert_eq!(Mode::Dorian.to_string(), "Dorian");
    }
}
