//! Letter-correct scale spelling.
//!
//! A spelled scale uses each of the seven note letters exactly once, in
//! cyclic order starting at the root's letter. For each degree the
//! candidate spellings of the target pitch class are searched for the
//! expected letter; when no candidate carries it (scales that would need
//! a double accidental, e.g. the E# of D# Dorian) the first candidate is
//! used instead and the letter cycle still advances.

use super::chord::ChordQuality;
use super::mode::Mode;
use super::pitch::{self, NoteName};

/// One degree of a spelled scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScaleDegree {
    /// Degree index, 0 (tonic) through 6.
    pub index: usize,
    pub note: NoteName,
    pub quality: ChordQuality,
}

/// Spell the 7-note scale for `root` in `mode`.
pub fn spell(root: NoteName, mode: Mode) -> [ScaleDegree; 7] {
    let intervals = mode.intervals();
    let qualities = mode.chord_qualities();
    let root_pc = root.pitch_class();
    let mut letter = root.letter;

    std::array::from_fn(|i| {
        let pc = (root_pc + intervals[i]) % 12;
        let candidates = pitch::spellings(pc);
        let note = candidates
            .iter()
            .copied()
            .find(|n| n.letter == letter)
            .unwrap_or(candidates[0]);
        letter = letter.next();
        ScaleDegree {
            index: i,
            note,
            quality: qualities[i],
        }
    })
}

/// The seven spelled notes of a scale, without degree metadata.
pub fn note_row(scale: &[ScaleDegree; 7]) -> [NoteName; 7] {
    std::array::from_fn(|i| scale[i].note)
}
