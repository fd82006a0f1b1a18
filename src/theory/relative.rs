//! Relative-major derivation.
//!
//! Every non-major mode shares its note content with a major scale whose
//! root sits at a fixed scale degree of the mode: the third of Aeolian,
//! the seventh of Dorian, and so on. The selected degree is re-resolved
//! through the chromatic table so the reported key always carries the
//! canonical spelling for its pitch class, whatever spelling the scale
//! itself produced.

use super::mode::Mode;
use super::pitch::{self, NoteName};
use super::scale;

/// Scale-degree index of the relative major's root, or `None` for the
/// major mode itself.
pub fn relative_major_degree(mode: Mode) -> Option<usize> {
    match mode {
        Mode::Ionian => None,
        Mode::Aeolian => Some(2),
        Mode::Dorian => Some(6),
        Mode::Mixolydian => Some(3),
        Mode::Phrygian => Some(5),
        Mode::Lydian => Some(1),
        Mode::Locrian => Some(4),
    }
}

/// The enharmonically canonical relative major of `root` in `mode`.
pub fn relative_major(root: NoteName, mode: Mode) -> Option<NoteName> {
    let degree = relative_major_degree(mode)?;
    let spelled = scale::spell(root, mode)[degree].note;
    Some(pitch::canonical(spelled.pitch_class()))
}
