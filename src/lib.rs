//! Cadenza — random diatonic chord progressions with a companion
//! metronome, in the terminal.

pub mod audio;
pub mod config;
pub mod metronome;
pub mod theory;
pub mod tui;
