//! Constrained progression sampling — mode, key, and degree sequence.
//!
//! All randomness flows through the [`RandomSource`] capability so every
//! draw is reproducible under a seeded generator. The sampler never fails:
//! the weighted-selection floating-point edge falls back to the first mode,
//! and filler selection always terminates because at least six non-tonic
//! degrees have remaining capacity at every step.

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use super::mode::{KeyPools, Mode};
use super::pitch::NoteName;

/// Probability of a four-chord progression (otherwise three).
pub const FOUR_CHORD_PROBABILITY: f64 = 0.8;

/// Probability the tonic opens the progression (otherwise it closes it).
pub const TONIC_FIRST_PROBABILITY: f64 = 0.5;

/// Maximum occurrences of any single degree in one progression.
pub const MAX_DEGREE_REPEATS: usize = 2;

/// A uniform randomness capability: values in `[0, 1)`.
pub trait RandomSource {
    fn next_unit(&mut self) -> f64;
}

impl RandomSource for ChaCha8Rng {
    fn next_unit(&mut self) -> f64 {
        self.gen()
    }
}

/// Uniform index into a slice of length `len` (non-zero).
fn uniform_index(len: usize, rng: &mut impl RandomSource) -> usize {
    (rng.next_unit() * len as f64) as usize
}

/// Weighted mode selection via cumulative thresholds.
pub fn sample_mode(rng: &mut impl RandomSource) -> Mode {
    let total: f64 = Mode::ALL.iter().map(|m| m.weight()).sum();
    let mut draw = rng.next_unit() * total;
    for &mode in &Mode::ALL {
        if draw < mode.weight() {
            return mode;
        }
        draw -= mode.weight();
    }
    // Floating-point edge: the accumulated subtraction can leave a
    // vanishing positive remainder past the last mode.
    Mode::ALL[0]
}

/// Uniform root draw from the pool matching the mode's family.
pub fn sample_key(pools: &KeyPools, mode: Mode, rng: &mut impl RandomSource) -> NoteName {
    let pool = pools.pool_for(mode);
    pool[uniform_index(pool.len(), rng)]
}

/// Sample a degree sequence: 3 or 4 entries, the tonic exactly once at
/// either boundary, no filler degree more than [`MAX_DEGREE_REPEATS`] times.
pub fn sample_degrees(rng: &mut impl RandomSource) -> Vec<usize> {
    let length = if rng.next_unit() < FOUR_CHORD_PROBABILITY {
        4
    } else {
        3
    };
    let tonic_first = rng.next_unit() < TONIC_FIRST_PROBABILITY;

    let mut counts = [0usize; 7];
    let mut fillers = Vec::with_capacity(length - 1);
    while fillers.len() < length - 1 {
        let available: Vec<usize> = (1..7).filter(|&d| counts[d] < MAX_DEGREE_REPEATS).collect();
        let degree = available[uniform_index(available.len(), rng)];
        fillers.push(degree);
        counts[degree] += 1;
    }

    let mut degrees = Vec::with_capacity(length);
    if tonic_first {
        degrees.push(0);
        degrees.extend(fillers);
    } else {
        degrees.extend(fillers);
        degrees.push(0);
    }
    degrees
}

/// One full sampling pass: mode, key, degree sequence.
pub fn sample(pools: &KeyPools, rng: &mut impl RandomSource) -> (Mode, NoteName, Vec<usize>) {
    let mode = sample_mode(rng);
    let key = sample_key(pools, mode, rng);
    let degrees = sample_degrees(rng);
    (mode, key, degrees)
}
