//! Music-theory generation engine — key/mode sampling, scale spelling,
//! triad construction, and roman-numeral labeling.
//!
//! The engine is a pure function of its random source: `generate()` draws
//! mode, key, and degree sequence, spells the scale, builds a labeled
//! chord per degree, derives the relative major, and returns an immutable
//! snapshot. The only shared data is the read-only pitch and mode tables,
//! so any number of engines can run concurrently.

pub mod chord;
pub mod mode;
pub mod pitch;
pub mod progression;
pub mod relative;
pub mod scale;

pub use chord::{Chord, ChordQuality};
pub use mode::{KeyPools, Mode};
pub use pitch::NoteName;
pub use progression::RandomSource;
pub use scale::ScaleDegree;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

/// Immutable result of one generation pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationResult {
    pub key: NoteName,
    pub mode: Mode,
    pub scale: [NoteName; 7],
    pub progression: Vec<Chord>,
    pub relative_major: Option<NoteName>,
}

/// Generate one progression snapshot from the given pools and random source.
pub fn generate_with(pools: &KeyPools, rng: &mut impl RandomSource) -> GenerationResult {
    let (mode, key, degrees) = progression::sample(pools, rng);
    let spelled = scale::spell(key, mode);
    let chords = degrees
        .iter()
        .map(|&degree| Chord::at_degree(&spelled, degree))
        .collect();
    GenerationResult {
        key,
        mode,
        scale: scale::note_row(&spelled),
        progression: chords,
        relative_major: relative::relative_major(key, mode),
    }
}

/// The generation engine: key pools plus a seeded RNG.
///
/// Each `generate()` call consumes entropy and returns a fresh snapshot;
/// no other state is carried between calls.
pub struct GenerationEngine {
    pools: KeyPools,
    rng: ChaCha8Rng,
}

impl GenerationEngine {
    /// Engine with the default circle-of-fifths pools.
    pub fn new(seed: u64) -> Self {
        Self::with_pools(KeyPools::default(), seed)
    }

    /// Engine with custom (already validated) key pools.
    pub fn with_pools(pools: KeyPools, seed: u64) -> Self {
        Self {
            pools,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Generate a fresh progression snapshot.
    pub fn generate(&mut self) -> GenerationResult {
        generate_with(&self.pools, &mut self.rng)
    }
}
