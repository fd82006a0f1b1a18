//! Click synthesis — short sine bursts with an exponential decay envelope.

use std::f64::consts::PI;

/// Envelope floor the decay ramps down to.
const GAIN_FLOOR: f32 = 0.01;

/// The three click voices, distinguished by pitch and loudness.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickKind {
    /// Downbeat when accenting is enabled.
    Accent,
    /// Regular beat.
    Beat,
    /// Gentle inter-beat subdivision tick.
    Subdivision,
}

impl ClickKind {
    pub const fn frequency(self) -> f64 {
        match self {
            ClickKind::Accent => 800.0,
            ClickKind::Beat => 600.0,
            ClickKind::Subdivision => 400.0,
        }
    }

    /// Peak gain before the volume setting is applied.
    pub const fn base_gain(self) -> f32 {
        match self {
            ClickKind::Accent => 0.3,
            ClickKind::Beat => 0.2,
            ClickKind::Subdivision => 0.1,
        }
    }

    pub const fn duration_secs(self) -> f64 {
        match self {
            ClickKind::Accent | ClickKind::Beat => 0.1,
            ClickKind::Subdivision => 0.05,
        }
    }
}

/// Render one click as interleaved samples.
///
/// The envelope ramps exponentially from `base_gain * volume` down to
/// [`GAIN_FLOOR`] over the click's duration. A volume low enough to start
/// at or below the floor produces silence of the same length.
pub fn render_click(kind: ClickKind, volume: f32, sample_rate: u32, channels: u16) -> Vec<f32> {
    let frames = (kind.duration_secs() * sample_rate as f64) as usize;
    let channels = channels as usize;
    let peak = kind.base_gain() * volume.clamp(0.0, 1.0);
    if peak <= GAIN_FLOOR {
        return vec![0.0; frames * channels];
    }

    let ratio = (GAIN_FLOOR / peak) as f64;
    let mut samples = Vec::with_capacity(frames * channels);
    for frame in 0..frames {
        let t = frame as f64 / sample_rate as f64;
        let envelope = peak as f64 * ratio.powf(t / kind.duration_secs());
        let sample = ((t * kind.frequency() * 2.0 * PI).sin() * envelope) as f32;
        for _ in 0..channels {
            samples.push(sample);
        }
    }
    samples
}
