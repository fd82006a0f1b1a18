//! Metronome — drift-free click scheduling over audio blocks.
//!
//! The metronome renders fixed-size sample blocks. Click positions live on
//! a subdivision-slot grid derived from BPM and beats per measure; a
//! fractional frame accumulator carries the remainder between blocks so
//! long sessions never drift. Clicks that spill past a block boundary are
//! kept in an overlap buffer and mixed into the next block.
//!
//! The metronome shares no state with the generation engine; the two meet
//! only in the UI layer, which holds one of each.

pub mod click;

pub use click::{render_click, ClickKind};

use std::ops::RangeInclusive;

/// Subdivision feel: how many clicks each beat is split into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Subdivision {
    /// Two clicks per beat (eighth notes).
    Simple,
    /// Three clicks per beat (triplets).
    Compound,
}

impl Subdivision {
    pub const fn clicks_per_beat(self) -> u32 {
        match self {
            Subdivision::Simple => 2,
            Subdivision::Compound => 3,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Subdivision::Simple => "simple",
            Subdivision::Compound => "compound",
        }
    }

    pub const fn toggled(self) -> Subdivision {
        match self {
            Subdivision::Simple => Subdivision::Compound,
            Subdivision::Compound => Subdivision::Simple,
        }
    }
}

/// Metronome settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetronomeConfig {
    pub bpm: u32,
    pub beats_per_measure: u32,
    /// Master click volume, 0.0 to 1.0.
    pub volume: f32,
    pub accent_first_beat: bool,
    pub subdivisions: bool,
    pub subdivision: Subdivision,
}

impl MetronomeConfig {
    pub const BPM_RANGE: RangeInclusive<u32> = 40..=200;
    pub const BEATS_RANGE: RangeInclusive<u32> = 2..=16;

    /// Copy with every field clamped into its legal range.
    pub fn clamped(mut self) -> Self {
        self.bpm = self.bpm.clamp(*Self::BPM_RANGE.start(), *Self::BPM_RANGE.end());
        self.beats_per_measure = self
            .beats_per_measure
            .clamp(*Self::BEATS_RANGE.start(), *Self::BEATS_RANGE.end());
        self.volume = self.volume.clamp(0.0, 1.0);
        self
    }

    /// Slots per beat under the current subdivision setting.
    fn slots_per_beat(&self) -> u32 {
        if self.subdivisions {
            self.subdivision.clicks_per_beat()
        } else {
            1
        }
    }
}

impl Default for MetronomeConfig {
    fn default() -> Self {
        Self {
            bpm: 120,
            beats_per_measure: 4,
            volume: 0.5,
            accent_first_beat: true,
            subdivisions: false,
            subdivision: Subdivision::Simple,
        }
    }
}

/// The metronome: schedules and renders clicks block by block.
pub struct Metronome {
    config: MetronomeConfig,
    sample_rate: u32,
    channels: u16,
    running: bool,
    /// Index of the next subdivision slot to fire.
    slot_index: u64,
    /// Frames (possibly fractional) until that slot, relative to the
    /// start of the next block.
    frames_until_next: f64,
    /// Samples that spilled past the previous block boundary.
    overlap: Vec<f32>,
}

impl Metronome {
    pub fn new(config: MetronomeConfig, sample_rate: u32, channels: u16) -> Self {
        Self {
            config: config.clamped(),
            sample_rate,
            channels,
            running: false,
            slot_index: 0,
            frames_until_next: 0.0,
            overlap: Vec::new(),
        }
    }

    pub fn config(&self) -> MetronomeConfig {
        self.config
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn channels(&self) -> u16 {
        self.channels
    }

    /// Replace the settings and restart the click phase from the downbeat.
    pub fn set_config(&mut self, config: MetronomeConfig) {
        self.config = config.clamped();
        self.slot_index = 0;
        self.frames_until_next = 0.0;
        self.overlap.clear();
    }

    /// Start from the downbeat. The first click lands on the first frame
    /// of the next rendered block.
    pub fn start(&mut self) {
        self.running = true;
        self.slot_index = 0;
        self.frames_until_next = 0.0;
        self.overlap.clear();
    }

    pub fn stop(&mut self) {
        self.running = false;
        self.overlap.clear();
    }

    /// Flip between running and stopped; returns the new running state.
    pub fn toggle(&mut self) -> bool {
        if self.running {
            self.stop();
        } else {
            self.start();
        }
        self.running
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Zero-based beat within the current measure, for display. `None`
    /// while stopped.
    pub fn beat_in_measure(&self) -> Option<u32> {
        if !self.running {
            return None;
        }
        let fired = self.slot_index.saturating_sub(1) / self.config.slots_per_beat() as u64;
        Some((fired % self.config.beats_per_measure as u64) as u32)
    }

    fn frames_per_slot(&self) -> f64 {
        60.0 / self.config.bpm as f64 * self.sample_rate as f64
            / self.config.slots_per_beat() as f64
    }

    fn classify(&self, slot: u64) -> ClickKind {
        let slots_per_beat = self.config.slots_per_beat() as u64;
        if slot % slots_per_beat != 0 {
            return ClickKind::Subdivision;
        }
        let beat = slot / slots_per_beat;
        if self.config.accent_first_beat && beat % self.config.beats_per_measure as u64 == 0 {
            ClickKind::Accent
        } else {
            ClickKind::Beat
        }
    }

    /// Render the next block of interleaved samples, or `None` when stopped.
    ///
    /// Returned length is `frames * channels`. Clicks whose tails extend
    /// past the block are carried into the overlap buffer.
    pub fn render_block(&mut self, frames: u32) -> Option<Vec<f32>> {
        if !self.running {
            return None;
        }

        let channels = self.channels as usize;
        let block_samples = frames as usize * channels;
        let mut output = vec![0.0f32; block_samples];

        // Mix in overlap from the previous block.
        let overlap_len = self.overlap.len().min(block_samples);
        for (out, &spill) in output[..overlap_len].iter_mut().zip(&self.overlap[..overlap_len]) {
            *out += spill;
        }
        if self.overlap.len() > block_samples {
            self.overlap.drain(..block_samples);
        } else {
            self.overlap.clear();
        }

        // Fire every slot that falls inside this block.
        let frames_per_slot = self.frames_per_slot();
        while self.frames_until_next < frames as f64 {
            let offset_frames = self.frames_until_next as usize;
            let kind = self.classify(self.slot_index);
            let rendered = render_click(kind, self.config.volume, self.sample_rate, self.channels);

            let offset_samples = offset_frames * channels;
            for (i, &sample) in rendered.iter().enumerate() {
                let pos = offset_samples + i;
                if pos < block_samples {
                    output[pos] += sample;
                } else {
                    let spill_pos = pos - block_samples;
                    if spill_pos >= self.overlap.len() {
                        self.overlap.resize(spill_pos + 1, 0.0);
                    }
                    self.overlap[spill_pos] += sample;
                }
            }

            self.frames_until_next += frames_per_slot;
            self.slot_index += 1;
        }
        self.frames_until_next -= frames as f64;

        Some(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_RATE: u32 = 44100;
    const CHANNELS: u16 = 2;

    fn running(config: MetronomeConfig) -> Metronome {
        let mut metronome = Metronome::new(config, SAMPLE_RATE, CHANNELS);
        metronome.start();
        metronome
    }

    /// Frame offsets of click onsets in a block (first frame of each
    /// contiguous non-silent run preceded by silence).
    fn onsets(block: &[f32], channels: usize) -> Vec<usize> {
        let mut found = Vec::new();
        let mut in_click = false;
        for frame in 0..block.len() / channels {
            // The click's very first sample is a zero crossing; look at the
            // second sample of the frame window to detect energy.
            let window_end = ((frame + 3) * channels).min(block.len());
            let active = block[frame * channels..window_end].iter().any(|&s| s != 0.0);
            if active && !in_click {
                found.push(frame);
            }
            in_click = active;
        }
        found
    }

    #[test]
    fn stopped_renders_nothing() {
        let mut metronome = Metronome::new(MetronomeConfig::default(), SAMPLE_RATE, CHANNELS);
        assert!(metronome.render_block(1024).is_none());
    }

    #[test]
    fn first_click_on_first_frame() {
        let mut metronome = running(MetronomeConfig::default());
        let block = metronome.render_block(1024).unwrap();
        assert_eq!(block.len(), 1024 * CHANNELS as usize);
        // Second frame carries click energy (first sample is a zero crossing).
        assert!(block[CHANNELS as usize..4 * CHANNELS as usize]
            .iter()
            .any(|&s| s != 0.0));
    }

    #[test]
    fn one_click_per_beat_at_120_bpm() {
        // 120 BPM at 44100 Hz: one beat = 22050 frames.
        let mut metronome = running(MetronomeConfig::default());
        let block = metronome.render_block(44100).unwrap();
        let starts = onsets(&block, CHANNELS as usize);
        assert_eq!(starts.len(), 2, "two beats in one second: {starts:?}");
        assert_eq!(starts[0], 0);
        assert!((starts[1] as i64 - 22050).abs() <= 1, "{starts:?}");
    }

    #[test]
    fn accent_cycle_follows_beats_per_measure() {
        let config = MetronomeConfig {
            beats_per_measure: 3,
            ..Default::default()
        };
        let metronome = running(config);
        assert_eq!(metronome.classify(0), ClickKind::Accent);
        assert_eq!(metronome.classify(1), ClickKind::Beat);
        assert_eq!(metronome.classify(2), ClickKind::Beat);
        assert_eq!(metronome.classify(3), ClickKind::Accent);
    }

    #[test]
    fn no_accent_when_disabled() {
        let config = MetronomeConfig {
            accent_first_beat: false,
            ..Default::default()
        };
        let metronome = running(config);
        assert_eq!(metronome.classify(0), ClickKind::Beat);
        assert_eq!(metronome.classify(4), ClickKind::Beat);
    }

    #[test]
    fn subdivision_slots_between_beats() {
        let config = MetronomeConfig {
            subdivisions: true,
            subdivision: Subdivision::Compound,
            ..Default::default()
        };
        let metronome = running(config);
        assert_eq!(metronome.classify(0), ClickKind::Accent);
        assert_eq!(metronome.classify(1), ClickKind::Subdivision);
        assert_eq!(metronome.classify(2), ClickKind::Subdivision);
        assert_eq!(metronome.classify(3), ClickKind::Beat);
        // Slot 12 starts beat 4 = the next measure's downbeat.
        assert_eq!(metronome.classify(12), ClickKind::Accent);
    }

    #[test]
    fn subdivisions_double_the_click_rate() {
        let config = MetronomeConfig {
            subdivisions: true,
            subdivision: Subdivision::Simple,
            ..Default::default()
        };
        let mut metronome = running(config);
        let block = metronome.render_block(44100).unwrap();
        let starts = onsets(&block, CHANNELS as usize);
        // Two beats plus two eighth-note ticks in one second.
        assert_eq!(starts.len(), 4, "{starts:?}");
        assert!((starts[1] as i64 - 11025).abs() <= 1, "{starts:?}");
    }

    #[test]
    fn click_tail_spills_into_next_block() {
        // A click is 4410 frames long; a 1024-frame block cannot hold it.
        let mut metronome = running(MetronomeConfig::default());
        let first = metronome.render_block(1024).unwrap();
        assert!(first.iter().any(|&s| s != 0.0));
        let second = metronome.render_block(1024).unwrap();
        assert!(
            second[..CHANNELS as usize * 16].iter().any(|&s| s != 0.0),
            "tail should continue into the next block"
        );
    }

    #[test]
    fn no_drift_over_many_odd_blocks() {
        let mut metronome = running(MetronomeConfig::default());
        // 997 is prime; after many blocks the slot clock must still agree
        // with the ideal schedule.
        let blocks = 2000u64;
        for _ in 0..blocks {
            metronome.render_block(997).unwrap();
        }
        let rendered_frames = blocks as f64 * 997.0;
        let frames_per_beat = 60.0 / 120.0 * SAMPLE_RATE as f64;
        let expected_slots = (rendered_frames / frames_per_beat).ceil() as u64;
        assert!(
            (metronome.slot_index as i64 - expected_slots as i64).abs() <= 1,
            "expected ~{expected_slots} slots, fired {}",
            metronome.slot_index
        );
    }

    #[test]
    fn toggle_round_trip() {
        let mut metronome = Metronome::new(MetronomeConfig::default(), SAMPLE_RATE, CHANNELS);
        assert!(!metronome.is_running());
        assert!(metronome.toggle());
        assert!(metronome.is_running());
        assert!(!metronome.toggle());
        assert!(metronome.render_block(512).is_none());
    }

    #[test]
    fn config_change_restarts_phase() {
        let mut metronome = running(MetronomeConfig::default());
        metronome.render_block(30000).unwrap();
        assert!(metronome.slot_index > 0);

        let faster = MetronomeConfig {
            bpm: 200,
            ..metronome.config()
        };
        metronome.set_config(faster);
        assert_eq!(metronome.slot_index, 0);
        assert_eq!(metronome.config().bpm, 200);

        // Still running; next block starts with a fresh downbeat.
        let block = metronome.render_block(1024).unwrap();
        assert!(block.iter().any(|&s| s != 0.0));
    }

    #[test]
    fn config_clamping() {
        let config = MetronomeConfig {
            bpm: 500,
            beats_per_measure: 1,
            volume: 3.0,
            ..Default::default()
        }
        .clamped();
        assert_eq!(config.bpm, 200);
        assert_eq!(config.beats_per_measure, 2);
        assert_eq!(config.volume, 1.0);
    }

    #[test]
    fn beat_indicator_tracks_measure_position() {
        let mut metronome = running(MetronomeConfig::default());
        metronome.render_block(100).unwrap(); // fires beat 0
        assert_eq!(metronome.beat_in_measure(), Some(0));

        // Render past beat 1 (frame 22050).
        metronome.render_block(23000).unwrap();
        assert_eq!(metronome.beat_in_measure(), Some(1));

        metronome.stop();
        assert_eq!(metronome.beat_in_measure(), None);
    }
}
