//! Audio output — cpal stream fed through a lock-free queue.
//!
//! The UI thread renders metronome blocks and pushes them across a ring
//! buffer; the cpal callback drains the queue, copies samples into the
//! device buffer with the master volume applied, and plays silence on
//! underrun. No locks are shared between the two threads.

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use ringbuf::{
    traits::{Consumer, Producer, Split},
    HeapCons, HeapProd, HeapRb,
};

/// Queue capacity in commands.
const QUEUE_CAPACITY: usize = 256;

/// Consumed samples are compacted once the read position passes this.
const COMPACT_THRESHOLD: usize = 8192;

/// Audio output errors.
#[derive(Debug)]
pub enum AudioError {
    /// No audio output device found.
    NoOutputDevice,
    /// Failed to query device configuration.
    DeviceConfig(String),
    /// Failed to build the audio stream.
    StreamBuild(String),
    /// Failed to start the audio stream.
    StreamPlay(String),
    /// Command queue is full — the audio thread is not draining fast enough.
    QueueFull,
}

impl std::fmt::Display for AudioError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AudioError::NoOutputDevice => write!(f, "no audio output device found"),
            AudioError::DeviceConfig(e) => write!(f, "device config error: {e}"),
            AudioError::StreamBuild(e) => write!(f, "stream build error: {e}"),
            AudioError::StreamPlay(e) => write!(f, "stream play error: {e}"),
            AudioError::QueueFull => write!(f, "audio command queue is full"),
        }
    }
}

impl std::error::Error for AudioError {}

/// Commands crossing from the UI thread to the audio thread.
enum Command {
    /// Interleaved samples to append to the playback buffer.
    Block(Vec<f32>),
    /// Master volume, clamped on the audio thread.
    SetVolume(f32),
    /// Drop all queued samples.
    Clear,
}

/// State owned by the cpal callback. Touched only on the audio thread.
struct Callback {
    consumer: HeapCons<Command>,
    queue: Vec<f32>,
    read_pos: usize,
    volume: f32,
}

impl Callback {
    fn new(consumer: HeapCons<Command>, sample_rate: u32, channels: u16) -> Self {
        Self {
            consumer,
            queue: Vec::with_capacity(sample_rate as usize * channels as usize),
            read_pos: 0,
            volume: 1.0,
        }
    }

    fn process(&mut self, output: &mut [f32]) {
        while let Some(command) = self.consumer.try_pop() {
            match command {
                Command::Block(samples) => self.queue.extend_from_slice(&samples),
                Command::SetVolume(volume) => self.volume = volume.clamp(0.0, 1.0),
                Command::Clear => {
                    self.queue.clear();
                    self.read_pos = 0;
                }
            }
        }

        let available = self.queue.len() - self.read_pos;
        let copy_len = output.len().min(available);
        for (out, &src) in output[..copy_len]
            .iter_mut()
            .zip(&self.queue[self.read_pos..self.read_pos + copy_len])
        {
            *out = src * self.volume;
        }
        self.read_pos += copy_len;

        // Silence on underrun.
        for sample in output[copy_len..].iter_mut() {
            *sample = 0.0;
        }

        if self.read_pos >= COMPACT_THRESHOLD {
            self.queue.drain(..self.read_pos);
            self.read_pos = 0;
        }
    }
}

/// Handle to the running output stream. Owned by the UI thread.
pub struct AudioOutput {
    _stream: cpal::Stream,
    producer: HeapProd<Command>,
    sample_rate: u32,
    channels: u16,
}

impl AudioOutput {
    /// Open the default output device at its native configuration.
    pub fn new() -> Result<Self, AudioError> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or(AudioError::NoOutputDevice)?;

        let config = device
            .default_output_config()
            .map_err(|e| AudioError::DeviceConfig(e.to_string()))?;
        let sample_rate = config.sample_rate().0;
        let channels = config.channels();

        let rb = HeapRb::<Command>::new(QUEUE_CAPACITY);
        let (producer, consumer) = rb.split();
        let mut callback = Callback::new(consumer, sample_rate, channels);

        let stream_config = cpal::StreamConfig {
            channels,
            sample_rate: cpal::SampleRate(sample_rate),
            buffer_size: cpal::BufferSize::Default,
        };

        let err_fn = |err: cpal::StreamError| {
            eprintln!("audio stream error: {err}");
        };

        let stream = device
            .build_output_stream(
                &stream_config,
                move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                    callback.process(data);
                },
                err_fn,
                None,
            )
            .map_err(|e| AudioError::StreamBuild(e.to_string()))?;

        stream
            .play()
            .map_err(|e| AudioError::StreamPlay(e.to_string()))?;

        Ok(Self {
            _stream: stream,
            producer,
            sample_rate,
            channels,
        })
    }

    /// Queue a block of interleaved samples for playback.
    pub fn push_block(&mut self, samples: Vec<f32>) -> Result<(), AudioError> {
        self.producer
            .try_push(Command::Block(samples))
            .map_err(|_| AudioError::QueueFull)
    }

    /// Set the master volume on the audio thread.
    pub fn set_volume(&mut self, volume: f32) -> Result<(), AudioError> {
        self.producer
            .try_push(Command::SetVolume(volume))
            .map_err(|_| AudioError::QueueFull)
    }

    /// Drop everything queued but not yet played.
    pub fn clear(&mut self) -> Result<(), AudioError> {
        self.producer
            .try_push(Command::Clear)
            .map_err(|_| AudioError::QueueFull)
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn channels(&self) -> u16 {
        self.channels
    }
}
