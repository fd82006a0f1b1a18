//! User config — load settings from ~/.cadenza/config.yaml.
//!
//! All fields are optional; anything missing keeps its default. A config
//! that is present but invalid is an error rather than a silent fallback,
//! so a typo in the BPM does not get papered over at startup.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::metronome::{MetronomeConfig, Subdivision};
use crate::theory::{KeyPools, NoteName};

/// Config loading and validation errors.
#[derive(Debug)]
pub enum ConfigError {
    /// The file exists but could not be read.
    Io(std::io::Error),
    /// The file is not valid YAML for the expected shape.
    Parse(serde_yaml::Error),
    /// BPM outside the supported range.
    InvalidBpm(u32),
    /// Beats per measure outside the supported range.
    InvalidBeats(u32),
    /// Volume outside 0.0..=1.0.
    InvalidVolume(f32),
    /// Subdivision type is neither "simple" nor "compound".
    UnknownSubdivision(String),
    /// A key pool entry is not a parseable note name.
    InvalidRoot { pool: &'static str, name: String },
    /// A key pool does not hold exactly twelve entries.
    WrongPoolSize { pool: &'static str, len: usize },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config read error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
            ConfigError::InvalidBpm(bpm) => {
                let range = MetronomeConfig::BPM_RANGE;
                write!(
                    f,
                    "bpm {bpm} outside {}..={}",
                    range.start(),
                    range.end()
                )
            }
            ConfigError::InvalidBeats(beats) => {
                let range = MetronomeConfig::BEATS_RANGE;
                write!(
                    f,
                    "beats_per_measure {beats} outside {}..={}",
                    range.start(),
                    range.end()
                )
            }
            ConfigError::InvalidVolume(volume) => {
                write!(f, "volume {volume} outside 0.0..=1.0")
            }
            ConfigError::UnknownSubdivision(s) => {
                write!(f, "subdivision_type {s:?} is not \"simple\" or \"compound\"")
            }
            ConfigError::InvalidRoot { pool, name } => {
                write!(f, "{pool} pool entry {name:?} is not a note name")
            }
            ConfigError::WrongPoolSize { pool, len } => {
                write!(f, "{pool} pool has {len} entries, expected 12")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Parse(e) => Some(e),
            _ => None,
        }
    }
}

/// Raw YAML shape — everything optional.
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    bpm: Option<u32>,
    beats_per_measure: Option<u32>,
    volume: Option<f32>,
    accent_first_beat: Option<bool>,
    subdivisions: Option<bool>,
    subdivision_type: Option<String>,
    major_keys: Option<Vec<String>>,
    minor_keys: Option<Vec<String>>,
}

/// Validated settings ready to hand to the rest of the app.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub metronome: MetronomeConfig,
    pub pools: KeyPools,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            metronome: MetronomeConfig::default(),
            pools: KeyPools::default(),
        }
    }
}

/// Default config path: `~/.cadenza/config.yaml`.
pub fn default_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".cadenza").join("config.yaml"))
}

/// Load settings from the default path. A missing file (or an
/// undeterminable home directory) yields the defaults.
pub fn load() -> Result<Settings, ConfigError> {
    match default_path() {
        Some(path) => load_from_path(&path),
        None => Ok(Settings::default()),
    }
}

/// Load settings from a specific path. Missing file yields the defaults.
pub fn load_from_path(path: &Path) -> Result<Settings, ConfigError> {
    match std::fs::read_to_string(path) {
        Ok(content) => from_str(&content),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Settings::default()),
        Err(e) => Err(ConfigError::Io(e)),
    }
}

/// Parse and validate a YAML config string.
pub fn from_str(yaml: &str) -> Result<Settings, ConfigError> {
    let file: ConfigFile = serde_yaml::from_str(yaml).map_err(ConfigError::Parse)?;
    let mut settings = Settings::default();

    if let Some(bpm) = file.bpm {
        if !MetronomeConfig::BPM_RANGE.contains(&bpm) {
            return Err(ConfigError::InvalidBpm(bpm));
        }
        settings.metronome.bpm = bpm;
    }
    if let Some(beats) = file.beats_per_measure {
        if !MetronomeConfig::BEATS_RANGE.contains(&beats) {
            return Err(ConfigError::InvalidBeats(beats));
        }
        settings.metronome.beats_per_measure = beats;
    }
    if let Some(volume) = file.volume {
        if !(0.0..=1.0).contains(&volume) {
            return Err(ConfigError::InvalidVolume(volume));
        }
        settings.metronome.volume = volume;
    }
    if let Some(accent) = file.accent_first_beat {
        settings.metronome.accent_first_beat = accent;
    }
    if let Some(subdivisions) = file.subdivisions {
        settings.metronome.subdivisions = subdivisions;
    }
    if let Some(kind) = file.subdivision_type {
        settings.metronome.subdivision = match kind.as_str() {
            "simple" => Subdivision::Simple,
            "compound" => Subdivision::Compound,
            _ => return Err(ConfigError::UnknownSubdivision(kind)),
        };
    }
    if let Some(names) = file.major_keys {
        settings.pools.major = parse_pool("major_keys", &names)?;
    }
    if let Some(names) = file.minor_keys {
        settings.pools.minor = parse_pool("minor_keys", &names)?;
    }

    Ok(settings)
}

fn parse_pool(pool: &'static str, names: &[String]) -> Result<[NoteName; 12], ConfigError> {
    if names.len() != 12 {
        return Err(ConfigError::WrongPoolSize {
            pool,
            len: names.len(),
        });
    }
    let mut roots = [NoteName::natural(crate::theory::pitch::Letter::C); 12];
    for (slot, name) in roots.iter_mut().zip(names) {
        *slot = NoteName::parse(name).ok_or_else(|| ConfigError::InvalidRoot {
            pool,
            name: name.clone(),
        })?;
    }
    Ok(roots)
}
