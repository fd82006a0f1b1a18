//! Cadenza — generate a progression, set the tempo, play along.

use std::io::{self, stdout, Write as _};

use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use cadenza::audio::AudioOutput;
use cadenza::config;
use cadenza::metronome::Metronome;
use cadenza::theory::{GenerationEngine, GenerationResult};
use cadenza::tui::App;

/// Fallback stream parameters when no audio device is available.
const DEFAULT_SAMPLE_RATE: u32 = 44100;
const DEFAULT_CHANNELS: u16 = 2;

#[derive(Debug, Parser)]
#[command(name = "cadenza", version, about = "Random diatonic chord progressions with a metronome")]
struct Cli {
    /// Seed the generator for reproducible progressions.
    #[arg(long)]
    seed: Option<u64>,

    /// Override the metronome tempo from the config file.
    #[arg(long)]
    bpm: Option<u32>,

    /// Run the interface without opening an audio device.
    #[arg(long)]
    no_audio: bool,

    /// Print one progression to stdout and exit.
    #[arg(long)]
    once: bool,

    /// With --once, emit the progression as YAML instead of text.
    #[arg(long)]
    yaml: bool,
}

fn print_result(result: &GenerationResult, yaml: bool) -> io::Result<()> {
    let mut out = stdout();
    if yaml {
        let rendered = serde_yaml::to_string(result).map_err(io::Error::other)?;
        out.write_all(rendered.as_bytes())?;
        return Ok(());
    }

    writeln!(out, "{} {}", result.key, result.mode)?;
    let scale = result
        .scale
        .iter()
        .map(|n| n.to_string())
        .collect::<Vec<_>>()
        .join(" ");
    writeln!(out, "scale: {scale}")?;
    for chord in &result.progression {
        let notes = chord
            .notes
            .iter()
            .map(|n| n.to_string())
            .collect::<Vec<_>>()
            .join(" ");
        writeln!(out, "  {:<5} {notes}", chord.roman)?;
    }
    if let Some(relative) = result.relative_major {
        writeln!(out, "relative major: {relative}")?;
    }
    Ok(())
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();

    let mut settings = match config::load() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("cadenza: {e}");
            std::process::exit(2);
        }
    };
    if let Some(bpm) = cli.bpm {
        settings.metronome.bpm = bpm;
    }

    let seed = cli.seed.unwrap_or_else(rand::random);
    let mut engine = GenerationEngine::with_pools(settings.pools.clone(), seed);

    if cli.once {
        let result = engine.generate();
        return print_result(&result, cli.yaml);
    }

    let audio = if cli.no_audio {
        None
    } else {
        match AudioOutput::new() {
            Ok(output) => Some(output),
            Err(e) => {
                eprintln!("cadenza: audio unavailable ({e}), metronome will be silent");
                None
            }
        }
    };

    let (sample_rate, channels) = audio
        .as_ref()
        .map(|a| (a.sample_rate(), a.channels()))
        .unwrap_or((DEFAULT_SAMPLE_RATE, DEFAULT_CHANNELS));
    let metronome = Metronome::new(settings.metronome, sample_rate, channels);

    enable_raw_mode()?;
    let mut out = stdout();
    execute!(out, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(out);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let mut app = App::new(engine, metronome, audio);
    let result = app.run(&mut terminal);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}
