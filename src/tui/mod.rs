//! TUI — progression display and metronome controls in one screen.
//!
//! The App struct holds all interface state and drives the event loop:
//! draw, poll for a key, then top up the audio queue. Audio pacing is
//! wall-clock based: the loop keeps a small lead of rendered frames ahead
//! of real time so the cpal callback never starves, without the queue
//! growing unboundedly.

pub mod theme;

use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind};
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::audio::AudioOutput;
use crate::metronome::{Metronome, MetronomeConfig};
use crate::theory::{GenerationEngine, GenerationResult};

/// Frames rendered per metronome block.
const BLOCK_FRAMES: u32 = 1024;

/// Frames of audio kept queued ahead of the wall clock.
const LEAD_FRAMES: u64 = 4096;

/// Input poll timeout per loop iteration.
const POLL_MS: u64 = 10;

/// Every key maps to one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    Generate,
    ToggleMetronome,
    BpmUp,
    BpmDown,
    BeatsUp,
    BeatsDown,
    ToggleAccent,
    ToggleSubdivisions,
    ToggleSubdivisionType,
    VolumeUp,
    VolumeDown,
}

/// Map a key press to an action.
pub fn map_key(key: KeyEvent) -> Option<Action> {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
        KeyCode::Char('g') | KeyCode::Enter => Some(Action::Generate),
        KeyCode::Char(' ') => Some(Action::ToggleMetronome),
        KeyCode::Up => Some(Action::BpmUp),
        KeyCode::Down => Some(Action::BpmDown),
        KeyCode::Right => Some(Action::BeatsUp),
        KeyCode::Left => Some(Action::BeatsDown),
        KeyCode::Char('a') => Some(Action::ToggleAccent),
        KeyCode::Char('s') => Some(Action::ToggleSubdivisions),
        KeyCode::Char('t') => Some(Action::ToggleSubdivisionType),
        KeyCode::Char('=') | KeyCode::Char('+') => Some(Action::VolumeUp),
        KeyCode::Char('-') => Some(Action::VolumeDown),
        _ => None,
    }
}

/// Wall-clock pacing for the audio pump.
struct PumpClock {
    started: Instant,
    produced: u64,
}

/// The main TUI application state.
pub struct App {
    engine: GenerationEngine,
    result: GenerationResult,
    metronome: Metronome,
    audio: Option<AudioOutput>,
    clock: Option<PumpClock>,
    should_quit: bool,
}

impl App {
    /// Create the app and generate the first progression immediately.
    pub fn new(
        mut engine: GenerationEngine,
        metronome: Metronome,
        audio: Option<AudioOutput>,
    ) -> Self {
        let result = engine.generate();
        Self {
            engine,
            result,
            metronome,
            audio,
            clock: None,
            should_quit: false,
        }
    }

    pub fn result(&self) -> &GenerationResult {
        &self.result
    }

    pub fn metronome(&self) -> &Metronome {
        &self.metronome
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Process an action.
    pub fn handle_action(&mut self, action: Action) {
        match action {
            Action::Quit => self.should_quit = true,
            Action::Generate => self.result = self.engine.generate(),
            Action::ToggleMetronome => {
                if self.metronome.toggle() {
                    self.clock = Some(PumpClock {
                        started: Instant::now(),
                        produced: 0,
                    });
                } else {
                    self.clock = None;
                    if let Some(ref mut audio) = self.audio {
                        let _ = audio.clear();
                    }
                }
            }
            Action::BpmUp => self.adjust_config(|c| c.bpm += 5),
            Action::BpmDown => self.adjust_config(|c| c.bpm = c.bpm.saturating_sub(5)),
            Action::BeatsUp => self.adjust_config(|c| c.beats_per_measure += 1),
            Action::BeatsDown => {
                self.adjust_config(|c| c.beats_per_measure = c.beats_per_measure.saturating_sub(1))
            }
            Action::ToggleAccent => {
                self.adjust_config(|c| c.accent_first_beat = !c.accent_first_beat)
            }
            Action::ToggleSubdivisions => self.adjust_config(|c| c.subdivisions = !c.subdivisions),
            Action::ToggleSubdivisionType => {
                self.adjust_config(|c| c.subdivision = c.subdivision.toggled())
            }
            Action::VolumeUp => self.adjust_config(|c| c.volume += 0.1),
            Action::VolumeDown => self.adjust_config(|c| c.volume -= 0.1),
        }
    }

    /// Apply a settings edit. The metronome restarts its click phase on any
    /// change, so the queued audio is stale and gets flushed.
    fn adjust_config(&mut self, edit: impl FnOnce(&mut MetronomeConfig)) {
        let mut config = self.metronome.config();
        edit(&mut config);
        self.metronome.set_config(config);
        if self.metronome.is_running() {
            if let Some(ref mut audio) = self.audio {
                let _ = audio.clear();
            }
            self.clock = Some(PumpClock {
                started: Instant::now(),
                produced: 0,
            });
        }
    }

    /// Keep the audio queue topped up to the lead target.
    fn pump_audio(&mut self) {
        if !self.metronome.is_running() {
            return;
        }
        let Some(ref mut audio) = self.audio else {
            return;
        };
        let Some(ref mut clock) = self.clock else {
            return;
        };

        let sample_rate = self.metronome.sample_rate() as f64;
        let elapsed = clock.started.elapsed().as_secs_f64();
        let target = (elapsed * sample_rate) as u64 + LEAD_FRAMES;
        while clock.produced < target {
            let Some(block) = self.metronome.render_block(BLOCK_FRAMES) else {
                break;
            };
            if audio.push_block(block).is_err() {
                break;
            }
            clock.produced += u64::from(BLOCK_FRAMES);
        }
    }

    /// Run the TUI event loop.
    pub fn run(
        &mut self,
        terminal: &mut ratatui::Terminal<impl ratatui::backend::Backend>,
    ) -> io::Result<()> {
        while !self.should_quit {
            terminal
                .draw(|frame| self.draw(frame))
                .map_err(|e| io::Error::other(e.to_string()))?;

            if event::poll(Duration::from_millis(POLL_MS))? {
                if let CrosstermEvent::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        if let Some(action) = map_key(key) {
                            self.handle_action(action);
                        }
                    }
                }
            }

            self.pump_audio();
        }
        Ok(())
    }

    /// Draw the full screen.
    pub fn draw(&self, frame: &mut Frame) {
        let palette = theme::palette(self.result.mode);
        let base = Style::default().fg(palette.text).bg(palette.background);
        frame.render_widget(Block::default().style(base), frame.area());

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // key and mode
                Constraint::Length(3), // scale
                Constraint::Min(5),    // chord cards
                Constraint::Length(3), // metronome
                Constraint::Length(1), // help
            ])
            .split(frame.area());

        self.draw_header(frame, rows[0]);
        self.draw_scale(frame, rows[1]);
        self.draw_chords(frame, rows[2]);
        self.draw_metronome(frame, rows[3]);
        self.draw_help(frame, rows[4]);
    }

    fn bordered(&self, title: &'static str) -> Block<'static> {
        let palette = theme::palette(self.result.mode);
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(palette.border))
            .title(title)
    }

    fn draw_header(&self, frame: &mut Frame, area: Rect) {
        let palette = theme::palette(self.result.mode);
        let mut spans = vec![
            Span::styled(
                format!("{} ", self.result.key),
                Style::default()
                    .fg(palette.text)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(self.result.mode.name()),
        ];
        if let Some(relative) = self.result.relative_major {
            spans.push(Span::raw(format!("   relative major: {relative}")));
        }
        let header = Paragraph::new(Line::from(spans))
            .alignment(Alignment::Center)
            .block(self.bordered("key"));
        frame.render_widget(header, area);
    }

    fn draw_scale(&self, frame: &mut Frame, area: Rect) {
        let notes = self
            .result
            .scale
            .iter()
            .map(|n| n.to_string())
            .collect::<Vec<_>>()
            .join("  ");
        let scale = Paragraph::new(notes)
            .alignment(Alignment::Center)
            .block(self.bordered("scale"));
        frame.render_widget(scale, area);
    }

    fn draw_chords(&self, frame: &mut Frame, area: Rect) {
        let block = self.bordered("progression");
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let count = self.result.progression.len().max(1);
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(vec![Constraint::Ratio(1, count as u32); count])
            .split(inner);

        for (chord, column) in self.result.progression.iter().zip(columns.iter()) {
            let color = theme::quality_color(chord.quality);
            let notes = chord
                .notes
                .iter()
                .map(|n| n.to_string())
                .collect::<Vec<_>>()
                .join(" ");
            let lines = vec![
                Line::from(Span::styled(
                    chord.roman.clone(),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(notes, Style::default().fg(color))),
            ];
            let card = Paragraph::new(lines).alignment(Alignment::Center);
            frame.render_widget(card, *column);
        }
    }

    fn draw_metronome(&self, frame: &mut Frame, area: Rect) {
        let config = self.metronome.config();
        let state = if self.metronome.is_running() {
            "RUN"
        } else {
            "STOP"
        };
        let beats = (0..config.beats_per_measure)
            .map(|b| {
                if self.metronome.beat_in_measure() == Some(b) {
                    "●"
                } else {
                    "○"
                }
            })
            .collect::<Vec<_>>()
            .join(" ");
        let subdivision = if config.subdivisions {
            config.subdivision.name()
        } else {
            "off"
        };
        let text = format!(
            "{state}  {} BPM  {}/4  vol {:.1}  accent {}  subdiv {subdivision}   {beats}",
            config.bpm,
            config.beats_per_measure,
            config.volume,
            if config.accent_first_beat { "on" } else { "off" },
        );
        let panel = Paragraph::new(text)
            .alignment(Alignment::Center)
            .block(self.bordered("metronome"));
        frame.render_widget(panel, area);
    }

    fn draw_help(&self, frame: &mut Frame, area: Rect) {
        let help = Paragraph::new(
            "g generate  space start/stop  ↑↓ bpm  ←→ beats  a accent  s subdiv  t feel  -/= volume  q quit",
        )
        .alignment(Alignment::Center);
        frame.render_widget(help, area);
    }
}
