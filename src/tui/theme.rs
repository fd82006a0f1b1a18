//! Mode palettes — each of the seven modes colors the whole screen.

use ratatui::style::Color;

use crate::theory::{ChordQuality, Mode};

/// Colors applied while a given mode is on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModePalette {
    pub background: Color,
    pub text: Color,
    pub border: Color,
}

/// Palette for a mode.
pub fn palette(mode: Mode) -> ModePalette {
    match mode {
        Mode::Ionian => ModePalette {
            background: Color::Rgb(26, 46, 26),
            text: Color::Rgb(144, 238, 144),
            border: Color::Rgb(74, 124, 89),
        },
        Mode::Aeolian => ModePalette {
            background: Color::Rgb(46, 26, 46),
            text: Color::Rgb(221, 160, 221),
            border: Color::Rgb(124, 74, 124),
        },
        Mode::Dorian => ModePalette {
            background: Color::Rgb(26, 46, 46),
            text: Color::Rgb(135, 206, 235),
            border: Color::Rgb(74, 124, 124),
        },
        Mode::Phrygian => ModePalette {
            background: Color::Rgb(46, 26, 26),
            text: Color::Rgb(240, 160, 160),
            border: Color::Rgb(124, 74, 74),
        },
        Mode::Lydian => ModePalette {
            background: Color::Rgb(46, 46, 26),
            text: Color::Rgb(240, 230, 140),
            border: Color::Rgb(124, 124, 74),
        },
        Mode::Mixolydian => ModePalette {
            background: Color::Rgb(26, 46, 26),
            text: Color::Rgb(152, 251, 152),
            border: Color::Rgb(74, 124, 124),
        },
        Mode::Locrian => ModePalette {
            background: Color::Rgb(46, 46, 46),
            text: Color::Rgb(192, 192, 192),
            border: Color::Rgb(124, 124, 124),
        },
    }
}

/// Text color for a chord card, keyed by triad quality.
pub fn quality_color(quality: ChordQuality) -> Color {
    match quality {
        ChordQuality::Major => Color::Rgb(144, 238, 144),
        ChordQuality::Minor => Color::Rgb(221, 160, 221),
        ChordQuality::Diminished => Color::Rgb(240, 160, 160),
    }
}
