//! Terminal colors and color profiles
//!
//! Style documents name colors either by xterm palette index (`"212"`) or by
//! hex value (`"#ff79c6"`). The color profile decides how a color is encoded
//! into SGR parameters, downsampling when the terminal cannot show it.

use std::str::FromStr;

use crate::{Result, StyleError};

/// The color capability tier the output is encoded for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorProfile {
    /// 24-bit color
    #[default]
    TrueColor,
    /// xterm 256-color palette
    Ansi256,
    /// The 16 basic ANSI colors
    Ansi,
    /// No colors, text attributes only
    Ascii,
}

impl ColorProfile {
    /// Detect the profile of the current terminal from the environment.
    pub fn detect() -> Self {
        let no_color = std::env::var("NO_COLOR").ok();
        let colorterm = std::env::var("COLORTERM").ok();
        let term = std::env::var("TERM").ok();
        Self::from_env_values(no_color.as_deref(), colorterm.as_deref(), term.as_deref())
    }

    /// Pick a profile from `NO_COLOR`, `COLORTERM` and `TERM` values
    pub fn from_env_values(
        no_color: Option<&str>,
        colorterm: Option<&str>,
        term: Option<&str>,
    ) -> Self {
        if no_color.is_some_and(|v| !v.is_empty()) {
            return ColorProfile::Ascii;
        }

        if let Some(colorterm) = colorterm {
            let colorterm = colorterm.to_lowercase();
            if colorterm == "truecolor" || colorterm == "24bit" {
                return ColorProfile::TrueColor;
            }
        }

        match term.map(str::to_lowercase) {
            None => ColorProfile::Ascii,
            Some(term) if term.is_empty() || term == "dumb" => ColorProfile::Ascii,
            Some(term) if term.contains("truecolor") || term.contains("direct") => {
                ColorProfile::TrueColor
            }
            Some(term) if term.contains("256color") => ColorProfile::Ansi256,
            Some(_) => ColorProfile::Ansi,
        }
    }
}

/// Whether a color paints the text or its background
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layer {
    Foreground,
    Background,
}

/// A color as written in a style document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    /// xterm palette index
    Indexed(u8),
    /// 24-bit RGB
    Rgb(u8, u8, u8),
}

/// The 16 basic colors as rendered by xterm
const BASIC_PALETTE: [(u8, u8, u8); 16] = [
    (0, 0, 0),
    (128, 0, 0),
    (0, 128, 0),
    (128, 128, 0),
    (0, 0, 128),
    (128, 0, 128),
    (0, 128, 128),
    (192, 192, 192),
    (128, 128, 128),
    (255, 0, 0),
    (0, 255, 0),
    (255, 255, 0),
    (0, 0, 255),
    (255, 0, 255),
    (0, 255, 255),
    (255, 255, 255),
];

/// Channel levels of the 6x6x6 color cube
const CUBE_LEVELS: [u8; 6] = [0, 95, 135, 175, 215, 255];

impl FromStr for Color {
    type Err = StyleError;

    fn from_str(s: &str) -> Result<Self> {
        let value = s.trim();
        let invalid = || StyleError::InvalidColor(s.to_string());

        if let Some(hex) = value.strip_prefix('#') {
            let expanded: String = match hex.len() {
                3 => hex.chars().flat_map(|c| [c, c]).collect(),
                6 => hex.to_string(),
                _ => return Err(invalid()),
            };
            let channel = |i: usize| {
                expanded
                    .get(i..i + 2)
                    .and_then(|h| u8::from_str_radix(h, 16).ok())
                    .ok_or_else(invalid)
            };
            return Ok(Color::Rgb(channel(0)?, channel(2)?, channel(4)?));
        }

        value.parse::<u8>().map(Color::Indexed).map_err(|_| invalid())
    }
}

impl Color {
    /// Resolve the color to RGB
    pub fn to_rgb(self) -> (u8, u8, u8) {
        match self {
            Color::Rgb(r, g, b) => (r, g, b),
            Color::Indexed(n) if n < 16 => BASIC_PALETTE[n as usize],
            Color::Indexed(n) if n < 232 => {
                let i = n - 16;
                (
                    CUBE_LEVELS[(i / 36) as usize],
                    CUBE_LEVELS[((i / 6) % 6) as usize],
                    CUBE_LEVELS[(i % 6) as usize],
                )
            }
            Color::Indexed(n) => {
                let level = 8 + (n - 232) * 10;
                (level, level, level)
            }
        }
    }

    /// Nearest entry of the 256-color palette
    pub fn to_ansi256(self) -> u8 {
        match self {
            Color::Indexed(n) => n,
            Color::Rgb(r, g, b) => {
                if r == g && g == b {
                    if r < 8 {
                        return 16;
                    }
                    if r > 248 {
                        return 231;
                    }
                    return 232 + ((r as u16 - 8) * 24 / 247) as u8;
                }
                let level = |c: u8| -> u8 {
                    CUBE_LEVELS
                        .iter()
                        .enumerate()
                        .min_by_key(|(_, l)| (**l as i16 - c as i16).unsigned_abs())
                        .map(|(i, _)| i as u8)
                        .unwrap_or(0)
                };
                16 + 36 * level(r) + 6 * level(g) + level(b)
            }
        }
    }

    /// Nearest of the 16 basic colors
    pub fn to_ansi16(self) -> u8 {
        if let Color::Indexed(n) = self {
            if n < 16 {
                return n;
            }
        }

        let (r, g, b) = self.to_rgb();
        BASIC_PALETTE
            .iter()
            .enumerate()
            .min_by_key(|(_, (pr, pg, pb))| {
                let dr = *pr as i32 - r as i32;
                let dg = *pg as i32 - g as i32;
                let db = *pb as i32 - b as i32;
                dr * dr + dg * dg + db * db
            })
            .map(|(i, _)| i as u8)
            .unwrap_or(0)
    }

    /// SGR parameters for this color under `profile`, `None` when the
    /// profile carries no color.
    pub fn sgr(self, profile: ColorProfile, layer: Layer) -> Option<String> {
        let base = match layer {
            Layer::Foreground => 38,
            Layer::Background => 48,
        };

        match profile {
            ColorProfile::Ascii => None,
            ColorProfile::TrueColor => Some(match self {
                Color::Rgb(r, g, b) => format!("{base};2;{r};{g};{b}"),
                Color::Indexed(n) => format!("{base};5;{n}"),
            }),
            ColorProfile::Ansi256 => Some(format!("{base};5;{}", self.to_ansi256())),
            ColorProfile::Ansi => {
                let n = self.to_ansi16();
                let code = match (layer, n < 8) {
                    (Layer::Foreground, true) => 30 + n,
                    (Layer::Foreground, false) => 90 + (n - 8),
                    (Layer::Background, true) => 40 + n,
                    (Layer::Background, false) => 100 + (n - 8),
                };
                Some(code.to_string())
            }
        }
    }
}
