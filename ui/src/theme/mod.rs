//! Colors used by the terminal view.

use crate::components::common::StatusLevel;
use crate::components::picker::RowStyle;
use crate::config::ui::UIConfig;
use tuirealm::props::Color;
use tuirealm::ratatui::style::{Modifier, Style};

/// Parses a color name, a `#rrggbb` value or a 256-color index.
pub fn parse_color(value: &str) -> Option<Color> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    let color = match value.to_lowercase().as_str() {
        "reset" => Color::Reset,
        "black" => Color::Black,
        "red" => Color::Red,
        "green" => Color::Green,
        "yellow" => Color::Yellow,
        "blue" => Color::Blue,
        "magenta" => Color::Magenta,
        "cyan" => Color::Cyan,
        "white" => Color::White,
        "gray" | "grey" => Color::Gray,
        "darkgray" | "darkgrey" => Color::DarkGray,
        "lightred" => Color::LightRed,
        "lightgreen" => Color::LightGreen,
        "lightyellow" => Color::LightYellow,
        "lightblue" => Color::LightBlue,
        "lightmagenta" => Color::LightMagenta,
        "lightcyan" => Color::LightCyan,
        other => {
            if let Some(hex) = other.strip_prefix('#') {
                let (r, g, b) = parse_hex(hex)?;
                Color::Rgb(r, g, b)
            } else {
                Color::Indexed(other.parse::<u8>().ok()?)
            }
        }
    };
    Some(color)
}

fn parse_hex(hex: &str) -> Option<(u8, u8, u8)> {
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some((r, g, b))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub muted: Color,
    pub accent: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            muted: Color::Indexed(244),
            accent: Color::Indexed(212),
        }
    }
}

impl Palette {
    /// Builds the palette from `[ui]`, keeping defaults for unparsable values.
    pub fn from_config(ui: &UIConfig) -> Self {
        let fallback = Self::default();
        Self {
            muted: parse_color(ui.muted_color()).unwrap_or(fallback.muted),
            accent: parse_color(ui.accent_color()).unwrap_or(fallback.accent),
        }
    }

    pub fn title(&self) -> Style {
        Style::default().fg(self.muted)
    }

    pub fn badge(&self) -> Style {
        Style::default().fg(self.muted)
    }

    pub fn legend(&self) -> Style {
        Style::default()
            .fg(self.accent)
            .add_modifier(Modifier::BOLD)
    }

    pub fn row(&self, style: RowStyle) -> Style {
        match style {
            RowStyle::HighlightedFocused => Style::default().fg(self.accent),
            RowStyle::Selected => Style::default()
                .fg(self.accent)
                .add_modifier(Modifier::BOLD),
            RowStyle::Plain => Style::default(),
        }
    }

    pub fn status(&self, level: StatusLevel) -> Style {
        match level {
            StatusLevel::Info => Style::default().fg(self.muted),
            StatusLevel::Warning => Style::default().fg(Color::Yellow),
            StatusLevel::Error => Style::default().fg(Color::Red),
        }
    }
}
