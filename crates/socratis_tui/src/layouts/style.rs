//! Palette colors to ratatui styles.

use ratatui::style::{Modifier, Style};

use crate::theme::{Palette, Rgb};

pub fn fg(rgb: Rgb) -> Style {
    Style::default().fg(rgb.into())
}

pub fn bg(rgb: Rgb) -> Style {
    Style::default().bg(rgb.into())
}

/// Accent text on the code fill.
pub fn code_style(palette: &Palette) -> Style {
    fg(palette.accent).bg(palette.code_background.into())
}

/// Bold terms in tutor replies.
pub fn emphasis_style(palette: &Palette) -> Style {
    fg(palette.text).add_modifier(Modifier::BOLD)
}
