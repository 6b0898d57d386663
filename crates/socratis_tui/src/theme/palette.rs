//! Colors for the terminal UI, grouped by role rather than by hue.

use ratatui::style::Color;

use super::Appearance;

/// 24-bit color.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl From<Rgb> for Color {
    fn from(Rgb(r, g, b): Rgb) -> Self {
        Color::Rgb(r, g, b)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Palette {
    pub background: Rgb,
    /// Fill behind inline code and code blocks.
    pub code_background: Rgb,
    pub input_background: Rgb,

    pub border: Rgb,
    pub border_focused: Rgb,

    pub text: Rgb,
    pub text_muted: Rgb,
    pub text_placeholder: Rgb,

    /// Tutor name, bold terms, prompt icon.
    pub accent: Rgb,
    pub danger: Rgb,
    pub success: Rgb,
    pub warning: Rgb,
    pub info: Rgb,

    pub scroll_thumb: Rgb,
    pub scroll_track: Rgb,
    pub table_header: Rgb,
}

impl Palette {
    pub fn dark() -> Self {
        Self {
            background: Rgb(8, 8, 12),
            code_background: Rgb(26, 27, 38),
            border: Rgb(28, 30, 42),
            border_focused: Rgb(99, 148, 255),
            text: Rgb(200, 210, 245),
            text_muted: Rgb(70, 78, 110),
            text_placeholder: Rgb(70, 78, 110),
            accent: Rgb(99, 148, 255),
            danger: Rgb(255, 100, 120),
            success: Rgb(120, 220, 120),
            warning: Rgb(240, 185, 100),
            info: Rgb(100, 200, 255),
            input_background: Rgb(16, 17, 24),
            scroll_thumb: Rgb(86, 95, 137),
            scroll_track: Rgb(17, 17, 26),
            table_header: Rgb(165, 180, 252),
        }
    }

    pub fn light() -> Self {
        Self {
            background: Rgb(255, 255, 255),
            code_background: Rgb(244, 244, 245),
            border: Rgb(229, 229, 229),
            border_focused: Rgb(79, 70, 229),
            text: Rgb(26, 27, 38),
            text_muted: Rgb(86, 95, 137),
            text_placeholder: Rgb(86, 95, 137),
            accent: Rgb(79, 70, 229),
            danger: Rgb(220, 38, 38),
            success: Rgb(22, 163, 74),
            warning: Rgb(217, 119, 6),
            info: Rgb(37, 99, 235),
            input_background: Rgb(248, 248, 248),
            scroll_thumb: Rgb(203, 213, 225),
            scroll_track: Rgb(244, 244, 245),
            table_header: Rgb(67, 56, 202),
        }
    }

    pub fn for_appearance(appearance: Appearance) -> Self {
        if appearance.is_dark() {
            Self::dark()
        } else {
            Self::light()
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::dark()
    }
}
