//! Carve the screen into header, transcript body and footer.

use ratatui::layout::Rect;

use crate::utils::horizontal_padding;

/// Title line, subtitle line, bottom border.
pub const HEADER_HEIGHT: u16 = 3;
/// Input box (border, text, border) plus the hint line.
pub const FOOTER_HEIGHT: u16 = 4;

#[derive(Debug, Clone)]
pub struct MainSplits {
    pub header: Rect,
    /// Padded left and right. Collapses to zero rows first when space runs out.
    pub body: Rect,
    pub footer: Rect,
}

/// Header gets its rows first, then the footer; the body takes what is left.
pub fn main_splits(area: Rect) -> MainSplits {
    let (header, rest) = vertical_split(area, HEADER_HEIGHT);
    let body_rows = rest.height.saturating_sub(FOOTER_HEIGHT);
    let (body, footer) = vertical_split(rest, body_rows);
    MainSplits {
        header,
        body: horizontal_padding(body),
        footer,
    }
}

/// Cut `top_rows` off the top of `area`, clamped to its height.
pub fn vertical_split(area: Rect, top_rows: u16) -> (Rect, Rect) {
    let cut = top_rows.min(area.height);
    let upper = Rect { height: cut, ..area };
    let lower = Rect {
        y: area.y.saturating_add(cut),
        height: area.height - cut,
        ..area
    };
    (upper, lower)
}
