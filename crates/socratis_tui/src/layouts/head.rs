//! Header strip: title and status dot on the first line, subtitle below.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use unicode_width::UnicodeWidthStr;

use super::style::{bg, fg};
use crate::theme::Palette;
use crate::utils::horizontal_padding;

pub const HEADER_TITLE: &str = "Socratis";
pub const HEADER_SUBTITLE: &str = "Accounts Tutor · Class 11";

/// Dot color next to the status text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderStatus {
    Ready,
    Busy,
    Error,
}

pub fn header_lines(
    palette: &Palette,
    status: &str,
    kind: HeaderStatus,
    width: u16,
) -> Vec<Line<'static>> {
    let title_style = fg(palette.text).add_modifier(Modifier::BOLD);
    let dot_style = match kind {
        HeaderStatus::Ready => fg(palette.success),
        HeaderStatus::Busy => fg(palette.warning),
        HeaderStatus::Error => fg(palette.danger),
    };
    let right_width = 2 + status.width();
    let gap = (width as usize).saturating_sub(HEADER_TITLE.width() + right_width);
    vec![
        Line::from(vec![
            Span::styled(HEADER_TITLE, title_style),
            Span::raw(" ".repeat(gap)),
            Span::styled("● ", dot_style),
            Span::styled(status.to_string(), fg(palette.text_muted)),
        ]),
        Line::from(Span::styled(HEADER_SUBTITLE, fg(palette.text_muted))),
    ]
}

pub fn render_header(
    frame: &mut Frame,
    area: Rect,
    palette: &Palette,
    status: &str,
    kind: HeaderStatus,
) {
    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(fg(palette.border))
        .style(bg(palette.input_background));
    let inner = horizontal_padding(block.inner(area));
    frame.render_widget(block, area);
    frame.render_widget(
        Paragraph::new(header_lines(palette, status, kind, inner.width)),
        inner,
    );
}
