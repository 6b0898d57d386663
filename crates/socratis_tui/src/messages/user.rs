//! Student message rendering.
//!
//! First line: left border, indicator, optional timestamp, text start.
//! Continuation lines keep the border and indent. Attached images are
//! summarized on a trailing line.

use ratatui::text::{Line, Span};
use socratis_core::Message;
use unicode_width::UnicodeWidthStr;

use crate::layouts::fg;
use crate::theme::Palette;
use crate::utils::{LEFT_PADDING, wrap_lines};

pub const USER_INDICATOR: &str = "»";

const USER_LEFT_BORDER: &str = "│ ";

pub fn user_message_lines(
    msg: &Message,
    palette: &Palette,
    width: usize,
    timestamp: Option<&str>,
) -> Vec<Line<'static>> {
    let indent_len = LEFT_PADDING.len() + USER_LEFT_BORDER.width();
    let wrap_width = width.saturating_sub(indent_len).max(1);
    let wrapped = wrap_lines(msg.text.trim(), wrap_width);
    let border_span = Span::styled(USER_LEFT_BORDER, fg(palette.accent));

    let mut first = vec![
        border_span.clone(),
        Span::styled(USER_INDICATOR, fg(palette.accent)),
        Span::raw(" "),
    ];
    if let Some(t) = timestamp {
        first.push(Span::styled(format!("{t} "), fg(palette.text_muted)));
    }
    let mut rest = wrapped.into_iter();
    if let Some(seg) = rest.next() {
        first.push(Span::styled(seg, fg(palette.text)));
    }

    let mut lines = vec![Line::from(first)];
    for seg in rest {
        lines.push(Line::from(vec![
            border_span.clone(),
            Span::raw(LEFT_PADDING),
            Span::styled(seg, fg(palette.text)),
        ]));
    }
    if msg.has_images() {
        let count = msg.images.len();
        let label = if count == 1 {
            "📎 1 image".to_string()
        } else {
            format!("📎 {count} images")
        };
        lines.push(Line::from(vec![
            border_span,
            Span::raw(LEFT_PADDING),
            Span::styled(label, fg(palette.text_muted)),
        ]));
    }
    lines
}
