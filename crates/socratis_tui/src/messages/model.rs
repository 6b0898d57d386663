//! Tutor reply rendering.
//!
//! A name line with indicator and timestamp, then the reply's parsed blocks
//! behind a muted left border. While the reply streams a cursor follows the
//! last line; before the first fragment the thinking indicator stands in.

use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use socratis_core::{Message, parse};
use unicode_width::UnicodeWidthStr;

use super::blocks::blocks_to_lines;
use crate::layouts::fg;
use crate::theme::Palette;

pub const MODEL_INDICATOR: &str = "▸";
pub const MODEL_NAME: &str = "Socratis";
pub const STREAMING_CURSOR: &str = "▌";
pub const THINKING_LABEL: &str = "Thinking deeply";

const MODEL_LEFT_BORDER: &str = "│ ";

fn name_line(palette: &Palette, timestamp: Option<&str>) -> Line<'static> {
    let mut spans = vec![
        Span::styled(MODEL_INDICATOR, fg(palette.accent)),
        Span::raw(" "),
        Span::styled(MODEL_NAME, fg(palette.accent).add_modifier(Modifier::BOLD)),
    ];
    if let Some(t) = timestamp {
        spans.push(Span::styled(format!(" {t}"), fg(palette.text_muted)));
    }
    Line::from(spans)
}

pub fn model_message_lines(
    msg: &Message,
    palette: &Palette,
    width: usize,
    timestamp: Option<&str>,
    streaming: bool,
    cursor_visible: bool,
) -> Vec<Line<'static>> {
    let border = Span::styled(MODEL_LEFT_BORDER, fg(palette.text_muted));
    let body_width = width.saturating_sub(MODEL_LEFT_BORDER.width()).max(1);

    let mut lines = vec![name_line(palette, timestamp)];
    let mut body = blocks_to_lines(&parse(&msg.text), palette, body_width);
    if body.is_empty() {
        body.push(Line::default());
    }
    if streaming && cursor_visible
        && let Some(last) = body.last_mut()
    {
        last.spans
            .push(Span::styled(STREAMING_CURSOR, fg(palette.accent)));
    }
    for line in body {
        let mut spans = vec![border.clone()];
        spans.extend(line.spans);
        lines.push(Line::from(spans));
    }
    lines
}

/// "Thinking deeply" with one to three dots cycling on `frame`.
pub fn thinking_lines(palette: &Palette, frame: u64) -> Vec<Line<'static>> {
    let dots = ".".repeat((frame / 4 % 3) as usize + 1);
    vec![
        name_line(palette, None),
        Line::from(vec![
            Span::styled(MODEL_LEFT_BORDER, fg(palette.text_muted)),
            Span::styled(
                format!("{THINKING_LABEL}{dots}"),
                fg(palette.info).add_modifier(Modifier::ITALIC),
            ),
        ]),
    ]
}
