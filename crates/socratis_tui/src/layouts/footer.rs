//! Footer: the input box and the hint line under it.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Padding, Paragraph};
use unicode_width::UnicodeWidthStr;

use super::split::vertical_split;
use super::style::{bg, fg};
use crate::theme::Palette;

/// Prompt shown at the start of the input line.
pub const INPUT_ICON: &str = "▸ ";
pub const INPUT_PLACEHOLDER: &str = "Apna sawaal poochho…";

/// Horizontal padding inside the input box (each side).
const INPUT_PADDING_H: u16 = 2;
/// Border plus padding, so the hint lines up with the typed text.
const HINT_INSET_H: u16 = 1 + INPUT_PADDING_H;

/// What the footer shows. `cursor` is a byte offset into `input`.
#[derive(Debug, Clone, Copy)]
pub struct FooterView<'a> {
    pub input: &'a str,
    pub cursor: usize,
    pub busy: bool,
    pub pending_images: usize,
}

/// Highlighted while the input accepts a submission; dimmed while a reply streams.
pub fn input_block(palette: &Palette, focused: bool) -> Block<'static> {
    let border = if focused {
        palette.border_focused
    } else {
        palette.border
    };
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(fg(border))
        .style(bg(palette.input_background))
        .padding(Padding::new(INPUT_PADDING_H, INPUT_PADDING_H, 0, 0))
}

fn input_line(palette: &Palette, input: &str) -> Line<'static> {
    if input.is_empty() {
        Line::from(vec![
            Span::styled(INPUT_ICON, fg(palette.accent)),
            Span::styled(INPUT_PLACEHOLDER, fg(palette.text_placeholder)),
        ])
    } else {
        Line::from(vec![
            Span::styled(INPUT_ICON, fg(palette.success)),
            Span::styled(input.to_string(), fg(palette.text)),
        ])
    }
}

/// Hint for the current state, prefixed with the attached image count.
pub fn hint_line(palette: &Palette, view: &FooterView<'_>) -> Line<'static> {
    let hint = if view.busy {
        "Socratis is answering…  ·  PgUp/PgDn: scroll  ·  Ctrl+C: quit"
    } else if !view.input.is_empty() {
        "Enter: send  ·  Ctrl+U: clear  ·  Ctrl+C: quit"
    } else {
        "/image <path>  ·  /export  ·  Ctrl+Y: copy answer  ·  Ctrl+D: logs  ·  q: quit"
    };
    let mut spans = Vec::new();
    match view.pending_images {
        0 => {}
        1 => spans.push(Span::styled("📎 1 image  ·  ", fg(palette.accent))),
        n => spans.push(Span::styled(
            format!("📎 {n} images  ·  "),
            fg(palette.accent),
        )),
    }
    spans.push(Span::styled(hint, fg(palette.text_muted)));
    Line::from(spans)
}

/// Draws the footer into `area` and places the terminal cursor in the input.
pub fn render_footer(frame: &mut Frame, area: Rect, palette: &Palette, view: FooterView<'_>) {
    let (input_rect, hint_rect) = vertical_split(area, area.height.saturating_sub(1));

    let block = input_block(palette, !view.busy);
    let inner = block.inner(input_rect);
    frame.render_widget(block, input_rect);
    frame.render_widget(Paragraph::new(input_line(palette, view.input)), inner);

    let typed = view.input.get(..view.cursor).unwrap_or(view.input);
    let col = (inner.x as usize + INPUT_ICON.width() + typed.width())
        .min(inner.x.saturating_add(inner.width) as usize) as u16;
    frame.set_cursor_position((col, inner.y));

    let hint_rect = Rect {
        x: hint_rect.x.saturating_add(HINT_INSET_H),
        width: hint_rect.width.saturating_sub(HINT_INSET_H * 2),
        ..hint_rect
    };
    frame.render_widget(Paragraph::new(hint_line(palette, &view)), hint_rect);
}

#[cfg(test)]
mod tests {
    use ratatui::{Terminal, backend::TestBackend};

    use super::*;

    fn text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    fn view(input: &str, busy: bool, pending_images: usize) -> FooterView<'_> {
        FooterView {
            input,
            cursor: input.len(),
            busy,
            pending_images,
        }
    }

    #[test]
    fn hint_follows_state() {
        let p = Palette::dark();
        assert!(text(&hint_line(&p, &view("", true, 0))).contains("answering"));
        assert!(text(&hint_line(&p, &view("Cash?", false, 0))).contains("Enter: send"));
        assert!(text(&hint_line(&p, &view("", false, 0))).contains("/image"));
    }

    #[test]
    fn hint_counts_images() {
        let p = Palette::dark();
        assert!(text(&hint_line(&p, &view("", false, 1))).starts_with("📎 1 image "));
        assert!(text(&hint_line(&p, &view("", false, 3))).starts_with("📎 3 images"));
    }

    #[test]
    fn empty_input_shows_placeholder() {
        let line = input_line(&Palette::dark(), "");
        assert_eq!(text(&line), format!("{INPUT_ICON}{INPUT_PLACEHOLDER}"));
    }

    #[test]
    fn cursor_sits_after_typed_text() {
        let mut terminal = Terminal::new(TestBackend::new(40, 4)).unwrap();
        terminal
            .draw(|f| {
                let area = f.area();
                render_footer(f, area, &Palette::dark(), view("héllo", false, 0));
            })
            .unwrap();
        // border (1) + padding (2) + icon (2) + "héllo" (5)
        terminal.backend_mut().assert_cursor_position((10, 1));
    }
}
