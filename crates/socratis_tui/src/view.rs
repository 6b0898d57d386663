//! TUI view: header (fixed top), scrollable transcript, input and hints (fixed bottom).

use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use socratis_core::{Message, Role};

use crate::layouts::{FooterView, bg, fg, main_splits, render_footer, render_header};
use crate::messages::{error, model, user};
use crate::state::{Screen, TuiState};
use crate::theme::Palette;
use crate::utils::MESSAGE_SPACING_LINES;

pub fn draw(frame: &mut Frame, state: &mut TuiState, area: Rect) {
    match state.screen {
        Screen::DebugTraces => draw_debug_traces(frame, state, area),
        Screen::Main => draw_main(frame, state, area),
    }
}

/// Captured logs, newest at the bottom. Ctrl+D to close.
fn draw_debug_traces(frame: &mut Frame, state: &mut TuiState, area: Rect) {
    let palette = &state.palette;
    let block = Block::default()
        .title(" Logs (Ctrl+D to close) ")
        .borders(Borders::ALL)
        .border_style(fg(palette.border))
        .style(bg(palette.background));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines = state.logs.as_ref().map(|l| l.lines()).unwrap_or_default();
    let viewport = inner.height as usize;
    let max_scroll = lines.len().saturating_sub(viewport);
    state.trace_scroll = state.trace_scroll.min(max_scroll);
    let offset = max_scroll - state.trace_scroll;

    let visible: Vec<Line> = if lines.is_empty() {
        vec![Line::from(Span::styled(
            "No log lines captured.",
            fg(palette.text_muted),
        ))]
    } else {
        lines
            .into_iter()
            .skip(offset)
            .take(viewport)
            .map(|s| Line::from(Span::styled(s, fg(palette.text_muted))))
            .collect()
    };
    frame.render_widget(Paragraph::new(visible), inner);
}

fn local_time(msg: &Message) -> String {
    msg.timestamp
        .with_timezone(&chrono::Local)
        .format("%H:%M")
        .to_string()
}

fn message_lines(
    msg: &Message,
    palette: &Palette,
    width: usize,
    streaming: bool,
    cursor_visible: bool,
) -> Vec<Line<'static>> {
    let time = local_time(msg);
    match msg.role {
        Role::User => user::user_message_lines(msg, palette, width, Some(&time)),
        Role::Model => {
            model::model_message_lines(msg, palette, width, Some(&time), streaming, cursor_visible)
        }
    }
}

fn push_spaced(lines: &mut Vec<Line<'static>>, block: Vec<Line<'static>>) {
    if !lines.is_empty() {
        lines.extend(std::iter::repeat_n(Line::default(), MESSAGE_SPACING_LINES));
    }
    lines.extend(block);
}

/// All transcript lines at `width`: settled messages from the cache, then
/// the in-flight reply or the thinking indicator, then the error alert.
pub fn transcript_lines(state: &mut TuiState, width: usize) -> Vec<Line<'static>> {
    let snapshot = state.session.snapshot();
    let in_flight = state.session.in_flight().cloned();
    let is_thinking = state.session.is_thinking();

    if state.cache_dirty || state.cached_width != width {
        let mut cached = Vec::new();
        for msg in snapshot.iter() {
            if in_flight.as_ref() == Some(&msg.id) {
                continue;
            }
            push_spaced(
                &mut cached,
                message_lines(msg, &state.palette, width, false, false),
            );
        }
        state.cached_lines = cached;
        state.cached_width = width;
        state.cache_dirty = false;
    }

    let mut lines = state.cached_lines.clone();
    let cursor_visible = (state.frame_count / 5).is_multiple_of(2);
    if is_thinking {
        push_spaced(&mut lines, model::thinking_lines(&state.palette, state.frame_count));
    } else if let Some(msg) = in_flight
        .as_ref()
        .and_then(|id| snapshot.iter().find(|m| &m.id == id))
    {
        push_spaced(
            &mut lines,
            message_lines(msg, &state.palette, width, true, cursor_visible),
        );
    }
    if let Some(failure) = state.session.last_failure() {
        push_spaced(
            &mut lines,
            error::error_alert_lines(
                failure.user_message(),
                Some(&failure.detail),
                &state.palette,
                width,
            ),
        );
    }
    lines
}

fn draw_main(frame: &mut Frame, state: &mut TuiState, area: Rect) {
    let splits = main_splits(area);

    let (status, kind) = state.header_status();
    render_header(frame, splits.header, &state.palette, &status, kind);

    // ---- Body: scrollable transcript ----
    let body = splits.body;
    let width = body.width.saturating_sub(1) as usize;
    let viewport_height = body.height as usize;
    let all_lines = transcript_lines(state, width);
    let palette = &state.palette;

    let content_height = all_lines.len();
    let max_scroll = content_height.saturating_sub(viewport_height);
    state.scroll = state.scroll.min(max_scroll);
    state.last_content_height = content_height;
    state.last_viewport_height = viewport_height;

    // scroll counts lines up from the bottom.
    let offset_from_top = max_scroll.saturating_sub(state.scroll);
    let visible: Vec<Line> = all_lines
        .into_iter()
        .skip(offset_from_top)
        .take(viewport_height)
        .collect();

    if state.session.transcript().is_empty() {
        let para = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled("Socratis", fg(palette.text))),
            Line::from(""),
            Line::from(Span::styled(
                "Ask anything about your Accounts syllabus.",
                fg(palette.text_muted),
            )),
        ])
        .alignment(Alignment::Center);
        frame.render_widget(para, body);
    } else {
        frame.render_widget(Paragraph::new(visible), body);
    }

    if content_height > viewport_height && viewport_height > 0 {
        let thumb_height = ((viewport_height * viewport_height) / content_height).max(1) as u16;
        let ratio = if max_scroll == 0 {
            1.0
        } else {
            offset_from_top as f64 / max_scroll as f64
        };
        let thumb_y =
            (ratio * (viewport_height as f64 - thumb_height as f64)).round() as u16;
        let track = Rect {
            x: body.x + body.width.saturating_sub(1),
            y: body.y,
            width: 1,
            height: body.height,
        };
        frame.render_widget(Block::default().style(bg(palette.scroll_track)), track);
        let thumb = Rect {
            y: track.y + thumb_y,
            height: thumb_height,
            ..track
        };
        frame.render_widget(Block::default().style(bg(palette.scroll_thumb)), thumb);
    }

    render_footer(
        frame,
        splits.footer,
        palette,
        FooterView {
            input: &state.input_buffer,
            cursor: state.input_cursor,
            busy: state.session.is_busy(),
            pending_images: state.pending_images.len(),
        },
    );
}

#[cfg(test)]
mod tests {
    use ratatui::{Terminal, backend::TestBackend};
    use socratis_core::ChatEvent;

    use super::*;

    fn text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    fn all_text(lines: &[Line]) -> String {
        lines.iter().map(text).collect::<Vec<_>>().join("\n")
    }

    #[test]
    fn transcript_starts_with_welcome() {
        let mut state = TuiState::new();
        let lines = transcript_lines(&mut state, 60);
        assert!(text(&lines[0]).contains(model::MODEL_NAME));
        assert!(all_text(&lines).contains("Namaste!"));
    }

    #[test]
    fn thinking_indicator_until_first_fragment() {
        let mut state = TuiState::new();
        state.input_buffer = "Depreciation?".to_string();
        let id = state.submit_input().unwrap().reply_id;
        state.apply_event(ChatEvent::turn_start(id.clone()));
        assert!(all_text(&transcript_lines(&mut state, 60)).contains(model::THINKING_LABEL));

        state.apply_event(ChatEvent::text_updated(id, "Value **decreases**"));
        let rendered = all_text(&transcript_lines(&mut state, 60));
        assert!(!rendered.contains(model::THINKING_LABEL));
        assert!(rendered.contains("Value decreases"));
    }

    #[test]
    fn failure_renders_alert() {
        let mut state = TuiState::new();
        state.input_buffer = "hi".to_string();
        state.submit_input().unwrap();
        state.apply_event(ChatEvent::turn_failed(None, "provider error 403: bad key"));
        let rendered = all_text(&transcript_lines(&mut state, 60));
        assert!(rendered.contains("✗ API Key missing"));
    }

    #[test]
    fn cache_rebuilt_on_width_change() {
        let mut state = TuiState::new();
        let wide = transcript_lines(&mut state, 120).len();
        let narrow = transcript_lines(&mut state, 30).len();
        assert!(narrow > wide);
    }

    #[test]
    fn draws_main_and_logs_screens() {
        let backend = TestBackend::new(60, 20);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut state = TuiState::new();
        terminal
            .draw(|f| draw(f, &mut state, f.area()))
            .unwrap();
        let buffer = terminal.backend().buffer().clone();
        let top: String = (0..buffer.area.width)
            .map(|x| buffer[(x, 0)].symbol().to_string())
            .collect();
        assert!(top.contains("Socratis"));

        state.toggle_logs();
        terminal
            .draw(|f| draw(f, &mut state, f.area()))
            .unwrap();
        let buffer = terminal.backend().buffer().clone();
        let title: String = (0..buffer.area.width)
            .map(|x| buffer[(x, 0)].symbol().to_string())
            .collect();
        assert!(title.contains("Logs"));
    }
}
