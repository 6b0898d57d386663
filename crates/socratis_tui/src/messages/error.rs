//! Failure alert shown under the transcript (✗ icon, danger style).

use ratatui::text::{Line, Span};

use crate::layouts::fg;
use crate::theme::Palette;
use crate::utils::{LEFT_PADDING, wrap_lines};

/// `message` is what the student reads; `detail` is the raw provider text.
pub fn error_alert_lines(
    message: &str,
    detail: Option<&str>,
    palette: &Palette,
    width: usize,
) -> Vec<Line<'static>> {
    let style = fg(palette.danger);
    let wrap_width = width.saturating_sub(LEFT_PADDING.len()).max(1);
    let mut lines = Vec::new();
    for (i, seg) in wrap_lines(message, wrap_width).into_iter().enumerate() {
        let lead = if i == 0 { "✗ " } else { LEFT_PADDING };
        lines.push(Line::from(vec![Span::styled(lead, style), Span::styled(seg, style)]));
    }
    if lines.is_empty() {
        lines.push(Line::from(Span::styled("✗ ", style)));
    }
    if let Some(detail) = detail.filter(|d| !d.trim().is_empty()) {
        for seg in wrap_lines(detail, wrap_width) {
            lines.push(Line::from(vec![
                Span::raw(LEFT_PADDING),
                Span::styled(seg, fg(palette.text_muted)),
            ]));
        }
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn icon_on_first_line() {
        let lines = error_alert_lines("Server abhi busy hai.", None, &Palette::dark(), 40);
        assert_eq!(lines.len(), 1);
        assert!(lines[0].spans[0].content.contains('✗'));
    }

    #[test]
    fn wraps_and_shows_detail() {
        let lines = error_alert_lines(
            "Connection mein thodi problem hai. Please wapis try karo.",
            Some("stream error: connection reset"),
            &Palette::dark(),
            24,
        );
        assert!(lines.len() > 3);
        let last: String = lines.last().unwrap().spans.iter().map(|s| s.content.as_ref()).collect();
        assert!(last.contains("reset"));
    }

    #[test]
    fn empty_message_still_renders() {
        assert_eq!(error_alert_lines("", Some(" "), &Palette::dark(), 40).len(), 1);
    }
}
