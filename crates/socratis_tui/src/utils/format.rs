//! Width-aware text helpers. Widths are terminal columns (unicode-width).

use ratatui::layout::Rect;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use super::HORIZONTAL_PADDING;

/// Apply [HORIZONTAL_PADDING] on both sides of `area`.
#[inline]
pub fn horizontal_padding(area: Rect) -> Rect {
    Rect {
        x: area.x.saturating_add(HORIZONTAL_PADDING),
        y: area.y,
        width: area.width.saturating_sub(HORIZONTAL_PADDING.saturating_mul(2)),
        height: area.height,
    }
}

/// Word-wrap to lines of at most `width` columns. Words wider than `width`
/// are split. Returns an empty vec for whitespace-only input.
pub fn wrap_lines(s: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return Vec::new();
    }
    let mut out = Vec::new();
    let mut line = String::new();
    let mut line_width = 0;
    for word in s.split_whitespace() {
        let word_width = word.width();
        let need = if line.is_empty() {
            word_width
        } else {
            line_width + 1 + word_width
        };
        if need <= width {
            if !line.is_empty() {
                line.push(' ');
                line_width += 1;
            }
            line.push_str(word);
            line_width += word_width;
            continue;
        }
        if !line.is_empty() {
            out.push(std::mem::take(&mut line));
            line_width = 0;
        }
        if word_width <= width {
            line.push_str(word);
            line_width = word_width;
        } else {
            let mut chunks = split_by_width(word, width);
            if let Some(tail) = chunks.pop() {
                out.extend(chunks);
                line_width = tail.width();
                line = tail;
            }
        }
    }
    if !line.is_empty() {
        out.push(line);
    }
    out
}

fn split_by_width(word: &str, width: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_width = 0;
    for c in word.chars() {
        let w = c.width().unwrap_or(0);
        if current_width + w > width && !current.is_empty() {
            chunks.push(std::mem::take(&mut current));
            current_width = 0;
        }
        current.push(c);
        current_width += w;
    }
    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}

/// Truncate to `max_width` columns, ending in "…" when cut.
pub fn truncate_ellipsis(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    if max_width == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w + 1 > max_width {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

/// Right-pad with spaces to `width` columns.
pub fn pad_to_width(s: &str, width: usize) -> String {
    let pad = width.saturating_sub(s.width());
    format!("{s}{}", " ".repeat(pad))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_lines_by_width() {
        let lines = wrap_lines("one two three four", 8);
        assert_eq!(lines, vec!["one two", "three", "four"]);
    }

    #[test]
    fn wrap_lines_empty() {
        assert!(wrap_lines("", 10).is_empty());
        assert!(wrap_lines("   ", 10).is_empty());
        assert!(wrap_lines("text", 0).is_empty());
    }

    #[test]
    fn wrap_lines_splits_long_word() {
        let lines = wrap_lines("abcdefghij", 4);
        assert_eq!(lines, vec!["abcd", "efgh", "ij"]);
    }

    #[test]
    fn wrap_lines_counts_columns() {
        // Each CJK char is two columns wide.
        let lines = wrap_lines("世界 世界", 4);
        assert_eq!(lines, vec!["世界", "世界"]);
    }

    #[test]
    fn truncate_short_and_long() {
        assert_eq!(truncate_ellipsis("hi", 10), "hi");
        assert_eq!(truncate_ellipsis("hello world", 6), "hello…");
        assert_eq!(truncate_ellipsis("abc", 0), "");
    }

    #[test]
    fn pad_to_width_pads_columns() {
        assert_eq!(pad_to_width("ab", 4), "ab  ");
        assert_eq!(pad_to_width("abcdef", 4), "abcdef");
    }

    #[test]
    fn horizontal_padding_shrinks_width() {
        let inner = horizontal_padding(Rect::new(0, 0, 20, 5));
        assert_eq!(inner.x, 2);
        assert_eq!(inner.width, 16);
        assert_eq!(horizontal_padding(Rect::new(0, 0, 3, 1)).width, 0);
    }
}
