//! Render [ContentBlock]s to styled terminal lines.
//!
//! Text runs are wrapped by display width with span styles kept across
//! breaks. Code blocks are boxed with their language label. Tables are
//! aligned on column widths and shrunk to fit when too wide.

use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use socratis_core::{ContentBlock, InlineSpan};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::layouts::{code_style, emphasis_style, fg};
use crate::theme::Palette;
use crate::utils::{pad_to_width, truncate_ellipsis};

/// Narrowest a table column is shrunk to.
const MIN_COLUMN_WIDTH: usize = 3;

/// Lines for all blocks, each at most `width` columns. Blocks are separated
/// by a blank line.
pub fn blocks_to_lines(
    blocks: &[ContentBlock],
    palette: &Palette,
    width: usize,
) -> Vec<Line<'static>> {
    let width = width.max(1);
    let mut lines = Vec::new();
    for block in blocks {
        let rendered = match block {
            ContentBlock::TextRun { spans } => text_run_lines(spans, palette, width),
            ContentBlock::CodeBlock { language, content } => {
                code_block_lines(language.as_deref(), content, palette, width)
            }
            ContentBlock::Table { headers, rows } => table_lines(headers, rows, palette, width),
        };
        if rendered.is_empty() {
            continue;
        }
        if !lines.is_empty() {
            lines.push(Line::default());
        }
        lines.extend(rendered);
    }
    lines
}

fn span_style(span: &InlineSpan, palette: &Palette) -> Style {
    match span {
        InlineSpan::Plain(_) => fg(palette.text),
        InlineSpan::Bold(_) => emphasis_style(palette),
        InlineSpan::InlineCode(_) => code_style(palette),
    }
}

/// A run of text with one style; either all whitespace or none.
struct Token {
    text: String,
    style: Style,
    space: bool,
}

fn tokenize(text: &str, style: Style, out: &mut Vec<Token>) {
    let mut current = String::new();
    let mut current_space = false;
    for c in text.chars() {
        let space = c.is_whitespace();
        if !current.is_empty() && space != current_space {
            out.push(Token {
                text: std::mem::take(&mut current),
                style,
                space: current_space,
            });
        }
        current_space = space;
        current.push(if space { ' ' } else { c });
    }
    if !current.is_empty() {
        out.push(Token {
            text: current,
            style,
            space: current_space,
        });
    }
}

/// Wrap styled tokens at token boundaries. Whitespace at a break is dropped;
/// tokens wider than `width` are split by character.
fn wrap_tokens(tokens: Vec<Token>, width: usize) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    let mut spans: Vec<Span<'static>> = Vec::new();
    let mut used = 0;

    for token in tokens {
        let token_width = token.text.width();
        if token.space {
            if used > 0 && used + token_width < width {
                spans.push(Span::styled(token.text, token.style));
                used += token_width;
            }
            continue;
        }
        if used + token_width <= width {
            spans.push(Span::styled(token.text, token.style));
            used += token_width;
            continue;
        }
        if used > 0 {
            trim_trailing_space(&mut spans);
            lines.push(Line::from(std::mem::take(&mut spans)));
            used = 0;
        }
        let mut chunk = String::new();
        for c in token.text.chars() {
            let w = c.width().unwrap_or(0);
            if used + w > width && !chunk.is_empty() {
                spans.push(Span::styled(std::mem::take(&mut chunk), token.style));
                lines.push(Line::from(std::mem::take(&mut spans)));
                used = 0;
            }
            chunk.push(c);
            used += w;
        }
        if !chunk.is_empty() {
            spans.push(Span::styled(chunk, token.style));
        }
    }
    if !spans.is_empty() {
        trim_trailing_space(&mut spans);
        lines.push(Line::from(spans));
    }
    lines
}

fn trim_trailing_space(spans: &mut Vec<Span<'static>>) {
    while spans.last().is_some_and(|s| s.content.trim().is_empty()) {
        spans.pop();
    }
}

/// Hard line breaks are kept; an empty source line renders as a blank line.
pub fn text_run_lines(spans: &[InlineSpan], palette: &Palette, width: usize) -> Vec<Line<'static>> {
    let mut source_lines: Vec<Vec<Token>> = vec![Vec::new()];
    for span in spans {
        let style = span_style(span, palette);
        let mut parts = span.text().split('\n');
        if let Some(first) = parts.next()
            && let Some(current) = source_lines.last_mut()
        {
            tokenize(first, style, current);
        }
        for part in parts {
            let mut tokens = Vec::new();
            tokenize(part, style, &mut tokens);
            source_lines.push(tokens);
        }
    }

    // Outer blank lines are layout noise between blocks.
    while source_lines.first().is_some_and(|l| l.iter().all(|t| t.space)) {
        source_lines.remove(0);
    }
    while source_lines.last().is_some_and(|l| l.iter().all(|t| t.space)) {
        source_lines.pop();
    }

    let mut lines = Vec::new();
    for tokens in source_lines {
        if tokens.iter().all(|t| t.space) {
            lines.push(Line::default());
        } else {
            lines.extend(wrap_tokens(tokens, width));
        }
    }
    lines
}

pub fn code_block_lines(
    language: Option<&str>,
    content: &str,
    palette: &Palette,
    width: usize,
) -> Vec<Line<'static>> {
    let border = fg(palette.text_muted);
    let inner_width = width.saturating_sub(2).max(1);
    let label = language.unwrap_or("code");
    let label = truncate_ellipsis(label, width.saturating_sub(4));
    let top_rule = width.saturating_sub(label.width() + 4);

    let mut lines = vec![Line::from(vec![
        Span::styled("╭─ ", border),
        Span::styled(label, fg(palette.accent).add_modifier(Modifier::BOLD)),
        Span::styled(format!(" {}", "─".repeat(top_rule)), border),
    ])];
    let code = code_style(palette);
    for raw in content.trim_end_matches('\n').split('\n') {
        let expanded = raw.replace('\t', "    ");
        let shown = truncate_ellipsis(&expanded, inner_width);
        lines.push(Line::from(vec![
            Span::styled("│ ", border),
            Span::styled(pad_to_width(&shown, inner_width), code),
        ]));
    }
    lines.push(Line::from(Span::styled(
        format!("╰{}", "─".repeat(width.saturating_sub(1))),
        border,
    )));
    lines
}

/// Column widths that fit in `width` with " │ " separators. Wide columns
/// give up space first.
fn column_widths(headers: &[String], rows: &[Vec<String>], width: usize) -> Vec<usize> {
    let columns = rows
        .iter()
        .map(Vec::len)
        .chain(std::iter::once(headers.len()))
        .max()
        .unwrap_or(0);
    let mut widths = vec![0usize; columns];
    for row in std::iter::once(headers).chain(rows.iter().map(Vec::as_slice)) {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.width());
        }
    }
    let separators = columns.saturating_sub(1) * 3;
    let budget = width.saturating_sub(separators);
    while widths.iter().sum::<usize>() > budget {
        let Some((widest, w)) = widths.iter().copied().enumerate().max_by_key(|&(_, w)| w) else {
            break;
        };
        if w <= MIN_COLUMN_WIDTH {
            break;
        }
        widths[widest] = w - 1;
    }
    widths
}

fn table_row(cells: &[String], widths: &[usize], style: Style, sep: Style) -> Line<'static> {
    let mut spans = Vec::with_capacity(widths.len() * 2);
    for (i, w) in widths.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" │ ", sep));
        }
        let cell = cells.get(i).map(String::as_str).unwrap_or("");
        spans.push(Span::styled(pad_to_width(&truncate_ellipsis(cell, *w), *w), style));
    }
    Line::from(spans)
}

pub fn table_lines(
    headers: &[String],
    rows: &[Vec<String>],
    palette: &Palette,
    width: usize,
) -> Vec<Line<'static>> {
    let widths = column_widths(headers, rows, width);
    if widths.is_empty() {
        return Vec::new();
    }
    let sep = fg(palette.text_muted);
    let header_style = fg(palette.table_header).add_modifier(Modifier::BOLD);
    let rule = widths
        .iter()
        .map(|w| "─".repeat(*w))
        .collect::<Vec<_>>()
        .join("─┼─");

    let mut lines = vec![
        table_row(headers, &widths, header_style, sep),
        Line::from(Span::styled(rule, sep)),
    ];
    let body = fg(palette.text);
    lines.extend(rows.iter().map(|row| table_row(row, &widths, body, sep)));
    lines
}

#[cfg(test)]
mod tests {
    use socratis_core::parse;

    use super::*;

    fn text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn bold_and_code_styled() {
        let palette = Palette::dark();
        let blocks = parse("Debit **Cash** via `Dr.`");
        let lines = blocks_to_lines(&blocks, &palette, 80);
        assert_eq!(lines.len(), 1);
        let bold = lines[0].spans.iter().find(|s| s.content == "Cash").unwrap();
        assert!(bold.style.add_modifier.contains(Modifier::BOLD));
        let code = lines[0].spans.iter().find(|s| s.content == "Dr.").unwrap();
        assert_eq!(code.style, code_style(&palette));
    }

    #[test]
    fn text_run_wraps_and_keeps_style() {
        let palette = Palette::dark();
        let spans = vec![InlineSpan::plain("aa "), InlineSpan::bold("bbbb cc")];
        let lines = text_run_lines(&spans, &palette, 6);
        let texts: Vec<String> = lines.iter().map(text).collect();
        assert_eq!(texts, vec!["aa", "bbbb", "cc"]);
        assert!(lines[2].spans[0].style.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn text_run_keeps_hard_breaks() {
        let palette = Palette::dark();
        let lines = text_run_lines(&[InlineSpan::plain("one\n\ntwo\n")], &palette, 40);
        let texts: Vec<String> = lines.iter().map(text).collect();
        assert_eq!(texts, vec!["one", "", "two"]);
    }

    #[test]
    fn long_word_split() {
        let palette = Palette::dark();
        let lines = text_run_lines(&[InlineSpan::plain("abcdefgh")], &palette, 3);
        let texts: Vec<String> = lines.iter().map(text).collect();
        assert_eq!(texts, vec!["abc", "def", "gh"]);
    }

    #[test]
    fn code_block_boxed_with_label() {
        let palette = Palette::dark();
        let lines = code_block_lines(Some("python"), "x = 1\ny = 2\n", &palette, 20);
        assert_eq!(lines.len(), 4);
        assert!(text(&lines[0]).contains("python"));
        assert!(text(&lines[1]).starts_with("│ x = 1"));
        assert!(text(&lines[3]).starts_with("╰"));
        assert!(lines.iter().all(|l| text(l).width() <= 20));
    }

    #[test]
    fn code_block_without_language() {
        let palette = Palette::dark();
        let lines = code_block_lines(None, "plain", &palette, 20);
        assert!(text(&lines[0]).contains("code"));
    }

    #[test]
    fn table_columns_aligned() {
        let palette = Palette::dark();
        let headers = vec!["Account".to_string(), "Dr".to_string()];
        let rows = vec![
            vec!["Cash".to_string(), "500".to_string()],
            vec!["Capital".to_string(), "".to_string()],
        ];
        let lines = table_lines(&headers, &rows, &palette, 40);
        let texts: Vec<String> = lines.iter().map(text).collect();
        assert_eq!(texts[0], "Account │ Dr ");
        assert_eq!(texts[1], "────────┼────");
        assert_eq!(texts[2], "Cash    │ 500");
        assert_eq!(texts[3], "Capital │    ");
    }

    #[test]
    fn wide_table_shrinks_to_fit() {
        let palette = Palette::dark();
        let headers = vec!["Particulars".to_string(), "Amount".to_string()];
        let rows = vec![vec![
            "To Balance carried down from previous year".to_string(),
            "12,000".to_string(),
        ]];
        let lines = table_lines(&headers, &rows, &palette, 24);
        assert!(lines.iter().all(|l| text(l).width() <= 24));
        assert!(text(&lines[2]).contains('…'));
    }

    #[test]
    fn blocks_separated_by_blank_line() {
        let palette = Palette::dark();
        let blocks = parse("Intro\n```\ncode\n```\nOutro");
        let lines = blocks_to_lines(&blocks, &palette, 30);
        let texts: Vec<String> = lines.iter().map(text).collect();
        assert_eq!(texts[0], "Intro");
        assert_eq!(texts[1], "");
        assert!(texts[2].starts_with("╭─ code"));
        assert_eq!(texts.last().map(String::as_str), Some("Outro"));
    }
}
