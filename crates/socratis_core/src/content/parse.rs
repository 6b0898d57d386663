use super::block::ContentBlock;
use super::inline::parse_inline;
use super::table::{is_pipe_line, parse_table};

const FENCE: &str = "```";

#[derive(Debug)]
enum Segment<'a> {
    Text(&'a str),
    Code {
        language: Option<&'a str>,
        content: &'a str,
    },
}

/// Parses raw message text into blocks. Total: malformed markup degrades to
/// literal text and an unterminated fence runs to the end of the text.
pub fn parse(text: &str) -> Vec<ContentBlock> {
    let mut blocks = Vec::new();
    for segment in split_fences(text) {
        match segment {
            Segment::Code { language, content } => {
                blocks.push(ContentBlock::code(language.map(str::to_string), content));
            }
            Segment::Text(s) => parse_text_segment(s, &mut blocks),
        }
    }
    blocks
}

fn split_fences(text: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let mut rest = text;

    while let Some(open) = rest.find(FENCE) {
        if open > 0 {
            segments.push(Segment::Text(&rest[..open]));
        }
        let after = &rest[open + FENCE.len()..];
        let (language, body) = split_language(after);
        match body.find(FENCE) {
            Some(close) => {
                segments.push(Segment::Code {
                    language,
                    content: &body[..close],
                });
                rest = &body[close + FENCE.len()..];
            }
            None => {
                segments.push(Segment::Code {
                    language,
                    content: body,
                });
                return segments;
            }
        }
    }

    if !rest.is_empty() {
        segments.push(Segment::Text(rest));
    }
    segments
}

/// A tag is only taken when it runs up to a line break; one line break
/// (`\n` or `\r\n`) directly after the fence (or tag) is dropped.
fn split_language(after_fence: &str) -> (Option<&str>, &str) {
    let tag_len = after_fence
        .find(|c: char| !is_tag_char(c))
        .unwrap_or(after_fence.len());
    match strip_line_break(&after_fence[tag_len..]) {
        Some(body) if tag_len > 0 => (Some(&after_fence[..tag_len]), body),
        _ => (None, strip_line_break(after_fence).unwrap_or(after_fence)),
    }
}

fn strip_line_break(s: &str) -> Option<&str> {
    s.strip_prefix("\r\n").or_else(|| s.strip_prefix('\n'))
}

fn is_tag_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '_' | '#' | '.')
}

fn parse_text_segment(segment: &str, blocks: &mut Vec<ContentBlock>) {
    let lines: Vec<&str> = segment.split_inclusive('\n').collect();
    let mut pending_start = 0;
    let mut pending_end = 0;
    let mut i = 0;

    while i < lines.len() {
        if is_pipe_line(lines[i].trim()) {
            if let Some((table, used)) = parse_table(&lines[i..]) {
                push_text(&segment[pending_start..pending_end], blocks);
                blocks.push(table);
                let consumed: usize = lines[i..i + used].iter().map(|l| l.len()).sum();
                pending_start = pending_end + consumed;
                pending_end = pending_start;
                i += used;
                continue;
            }
        }
        pending_end += lines[i].len();
        i += 1;
    }
    push_text(&segment[pending_start..pending_end], blocks);
}

fn push_text(text: &str, blocks: &mut Vec<ContentBlock>) {
    if !text.is_empty() {
        blocks.push(ContentBlock::text_run(parse_inline(text)));
    }
}
