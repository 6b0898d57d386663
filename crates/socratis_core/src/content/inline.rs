//! Inline spans: `**bold**` and `` `code` ``. Leftmost marker wins, no nesting.

use super::block::InlineSpan;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Marker {
    Code,
    Bold,
}

impl Marker {
    fn delimiter(self) -> &'static str {
        match self {
            Marker::Code => "`",
            Marker::Bold => "**",
        }
    }
}

/// Splits `text` into spans. Unmatched or empty markers are kept as plain text,
/// and adjacent plain text is merged. Returns no spans only for empty input.
pub fn parse_inline(text: &str) -> Vec<InlineSpan> {
    let mut spans = Vec::new();
    let mut plain = String::new();
    let mut i = 0;

    while i < text.len() {
        let Some((start, marker)) = next_marker(text, i) else {
            plain.push_str(&text[i..]);
            break;
        };
        plain.push_str(&text[i..start]);

        let delim = marker.delimiter();
        let body_start = start + delim.len();
        match text[body_start..].find(delim) {
            Some(len) if len > 0 => {
                if !plain.is_empty() {
                    spans.push(InlineSpan::Plain(std::mem::take(&mut plain)));
                }
                let body = text[body_start..body_start + len].to_string();
                spans.push(match marker {
                    Marker::Code => InlineSpan::InlineCode(body),
                    Marker::Bold => InlineSpan::Bold(body),
                });
                i = body_start + len + delim.len();
            }
            _ => {
                plain.push_str(delim);
                i = body_start;
            }
        }
    }

    if !plain.is_empty() {
        spans.push(InlineSpan::Plain(plain));
    }
    spans
}

fn next_marker(text: &str, from: usize) -> Option<(usize, Marker)> {
    let bytes = text.as_bytes();
    let mut j = from;
    while j < bytes.len() {
        match bytes[j] {
            b'`' => return Some((j, Marker::Code)),
            b'*' if bytes.get(j + 1) == Some(&b'*') => return Some((j, Marker::Bold)),
            _ => j += 1,
        }
    }
    None
}
