//! Pipe tables: a header line, a `|---|` separator, then data lines.

use super::block::ContentBlock;

/// Tries to read a table from the start of `lines`. Returns the block and the
/// number of lines it consumed, or `None` if the lines do not form a table.
pub fn parse_table(lines: &[&str]) -> Option<(ContentBlock, usize)> {
    let (header, separator) = match lines {
        [header, separator, ..] => (header.trim(), separator.trim()),
        _ => return None,
    };
    if !is_pipe_line(header) || !is_separator(separator) {
        return None;
    }

    let headers: Vec<String> = header
        .split('|')
        .map(str::trim)
        .filter(|cell| !cell.is_empty())
        .map(str::to_string)
        .collect();
    if headers.is_empty() {
        return None;
    }

    let rows: Vec<Vec<String>> = lines[2..]
        .iter()
        .map(|line| line.trim())
        .take_while(|line| is_pipe_line(line))
        .map(split_row)
        .collect();

    let consumed = 2 + rows.len();
    Some((ContentBlock::table(headers, rows), consumed))
}

pub(crate) fn is_pipe_line(trimmed: &str) -> bool {
    trimmed.len() >= 2 && trimmed.starts_with('|') && trimmed.ends_with('|')
}

fn is_separator(trimmed: &str) -> bool {
    is_pipe_line(trimmed)
        && trimmed.contains('-')
        && trimmed.chars().all(|c| matches!(c, '|' | '-' | ':' | ' '))
}

/// One outer pipe is stripped from each side so a leading `|` does not add an
/// empty first column. Interior empty cells are kept.
fn split_row(trimmed: &str) -> Vec<String> {
    let inner = trimmed.strip_prefix('|').unwrap_or(trimmed);
    let inner = inner.strip_suffix('|').unwrap_or(inner);
    inner.split('|').map(|cell| cell.trim().to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_simple_table() {
        let (block, used) = parse_table(&["|A|B|", "|---|---|", "|1|2|"]).unwrap();
        assert_eq!(used, 3);
        assert_eq!(block, ContentBlock::table(cells(&["A", "B"]), vec![cells(&["1", "2"])]));
    }

    #[test]
    fn test_header_without_separator() {
        assert!(parse_table(&["|A|B|", "|1|2|"]).is_none());
        assert!(parse_table(&["|A|B|"]).is_none());
    }

    #[test]
    fn test_alignment_separator() {
        let (block, _) = parse_table(&["| Dr | Cr |", "|:---|---:|"]).unwrap();
        assert_eq!(block, ContentBlock::table(cells(&["Dr", "Cr"]), vec![]));
    }

    #[test]
    fn test_separator_with_text_rejected() {
        assert!(parse_table(&["|A|B|", "|abc|---|"]).is_none());
    }

    #[test]
    fn test_empty_header_cells_rejected() {
        assert!(parse_table(&["| | |", "|---|---|", "|1|2|"]).is_none());
    }

    #[test]
    fn test_rows_keep_interior_empty_cells() {
        let lines = [
            "| Date | Particulars | L.F. | Dr | Cr |",
            "|---|---|---|---|---|",
            "| 1 Apr | Cash A/c Dr. | | 50,000 | |",
            "| | To Capital A/c | | | 50,000 |",
        ];
        let (block, used) = parse_table(&lines).unwrap();
        assert_eq!(used, 4);
        let ContentBlock::Table { headers, rows } = block else {
            panic!("expected table");
        };
        assert_eq!(headers.len(), 5);
        assert_eq!(rows[0], cells(&["1 Apr", "Cash A/c Dr.", "", "50,000", ""]));
        assert_eq!(rows[1], cells(&["", "To Capital A/c", "", "", "50,000"]));
    }

    #[test]
    fn test_table_stops_at_non_pipe_line() {
        let (_, used) = parse_table(&["|A|", "|-|", "|1|", "after", "|2|"]).unwrap();
        assert_eq!(used, 3);
    }
}
