//! `socratis render` - show how a reply is split into blocks.

use std::io::Read;

use anyhow::{Context, Result};
use console::style;
use socratis_core::{ContentBlock, InlineSpan, parse};

use crate::output;

fn read_input(file: &str) -> Result<String> {
    if file == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("failed to read stdin")?;
        return Ok(text);
    }
    std::fs::read_to_string(file).with_context(|| format!("failed to read {file}"))
}

fn render_spans(spans: &[InlineSpan]) -> String {
    spans
        .iter()
        .map(|span| match span {
            InlineSpan::Plain(s) => s.clone(),
            InlineSpan::Bold(s) => style(s).bold().to_string(),
            InlineSpan::InlineCode(s) => style(s).yellow().to_string(),
        })
        .collect()
}

fn render_block(block: &ContentBlock) -> String {
    match block {
        ContentBlock::TextRun { spans } => render_spans(spans).trim_matches('\n').to_string(),
        ContentBlock::CodeBlock { language, content } => {
            let label = language.as_deref().unwrap_or("code");
            let mut out = style(format!("── {label} ──")).dim().to_string();
            for line in content.lines() {
                out.push_str("\n  ");
                out.push_str(line);
            }
            out
        }
        ContentBlock::Table { headers, rows } => {
            let mut table = output::table();
            output::table_header(&mut table, headers);
            for row in rows {
                table.add_row(row);
            }
            table.to_string()
        }
    }
}

/// Text rendering: blocks in order, separated by a blank line.
fn render_text(blocks: &[ContentBlock]) -> String {
    blocks
        .iter()
        .map(render_block)
        .collect::<Vec<_>>()
        .join("\n\n")
}

pub fn handle(file: &str, json: bool) -> Result<()> {
    let text = read_input(file)?;
    let blocks = parse(&text);
    tracing::debug!(blocks = blocks.len(), "parsed reply text");

    if json || output::is_json() {
        output::data("blocks", &blocks);
    } else if blocks.is_empty() {
        output::warning("Nothing to render");
    } else {
        println!("{}", render_text(&blocks));
    }
    Ok(())
}
