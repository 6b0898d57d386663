//! Terminal output helpers. Styled text for humans, one JSON object per line
//! for machines.
//!
//! Uses:
//! - `console` for colors (respects NO_COLOR, auto-disables when piped)
//! - `comfy-table` for tables
//! - `indicatif` for the waiting spinner

use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};

use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table, presets::UTF8_FULL};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use serde_json::Value as JsonValue;

use crate::cli::OutputFormat;

// ── Global format flag ─────────────────────────────────────────────

static JSON_MODE: AtomicBool = AtomicBool::new(false);

pub fn init(format: OutputFormat) {
    if format == OutputFormat::Json {
        JSON_MODE.store(true, Ordering::Relaxed);
    }
}

pub fn is_json() -> bool {
    JSON_MODE.load(Ordering::Relaxed)
}

// ── JSON envelope ──────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "lowercase")]
enum Level {
    Success,
    Error,
    Warning,
    Info,
    Data,
}

#[derive(Serialize)]
struct Envelope<'a> {
    level: Level,
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<&'a JsonValue>,
}

fn to_json_line(level: Level, message: &str, data: Option<&JsonValue>) -> String {
    serde_json::to_string(&Envelope { level, message, data })
        .unwrap_or_else(|_| serde_json::json!({ "level": level, "message": message }).to_string())
}

fn emit_json(level: Level, message: &str, data: Option<&JsonValue>) {
    println!("{}", to_json_line(level, message, data));
}

/// Human notices go to stdout except errors and side notes, which use stderr.
fn notice(level: Level, text: &str) {
    if is_json() {
        let line = to_json_line(level, text, None);
        match level {
            Level::Error => eprintln!("{line}"),
            _ => println!("{line}"),
        }
        return;
    }
    match level {
        Level::Success => println!("{} {}", style("✓").green(), style(text).bright()),
        Level::Error => eprintln!("{} {}", style("✗").red(), style(text).bright()),
        Level::Warning => println!("{} {}", style("!").yellow(), style(text).bright()),
        Level::Info | Level::Data => eprintln!("{}", style(text).dim()),
    }
}

// ── Public helpers ─────────────────────────────────────────────────

pub fn success(text: &str) {
    notice(Level::Success, text);
}

pub fn error(text: &str) {
    notice(Level::Error, text);
}

pub fn warning(text: &str) {
    notice(Level::Warning, text);
}

pub fn dim(text: &str) {
    notice(Level::Info, text);
}

/// Print a key-value pair with styled key.
pub fn kv(key: &str, value: &str) {
    if is_json() {
        emit_json(Level::Info, key, Some(&serde_json::json!({ key: value })));
    } else {
        println!("  {} {}", style(key).cyan().bold(), value);
    }
}

/// Emit a serializable value. Text mode pretty-prints it.
pub fn data<T: Serialize>(label: &str, value: &T) {
    let value = serde_json::to_value(value).unwrap_or(JsonValue::Null);
    if is_json() {
        emit_json(Level::Data, label, Some(&value));
    } else {
        match serde_json::to_string_pretty(&value) {
            Ok(pretty) => println!("{pretty}"),
            Err(_) => println!("{label}: {value}"),
        }
    }
}

/// Print a streamed piece of answer text without a newline.
pub fn stream(text: &str) {
    let mut stdout = std::io::stdout().lock();
    let _ = stdout.write_all(text.as_bytes());
    let _ = stdout.flush();
}

// ── Tables ─────────────────────────────────────────────────────────

pub fn table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

pub fn table_header(table: &mut Table, columns: &[String]) {
    table.set_header(
        columns
            .iter()
            .map(|c| Cell::new(c).fg(Color::Cyan).add_attribute(Attribute::Bold)),
    );
}

// ── Spinners ───────────────────────────────────────────────────────

/// A spinner on stderr. Hidden in JSON mode.
pub fn spinner(message: &str) -> ProgressBar {
    if is_json() {
        return ProgressBar::hidden();
    }
    let bar = ProgressBar::new_spinner().with_message(message.to_string());
    if let Ok(look) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
        bar.set_style(look);
    }
    bar.enable_steady_tick(std::time::Duration::from_millis(80));
    bar
}

pub fn spinner_clear(spinner: &ProgressBar) {
    if !spinner.is_finished() {
        spinner.finish_and_clear();
    }
}
