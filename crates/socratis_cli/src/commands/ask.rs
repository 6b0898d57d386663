//! `socratis ask` - one question, answer streamed to stdout.

use std::path::{Path, PathBuf};

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use chrono::{Local, Offset};
use indicatif::ProgressBar;
use socratis_core::{ChatEvent, ImageAttachment, export};
use socratis_observability::{ObservabilityConfig, init};
use socratis_runtime::{ChatSession, EventSink, Runtime, TurnOutcome, parse_image_arg};

use super::runtime_config;
use crate::output;

/// The part of `text` not printed yet. Reply text only ever grows, so the
/// printed prefix stays valid.
fn unseen_suffix(text: &str, printed: usize) -> &str {
    text.get(printed..).unwrap_or_default()
}

/// Applies events to the session and echoes new reply text as it arrives.
struct StreamPrinter<'a> {
    session: &'a mut ChatSession,
    spinner: ProgressBar,
    echo: bool,
    printed: usize,
}

#[async_trait]
impl EventSink for StreamPrinter<'_> {
    async fn emit(&mut self, event: ChatEvent) -> socratis_runtime::Result<()> {
        if let ChatEvent::TextUpdated { text, .. } = &event {
            output::spinner_clear(&self.spinner);
            if self.echo {
                output::stream(unseen_suffix(text, self.printed));
            }
            self.printed = text.len();
        }
        self.session.apply(event)
    }
}

/// Runs one turn against `runtime`, echoing the reply when `echo` is set.
/// Returns the outcome and whether anything was printed.
async fn answer(
    runtime: &Runtime,
    session: &mut ChatSession,
    text: &str,
    images: Vec<ImageAttachment>,
    echo: bool,
) -> Result<(TurnOutcome, bool)> {
    let turn = session.submit(text, images)?;
    let mut printer = StreamPrinter {
        session,
        spinner: output::spinner("Thinking deeply..."),
        echo,
        printed: 0,
    };
    let outcome = runtime.drive_turn(turn, &mut printer).await?;
    output::spinner_clear(&printer.spinner);
    Ok((outcome, echo && printer.printed > 0))
}

fn export_notes(session: &ChatSession, dir: &Path) -> Result<()> {
    let now = Local::now();
    match export::write_to_dir(&session.snapshot(), dir, now.date_naive(), now.offset().fix())? {
        Some(path) => output::success(&format!("Notes saved: {}", path.display())),
        None => output::warning("Nothing to export"),
    }
    Ok(())
}

pub async fn handle(
    text: String,
    images: Vec<String>,
    export_dir: Option<PathBuf>,
    provider: Option<String>,
    model: Option<String>,
    verbose: bool,
) -> Result<()> {
    let mut obs_config = ObservabilityConfig::from_env();
    if verbose {
        obs_config = obs_config.with_log_level("debug");
    } else if obs_config.log_level.is_none() {
        obs_config = obs_config.with_log_level("warn");
    }
    if let Err(e) = init(obs_config) {
        output::warning(&format!("Logging disabled: {e}"));
    }

    let config = runtime_config(provider, model)?;
    if verbose {
        output::kv("provider", config.provider.as_str());
        output::kv("model", &config.model);
    }
    let runtime = Runtime::from_config(config)?;

    let images = images
        .iter()
        .map(|arg| parse_image_arg(arg))
        .collect::<socratis_runtime::Result<Vec<_>>>()?;

    let mut session = ChatSession::new();
    let echo = !output::is_json();
    let (outcome, printed) = answer(&runtime, &mut session, &text, images, echo).await?;
    if printed {
        println!();
    }

    if output::is_json() {
        output::data("answer", &outcome_json(&outcome));
    }
    if let Some(dir) = export_dir {
        export_notes(&session, &dir)?;
    }

    match session.last_failure() {
        Some(failure) if !outcome.is_completed() => {
            output::dim(&failure.detail);
            Err(anyhow!(failure.user_message()))
        }
        _ => Ok(()),
    }
}

fn outcome_json(outcome: &TurnOutcome) -> serde_json::Value {
    match outcome {
        TurnOutcome::Completed { text, usage, .. } => serde_json::json!({
            "status": "completed",
            "text": text,
            "usage": usage,
        }),
        TurnOutcome::Failed {
            partial_text, error, ..
        } => serde_json::json!({
            "status": "failed",
            "text": partial_text,
            "error": error,
        }),
    }
}
