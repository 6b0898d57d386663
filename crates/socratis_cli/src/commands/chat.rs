//! `socratis chat` - the interactive terminal chat.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use socratis_core::ChatEvent;
use socratis_observability::{LogBuffer, ObservabilityConfig, init};
use socratis_runtime::{Runtime, TurnRequest};
use socratis_tui::utils::MAX_TRACE_LINES;
use socratis_tui::{Appearance, TuiChannels, TuiState, run_tui};
use tokio::sync::mpsc;
use tracing::{error, info};

use super::runtime_config;
use crate::output;

const EVENT_CHANNEL_CAPACITY: usize = 256;
const TURN_CHANNEL_CAPACITY: usize = 4;

/// Drives queued turns one at a time until the UI drops its sender.
async fn run_turn_loop(
    runtime: Arc<Runtime>,
    mut turns: mpsc::Receiver<TurnRequest>,
    events: mpsc::Sender<ChatEvent>,
) {
    while let Some(turn) = turns.recv().await {
        let mut sink = events.clone();
        if let Err(e) = runtime.drive_turn(turn, &mut sink).await {
            error!(error = %e, "turn driver stopped");
            break;
        }
    }
    info!("turn loop finished");
}

pub async fn handle(
    provider: Option<String>,
    model: Option<String>,
    export_dir: Option<PathBuf>,
    verbose: bool,
) -> Result<()> {
    // Logs go to the in-memory buffer; stderr would tear the alternate screen.
    let logs = LogBuffer::new(MAX_TRACE_LINES);
    let mut obs_config = ObservabilityConfig::from_env()
        .with_console(false)
        .with_log_sink(logs.sink());
    if verbose {
        obs_config = obs_config.with_log_level("debug");
    }
    if let Err(e) = init(obs_config) {
        output::warning(&format!("Logging disabled: {e}"));
    }

    let runtime = Arc::new(Runtime::from_config(runtime_config(provider, model)?)?);

    let (event_tx, event_rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);
    let (turn_tx, turn_rx) = mpsc::channel(TURN_CHANNEL_CAPACITY);
    let driver = tokio::spawn(run_turn_loop(runtime, turn_rx, event_tx));

    let mut state = TuiState::new()
        .with_appearance(Appearance::from_env())
        .with_logs(logs);
    if let Some(dir) = export_dir {
        state = state.with_export_dir(dir);
    }
    let channels = TuiChannels {
        events: event_rx,
        turns: turn_tx,
    };

    // The UI loop blocks on terminal input; keep it off the async workers.
    let result = tokio::task::spawn_blocking(move || run_tui(state, channels)).await?;
    driver.abort();
    result
}
