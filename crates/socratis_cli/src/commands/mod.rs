//! Command dispatch.

pub mod ask;
pub mod chat;
pub mod render;

use anyhow::Result;
use socratis_runtime::{ProviderKind, RuntimeConfig};

use crate::cli::{Cli, Command};

pub async fn handle(cli: Cli) -> Result<()> {
    let verbose = cli.verbose;
    match cli.command {
        Command::Chat {
            provider,
            model,
            export_dir,
        } => chat::handle(provider, model, export_dir, verbose).await,
        Command::Ask {
            text,
            images,
            export,
            provider,
            model,
        } => ask::handle(text.join(" "), images, export, provider, model, verbose).await,
        Command::Render { file, json } => render::handle(&file, json),
    }
}

/// Environment config with the command-line overrides applied on top.
pub fn runtime_config(provider: Option<String>, model: Option<String>) -> Result<RuntimeConfig> {
    let mut config = RuntimeConfig::from_env()?;
    if let Some(p) = provider {
        config = config.with_provider(p.parse::<ProviderKind>()?);
    }
    if let Some(m) = model {
        config = config.with_model(m);
    }
    Ok(config)
}
