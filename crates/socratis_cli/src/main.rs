//! CLI entry point for Socratis.

mod cli;
mod commands;
mod output;

use clap::Parser;

use crate::cli::Cli;

/// Loads the nearest `.env` walking up from the working directory. Values
/// already set in the environment win.
fn load_env_file() {
    let Ok(cwd) = std::env::current_dir() else {
        return;
    };
    for dir in cwd.ancestors().take(32) {
        let env_file = dir.join(".env");
        if env_file.exists() {
            let _ = dotenvy::from_path(&env_file);
            break;
        }
    }
}

#[tokio::main]
async fn main() {
    load_env_file();
    let cli = Cli::parse();
    output::init(cli.output);

    if let Err(e) = commands::handle(cli).await {
        output::error(&e.to_string());
        std::process::exit(1);
    }
}
