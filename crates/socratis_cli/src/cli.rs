//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Socratis: a Class 11 Accounts tutor in your terminal
#[derive(Parser)]
#[command(name = "socratis", about, version, propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format: text (human-readable) or json (machine-readable)
    #[arg(short, long, global = true, default_value = "text")]
    pub output: OutputFormat,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Colored terminal output for humans
    #[default]
    Text,
    /// Structured JSON for machine consumption
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Open the interactive chat
    Chat {
        /// Provider to use (gemini, echo). Uses SOCRATIS_PROVIDER if not set.
        #[arg(long)]
        provider: Option<String>,
        /// Model to use. Uses SOCRATIS_MODEL if not set.
        #[arg(long)]
        model: Option<String>,
        /// Directory `/export` writes notes into (default: current directory)
        #[arg(long)]
        export_dir: Option<PathBuf>,
    },
    /// Ask one question and stream the answer to stdout
    Ask {
        /// The question
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
        /// Attach an image file or data URL (repeatable)
        #[arg(long = "image")]
        images: Vec<String>,
        /// Write study notes into this directory after the answer
        #[arg(long)]
        export: Option<PathBuf>,
        /// Provider to use (gemini, echo)
        #[arg(long)]
        provider: Option<String>,
        /// Model to use
        #[arg(long)]
        model: Option<String>,
    },
    /// Show how a reply text is split into paragraphs, code and tables
    Render {
        /// File to read, or `-` for stdin
        file: String,
        /// Print the parsed blocks as JSON
        #[arg(long)]
        json: bool,
    },
}
