//! Logging settings: which directive filters events and where they go.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Receives each formatted log line. Called from the tracing layer; must not block.
pub type LogSink = Arc<dyn Fn(String) + Send + Sync>;

pub const DEFAULT_SERVICE_NAME: &str = "socratis";

#[derive(Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    #[serde(default = "default_service_name")]
    pub service_name: String,

    /// Write formatted events to stderr.
    #[serde(default)]
    pub enable_console: bool,

    /// `EnvFilter` directive such as `info` or `socratis_runtime=debug`.
    /// Falls back to `RUST_LOG`, then `info`.
    pub log_level: Option<String>,

    #[serde(skip)]
    pub log_sink: Option<LogSink>,
}

fn default_service_name() -> String {
    DEFAULT_SERVICE_NAME.to_string()
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            service_name: default_service_name(),
            enable_console: true,
            log_level: None,
            log_sink: None,
        }
    }
}

impl std::fmt::Debug for ObservabilityConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObservabilityConfig")
            .field("service_name", &self.service_name)
            .field("enable_console", &self.enable_console)
            .field("log_level", &self.log_level)
            .field("log_sink", &self.log_sink.as_ref().map(|_| "Some(LogSink)"))
            .finish()
    }
}

impl ObservabilityConfig {
    pub fn new(service_name: impl Into<String>) -> Self {
        Self {
            service_name: service_name.into(),
            ..Default::default()
        }
    }

    pub fn with_console(mut self, enable: bool) -> Self {
        self.enable_console = enable;
        self
    }

    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = Some(level.into());
        self
    }

    pub fn with_log_sink(mut self, sink: LogSink) -> Self {
        self.log_sink = Some(sink);
        self
    }

    /// Directive variables, most specific first.
    pub const LEVEL_ENVS: [&str; 2] = ["SOCRATIS_LOG", "RUST_LOG"];

    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// First non-blank entry of [`Self::LEVEL_ENVS`] wins.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let log_level = Self::LEVEL_ENVS
            .iter()
            .filter_map(|key| lookup(key))
            .find(|v| !v.trim().is_empty());
        Self {
            log_level,
            ..Self::default()
        }
    }
}
