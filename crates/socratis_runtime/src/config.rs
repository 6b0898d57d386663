//! Runtime configuration for Socratis

use std::str::FromStr;

use socratis_llms::GeminiProvider;

use crate::error::{Result, RuntimeError};
use crate::prompt::SYSTEM_INSTRUCTION;

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_THINKING_BUDGET: u32 = 16_000;

/// Model provider selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProviderKind {
    #[default]
    Gemini,
    /// Offline: echoes the question back.
    Echo,
}

impl ProviderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::Gemini => "gemini",
            ProviderKind::Echo => "echo",
        }
    }
}

impl FromStr for ProviderKind {
    type Err = RuntimeError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "gemini" | "google" => Ok(ProviderKind::Gemini),
            "echo" | "offline" => Ok(ProviderKind::Echo),
            other => Err(RuntimeError::Config(format!("unknown provider: {other}"))),
        }
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub provider: ProviderKind,
    pub model: String,
    /// `None` leaves thinking at the model default.
    pub thinking_budget: Option<u32>,
    pub system_instruction: String,
    pub api_key: Option<String>,
    pub base_url: Option<String>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            provider: ProviderKind::default(),
            model: DEFAULT_MODEL.to_string(),
            thinking_budget: Some(DEFAULT_THINKING_BUDGET),
            system_instruction: SYSTEM_INSTRUCTION.to_string(),
            api_key: None,
            base_url: None,
        }
    }
}

impl RuntimeConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_provider(mut self, provider: ProviderKind) -> Self {
        self.provider = provider;
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_thinking_budget(mut self, budget: Option<u32>) -> Self {
        self.thinking_budget = budget;
        self
    }

    pub fn with_system_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.system_instruction = instruction.into();
        self
    }

    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Load configuration from environment variables
    ///
    /// - `SOCRATIS_PROVIDER` (`gemini` | `echo`); without it, `gemini` when a
    ///   key is present, otherwise `echo`
    /// - `SOCRATIS_MODEL`
    /// - `SOCRATIS_THINKING_BUDGET` (`off` disables the setting)
    /// - `SOCRATIS_SYSTEM_PROMPT_FILE`
    /// - `GEMINI_API_KEY` / `API_KEY`, `GEMINI_BASE_URL`
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::new();

        config.api_key = GeminiProvider::API_KEY_ENVS.iter().find_map(|k| get(*k));
        config.base_url = get(GeminiProvider::BASE_URL_ENV);

        config.provider = match get("SOCRATIS_PROVIDER") {
            Some(raw) => raw.parse()?,
            None if config.api_key.is_some() => ProviderKind::Gemini,
            None => ProviderKind::Echo,
        };

        if let Some(model) = get("SOCRATIS_MODEL") {
            config.model = model;
        }

        if let Some(raw) = get("SOCRATIS_THINKING_BUDGET") {
            config.thinking_budget = match raw.trim() {
                "off" | "none" => None,
                n => Some(n.parse::<u32>().map_err(|_| {
                    RuntimeError::Config(format!("SOCRATIS_THINKING_BUDGET is not a number: {n}"))
                })?),
            };
        }

        if let Some(path) = get("SOCRATIS_SYSTEM_PROMPT_FILE") {
            config.system_instruction = std::fs::read_to_string(&path).map_err(|e| {
                RuntimeError::Config(format!("cannot read system prompt {path}: {e}"))
            })?;
        }

        Ok(config)
    }
}
