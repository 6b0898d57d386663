//! Gemini provider implementation

use async_trait::async_trait;
use reqwest::Client;
use reqwest_eventsource::EventSource;

use super::convert::to_gemini_request;
use super::stream::create_stream;
use super::types::GeminiConfig;
use crate::error::{Error, Result};
use crate::provider::Provider;
use crate::types::{GenerateRequest, GenerateStream};

/// Gemini provider
pub struct GeminiProvider {
    config: GeminiConfig,
    client: Client,
}

impl GeminiProvider {
    /// Environment variables checked for the API key, in order
    pub const API_KEY_ENVS: [&'static str; 2] = ["GEMINI_API_KEY", "API_KEY"];

    /// Environment variable overriding the API base URL
    pub const BASE_URL_ENV: &'static str = "GEMINI_BASE_URL";

    pub fn new(config: GeminiConfig) -> Result<Self> {
        if config.api_key.trim().is_empty() {
            return Err(Error::MissingApiKey("gemini".to_string()));
        }

        let client = Client::new();
        Ok(Self { config, client })
    }

    pub fn from_env() -> Result<Self> {
        let api_key = Self::api_key_from_env()
            .ok_or_else(|| Error::MissingApiKey("gemini".to_string()))?;

        let mut config = GeminiConfig::new(api_key);
        if let Ok(base_url) = std::env::var(Self::BASE_URL_ENV) {
            config = config.with_base_url(base_url);
        }
        Self::new(config)
    }

    pub fn api_key_from_env() -> Option<String> {
        Self::API_KEY_ENVS
            .iter()
            .filter_map(|name| std::env::var(name).ok())
            .find(|key| !key.trim().is_empty())
    }

    fn stream_url(&self, model: &str) -> String {
        format!(
            "{}models/{}:streamGenerateContent?alt=sse",
            self.config.base_url, model
        )
    }
}

#[async_trait]
impl Provider for GeminiProvider {
    fn provider_id(&self) -> &str {
        "gemini"
    }

    async fn list_models(&self) -> Result<Vec<String>> {
        Ok(vec![
            "gemini-2.5-flash".to_string(),
            "gemini-2.5-pro".to_string(),
        ])
    }

    async fn stream(&self, request: GenerateRequest) -> Result<GenerateStream> {
        let url = self.stream_url(&request.model);
        let gemini_request = to_gemini_request(&request);

        tracing::debug!(
            model = %request.model,
            contents = gemini_request.contents.len(),
            "opening gemini stream"
        );

        let req_builder = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.config.api_key)
            .json(&gemini_request);

        let event_source = EventSource::new(req_builder)
            .map_err(|e| Error::stream_error(format!("Failed to create event source: {}", e)))?;

        create_stream(event_source).await
    }
}
