//! Turn driver: owns the provider and turns a [`TurnRequest`] into events.
//!
//! [`TurnRequest`]: crate::session::TurnRequest

mod turn;

use std::sync::Arc;

use socratis_llms::providers::gemini::GeminiConfig;
use socratis_llms::{EchoProvider, GeminiProvider, GenerateRequest, Provider, ProviderRegistry};

use crate::config::{ProviderKind, RuntimeConfig};
use crate::context::build_contents;
use crate::error::Result;
use crate::session::TurnRequest;

pub use turn::TurnOutcome;

pub struct Runtime {
    provider: Arc<dyn Provider>,
    config: RuntimeConfig,
}

impl Runtime {
    pub fn new(provider: Arc<dyn Provider>, config: RuntimeConfig) -> Self {
        Self { provider, config }
    }

    /// Resolves the provider named in `config`. Echo is always available;
    /// Gemini is registered only when selected and fails without a key.
    pub fn from_config(config: RuntimeConfig) -> Result<Self> {
        let mut registry = ProviderRegistry::new().with(EchoProvider::new());
        if config.provider == ProviderKind::Gemini {
            let mut gemini = GeminiConfig::new(config.api_key.clone().unwrap_or_default());
            if let Some(url) = &config.base_url {
                gemini = gemini.with_base_url(url.clone());
            }
            registry.insert(Arc::new(GeminiProvider::new(gemini)?));
        }
        let provider = registry.get(config.provider.as_str())?;
        tracing::info!(
            provider = provider.provider_id(),
            model = %config.model,
            "runtime ready"
        );
        Ok(Self::new(provider, config))
    }

    pub fn provider(&self) -> &Arc<dyn Provider> {
        &self.provider
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    pub fn build_request(&self, turn: &TurnRequest) -> GenerateRequest {
        let mut request =
            GenerateRequest::new(self.config.model.clone(), build_contents(&turn.history, &turn.user))
                .with_system_instruction(self.config.system_instruction.clone());
        if let Some(budget) = self.config.thinking_budget {
            request = request.with_thinking_budget(budget);
        }
        request
    }
}

impl std::fmt::Debug for Runtime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Runtime")
            .field("provider", &self.provider.provider_id())
            .field("config", &self.config)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use socratis_core::Message;
    use socratis_llms::{Part, ScriptedProvider};

    use super::*;
    use crate::session::ChatSession;

    #[test]
    fn test_from_config_gemini_requires_key() {
        let config = RuntimeConfig::new().with_provider(ProviderKind::Gemini);
        assert!(Runtime::from_config(config).is_err());
    }

    #[test]
    fn test_from_config_echo() {
        let runtime =
            Runtime::from_config(RuntimeConfig::new().with_provider(ProviderKind::Echo)).unwrap();
        assert_eq!(runtime.provider().provider_id(), "echo");
    }

    #[test]
    fn test_build_request() {
        let runtime = Runtime::new(
            Arc::new(ScriptedProvider::new(Vec::<String>::new())),
            RuntimeConfig::new().with_thinking_budget(Some(512)),
        );
        let mut session = ChatSession::new();
        let turn = session.submit("Ledger kaise banate hain?", vec![]).unwrap();
        let request = runtime.build_request(&turn);

        assert_eq!(request.model, "gemini-2.5-flash");
        assert_eq!(request.thinking_budget, Some(512));
        assert!(request.system_instruction.unwrap().contains("Socratis"));
        assert_eq!(request.contents.len(), 2);
        assert_eq!(
            request.contents[1].parts,
            vec![Part::text("Ledger kaise banate hain?")]
        );
        assert!(turn.history.iter().all(|m: &Message| m.id != turn.user.id));
    }
}
