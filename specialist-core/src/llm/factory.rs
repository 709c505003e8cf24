use super::providers::OpenAIProvider;
use crate::config::core::AgentConfig;
use crate::llm::provider::{LLMError, LLMProvider};
use std::collections::HashMap;
use std::time::Duration;

type ProviderBuilder = Box<dyn Fn(ProviderConfig) -> Box<dyn LLMProvider> + Send + Sync>;

/// LLM provider factory and registry
pub struct LLMFactory {
    providers: HashMap<String, ProviderBuilder>,
}

#[derive(Debug, Clone, Default)]
pub struct ProviderConfig {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub model: Option<String>,
    pub timeout: Option<Duration>,
}

impl ProviderConfig {
    pub fn from_agent(agent: &AgentConfig, api_key: Option<String>) -> Self {
        Self {
            api_key,
            base_url: Some(agent.base_url.clone()),
            model: Some(agent.default_model.clone()),
            timeout: Some(Duration::from_secs(agent.request_timeout_seconds)),
        }
    }
}

impl LLMFactory {
    pub fn new() -> Self {
        let mut factory = Self {
            providers: HashMap::new(),
        };

        factory.register_provider("openai", |config: ProviderConfig| {
            let ProviderConfig {
                api_key,
                base_url,
                model,
                timeout,
            } = config;
            Box::new(OpenAIProvider::from_config(api_key, model, base_url, timeout))
                as Box<dyn LLMProvider>
        });

        factory
    }

    /// Register a new provider
    pub fn register_provider<F>(&mut self, name: &str, factory_fn: F)
    where
        F: Fn(ProviderConfig) -> Box<dyn LLMProvider> + Send + Sync + 'static,
    {
        self.providers
            .insert(name.to_lowercase(), Box::new(factory_fn));
    }

    /// Create provider instance
    pub fn create_provider(
        &self,
        provider_name: &str,
        config: ProviderConfig,
    ) -> Result<Box<dyn LLMProvider>, LLMError> {
        let factory_fn = self
            .providers
            .get(&provider_name.to_lowercase())
            .ok_or_else(|| {
                LLMError::InvalidRequest(format!(
                    "Unknown provider: {provider_name} (available: {})",
                    self.list_providers().join(", ")
                ))
            })?;

        Ok(factory_fn(config))
    }

    /// List available providers, sorted
    pub fn list_providers(&self) -> Vec<String> {
        let mut names: Vec<String> = self.providers.keys().cloned().collect();
        names.sort();
        names
    }
}

impl Default for LLMFactory {
    fn default() -> Self {
        Self::new()
    }
}

/// Create the completion provider described by `[agent]`.
pub fn create_provider(
    agent: &AgentConfig,
    api_key: String,
) -> Result<Box<dyn LLMProvider>, LLMError> {
    LLMFactory::new().create_provider(
        &agent.provider,
        ProviderConfig::from_agent(agent, Some(api_key)),
    )
}
