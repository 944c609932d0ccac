//! LLM provider factory.
//!
//! Builds the generation backend selected by configuration. Selection happens
//! once, at pipeline construction.

use crate::client::LlmClient;
use crate::providers::{OllamaClient, OpenAiClient};
use crate::types::{BackendConfig, ProviderType};
use ragbench_core::{AppError, AppResult};
use std::sync::Arc;

/// Create an LLM client for the configured backend.
///
/// # Errors
/// Returns `AppError::Config` if the networked backend is requested without
/// an API key.
pub fn create_client(config: &BackendConfig) -> AppResult<Arc<dyn LlmClient>> {
    let endpoint = config.resolved_endpoint();

    match config.provider {
        ProviderType::Ollama => {
            tracing::debug!("Using local Ollama backend at {}", endpoint);
            Ok(Arc::new(OllamaClient::with_base_url(endpoint)))
        }
        ProviderType::OpenAI => {
            let api_key = config.api_key.as_deref().ok_or_else(|| {
                AppError::Config("OpenAI provider requires API key".to_string())
            })?;
            tracing::debug!("Using networked OpenAI backend at {}", endpoint);
            Ok(Arc::new(OpenAiClient::with_base_url(endpoint, api_key)?))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_ollama_client() {
        let client = create_client(&BackendConfig::ollama("llama3:8b")).unwrap();
        assert_eq!(client.provider_name(), "ollama");
    }

    #[test]
    fn test_create_ollama_with_custom_endpoint() {
        let mut config = BackendConfig::ollama("llama3:8b");
        config.endpoint = Some("http://localhost:8080".to_string());
        assert!(create_client(&config).is_ok());
    }

    #[test]
    fn test_openai_requires_api_key() {
        let mut config = BackendConfig::ollama("gpt-4o-mini");
        config.provider = ProviderType::OpenAI;

        match create_client(&config) {
            Err(err) => assert!(err.to_string().contains("requires API key")),
            Ok(_) => panic!("Expected error for OpenAI without API key"),
        }
    }

    #[test]
    fn test_create_openai_client() {
        let mut config = BackendConfig::ollama("gpt-4o-mini");
        config.provider = ProviderType::OpenAI;
        config.api_key = Some("sk-test".to_string());

        let client = create_client(&config).unwrap();
        assert_eq!(client.provider_name(), "openai");
    }
}
