//! Backend selection types.

use ragbench_core::{AppConfig, AppError, AppResult};
use serde::{Deserialize, Serialize};

/// Default Ollama endpoint.
pub const DEFAULT_OLLAMA_ENDPOINT: &str = "http://localhost:11434";

/// Default OpenAI-compatible endpoint.
pub const DEFAULT_OPENAI_ENDPOINT: &str = "https://api.openai.com/v1";

/// Provider type enum for matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProviderType {
    /// Local Ollama runtime
    Ollama,
    /// Networked OpenAI-compatible chat completions
    OpenAI,
}

impl ProviderType {
    /// Parse provider type from string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "ollama" => Some(Self::Ollama),
            "openai" => Some(Self::OpenAI),
            _ => None,
        }
    }
}

/// Everything the factory needs to build one generation backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Which backend to build
    pub provider: ProviderType,

    /// Model identifier passed with every request
    pub model: String,

    /// Endpoint override
    pub endpoint: Option<String>,

    /// API key (required by networked backends)
    #[serde(skip_serializing)]
    pub api_key: Option<String>,

    /// Sampling temperature
    pub temperature: f32,
}

impl BackendConfig {
    /// Local Ollama backend with default endpoint and greedy decoding.
    pub fn ollama(model: impl Into<String>) -> Self {
        Self {
            provider: ProviderType::Ollama,
            model: model.into(),
            endpoint: None,
            api_key: None,
            temperature: 0.0,
        }
    }

    /// Derive the backend selection from application configuration.
    pub fn from_app_config(config: &AppConfig) -> AppResult<Self> {
        let provider = ProviderType::parse(&config.provider).ok_or_else(|| {
            AppError::Config(format!("Unknown provider: {}", config.provider))
        })?;

        Ok(Self {
            provider,
            model: config.model.clone(),
            endpoint: config.endpoint.clone(),
            api_key: config.api_key.clone(),
            temperature: config.temperature,
        })
    }

    /// Endpoint to use, falling back to the provider default.
    pub fn resolved_endpoint(&self) -> &str {
        match (&self.endpoint, self.provider) {
            (Some(endpoint), _) => endpoint,
            (None, ProviderType::Ollama) => DEFAULT_OLLAMA_ENDPOINT,
            (None, ProviderType::OpenAI) => DEFAULT_OPENAI_ENDPOINT,
        }
    }
}
