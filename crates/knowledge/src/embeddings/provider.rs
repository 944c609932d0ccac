//! Embedding provider trait and factory.

use super::providers::{OllamaProvider, TrigramProvider};
use ragbench_core::{AppError, AppResult, EmbeddingSettings};
use ragbench_llm::types::DEFAULT_OLLAMA_ENDPOINT;
use std::sync::Arc;

/// Trait for embedding providers.
///
/// `embed` is deterministic for a fixed model; `embed_batch` returns one
/// vector per input, in input order.
#[async_trait::async_trait]
pub trait EmbeddingProvider: Send + Sync + std::fmt::Debug {
    /// Get provider name (e.g., "trigram", "ollama")
    fn provider_name(&self) -> &str;

    /// Get model identifier
    fn model_name(&self) -> &str;

    /// Get embedding dimensions
    fn dimensions(&self) -> usize;

    /// Generate embeddings for multiple texts in a batch.
    async fn embed_batch(&self, texts: &[String]) -> AppResult<Vec<Vec<f32>>>;

    /// Generate embedding for a single text (convenience method).
    async fn embed(&self, text: &str) -> AppResult<Vec<f32>> {
        let mut results = self.embed_batch(&[text.to_string()]).await?;
        results
            .pop()
            .ok_or_else(|| AppError::Upstream("No embedding returned".to_string()))
    }
}

/// Create an embedding provider from settings.
///
/// Networked providers verify their model at construction, so a missing
/// model fails here rather than on the first query.
pub async fn create_provider(settings: &EmbeddingSettings) -> AppResult<Arc<dyn EmbeddingProvider>> {
    if settings.dimensions == 0 {
        return Err(AppError::Config(
            "Embedding dimensions must be greater than 0".to_string(),
        ));
    }

    match settings.provider.as_str() {
        "trigram" => {
            if settings.model != TrigramProvider::MODEL {
                return Err(AppError::Config(format!(
                    "Unknown trigram model '{}'. Supported: {}",
                    settings.model,
                    TrigramProvider::MODEL
                )));
            }
            Ok(Arc::new(TrigramProvider::new(settings.dimensions)))
        }

        "ollama" => {
            let endpoint = settings
                .endpoint
                .clone()
                .unwrap_or_else(|| DEFAULT_OLLAMA_ENDPOINT.to_string());
            let provider =
                OllamaProvider::new(endpoint, settings.model.clone(), settings.dimensions).await?;
            Ok(Arc::new(provider))
        }

        _ => Err(AppError::Config(format!(
            "Unknown embedding provider: '{}'. Supported providers: trigram, ollama",
            settings.provider
        ))),
    }
}
