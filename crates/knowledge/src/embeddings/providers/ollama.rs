//! Ollama embedding provider.
//!
//! Embeds text through a local Ollama server (`POST /api/embeddings`), e.g.
//! with `all-minilm`. The model is exercised once at construction; any later
//! failure is returned as `AppError::Upstream` without retrying.

use crate::embeddings::EmbeddingProvider;
use async_trait::async_trait;
use ragbench_core::{AppError, AppResult};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error, instrument};

const EMBEDDING_ENDPOINT: &str = "/api/embeddings";

/// Request timeout in seconds
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Ollama embedding provider using the local API.
#[derive(Debug, Clone)]
pub struct OllamaProvider {
    client: Client,
    base_url: String,
    model: String,
    dimensions: usize,
}

#[derive(Debug, Clone, Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    prompt: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
struct EmbeddingResponse {
    embedding: Vec<f32>,
}

#[derive(Debug, Clone, Deserialize)]
struct ErrorResponse {
    error: String,
}

impl OllamaProvider {
    /// Create a provider and verify the model answers with the expected
    /// dimensionality.
    ///
    /// # Errors
    /// `AppError::Upstream` if Ollama is unreachable, the model is missing,
    /// or it returns vectors of another size.
    pub async fn new(
        base_url: impl Into<String>,
        model: impl Into<String>,
        dimensions: usize,
    ) -> AppResult<Self> {
        let provider = Self::unverified(base_url, model, dimensions)?;
        provider.verify_connection().await?;
        Ok(provider)
    }

    fn unverified(
        base_url: impl Into<String>,
        model: impl Into<String>,
        dimensions: usize,
    ) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| AppError::Upstream(format!("Failed to create HTTP client for Ollama: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
            dimensions,
        })
    }

    #[instrument(skip(self), fields(model = %self.model))]
    async fn verify_connection(&self) -> AppResult<()> {
        debug!("Verifying Ollama connection at {}", self.base_url);

        match self.embed_single("test connection").await {
            Ok(_) => {
                debug!("Ollama connection verified, model '{}' ready", self.model);
                Ok(())
            }
            Err(e) => {
                error!("Failed to initialize Ollama embeddings: {}", e);
                Err(AppError::Upstream(format!(
                    "Ollama embeddings not available at {} ({}). Ensure Ollama is running and run: ollama pull {}",
                    self.base_url, e, self.model
                )))
            }
        }
    }

    #[instrument(skip(self, text), fields(text_len = text.len()))]
    async fn embed_single(&self, text: &str) -> AppResult<Vec<f32>> {
        let url = format!("{}{}", self.base_url, EMBEDDING_ENDPOINT);

        let request = EmbeddingRequest {
            model: &self.model,
            prompt: text,
        };

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| AppError::Upstream(format!("Failed to send request to Ollama: {}", e)))?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());

            let message = serde_json::from_str::<ErrorResponse>(&error_text)
                .map(|body| body.error)
                .unwrap_or(error_text);

            return Err(AppError::Upstream(format!(
                "Ollama API error ({}): {}",
                status, message
            )));
        }

        let body: EmbeddingResponse = response
            .json()
            .await
            .map_err(|e| AppError::Upstream(format!("Failed to parse Ollama response: {}", e)))?;

        self.check_dimensions(body.embedding)
    }

    fn check_dimensions(&self, embedding: Vec<f32>) -> AppResult<Vec<f32>> {
        if embedding.len() != self.dimensions {
            return Err(AppError::Upstream(format!(
                "Ollama model '{}' returned {} dimensions, expected {}",
                self.model,
                embedding.len(),
                self.dimensions
            )));
        }
        Ok(embedding)
    }
}

#[async_trait]
impl EmbeddingProvider for OllamaProvider {
    fn provider_name(&self) -> &str {
        "ollama"
    }

    fn model_name(&self) -> &str {
        &self.model
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    #[instrument(skip(self, texts), fields(batch_size = texts.len(), model = %self.model))]
    async fn embed_batch(&self, texts: &[String]) -> AppResult<Vec<Vec<f32>>> {
        // No batch endpoint; embed sequentially to keep input order
        let mut embeddings = Vec::with_capacity(texts.len());
        for text in texts {
            embeddings.push(self.embed_single(text).await?);
        }
        Ok(embeddings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unreachable_server_fails_construction() {
        let result = OllamaProvider::new("http://127.0.0.1:9", "all-minilm", 384).await;
        match result {
            Err(AppError::Upstream(msg)) => assert!(msg.contains("ollama pull all-minilm")),
            other => panic!("expected upstream error, got {:?}", other),
        }
    }

    #[test]
    fn test_dimension_mismatch_rejected() {
        let provider = OllamaProvider::unverified("http://localhost:11434/", "all-minilm", 3).unwrap();
        assert_eq!(provider.base_url, "http://localhost:11434");
        assert!(provider.check_dimensions(vec![0.1, 0.2, 0.3]).is_ok());
        assert!(matches!(
            provider.check_dimensions(vec![0.1, 0.2]),
            Err(AppError::Upstream(_))
        ));
    }

    #[test]
    fn test_request_shape() {
        let request = EmbeddingRequest {
            model: "all-minilm",
            prompt: "PTO accrual cap",
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], "all-minilm");
        assert_eq!(json["prompt"], "PTO accrual cap");
    }

    #[test]
    fn test_provider_identity() {
        let provider = OllamaProvider::unverified("http://localhost:11434", "all-minilm", 384).unwrap();
        assert_eq!(provider.provider_name(), "ollama");
        assert_eq!(provider.model_name(), "all-minilm");
        assert_eq!(provider.dimensions(), 384);
    }
}
