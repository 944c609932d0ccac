//! LLM integration crate for ragbench.
//!
//! This crate provides a provider-agnostic abstraction for text generation.
//! The backend is chosen once from configuration and used through the
//! [`LlmClient`] trait.
//!
//! # Providers
//! - **Ollama**: Local LLM runtime (default)
//! - **OpenAI**: Networked chat completions, selected with `USE_OPENAI=1`
//!
//! # Example
//! ```no_run
//! use ragbench_llm::{create_client, BackendConfig, LlmRequest};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = create_client(&BackendConfig::ollama("llama3:8b"))?;
//! let request = LlmRequest::new("Hello, world!", "llama3:8b").with_temperature(0.0);
//! let response = client.complete(&request).await?;
//! println!("{}", response.content);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod factory;
pub mod providers;
pub mod types;

// Re-export main types
pub use client::{LlmClient, LlmRequest, LlmResponse, LlmUsage};
pub use factory::create_client;
pub use providers::{OllamaClient, OpenAiClient};
pub use types::{BackendConfig, ProviderType};
