//! Embedding providers.
//!
//! Maps segment text to fixed-length vectors. The provider is chosen once
//! from [`EmbeddingSettings`](ragbench_core::EmbeddingSettings) when the
//! pipeline is built.

pub mod provider;
pub mod providers;

pub use provider::{create_provider, EmbeddingProvider};
pub use providers::{OllamaProvider, TrigramProvider};
