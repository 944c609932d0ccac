//! Knowledge pipeline for ragbench.
//!
//! Corpus loading, chunking, embedding, vector retrieval and grounded answer
//! generation, composed by [`RagPipeline`].
//!
//! # Example
//! ```no_run
//! use ragbench_core::AppConfig;
//! use ragbench_knowledge::RagPipeline;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::load()?;
//! let pipeline = RagPipeline::from_config(&config).await?;
//! let record = pipeline.ask("What is the PTO accrual cap?").await?;
//! println!("{} {:?}", record.answer, record.cited_sources);
//! # Ok(())
//! # }
//! ```

pub mod chunker;
pub mod embeddings;
pub mod index;
pub mod loader;
pub mod rag;
pub mod types;
pub mod vector_index;

#[cfg(test)]
mod tests;

pub use chunker::Chunker;
pub use embeddings::{create_provider, EmbeddingProvider};
pub use index::InMemoryIndex;
pub use loader::load_corpus;
pub use rag::{AnswerGenerator, PipelineConfig, QuestionAnswerer, RagPipeline};
pub use types::{
    AnswerRecord, Document, EmbeddedSegment, HitRef, PipelineStats, RetrievalResult, SearchHit,
    Segment,
};
pub use vector_index::VectorIndex;
