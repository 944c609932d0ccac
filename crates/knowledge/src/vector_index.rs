//! Vector index abstraction for embedded segments.
//!
//! Defines a trait for provider-agnostic vector storage and retrieval.

use crate::types::{EmbeddedSegment, RetrievalResult};
use ragbench_core::AppResult;

/// Trait for vector index backends.
///
/// The index is append-only. Implementations must:
/// - Keep every vector at the dimensionality of the first one added
/// - Return at most `k` hits ordered by non-increasing similarity
/// - Break score ties by insertion order, earlier first
pub trait VectorIndex: Send + Sync {
    /// Append an embedded segment.
    fn add(&mut self, entry: EmbeddedSegment) -> AppResult<()>;

    /// Top-k most similar entries to `vector`.
    fn query(&self, vector: &[f32], k: usize) -> AppResult<RetrievalResult>;

    /// Number of stored entries.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Dimensionality of stored vectors, if any were added.
    fn dimensions(&self) -> Option<usize>;
}
