//! In-memory vector index with JSON directory persistence.

use crate::types::{EmbeddedSegment, RetrievalResult, SearchHit};
use crate::vector_index::VectorIndex;
use ragbench_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Snapshot file written inside the index directory.
pub const INDEX_FILE: &str = "index.json";

const SNAPSHOT_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct IndexSnapshot {
    version: u32,
    dimensions: Option<usize>,
    entries: Vec<EmbeddedSegment>,
}

/// Brute-force cosine similarity index.
#[derive(Debug, Default, Clone)]
pub struct InMemoryIndex {
    entries: Vec<EmbeddedSegment>,
    dimensions: Option<usize>,
}

impl InMemoryIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Entries in insertion order.
    pub fn entries(&self) -> &[EmbeddedSegment] {
        &self.entries
    }

    /// Write the index to `<dir>/index.json`, creating `dir` if needed.
    pub fn persist(&self, dir: &Path) -> AppResult<()> {
        fs::create_dir_all(dir).map_err(|e| AppError::file_access(dir, e))?;

        let snapshot = IndexSnapshot {
            version: SNAPSHOT_VERSION,
            dimensions: self.dimensions,
            entries: self.entries.clone(),
        };
        let path = dir.join(INDEX_FILE);
        let json = serde_json::to_vec(&snapshot)?;
        fs::write(&path, json).map_err(|e| AppError::file_access(&path, e))?;

        tracing::info!("Persisted {} index entries to {:?}", self.entries.len(), path);
        Ok(())
    }

    /// Load an index previously written by [`persist`](Self::persist).
    pub fn load(dir: &Path) -> AppResult<Self> {
        let path = dir.join(INDEX_FILE);
        let raw = fs::read(&path).map_err(|e| AppError::file_access(&path, e))?;
        let snapshot: IndexSnapshot = serde_json::from_slice(&raw)?;

        if snapshot.version != SNAPSHOT_VERSION {
            return Err(AppError::Knowledge(format!(
                "Unsupported index snapshot version {} in {:?}",
                snapshot.version, path
            )));
        }

        // Re-adding enforces the dimensionality invariant on untrusted input
        let mut index = Self::new();
        for entry in snapshot.entries {
            index.add(entry)?;
        }
        if snapshot.dimensions.is_some() && index.dimensions != snapshot.dimensions {
            return Err(AppError::Knowledge(format!(
                "Index snapshot {:?} declares {:?} dimensions but stores {:?}",
                path, snapshot.dimensions, index.dimensions
            )));
        }

        tracing::debug!("Loaded {} index entries from {:?}", index.len(), path);
        Ok(index)
    }
}

/// Cosine similarity; 0.0 when either vector has zero magnitude.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

impl VectorIndex for InMemoryIndex {
    fn add(&mut self, entry: EmbeddedSegment) -> AppResult<()> {
        let dim = entry.vector.len();
        if dim == 0 {
            return Err(AppError::Knowledge(format!(
                "Empty vector for segment {}",
                entry.segment.citation()
            )));
        }

        match self.dimensions {
            Some(expected) if expected != dim => {
                return Err(AppError::Knowledge(format!(
                    "Vector dimension mismatch for segment {}: got {}, index holds {}",
                    entry.segment.citation(),
                    dim,
                    expected
                )));
            }
            Some(_) => {}
            None => self.dimensions = Some(dim),
        }

        self.entries.push(entry);
        Ok(())
    }

    fn query(&self, vector: &[f32], k: usize) -> AppResult<RetrievalResult> {
        if let Some(expected) = self.dimensions {
            if vector.len() != expected {
                return Err(AppError::Knowledge(format!(
                    "Query vector has {} dimensions, index holds {}",
                    vector.len(),
                    expected
                )));
            }
        }

        let mut scored: Vec<SearchHit> = self
            .entries
            .iter()
            .map(|entry| SearchHit {
                segment: entry.segment.clone(),
                score: cosine_similarity(&entry.vector, vector),
            })
            .collect();

        // Stable sort keeps insertion order among equal scores
        scored.sort_by(|a, b| b.score.total_cmp(&a.score));
        scored.truncate(k);

        Ok(scored)
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn dimensions(&self) -> Option<usize> {
        self.dimensions
    }
}
