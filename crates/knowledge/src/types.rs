//! Core types for the knowledge pipeline.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A document read from the corpus directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// File name, used verbatim in citations
    pub source_id: String,

    /// Full UTF-8 content
    pub content: String,
}

impl Document {
    pub fn new(source_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            source_id: source_id.into(),
            content: content.into(),
        }
    }
}

/// A contiguous slice of a document produced by the chunker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    /// Source document identifier
    pub source_id: String,

    /// Position of this segment within its document (0-based)
    pub sequence_index: usize,

    /// Segment text
    pub text: String,

    /// Start character offset in the document (inclusive)
    pub start: usize,

    /// End character offset in the document (exclusive)
    pub end: usize,
}

impl Segment {
    /// Citation label in `file:section` form.
    pub fn citation(&self) -> String {
        format!("{}:{}", self.source_id, self.sequence_index)
    }
}

/// A segment together with its embedding vector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbeddedSegment {
    pub segment: Segment,
    pub vector: Vec<f32>,
}

/// A single retrieval hit with its similarity score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    pub segment: Segment,
    pub score: f32,
}

/// Top-k hits ranked by similarity, descending.
pub type RetrievalResult = Vec<SearchHit>;

/// Compact reference to a retrieved segment, for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HitRef {
    pub source_id: String,

    #[serde(rename = "sequenceIndex")]
    pub sequence_index: usize,

    pub score: f32,
}

impl From<&SearchHit> for HitRef {
    fn from(hit: &SearchHit) -> Self {
        Self {
            source_id: hit.segment.source_id.clone(),
            sequence_index: hit.segment.sequence_index,
            score: hit.score,
        }
    }
}

/// Answer to a single question.
///
/// `cited_sources` is the set of source ids of every segment fed into
/// generation, not parsed from the model output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerRecord {
    pub question: String,
    pub answer: String,

    #[serde(rename = "citedSources")]
    pub cited_sources: BTreeSet<String>,

    pub hits: Vec<HitRef>,
}

impl AnswerRecord {
    /// Build a record from the hits that were used as context.
    pub fn from_hits(question: impl Into<String>, answer: impl Into<String>, hits: &[SearchHit]) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
            cited_sources: hits.iter().map(|h| h.segment.source_id.clone()).collect(),
            hits: hits.iter().map(HitRef::from).collect(),
        }
    }
}

/// Statistics about a built pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineStats {
    pub documents: usize,
    pub segments: usize,
    pub dimensions: Option<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hit(source: &str, index: usize, score: f32) -> SearchHit {
        SearchHit {
            segment: Segment {
                source_id: source.to_string(),
                sequence_index: index,
                text: "text".to_string(),
                start: 0,
                end: 4,
            },
            score,
        }
    }

    #[test]
    fn test_citation_label() {
        assert_eq!(hit("hr-policy.md", 3, 1.0).segment.citation(), "hr-policy.md:3");
    }

    #[test]
    fn test_answer_record_dedupes_sources() {
        let hits = vec![
            hit("travel.md", 1, 0.9),
            hit("policy.md", 0, 0.8),
            hit("travel.md", 0, 0.7),
        ];

        let record = AnswerRecord::from_hits("q", "a", &hits);
        let sources: Vec<&str> = record.cited_sources.iter().map(String::as_str).collect();
        assert_eq!(sources, vec!["policy.md", "travel.md"]);
        assert_eq!(record.hits.len(), 3);
        assert_eq!(record.hits[0].sequence_index, 1);
    }

    #[test]
    fn test_answer_record_serialization() {
        let record = AnswerRecord::from_hits("q", "a", &[hit("policy.md", 0, 0.5)]);
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["citedSources"][0], "policy.md");
        assert_eq!(json["hits"][0]["sequenceIndex"], 0);
    }
}
