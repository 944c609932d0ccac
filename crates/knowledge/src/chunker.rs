//! Text chunking with configurable size and overlap.
//!
//! Sizes are counted in characters, never bytes, so a code point is never
//! split. Each segment ends at the best natural boundary inside the back half
//! of its window: paragraph, then line, then sentence, then word. Without one,
//! the segment is cut at exactly `chunk_size` characters.
//!
//! The next segment starts `chunk_overlap` characters before the end of the
//! previous one. Segments are never trimmed, so dropping the first
//! `chunk_overlap` characters of every segment after the first and
//! concatenating reconstructs the document exactly.

use crate::types::{Document, Segment};
use ragbench_core::{AppError, AppResult};

/// Boundaries in order of preference. A segment ends right after one.
const SEPARATORS: &[&str] = &["\n\n", "\n", ". ", "! ", "? ", " "];

/// Splits documents into overlapping segments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chunker {
    chunk_size: usize,
    chunk_overlap: usize,
}

impl Chunker {
    /// # Errors
    /// `AppError::Config` when `chunk_size` is zero or `chunk_overlap >= chunk_size`.
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> AppResult<Self> {
        if chunk_size == 0 {
            return Err(AppError::Config("chunk_size must be greater than 0".to_string()));
        }
        if chunk_overlap >= chunk_size {
            return Err(AppError::Config(format!(
                "chunk_overlap ({}) must be smaller than chunk_size ({})",
                chunk_overlap, chunk_size
            )));
        }

        Ok(Self {
            chunk_size,
            chunk_overlap,
        })
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    pub fn chunk_overlap(&self) -> usize {
        self.chunk_overlap
    }

    /// Character ranges `[start, end)` of each segment of `text`.
    pub fn split_ranges(&self, text: &str) -> Vec<(usize, usize)> {
        let chars: Vec<char> = text.chars().collect();
        let len = chars.len();
        let mut ranges = Vec::new();

        if len == 0 {
            return ranges;
        }

        let mut start = 0;
        loop {
            if len - start <= self.chunk_size {
                ranges.push((start, len));
                break;
            }

            let hard_end = start + self.chunk_size;
            // Past the overlap so every step makes progress
            let min_end = start + (self.chunk_overlap + 1).max(self.chunk_size / 2);
            let end = find_boundary(&chars, start, min_end, hard_end).unwrap_or(hard_end);

            ranges.push((start, end));
            start = end - self.chunk_overlap;
        }

        ranges
    }

    /// Split a single document.
    pub fn chunk_document(&self, document: &Document) -> Vec<Segment> {
        let ranges = self.split_ranges(&document.content);
        if ranges.is_empty() {
            return Vec::new();
        }

        // Char index -> byte offset, with a trailing entry for the end
        let mut offsets: Vec<usize> = document.content.char_indices().map(|(i, _)| i).collect();
        offsets.push(document.content.len());

        ranges
            .into_iter()
            .enumerate()
            .map(|(sequence_index, (start, end))| Segment {
                source_id: document.source_id.clone(),
                sequence_index,
                text: document.content[offsets[start]..offsets[end]].to_string(),
                start,
                end,
            })
            .collect()
    }

    /// Split documents in order.
    pub fn chunk_documents(&self, documents: &[Document]) -> Vec<Segment> {
        let segments: Vec<Segment> = documents
            .iter()
            .flat_map(|doc| self.chunk_document(doc))
            .collect();

        tracing::debug!(
            "Chunked {} documents into {} segments (size={}, overlap={})",
            documents.len(),
            segments.len(),
            self.chunk_size,
            self.chunk_overlap
        );

        segments
    }
}

/// Rejoin segment texts by dropping each later segment's overlap prefix.
pub fn reassemble(segments: &[Segment], chunk_overlap: usize) -> String {
    let mut text = String::new();
    for (i, segment) in segments.iter().enumerate() {
        if i == 0 {
            text.push_str(&segment.text);
        } else {
            text.extend(segment.text.chars().skip(chunk_overlap));
        }
    }
    text
}

/// Latest end position in `[min_end, hard_end]` that falls right after a
/// separator, trying separators in preference order.
fn find_boundary(chars: &[char], start: usize, min_end: usize, hard_end: usize) -> Option<usize> {
    for separator in SEPARATORS {
        let sep: Vec<char> = separator.chars().collect();
        let mut end = hard_end;
        while end >= min_end {
            if end >= start + sep.len() && chars[end - sep.len()..end] == sep[..] {
                return Some(end);
            }
            end -= 1;
        }
    }
    None
}
