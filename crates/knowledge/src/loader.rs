//! Corpus loading.
//!
//! Reads the top level of a directory of Markdown-like text files into
//! [`Document`]s. Subdirectories are not descended into.

use crate::types::Document;
use ragbench_core::{AppError, AppResult};
use std::fs;
use std::io;
use std::path::Path;
use walkdir::WalkDir;

/// File extensions treated as corpus documents.
pub const CORPUS_EXTENSIONS: &[&str] = &["md", "markdown", "txt"];

/// Whether a path looks like a corpus document.
pub fn is_corpus_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            CORPUS_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false)
}

/// Load every corpus document directly inside `dir`, sorted by file name.
///
/// # Errors
/// `AppError::FileAccess` if the directory is missing, is not a directory,
/// or a document cannot be read as UTF-8.
pub fn load_corpus(dir: &Path) -> AppResult<Vec<Document>> {
    if !dir.exists() {
        return Err(AppError::file_access(
            dir,
            io::Error::new(io::ErrorKind::NotFound, "corpus directory does not exist"),
        ));
    }
    if !dir.is_dir() {
        return Err(AppError::file_access(
            dir,
            io::Error::new(io::ErrorKind::InvalidInput, "corpus path is not a directory"),
        ));
    }

    tracing::info!("Loading corpus from {:?}", dir);

    let mut documents = Vec::new();

    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(dir).to_path_buf();
            let source = e
                .into_io_error()
                .unwrap_or_else(|| io::Error::other("directory walk failed"));
            AppError::file_access(path, source)
        })?;

        let path = entry.path();
        if !entry.file_type().is_file() || !is_corpus_file(path) {
            tracing::debug!("Skipping non-corpus entry: {:?}", path);
            continue;
        }

        let content = fs::read_to_string(path).map_err(|e| AppError::file_access(path, e))?;
        let source_id = entry.file_name().to_string_lossy().into_owned();

        tracing::debug!("Loaded {} ({} bytes)", source_id, content.len());
        documents.push(Document::new(source_id, content));
    }

    tracing::info!("Loaded {} documents", documents.len());

    Ok(documents)
}
