//! Command handlers for the ragbench CLI.

pub mod ask;
pub mod eval;

pub use ask::AskCommand;
pub use eval::EvalCommand;

use ragbench_core::config::AppConfig;
use std::path::PathBuf;

/// Corpus and retrieval overrides shared by commands that build a pipeline.
pub(crate) fn with_rag_overrides(
    config: &AppConfig,
    corpus: Option<&PathBuf>,
    top_k: Option<usize>,
) -> AppConfig {
    let mut config = config.clone();
    if let Some(corpus) = corpus {
        config.rag.corpus_dir = corpus.clone();
    }
    if let Some(top_k) = top_k {
        config.rag.top_k = top_k;
    }
    config
}
