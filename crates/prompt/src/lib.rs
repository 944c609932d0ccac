//! Prompt system for ragbench.
//!
//! This crate provides structured prompt management with:
//! - YAML-based prompt definitions under `.ragbench/prompts/`
//! - A built-in grounded-answer prompt
//! - Handlebars template rendering

pub mod builder;
pub mod builtin;
pub mod loader;
pub mod types;

// Re-export main types
pub use builder::build_prompt;
pub use builtin::{rag_answer, RAG_ANSWER_PROMPT_ID};
pub use loader::{load_prompt, resolve_prompt};
pub use types::{BuiltPrompt, BuiltPromptMetadata, PromptDefinition};
