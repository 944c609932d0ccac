//! Built-in prompt definitions.

use crate::types::PromptDefinition;

/// Identifier of the grounded-answer prompt used by the RAG pipeline.
pub const RAG_ANSWER_PROMPT_ID: &str = "rag.answer";

const RAG_ANSWER_TEMPLATE: &str = "You are a concise assistant. Use only the provided context to answer. \
Cite sources as [file:section] for every claim. If no answer, say 'No supporting chunk.'\n\
Context:\n{{context}}\n\nQuestion: {{question}}\nAnswer with citations:";

/// The grounded-answer prompt: answer only from context, cite `[file:section]`.
pub fn rag_answer() -> PromptDefinition {
    PromptDefinition {
        id: RAG_ANSWER_PROMPT_ID.to_string(),
        title: "Grounded answer with citations".to_string(),
        api_version: "1.0".to_string(),
        created_by: "ragbench".to_string(),
        variables: vec!["context".to_string(), "question".to_string()],
        template: RAG_ANSWER_TEMPLATE.to_string(),
    }
}

/// Look up a built-in prompt by id.
pub fn builtin(prompt_id: &str) -> Option<PromptDefinition> {
    match prompt_id {
        RAG_ANSWER_PROMPT_ID => Some(rag_answer()),
        _ => None,
    }
}
