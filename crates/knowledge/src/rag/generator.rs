//! Answer generation from retrieved context.

use crate::types::SearchHit;
use ragbench_core::AppResult;
use ragbench_llm::{LlmClient, LlmRequest};
use ragbench_prompt::{build_prompt, rag_answer, PromptDefinition};
use std::collections::HashMap;
use std::sync::Arc;

/// Builds the grounded-answer prompt and calls the language model.
///
/// The "No supporting chunk." fallback lives in the prompt only. Nothing
/// here checks that the model followed it.
pub struct AnswerGenerator {
    llm: Arc<dyn LlmClient>,
    model: String,
    temperature: f32,
    prompt: PromptDefinition,
}

impl AnswerGenerator {
    /// Generator with the built-in prompt and greedy decoding.
    pub fn new(llm: Arc<dyn LlmClient>, model: impl Into<String>) -> Self {
        Self {
            llm,
            model: model.into(),
            temperature: 0.0,
            prompt: rag_answer(),
        }
    }

    pub fn with_prompt(mut self, prompt: PromptDefinition) -> Self {
        self.prompt = prompt;
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn provider_name(&self) -> &str {
        self.llm.provider_name()
    }

    /// Render the full prompt for `question` over `hits`.
    pub fn render(&self, question: &str, hits: &[SearchHit]) -> AppResult<String> {
        let mut variables = HashMap::new();
        variables.insert("context".to_string(), format_context(hits));
        variables.insert("question".to_string(), question.to_string());

        Ok(build_prompt(&self.prompt, variables)?.user)
    }

    /// Generate an answer for `question` using `hits` as the only context.
    pub async fn generate(&self, question: &str, hits: &[SearchHit]) -> AppResult<String> {
        let prompt = self.render(question, hits)?;

        tracing::debug!(
            "Generating answer with {} (model: {}, context segments: {})",
            self.llm.provider_name(),
            self.model,
            hits.len()
        );

        let request = LlmRequest::new(prompt, self.model.as_str()).with_temperature(self.temperature);
        let response = self.llm.complete(&request).await?;

        tracing::debug!(
            "Answer received ({} tokens)",
            response.usage.total_tokens
        );

        Ok(response.content.trim().to_string())
    }
}

/// Format hits as `[source:section]` blocks separated by blank lines.
pub fn format_context(hits: &[SearchHit]) -> String {
    hits.iter()
        .map(|hit| format!("[{}]\n{}", hit.segment.citation(), hit.segment.text))
        .collect::<Vec<_>>()
        .join("\n\n")
}
