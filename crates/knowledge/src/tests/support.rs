//! Test doubles shared by the knowledge tests.

use crate::types::{SearchHit, Segment};
use ragbench_core::{AppError, AppResult};
use ragbench_llm::{LlmClient, LlmRequest, LlmResponse, LlmUsage};
use std::sync::Mutex;

enum Script {
    Fixed(String),
    EchoContext,
    Fail,
}

/// In-process `LlmClient` that records requests and answers from a script.
pub struct ScriptedLlm {
    script: Script,
    requests: Mutex<Vec<LlmRequest>>,
}

impl ScriptedLlm {
    pub fn fixed(answer: &str) -> Self {
        Self::with_script(Script::Fixed(answer.to_string()))
    }

    /// Answers with the first context segment followed by its citation,
    /// or the fallback sentence when the context is empty.
    pub fn echo_context() -> Self {
        Self::with_script(Script::EchoContext)
    }

    pub fn failing() -> Self {
        Self::with_script(Script::Fail)
    }

    fn with_script(script: Script) -> Self {
        Self {
            script,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<LlmRequest> {
        self.requests.lock().unwrap().clone()
    }
}

fn answer_from_prompt(prompt: &str) -> String {
    let context = prompt
        .split("Context:\n")
        .nth(1)
        .and_then(|rest| rest.split("\n\nQuestion:").next())
        .unwrap_or("");

    let mut lines = context.lines();
    match (lines.next(), lines.next()) {
        (Some(cite), Some(text)) if cite.starts_with('[') => format!("{} {}", text, cite),
        _ => "No supporting chunk.".to_string(),
    }
}

#[async_trait::async_trait]
impl LlmClient for ScriptedLlm {
    fn provider_name(&self) -> &str {
        "scripted"
    }

    async fn complete(&self, request: &LlmRequest) -> AppResult<LlmResponse> {
        self.requests.lock().unwrap().push(request.clone());

        let content = match &self.script {
            Script::Fixed(answer) => answer.clone(),
            Script::EchoContext => answer_from_prompt(&request.prompt),
            Script::Fail => return Err(AppError::Upstream("model unavailable".to_string())),
        };

        Ok(LlmResponse {
            content,
            model: request.model.clone(),
            usage: LlmUsage::new(10, 5),
        })
    }
}

pub fn hit(source: &str, index: usize, text: &str, score: f32) -> SearchHit {
    SearchHit {
        segment: Segment {
            source_id: source.to_string(),
            sequence_index: index,
            text: text.to_string(),
            start: 0,
            end: text.chars().count(),
        },
        score,
    }
}
