//! Ask command handler.
//!
//! Builds the RAG pipeline once and answers each question with citations.

use super::with_rag_overrides;
use clap::Args;
use ragbench_core::{config::AppConfig, AppResult};
use ragbench_knowledge::{AnswerRecord, RagPipeline};
use std::path::PathBuf;

/// Questions asked when none are given on the command line.
pub const DEFAULT_QUESTIONS: [&str; 3] = [
    "What is the PTO accrual cap?",
    "Who approves flights over $800?",
    "Do remote employees need VPN?",
];

/// Answer questions from the corpus with citations
#[derive(Args, Debug)]
pub struct AskCommand {
    /// Questions to ask (default: the three handbook questions)
    pub questions: Vec<String>,

    /// Corpus directory (default: <workspace>/corpus)
    #[arg(long)]
    pub corpus: Option<PathBuf>,

    /// Number of segments to retrieve per question
    #[arg(short = 'k', long)]
    pub top_k: Option<usize>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl AskCommand {
    /// Execute the ask command.
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing ask command");
        tracing::debug!("Ask command options: {:?}", self);

        let config = with_rag_overrides(config, self.corpus.as_ref(), self.top_k);
        let pipeline = RagPipeline::from_config(&config).await?;

        let mut records = Vec::new();
        for question in self.questions() {
            let record = pipeline.ask(&question).await?;
            if !self.json {
                println!("{}", render_record(&record));
            }
            records.push(record);
        }

        if self.json {
            let output = serde_json::json!({
                "provider": config.provider,
                "model": config.model,
                "stats": pipeline.stats(),
                "answers": records,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }

        Ok(())
    }

    fn questions(&self) -> Vec<String> {
        if self.questions.is_empty() {
            DEFAULT_QUESTIONS.iter().map(|q| q.to_string()).collect()
        } else {
            self.questions.clone()
        }
    }
}

fn render_record(record: &AnswerRecord) -> String {
    let sources: Vec<&str> = record.cited_sources.iter().map(String::as_str).collect();
    format!(
        "---\nQ: {}\nA: {}\nSources: {}",
        record.question,
        record.answer,
        sources.join(", ")
    )
}
