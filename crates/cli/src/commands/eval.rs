//! Eval command handler.
//!
//! Runs the citation, metric and judge harnesses. Per-item lines go to
//! stdout, followed by a summary where the harness has one.

use super::with_rag_overrides;
use clap::{Args, Subcommand};
use ragbench_core::{config::AppConfig, AppResult};
use ragbench_eval::{
    evaluate_judge, evaluate_metrics, evaluate_rag, load_qa, read_batch, StubJudge,
};
use ragbench_knowledge::RagPipeline;
use std::path::PathBuf;

/// Run an evaluation harness
#[derive(Args, Debug)]
pub struct EvalCommand {
    #[command(subcommand)]
    pub action: EvalAction,
}

#[derive(Subcommand, Debug)]
pub enum EvalAction {
    /// Check citation accuracy against a question/citation CSV
    Rag(EvalRagCommand),
    /// Check structured outputs for required fields
    Metrics(EvalMetricsCommand),
    /// Score outputs against the judge rubric
    Judge(EvalJudgeCommand),
}

impl EvalCommand {
    pub fn name(&self) -> &'static str {
        match self.action {
            EvalAction::Rag(_) => "eval.rag",
            EvalAction::Metrics(_) => "eval.metrics",
            EvalAction::Judge(_) => "eval.judge",
        }
    }

    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        match &self.action {
            EvalAction::Rag(cmd) => cmd.execute(config).await,
            EvalAction::Metrics(cmd) => cmd.execute(),
            EvalAction::Judge(cmd) => cmd.execute().await,
        }
    }
}

/// Citation accuracy over a QA table
#[derive(Args, Debug)]
pub struct EvalRagCommand {
    /// CSV with `question` and `citation` columns (default: <workspace>/qa.csv)
    #[arg(long)]
    pub qa: Option<PathBuf>,

    /// Corpus directory (default: <workspace>/corpus)
    #[arg(long)]
    pub corpus: Option<PathBuf>,

    /// Number of segments to retrieve per question
    #[arg(short = 'k', long)]
    pub top_k: Option<usize>,
}

impl EvalRagCommand {
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing eval rag command");

        let mut config = with_rag_overrides(config, self.corpus.as_ref(), self.top_k);
        if let Some(qa) = &self.qa {
            config.rag.qa_file = qa.clone();
        }

        // Read the table before paying for a pipeline build
        let rows = load_qa(&config.qa_path())?;
        let pipeline = RagPipeline::from_config(&config).await?;

        let report = evaluate_rag(&pipeline, &rows).await?;
        for row in &report.rows {
            println!("{}", row.render());
        }
        println!();
        println!("{}", report.summary_line());

        Ok(())
    }
}

/// Required-field check over a JSON array of outputs
#[derive(Args, Debug)]
pub struct EvalMetricsCommand {
    /// JSON file with the output records (default: stdin)
    #[arg(long)]
    pub input: Option<PathBuf>,
}

impl EvalMetricsCommand {
    pub fn execute(&self) -> AppResult<()> {
        tracing::info!("Executing eval metrics command");

        let items = read_batch(self.input.as_deref())?;
        let report = evaluate_metrics(&items);

        for outcome in &report.outcomes {
            println!("{}", outcome.to_line());
        }
        println!("{}", report.summary_line());

        Ok(())
    }
}

/// Rubric scores for a JSON array of outputs
#[derive(Args, Debug)]
pub struct EvalJudgeCommand {
    /// JSON file with the output records (default: stdin)
    #[arg(long)]
    pub input: Option<PathBuf>,
}

impl EvalJudgeCommand {
    pub async fn execute(&self) -> AppResult<()> {
        tracing::info!("Executing eval judge command");

        let items = read_batch(self.input.as_deref())?;
        let scores = evaluate_judge(&StubJudge, &items).await?;

        for score in &scores {
            println!("{}", score.to_line());
        }

        Ok(())
    }
}
