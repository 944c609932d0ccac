//! ragbench CLI
//!
//! Main entry point for the ragbench command-line tool.
//! Answers questions over a local corpus with citations and runs the
//! evaluation harnesses.

mod commands;

use clap::{Parser, Subcommand};
use commands::{AskCommand, EvalCommand};
use ragbench_core::{config::AppConfig, logging, AppResult, ConfigOverrides};
use std::path::PathBuf;

/// ragbench - grounded question answering and evaluation over a local corpus
#[derive(Parser, Debug)]
#[command(name = "ragbench")]
#[command(about = "Grounded question answering and evaluation over a local corpus", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to workspace directory (default: current directory)
    #[arg(short, long, global = true, env = "RAGBENCH_WORKSPACE")]
    workspace: Option<PathBuf>,

    /// Path to config file
    #[arg(short, long, global = true, env = "RAGBENCH_CONFIG")]
    config: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Enable verbose output (sets log level to debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Generation backend (ollama, openai)
    #[arg(short, long, global = true, env = "RAGBENCH_PROVIDER")]
    provider: Option<String>,

    /// Generation model identifier
    #[arg(short, long, global = true, env = "RAGBENCH_MODEL")]
    model: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Answer questions from the corpus with citations
    Ask(AskCommand),

    /// Run an evaluation harness
    Eval(EvalCommand),
}

impl Cli {
    /// Global flags that take precedence over the config file and environment.
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            workspace: self.workspace.clone(),
            config_file: self.config.clone(),
            provider: self.provider.clone(),
            model: self.model.clone(),
            log_level: self.log_level.clone(),
            verbose: self.verbose,
            no_color: self.no_color,
        }
    }
}

#[tokio::main]
async fn main() -> AppResult<()> {
    let cli = Cli::parse();

    let config = AppConfig::load_with_overrides(&cli.overrides())?;

    logging::init_logging(config.log_level.as_deref(), config.no_color)?;

    tracing::info!("ragbench starting");
    tracing::debug!("Workspace: {:?}", config.workspace);
    tracing::debug!("Provider: {}", config.provider);
    tracing::debug!("Model: {}", config.model);

    let command_name = match &cli.command {
        Commands::Ask(_) => "ask",
        Commands::Eval(cmd) => cmd.name(),
    };
    let _span = tracing::info_span!("command", name = command_name).entered();

    let result = match cli.command {
        Commands::Ask(cmd) => cmd.execute(&config).await,
        Commands::Eval(cmd) => cmd.execute(&config).await,
    };

    match &result {
        Ok(_) => tracing::info!("Command completed successfully"),
        Err(e) => tracing::error!("Command failed: {}", e),
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_ask_with_global_flags() {
        let cli = Cli::try_parse_from([
            "ragbench",
            "--provider",
            "openai",
            "ask",
            "What is the PTO accrual cap?",
            "-k",
            "5",
            "--verbose",
        ])
        .unwrap();

        assert_eq!(cli.provider.as_deref(), Some("openai"));
        assert!(cli.verbose);
        match cli.command {
            Commands::Ask(cmd) => {
                assert_eq!(cmd.questions, vec!["What is the PTO accrual cap?"]);
                assert_eq!(cmd.top_k, Some(5));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_path_flags_reach_config_loading() {
        let workspace = tempfile::TempDir::new().unwrap();
        let file = workspace.path().join("my.yaml");
        std::fs::write(&file, "rag:\n  topK: 7\n").unwrap();

        let cli = Cli::try_parse_from([
            "ragbench",
            "--workspace",
            workspace.path().to_str().unwrap(),
            "--config",
            file.to_str().unwrap(),
            "ask",
        ])
        .unwrap();

        let config = AppConfig::load_with(|_| None, &cli.overrides()).unwrap();
        assert_eq!(config.workspace, workspace.path());
        assert_eq!(config.rag.top_k, 7);
    }

    #[test]
    fn test_parse_eval_subcommands() {
        let cli = Cli::try_parse_from(["ragbench", "eval", "metrics", "--input", "out.json"]).unwrap();
        match cli.command {
            Commands::Eval(cmd) => assert_eq!(cmd.name(), "eval.metrics"),
            other => panic!("unexpected command: {:?}", other),
        }

        let cli = Cli::try_parse_from(["ragbench", "eval", "rag", "--qa", "qa.csv"]).unwrap();
        assert!(matches!(cli.command, Commands::Eval(_)));
    }
}
