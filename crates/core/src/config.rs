//! Configuration management for ragbench.
//!
//! This module handles loading and merging configuration from multiple sources:
//! - Built-in defaults (local-first: Ollama + trigram embeddings)
//! - Config files (.ragbench/config.yaml)
//! - Environment variables
//! - Command-line flags
//!
//! The configuration is built once at startup and passed explicitly to the
//! pipeline; nothing re-reads the environment per call.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{AppError, AppResult};

/// Providers the generation factory knows how to build.
pub const KNOWN_PROVIDERS: [&str; 2] = ["ollama", "openai"];

/// Providers the embedding factory knows how to build.
pub const KNOWN_EMBEDDING_PROVIDERS: [&str; 2] = ["trigram", "ollama"];

const DEFAULT_OLLAMA_MODEL: &str = "llama3:8b";
const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Path to the workspace root (contains .ragbench/)
    pub workspace: PathBuf,

    /// Optional config file path
    pub config_file: Option<PathBuf>,

    /// Generation provider ("ollama" or "openai")
    pub provider: String,

    /// Generation model identifier
    pub model: String,

    /// API key for the networked provider
    #[serde(skip_serializing)]
    pub api_key: Option<String>,

    /// Endpoint override for the generation provider
    pub endpoint: Option<String>,

    /// Sampling temperature; 0 requests greedy decoding
    pub temperature: f32,

    /// Log level override
    pub log_level: Option<String>,

    /// Verbose mode (enables debug logging)
    pub verbose: bool,

    /// Disable colored output
    pub no_color: bool,

    /// Retrieval pipeline settings
    pub rag: RagSettings,

    /// Embedding model settings
    pub embedding: EmbeddingSettings,
}

/// Settings for corpus ingestion and retrieval.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RagSettings {
    /// Directory of Markdown-like documents, relative to the workspace
    pub corpus_dir: PathBuf,

    /// Directory the vector index snapshot is written to (None disables persistence)
    pub index_dir: Option<PathBuf>,

    /// Question/citation CSV used by `eval rag`
    pub qa_file: PathBuf,

    /// Segment size in characters
    pub chunk_size: usize,

    /// Characters shared between consecutive segments
    pub chunk_overlap: usize,

    /// Number of segments retrieved per question
    pub top_k: usize,
}

impl Default for RagSettings {
    fn default() -> Self {
        Self {
            corpus_dir: PathBuf::from("corpus"),
            index_dir: Some(PathBuf::from(".ragbench/index")),
            qa_file: PathBuf::from("qa.csv"),
            chunk_size: 500,
            chunk_overlap: 50,
            top_k: 3,
        }
    }
}

/// Settings for the embedding model.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EmbeddingSettings {
    /// Provider name: "trigram" or "ollama"
    pub provider: String,

    /// Model identifier (provider-specific)
    pub model: String,

    /// Embedding vector dimensions
    pub dimensions: usize,

    /// Endpoint override (Ollama only)
    pub endpoint: Option<String>,
}

impl Default for EmbeddingSettings {
    fn default() -> Self {
        Self {
            provider: "trigram".to_string(),
            model: "trigram-v1".to_string(),
            dimensions: 384,
            endpoint: None,
        }
    }
}

/// Full configuration file structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct ConfigFile {
    llm: Option<LlmSection>,
    rag: Option<RagSection>,
    embedding: Option<EmbeddingSection>,
    logging: Option<LoggingSection>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct LlmSection {
    provider: Option<String>,
    model: Option<String>,
    endpoint: Option<String>,
    temperature: Option<f32>,
    #[serde(rename = "apiKeyEnv")]
    api_key_env: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RagSection {
    corpus_dir: Option<PathBuf>,
    index_dir: Option<PathBuf>,
    qa_file: Option<PathBuf>,
    chunk_size: Option<usize>,
    chunk_overlap: Option<usize>,
    top_k: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct EmbeddingSection {
    provider: Option<String>,
    model: Option<String>,
    dimensions: Option<usize>,
    endpoint: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct LoggingSection {
    level: Option<String>,
    color: Option<bool>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            workspace: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            config_file: None,
            provider: "ollama".to_string(), // Local-first default
            model: DEFAULT_OLLAMA_MODEL.to_string(),
            api_key: None,
            endpoint: None,
            temperature: 0.0,
            log_level: None,
            verbose: false,
            no_color: false,
            rag: RagSettings::default(),
            embedding: EmbeddingSettings::default(),
        }
    }
}

/// Default generation model for a provider.
pub fn default_model_for(provider: &str) -> &'static str {
    match provider {
        "openai" => DEFAULT_OPENAI_MODEL,
        _ => DEFAULT_OLLAMA_MODEL,
    }
}

/// Accept Ollama-style `host:port` values as well as full URLs.
pub fn normalize_endpoint(endpoint: &str) -> String {
    let trimmed = endpoint.trim().trim_end_matches('/');
    if trimmed.contains("://") {
        trimmed.to_string()
    } else {
        format!("http://{}", trimmed)
    }
}

/// Values given on the command line. They win over the config file and the
/// environment, and `workspace`/`config_file` also decide which file is read.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub workspace: Option<PathBuf>,
    pub config_file: Option<PathBuf>,
    pub provider: Option<String>,
    pub model: Option<String>,
    pub log_level: Option<String>,
    pub verbose: bool,
    pub no_color: bool,
}

impl AppConfig {
    /// Load configuration from the process environment and defaults.
    ///
    /// Environment variables:
    /// - `RAGBENCH_WORKSPACE`: Override workspace path
    /// - `RAGBENCH_CONFIG`: Path to config file
    /// - `USE_OPENAI`: `1` selects the networked OpenAI backend
    /// - `OPENAI_API_KEY` / `RAGBENCH_API_KEY`: API key for the networked backend
    /// - `OPENAI_BASE_URL`: OpenAI-compatible endpoint
    /// - `OLLAMA_HOST`: Ollama endpoint (generation and embeddings)
    /// - `OLLAMA_MODEL`: Ollama generation model
    /// - `RAGBENCH_PROVIDER` / `RAGBENCH_MODEL`: explicit overrides
    /// - `RUST_LOG`: Log level
    /// - `NO_COLOR`: Disable colored output
    ///
    /// # Example
    /// ```no_run
    /// use ragbench_core::config::AppConfig;
    ///
    /// let config = AppConfig::load().expect("Failed to load config");
    /// println!("Corpus: {:?}", config.corpus_path());
    /// ```
    pub fn load() -> AppResult<Self> {
        Self::load_with_overrides(&ConfigOverrides::default())
    }

    /// Load configuration from the process environment, then apply CLI flags.
    pub fn load_with_overrides(overrides: &ConfigOverrides) -> AppResult<Self> {
        Self::load_with(|key| std::env::var(key).ok(), overrides)
    }

    /// Load configuration using `lookup` in place of the process environment.
    ///
    /// Precedence, lowest first: defaults, config file, environment, `overrides`.
    pub fn load_with<F>(lookup: F, overrides: &ConfigOverrides) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(workspace) = overrides
            .workspace
            .clone()
            .or_else(|| lookup("RAGBENCH_WORKSPACE").map(PathBuf::from))
        {
            config.workspace = workspace;
        }

        config.config_file = overrides
            .config_file
            .clone()
            .or_else(|| lookup("RAGBENCH_CONFIG").map(PathBuf::from));

        if !config.workspace.exists() {
            return Err(AppError::Config(format!(
                "Workspace directory does not exist: {:?}",
                config.workspace
            )));
        }

        let config_path = config
            .config_file
            .clone()
            .unwrap_or_else(|| config.ragbench_dir().join("config.yaml"));

        let mut api_key_env = None;
        if config_path.exists() {
            let (merged, key_env) = config.merge_yaml(&config_path)?;
            config = merged;
            api_key_env = key_env;
        } else if config.config_file.is_some() {
            return Err(AppError::Config(format!(
                "Config file not found: {:?}",
                config_path
            )));
        }

        // Settle the provider first so its own variables are read below
        if lookup("USE_OPENAI").as_deref() == Some("1") {
            config.switch_provider("openai");
        }
        if let Some(provider) = lookup("RAGBENCH_PROVIDER") {
            config.switch_provider(&provider);
        }
        if let Some(provider) = &overrides.provider {
            config.switch_provider(provider);
        }

        match config.provider.as_str() {
            "ollama" => {
                if let Some(model) = lookup("OLLAMA_MODEL") {
                    config.model = model;
                }
                if let Some(host) = lookup("OLLAMA_HOST") {
                    config.endpoint = Some(normalize_endpoint(&host));
                }
            }
            "openai" => {
                if let Some(base_url) = lookup("OPENAI_BASE_URL") {
                    config.endpoint = Some(normalize_endpoint(&base_url));
                }
            }
            _ => {}
        }

        if config.embedding.provider == "ollama" && config.embedding.endpoint.is_none() {
            config.embedding.endpoint = lookup("OLLAMA_HOST").map(|h| normalize_endpoint(&h));
        }

        if let Some(model) = overrides.model.clone().or_else(|| lookup("RAGBENCH_MODEL")) {
            config.model = model;
        }

        config.api_key = lookup("RAGBENCH_API_KEY")
            .or_else(|| api_key_env.as_deref().and_then(&lookup))
            .or_else(|| lookup("OPENAI_API_KEY"))
            .filter(|key| !key.trim().is_empty());

        if let Some(level) = overrides.log_level.clone().or_else(|| lookup("RUST_LOG")) {
            config.log_level = Some(level);
        }

        if overrides.verbose {
            config.verbose = true;
            // Verbose mode implies debug logging
            if overrides.log_level.is_none() {
                config.log_level = Some("debug".to_string());
            }
        }

        if overrides.no_color || lookup("NO_COLOR").is_some() {
            config.no_color = true;
        }

        Ok(config)
    }

    /// Change provider; the model and endpoint of the old one no longer apply.
    fn switch_provider(&mut self, provider: &str) {
        if provider != self.provider {
            self.model = default_model_for(provider).to_string();
            self.endpoint = None;
            self.provider = provider.to_string();
        }
    }

    /// Merge YAML configuration file into this config.
    ///
    /// Returns the merged config and the API key environment variable named by
    /// the file, if any.
    fn merge_yaml(&self, path: &Path) -> AppResult<(Self, Option<String>)> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("Failed to read config file {:?}: {}", path, e))
        })?;

        let config_file: ConfigFile = serde_yaml::from_str(&contents).map_err(|e| {
            AppError::Config(format!("Failed to parse config file {:?}: {}", path, e))
        })?;

        let mut result = self.clone();
        let mut api_key_env = None;

        if let Some(llm) = config_file.llm {
            if let Some(provider) = llm.provider {
                result.model = default_model_for(&provider).to_string();
                result.provider = provider;
            }
            if let Some(model) = llm.model {
                result.model = model;
            }
            if let Some(endpoint) = llm.endpoint {
                result.endpoint = Some(normalize_endpoint(&endpoint));
            }
            if let Some(temperature) = llm.temperature {
                result.temperature = temperature;
            }
            api_key_env = llm.api_key_env;
        }

        if let Some(rag) = config_file.rag {
            if let Some(dir) = rag.corpus_dir {
                result.rag.corpus_dir = dir;
            }
            if let Some(dir) = rag.index_dir {
                result.rag.index_dir = Some(dir);
            }
            if let Some(file) = rag.qa_file {
                result.rag.qa_file = file;
            }
            if let Some(size) = rag.chunk_size {
                result.rag.chunk_size = size;
            }
            if let Some(overlap) = rag.chunk_overlap {
                result.rag.chunk_overlap = overlap;
            }
            if let Some(top_k) = rag.top_k {
                result.rag.top_k = top_k;
            }
        }

        if let Some(embedding) = config_file.embedding {
            if let Some(provider) = embedding.provider {
                result.embedding.provider = provider;
            }
            if let Some(model) = embedding.model {
                result.embedding.model = model;
            }
            if let Some(dimensions) = embedding.dimensions {
                result.embedding.dimensions = dimensions;
            }
            if let Some(endpoint) = embedding.endpoint {
                result.embedding.endpoint = Some(normalize_endpoint(&endpoint));
            }
        }

        if let Some(logging) = config_file.logging {
            if let Some(level) = logging.level {
                result.log_level = Some(level);
            }
            if let Some(color) = logging.color {
                result.no_color = !color;
            }
        }

        tracing::debug!("Merged config file {:?}", path);
        Ok((result, api_key_env))
    }

    /// Get the path to the .ragbench directory.
    pub fn ragbench_dir(&self) -> PathBuf {
        self.workspace.join(".ragbench")
    }

    /// Corpus directory resolved against the workspace.
    pub fn corpus_path(&self) -> PathBuf {
        self.resolve(&self.rag.corpus_dir)
    }

    /// Index snapshot directory resolved against the workspace.
    pub fn index_path(&self) -> Option<PathBuf> {
        self.rag.index_dir.as_deref().map(|dir| self.resolve(dir))
    }

    /// QA file resolved against the workspace.
    pub fn qa_path(&self) -> PathBuf {
        self.resolve(&self.rag.qa_file)
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.workspace.join(path)
        }
    }

    /// Validate configuration before any backend is built.
    pub fn validate(&self) -> AppResult<()> {
        if !KNOWN_PROVIDERS.contains(&self.provider.as_str()) {
            return Err(AppError::Config(format!(
                "Unknown provider: {}. Supported: {}",
                self.provider,
                KNOWN_PROVIDERS.join(", ")
            )));
        }

        if self.provider == "openai" && self.api_key.is_none() {
            return Err(AppError::Config(
                "The openai provider requires an API key (set OPENAI_API_KEY)".to_string(),
            ));
        }

        if self.model.trim().is_empty() {
            return Err(AppError::Config("Model identifier cannot be empty".to_string()));
        }

        if !KNOWN_EMBEDDING_PROVIDERS.contains(&self.embedding.provider.as_str()) {
            return Err(AppError::Config(format!(
                "Unknown embedding provider: {}. Supported: {}",
                self.embedding.provider,
                KNOWN_EMBEDDING_PROVIDERS.join(", ")
            )));
        }

        if self.embedding.dimensions == 0 {
            return Err(AppError::Config(
                "Embedding dimensions must be greater than zero".to_string(),
            ));
        }

        if self.rag.chunk_size == 0 {
            return Err(AppError::Config("chunk_size must be greater than zero".to_string()));
        }

        if self.rag.chunk_overlap >= self.rag.chunk_size {
            return Err(AppError::Config(format!(
                "chunk_overlap ({}) must be smaller than chunk_size ({})",
                self.rag.chunk_overlap, self.rag.chunk_size
            )));
        }

        if self.rag.top_k == 0 {
            return Err(AppError::Config("top_k must be at least 1".to_string()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn env_from(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn load_in(temp: &TempDir, pairs: &[(&str, &str)]) -> AppResult<AppConfig> {
        load_in_with(temp, pairs, &ConfigOverrides::default())
    }

    fn load_in_with(
        temp: &TempDir,
        pairs: &[(&str, &str)],
        overrides: &ConfigOverrides,
    ) -> AppResult<AppConfig> {
        let mut env = env_from(pairs);
        env.insert(
            "RAGBENCH_WORKSPACE".to_string(),
            temp.path().to_string_lossy().to_string(),
        );
        AppConfig::load_with(|key| env.get(key).cloned(), overrides)
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.provider, "ollama");
        assert_eq!(config.model, "llama3:8b");
        assert_eq!(config.temperature, 0.0);
        assert_eq!(config.rag.chunk_size, 500);
        assert_eq!(config.rag.chunk_overlap, 50);
        assert_eq!(config.rag.top_k, 3);
        assert_eq!(config.embedding.provider, "trigram");
        assert!(!config.verbose);
    }

    #[test]
    fn test_use_openai_toggle() {
        let temp = TempDir::new().unwrap();
        let config = load_in(&temp, &[("USE_OPENAI", "1"), ("OPENAI_API_KEY", "sk-test")]).unwrap();

        assert_eq!(config.provider, "openai");
        assert_eq!(config.model, "gpt-4o-mini");
        assert_eq!(config.api_key.as_deref(), Some("sk-test"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_use_openai_without_key_fails_validation() {
        let temp = TempDir::new().unwrap();
        let config = load_in(&temp, &[("USE_OPENAI", "1")]).unwrap();

        let err = config.validate().unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
        assert!(err.to_string().contains("OPENAI_API_KEY"));
    }

    #[test]
    fn test_use_openai_other_values_ignored() {
        let temp = TempDir::new().unwrap();
        let config = load_in(&temp, &[("USE_OPENAI", "true")]).unwrap();
        assert_eq!(config.provider, "ollama");
    }

    #[test]
    fn test_ollama_env() {
        let temp = TempDir::new().unwrap();
        let config = load_in(
            &temp,
            &[("OLLAMA_MODEL", "mistral"), ("OLLAMA_HOST", "10.0.0.2:11434")],
        )
        .unwrap();

        assert_eq!(config.model, "mistral");
        assert_eq!(config.endpoint.as_deref(), Some("http://10.0.0.2:11434"));
    }

    #[test]
    fn test_missing_workspace() {
        let env = env_from(&[("RAGBENCH_WORKSPACE", "/definitely/not/here")]);
        let result = AppConfig::load_with(|key| env.get(key).cloned(), &ConfigOverrides::default());
        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn test_yaml_merge() {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir_all(temp.path().join(".ragbench")).unwrap();
        std::fs::write(
            temp.path().join(".ragbench/config.yaml"),
            r#"
llm:
  provider: ollama
  model: qwen2.5
rag:
  corpusDir: docs
  chunkSize: 800
  chunkOverlap: 80
  topK: 5
embedding:
  provider: ollama
  model: all-minilm
logging:
  level: warn
  color: false
"#,
        )
        .unwrap();

        let config = load_in(&temp, &[]).unwrap();
        assert_eq!(config.model, "qwen2.5");
        assert_eq!(config.rag.corpus_dir, PathBuf::from("docs"));
        assert_eq!(config.rag.chunk_size, 800);
        assert_eq!(config.rag.chunk_overlap, 80);
        assert_eq!(config.rag.top_k, 5);
        assert_eq!(config.embedding.provider, "ollama");
        assert_eq!(config.embedding.model, "all-minilm");
        assert_eq!(config.log_level.as_deref(), Some("warn"));
        assert!(config.no_color);
        assert_eq!(config.corpus_path(), temp.path().join("docs"));
    }

    #[test]
    fn test_yaml_api_key_env() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("custom.yaml");
        std::fs::write(&file, "llm:\n  provider: openai\n  apiKeyEnv: MY_KEY\n").unwrap();

        let config = load_in(
            &temp,
            &[
                ("RAGBENCH_CONFIG", file.to_str().unwrap()),
                ("MY_KEY", "sk-from-file-env"),
            ],
        )
        .unwrap();

        assert_eq!(config.provider, "openai");
        assert_eq!(config.model, "gpt-4o-mini");
        assert_eq!(config.api_key.as_deref(), Some("sk-from-file-env"));
    }

    #[test]
    fn test_explicit_config_file_missing() {
        let temp = TempDir::new().unwrap();
        let result = load_in(&temp, &[("RAGBENCH_CONFIG", "/nope/config.yaml")]);
        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn test_config_flag_file_is_merged() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("my.yaml");
        std::fs::write(&file, "rag:\n  topK: 7\n").unwrap();

        let overrides = ConfigOverrides {
            config_file: Some(file),
            ..Default::default()
        };
        let config = load_in_with(&temp, &[], &overrides).unwrap();

        assert_eq!(config.rag.top_k, 7);
    }

    #[test]
    fn test_config_flag_beats_env_config() {
        let temp = TempDir::new().unwrap();
        let from_env = temp.path().join("env.yaml");
        let from_flag = temp.path().join("flag.yaml");
        std::fs::write(&from_env, "rag:\n  topK: 4\n").unwrap();
        std::fs::write(&from_flag, "rag:\n  topK: 9\n").unwrap();

        let overrides = ConfigOverrides {
            config_file: Some(from_flag),
            ..Default::default()
        };
        let config = load_in_with(
            &temp,
            &[("RAGBENCH_CONFIG", from_env.to_str().unwrap())],
            &overrides,
        )
        .unwrap();

        assert_eq!(config.rag.top_k, 9);
    }

    #[test]
    fn test_workspace_flag_reads_its_config() {
        let env_workspace = TempDir::new().unwrap();
        let flag_workspace = TempDir::new().unwrap();
        std::fs::create_dir_all(flag_workspace.path().join(".ragbench")).unwrap();
        std::fs::write(
            flag_workspace.path().join(".ragbench/config.yaml"),
            "rag:\n  topK: 5\n  corpusDir: handbook\n",
        )
        .unwrap();

        let overrides = ConfigOverrides {
            workspace: Some(flag_workspace.path().to_path_buf()),
            ..Default::default()
        };
        let config = load_in_with(&env_workspace, &[], &overrides).unwrap();

        assert_eq!(config.workspace, flag_workspace.path());
        assert_eq!(config.rag.top_k, 5);
        assert_eq!(config.corpus_path(), flag_workspace.path().join("handbook"));
    }

    #[test]
    fn test_provider_flag_keeps_env_endpoint() {
        let temp = TempDir::new().unwrap();
        let overrides = ConfigOverrides {
            provider: Some("openai".to_string()),
            ..Default::default()
        };
        let config = load_in_with(
            &temp,
            &[
                ("OPENAI_BASE_URL", "http://gateway:8080/v1"),
                ("OPENAI_API_KEY", "sk-test"),
            ],
            &overrides,
        )
        .unwrap();

        assert_eq!(config.provider, "openai");
        assert_eq!(config.model, "gpt-4o-mini");
        assert_eq!(config.endpoint.as_deref(), Some("http://gateway:8080/v1"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_provider_flag_drops_other_provider_settings() {
        let temp = TempDir::new().unwrap();
        let overrides = ConfigOverrides {
            provider: Some("openai".to_string()),
            ..Default::default()
        };
        let config = load_in_with(
            &temp,
            &[("OLLAMA_MODEL", "mistral"), ("OLLAMA_HOST", "10.0.0.2:11434")],
            &overrides,
        )
        .unwrap();

        assert_eq!(config.model, "gpt-4o-mini");
        assert_eq!(config.endpoint, None);
    }

    #[test]
    fn test_model_flag_beats_env() {
        let temp = TempDir::new().unwrap();
        let overrides = ConfigOverrides {
            model: Some("qwen2.5".to_string()),
            ..Default::default()
        };
        let config = load_in_with(
            &temp,
            &[("OLLAMA_MODEL", "mistral"), ("RAGBENCH_MODEL", "phi3")],
            &overrides,
        )
        .unwrap();

        assert_eq!(config.model, "qwen2.5");
    }

    #[test]
    fn test_use_openai_keeps_file_model() {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir_all(temp.path().join(".ragbench")).unwrap();
        std::fs::write(
            temp.path().join(".ragbench/config.yaml"),
            "llm:\n  provider: openai\n  model: gpt-4o\n",
        )
        .unwrap();

        let config = load_in(&temp, &[("USE_OPENAI", "1")]).unwrap();
        assert_eq!(config.model, "gpt-4o");
    }

    #[test]
    fn test_verbose_flag() {
        let temp = TempDir::new().unwrap();
        let overrides = ConfigOverrides {
            verbose: true,
            no_color: true,
            ..Default::default()
        };
        let config = load_in_with(&temp, &[("RUST_LOG", "warn")], &overrides).unwrap();

        assert!(config.verbose);
        assert!(config.no_color);
        assert_eq!(config.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn test_log_level_flag_wins_over_verbose() {
        let temp = TempDir::new().unwrap();
        let overrides = ConfigOverrides {
            log_level: Some("trace".to_string()),
            verbose: true,
            ..Default::default()
        };
        let config = load_in_with(&temp, &[], &overrides).unwrap();

        assert_eq!(config.log_level.as_deref(), Some("trace"));
    }

    #[test]
    fn test_validate_unknown_provider() {
        let mut config = AppConfig::default();
        config.provider = "unknown".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_overlap_must_be_smaller() {
        let mut config = AppConfig::default();
        config.rag.chunk_overlap = config.rag.chunk_size;
        assert!(matches!(config.validate(), Err(AppError::Config(_))));
    }

    #[test]
    fn test_validate_top_k_zero() {
        let mut config = AppConfig::default();
        config.rag.top_k = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_ollama_default() {
        assert!(AppConfig::default().validate().is_ok());
    }

    #[test]
    fn test_normalize_endpoint() {
        assert_eq!(normalize_endpoint("localhost:11434"), "http://localhost:11434");
        assert_eq!(normalize_endpoint("https://api.openai.com/v1/"), "https://api.openai.com/v1");
    }
}
