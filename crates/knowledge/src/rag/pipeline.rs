//! Retrieval-augmented answering pipeline.
//!
//! `build` loads the corpus, chunks it, embeds every segment and fills an
//! in-memory index. `ask` is read-only: embed the question, retrieve top-k,
//! generate, and cite the sources of the retrieved segments.

use crate::chunker::Chunker;
use crate::embeddings::{create_provider, EmbeddingProvider};
use crate::index::InMemoryIndex;
use crate::loader::load_corpus;
use crate::rag::generator::AnswerGenerator;
use crate::types::{AnswerRecord, EmbeddedSegment, PipelineStats, RetrievalResult};
use crate::vector_index::VectorIndex;
use ragbench_core::{AppConfig, AppError, AppResult};
use ragbench_llm::{create_client, BackendConfig, LlmClient};
use ragbench_prompt::{rag_answer, resolve_prompt, PromptDefinition, RAG_ANSWER_PROMPT_ID};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

/// Everything one pipeline instance needs, fixed at construction.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub corpus_dir: PathBuf,
    pub chunk_size: usize,
    pub chunk_overlap: usize,
    pub top_k: usize,

    /// Generation model name
    pub model: String,
    pub temperature: f32,

    /// Where to persist the built index; `None` keeps it in memory only
    pub index_dir: Option<PathBuf>,

    pub prompt: PromptDefinition,
}

impl PipelineConfig {
    /// Reference settings: 500/50 character chunks, top 3, greedy decoding.
    pub fn new(corpus_dir: impl Into<PathBuf>, model: impl Into<String>) -> Self {
        Self {
            corpus_dir: corpus_dir.into(),
            chunk_size: 500,
            chunk_overlap: 50,
            top_k: 3,
            model: model.into(),
            temperature: 0.0,
            index_dir: None,
            prompt: rag_answer(),
        }
    }

    /// Derive pipeline settings from application configuration.
    pub fn from_app_config(config: &AppConfig) -> AppResult<Self> {
        Ok(Self {
            corpus_dir: config.corpus_path(),
            chunk_size: config.rag.chunk_size,
            chunk_overlap: config.rag.chunk_overlap,
            top_k: config.rag.top_k,
            model: config.model.clone(),
            temperature: config.temperature,
            index_dir: config.index_path(),
            prompt: resolve_prompt(&config.workspace, RAG_ANSWER_PROMPT_ID)?,
        })
    }
}

/// Anything that can turn a question into an [`AnswerRecord`].
#[async_trait::async_trait]
pub trait QuestionAnswerer: Send + Sync {
    async fn answer(&self, question: &str) -> AppResult<AnswerRecord>;
}

/// A built RAG pipeline owning its index.
pub struct RagPipeline {
    config: PipelineConfig,
    embedder: Arc<dyn EmbeddingProvider>,
    generator: AnswerGenerator,
    index: InMemoryIndex,
    documents: usize,
}

impl std::fmt::Debug for RagPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RagPipeline")
            .field("config", &self.config)
            .field("embedder", &self.embedder)
            .field("llm", &self.generator.provider_name())
            .field("documents", &self.documents)
            .field("segments", &self.index.len())
            .finish()
    }
}

impl RagPipeline {
    /// Build a pipeline over `config.corpus_dir`.
    ///
    /// # Errors
    /// - `AppError::Config` for invalid chunk sizes or `top_k == 0`
    /// - `AppError::FileAccess` when the corpus cannot be read
    /// - `AppError::Upstream` when embedding fails
    pub async fn build(
        config: PipelineConfig,
        embedder: Arc<dyn EmbeddingProvider>,
        llm: Arc<dyn LlmClient>,
    ) -> AppResult<Self> {
        let start = Instant::now();

        if config.top_k == 0 {
            return Err(AppError::Config("top_k must be greater than 0".to_string()));
        }
        let chunker = Chunker::new(config.chunk_size, config.chunk_overlap)?;

        tracing::info!(
            "Building RAG pipeline over {:?} (embedder: {}/{}, llm: {})",
            config.corpus_dir,
            embedder.provider_name(),
            embedder.model_name(),
            llm.provider_name()
        );

        let documents = load_corpus(&config.corpus_dir)?;
        if documents.is_empty() {
            tracing::warn!("Corpus {:?} contains no documents", config.corpus_dir);
        }

        let segments = chunker.chunk_documents(&documents);
        let texts: Vec<String> = segments.iter().map(|s| s.text.clone()).collect();
        let vectors = if texts.is_empty() {
            Vec::new()
        } else {
            embedder.embed_batch(&texts).await?
        };

        if vectors.len() != segments.len() {
            return Err(AppError::Upstream(format!(
                "Embedder returned {} vectors for {} segments",
                vectors.len(),
                segments.len()
            )));
        }

        let mut index = InMemoryIndex::new();
        for (segment, vector) in segments.into_iter().zip(vectors) {
            index.add(EmbeddedSegment { segment, vector })?;
        }

        if let Some(dir) = &config.index_dir {
            index.persist(dir)?;
        }

        tracing::info!(
            "Pipeline ready: {} documents, {} segments in {:.2}s",
            documents.len(),
            index.len(),
            start.elapsed().as_secs_f64()
        );

        let generator = AnswerGenerator::new(llm, config.model.as_str())
            .with_prompt(config.prompt.clone())
            .with_temperature(config.temperature);

        Ok(Self {
            config,
            embedder,
            generator,
            index,
            documents: documents.len(),
        })
    }

    /// Build from application configuration, creating the embedding and
    /// generation backends through their factories.
    pub async fn from_config(app_config: &AppConfig) -> AppResult<Self> {
        app_config.validate()?;

        let pipeline_config = PipelineConfig::from_app_config(app_config)?;
        let llm = create_client(&BackendConfig::from_app_config(app_config)?)?;
        let embedder = create_provider(&app_config.embedding).await?;

        Self::build(pipeline_config, embedder, llm).await
    }

    /// Top-k segments for `question`.
    pub async fn retrieve(&self, question: &str) -> AppResult<RetrievalResult> {
        let vector = self.embedder.embed(question).await?;
        self.index.query(&vector, self.config.top_k)
    }

    /// Answer `question` from the indexed corpus.
    pub async fn ask(&self, question: &str) -> AppResult<AnswerRecord> {
        tracing::info!("Question: {}", question);

        let hits = self.retrieve(question).await?;
        if let Some(top) = hits.first() {
            tracing::debug!(
                "Retrieved {} segments (top: {} score {:.3})",
                hits.len(),
                top.segment.citation(),
                top.score
            );
        }

        let answer = self.generator.generate(question, &hits).await?;

        Ok(AnswerRecord::from_hits(question, answer, &hits))
    }

    pub fn stats(&self) -> PipelineStats {
        PipelineStats {
            documents: self.documents,
            segments: self.index.len(),
            dimensions: self.index.dimensions(),
        }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn index(&self) -> &InMemoryIndex {
        &self.index
    }
}

#[async_trait::async_trait]
impl QuestionAnswerer for RagPipeline {
    async fn answer(&self, question: &str) -> AppResult<AnswerRecord> {
        self.ask(question).await
    }
}
