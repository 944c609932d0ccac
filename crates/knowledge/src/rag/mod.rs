//! Retrieval-augmented answering.

pub mod generator;
pub mod pipeline;

pub use generator::{format_context, AnswerGenerator};
pub use pipeline::{PipelineConfig, QuestionAnswerer, RagPipeline};
