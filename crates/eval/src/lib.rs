//! Evaluation harnesses for ragbench.
//!
//! - [`metric`]: required-field check over structured outputs
//! - [`judge`]: rubric scoring (stub judge)
//! - [`rag`]: citation accuracy of the RAG pipeline over a QA table

pub mod input;
pub mod judge;
pub mod metric;
pub mod rag;

pub use input::{parse_batch, read_batch};
pub use judge::{evaluate_judge, Judge, JudgeScore, RubricCriterion, StubJudge, RUBRIC};
pub use metric::{evaluate_metrics, MetricOutcome, MetricReport, REQUIRED_FIELDS};
pub use rag::{citation_hit, evaluate_rag, load_qa, QaRow, RagEvalReport, RagRowOutcome};
