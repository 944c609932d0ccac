//! Rubric judge for generated outputs.
//!
//! Only the stub judge exists: it assigns fixed placeholder scores so the
//! output shape is stable until a model-backed judge implements [`Judge`].

use chrono::{DateTime, Utc};
use ragbench_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One rubric criterion and its score range `0..=max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RubricCriterion {
    pub name: &'static str,
    pub max: u8,
    pub description: &'static str,
}

pub const RUBRIC: [RubricCriterion; 4] = [
    RubricCriterion {
        name: "coverage",
        max: 2,
        description: "Score 0-2: product, issue, impact, next_step present?",
    },
    RubricCriterion {
        name: "factuality",
        max: 2,
        description: "Score 0-2: no invented facts; aligns to source.",
    },
    RubricCriterion {
        name: "tone",
        max: 1,
        description: "Score 0-1: neutral/professional.",
    },
    RubricCriterion {
        name: "safety",
        max: 1,
        description: "Score 0-1: no promises not in source.",
    },
];

pub const STUB_NOTES: &str = "stub scores; replace with LLM judge call";
pub const MALFORMED_NOTES: &str = "malformed item; expected a JSON object";

/// Rubric scores for one item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JudgeScore {
    pub id: Value,
    pub timestamp: DateTime<Utc>,
    pub coverage: u8,
    pub factuality: u8,
    pub tone: u8,
    pub safety: u8,
    pub notes: String,
}

impl JudgeScore {
    /// Lowest score on every criterion.
    pub fn lowest(id: Value, timestamp: DateTime<Utc>, notes: impl Into<String>) -> Self {
        Self {
            id,
            timestamp,
            coverage: 0,
            factuality: 0,
            tone: 0,
            safety: 0,
            notes: notes.into(),
        }
    }

    /// Score for the named criterion.
    pub fn get(&self, criterion: &str) -> Option<u8> {
        match criterion {
            "coverage" => Some(self.coverage),
            "factuality" => Some(self.factuality),
            "tone" => Some(self.tone),
            "safety" => Some(self.safety),
            _ => None,
        }
    }

    /// Reject scores outside the rubric ranges.
    pub fn check_ranges(&self) -> AppResult<()> {
        for criterion in &RUBRIC {
            let value = self.get(criterion.name).unwrap_or(0);
            if value > criterion.max {
                return Err(AppError::Evaluation(format!(
                    "Judge gave {} = {} for item {}, rubric maximum is {}",
                    criterion.name, value, self.id, criterion.max
                )));
            }
        }
        Ok(())
    }

    pub fn to_line(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| format!("{{\"id\":{}}}", self.id))
    }
}

/// Scores one item against [`RUBRIC`].
#[async_trait::async_trait]
pub trait Judge: Send + Sync {
    fn name(&self) -> &str;

    async fn score(&self, item: &Value) -> AppResult<JudgeScore>;
}

/// Placeholder judge with fixed scores.
#[derive(Debug, Default, Clone, Copy)]
pub struct StubJudge;

#[async_trait::async_trait]
impl Judge for StubJudge {
    fn name(&self) -> &str {
        "stub"
    }

    async fn score(&self, item: &Value) -> AppResult<JudgeScore> {
        let now = Utc::now();
        if !item.is_object() {
            return Ok(JudgeScore::lowest(Value::Null, now, MALFORMED_NOTES));
        }

        Ok(JudgeScore {
            id: item.get("id").cloned().unwrap_or(Value::Null),
            timestamp: now,
            coverage: 2,
            factuality: 2,
            tone: 1,
            safety: 1,
            notes: STUB_NOTES.to_string(),
        })
    }
}

/// Score every item, one score per item in input order.
pub async fn evaluate_judge(judge: &dyn Judge, items: &[Value]) -> AppResult<Vec<JudgeScore>> {
    tracing::info!("Judging {} items with '{}' judge", items.len(), judge.name());

    let mut scores = Vec::with_capacity(items.len());
    for item in items {
        let score = judge.score(item).await?;
        score.check_ranges()?;
        scores.push(score);
    }
    Ok(scores)
}
