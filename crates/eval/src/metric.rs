//! Rule-based metric check over structured outputs.
//!
//! An item passes when its `json` object has every required key. Values are
//! not inspected.

use serde::Serialize;
use serde_json::Value;

/// Keys every output record must carry.
pub const REQUIRED_FIELDS: [&str; 4] = ["product", "issue", "impact", "next_step"];

/// Pass/fail for one item.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricOutcome {
    pub id: Value,
    pub pass: bool,
}

impl MetricOutcome {
    /// One-line JSON form, e.g. `{"id":1,"pass":false}`.
    pub fn to_line(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| format!("{{\"id\":null,\"pass\":{}}}", self.pass))
    }
}

/// Per-item outcomes and totals for a batch.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MetricReport {
    pub outcomes: Vec<MetricOutcome>,
    pub passed: usize,
    pub total: usize,
}

impl MetricReport {
    /// `passed / total`, or 0.0 for an empty batch.
    pub fn pass_rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.passed as f64 / self.total as f64
        }
    }

    pub fn summary_line(&self) -> String {
        format!("Metrics pass rate: {}/{}", self.passed, self.total)
    }
}

/// Names of required fields missing from `item`. Malformed items miss all.
pub fn missing_fields(item: &Value) -> Vec<&'static str> {
    match item.get("json").and_then(Value::as_object) {
        Some(fields) => REQUIRED_FIELDS
            .iter()
            .copied()
            .filter(|field| !fields.contains_key(*field))
            .collect(),
        None => REQUIRED_FIELDS.to_vec(),
    }
}

/// Check every item. Never fails: malformed items simply do not pass.
pub fn evaluate_metrics(items: &[Value]) -> MetricReport {
    let outcomes: Vec<MetricOutcome> = items
        .iter()
        .map(|item| {
            let missing = missing_fields(item);
            let id = item.get("id").cloned().unwrap_or(Value::Null);
            if !missing.is_empty() {
                tracing::debug!("Item {} missing fields: {}", id, missing.join(", "));
            }
            MetricOutcome {
                id,
                pass: missing.is_empty(),
            }
        })
        .collect();

    let passed = outcomes.iter().filter(|o| o.pass).count();
    let total = outcomes.len();

    tracing::info!("Metric check: {}/{} passed", passed, total);

    MetricReport {
        outcomes,
        passed,
        total,
    }
}
