//! Batch input for the item evaluators.

use ragbench_core::{AppError, AppResult};
use serde_json::Value;
use std::io::Read;
use std::path::Path;

/// Parse a whole batch. The input must be a JSON array; its items are not
/// checked here.
pub fn parse_batch(input: &str) -> AppResult<Vec<Value>> {
    let value: Value = serde_json::from_str(input)
        .map_err(|e| AppError::Evaluation(format!("Evaluator input is not valid JSON: {}", e)))?;

    match value {
        Value::Array(items) => Ok(items),
        other => Err(AppError::Evaluation(format!(
            "Evaluator input must be a JSON array of records, got {}",
            json_kind(&other)
        ))),
    }
}

/// Read a batch from `path`, or from stdin when `path` is `None`.
pub fn read_batch(path: Option<&Path>) -> AppResult<Vec<Value>> {
    let raw = match path {
        Some(path) => {
            tracing::debug!("Reading evaluator input from {:?}", path);
            std::fs::read_to_string(path).map_err(|e| AppError::file_access(path, e))?
        }
        None => {
            tracing::debug!("Reading evaluator input from stdin");
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    parse_batch(&raw)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
