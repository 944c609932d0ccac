//! Citation accuracy of the RAG pipeline over a question/citation table.

use ragbench_core::{AppError, AppResult};
use ragbench_knowledge::{AnswerRecord, QuestionAnswerer};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::Path;

/// One row of the QA table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QaRow {
    pub question: String,
    /// Expected citation, e.g. `hr-policy:3`
    pub citation: String,
}

/// Read `question,citation` rows in file order. Cells are trimmed.
pub fn load_qa(path: &Path) -> AppResult<Vec<QaRow>> {
    let file = File::open(path).map_err(|e| AppError::file_access(path, e))?;
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(file);

    let mut rows = Vec::new();
    for (line, result) in reader.deserialize::<QaRow>().enumerate() {
        let row = result.map_err(|e| {
            AppError::Evaluation(format!("Invalid QA row {} in {:?}: {}", line + 1, path, e))
        })?;
        rows.push(row);
    }

    tracing::debug!("Loaded {} QA rows from {:?}", rows.len(), path);
    Ok(rows)
}

/// Whether an answer hits the expected citation.
///
/// Case-insensitive; true when any holds:
/// - the part of `expected` before the first `:` occurs in the answer
/// - all of `expected` occurs in the answer
/// - all of `expected` occurs in the observed citations
pub fn citation_hit(expected: &str, answer: &str, observed_cites: &str) -> bool {
    let expected = expected.to_lowercase();
    let answer = answer.to_lowercase();
    let prefix = expected.split(':').next().unwrap_or("");

    answer.contains(prefix)
        || answer.contains(expected.as_str())
        || observed_cites.to_lowercase().contains(expected.as_str())
}

/// Sorted cited sources joined with ` | `.
pub fn observed_cites(record: &AnswerRecord) -> String {
    record
        .cited_sources
        .iter()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(" | ")
}

/// Outcome of one QA row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RagRowOutcome {
    pub question: String,
    /// Answer as matched: trimmed and lowercased
    pub answer: String,
    pub expected: String,
    pub observed: String,
    pub hit: bool,
}

impl RagRowOutcome {
    /// Human-readable block for this row.
    pub fn render(&self) -> String {
        let verdict = if self.hit {
            "Pass: hit expected citation"
        } else {
            "Fail: citation missing or wrong"
        };
        format!(
            "---\nQ: {}\nA: {}\nExpected cite: {}\nObserved cites: {}\n{}",
            self.question, self.answer, self.expected, self.observed, verdict
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RagEvalReport {
    pub rows: Vec<RagRowOutcome>,
    pub correct: usize,
    pub total: usize,
}

impl RagEvalReport {
    /// Percentage of hits, 0.0 when there are no rows.
    pub fn accuracy_pct(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.correct as f64 / self.total as f64 * 100.0
        }
    }

    pub fn summary_line(&self) -> String {
        format!(
            "Summary: {}/{} correct ({:.1}%)",
            self.correct,
            self.total,
            self.accuracy_pct()
        )
    }
}

/// Ask every question in order and score its citation.
///
/// A failing question aborts the run.
pub async fn evaluate_rag(answerer: &dyn QuestionAnswerer, rows: &[QaRow]) -> AppResult<RagEvalReport> {
    tracing::info!("Evaluating citations for {} questions", rows.len());

    let mut report = RagEvalReport::default();
    for row in rows {
        let record = answerer.answer(&row.question).await?;
        let observed = observed_cites(&record);
        let hit = citation_hit(&row.citation, &record.answer, &observed);

        if hit {
            report.correct += 1;
        }
        report.total += 1;
        report.rows.push(RagRowOutcome {
            question: row.question.clone(),
            answer: record.answer.trim().to_lowercase(),
            expected: row.citation.clone(),
            observed,
            hit,
        });
    }

    tracing::info!("{}", report.summary_line());
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;
    use tempfile::TempDir;

    /// Answers from a fixed table of (question, answer, sources).
    struct TableAnswerer(Vec<(&'static str, &'static str, Vec<&'static str>)>);

    #[async_trait::async_trait]
    impl QuestionAnswerer for TableAnswerer {
        async fn answer(&self, question: &str) -> AppResult<AnswerRecord> {
            let (_, answer, sources) = self
                .0
                .iter()
                .find(|(q, _, _)| *q == question)
                .ok_or_else(|| AppError::Upstream(format!("no scripted answer for {}", question)))?;

            Ok(AnswerRecord {
                question: question.to_string(),
                answer: answer.to_string(),
                cited_sources: sources.iter().map(|s| s.to_string()).collect::<BTreeSet<_>>(),
                hits: Vec::new(),
            })
        }
    }

    #[test]
    fn test_prefix_match_counts_as_hit() {
        assert!(citation_hit(
            "hr-policy:3",
            "Accrual is capped at 240 hours [hr-policy:1].",
            ""
        ));
    }

    #[test]
    fn test_match_is_case_insensitive() {
        assert!(citation_hit("HR-Policy:3", "see hr-policy", ""));
        assert!(citation_hit("travel.md", "", "IT.md | Travel.md"));
    }

    #[test]
    fn test_full_citation_in_observed_cites() {
        assert!(citation_hit("policy.md", "The cap is 240 hours.", "policy.md | travel.md"));
        assert!(!citation_hit("policy.md:2", "The cap is 240 hours.", "policy.md | travel.md"));
    }

    #[test]
    fn test_miss() {
        assert!(!citation_hit("travel:1", "No supporting chunk.", "it.md"));
    }

    #[test]
    fn test_render_row() {
        let outcome = RagRowOutcome {
            question: "Q1".to_string(),
            answer: "A1".to_string(),
            expected: "policy.md".to_string(),
            observed: "policy.md".to_string(),
            hit: true,
        };
        assert_eq!(
            outcome.render(),
            "---\nQ: Q1\nA: A1\nExpected cite: policy.md\nObserved cites: policy.md\nPass: hit expected citation"
        );
    }

    #[test]
    fn test_empty_summary() {
        assert_eq!(RagEvalReport::default().summary_line(), "Summary: 0/0 correct (0.0%)");
    }

    #[test]
    fn test_load_qa_trims_and_keeps_order() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("qa.csv");
        std::fs::write(
            &path,
            "question,citation\n What is the PTO accrual cap? , hr-policy:3\nDo remote employees need VPN?,it.md\n",
        )
        .unwrap();

        let rows = load_qa(&path).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].question, "What is the PTO accrual cap?");
        assert_eq!(rows[0].citation, "hr-policy:3");
        assert_eq!(rows[1].citation, "it.md");
    }

    #[test]
    fn test_load_qa_missing_file() {
        let temp = TempDir::new().unwrap();
        assert!(matches!(
            load_qa(&temp.path().join("qa.csv")),
            Err(AppError::FileAccess { .. })
        ));
    }

    #[test]
    fn test_load_qa_missing_column() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("qa.csv");
        std::fs::write(&path, "question\nWhat?\n").unwrap();

        assert!(matches!(load_qa(&path), Err(AppError::Evaluation(_))));
    }

    #[tokio::test]
    async fn test_evaluate_rag_counts_hits() {
        let answerer = TableAnswerer(vec![
            ("What is the PTO accrual cap?", "240 hours [hr-policy:1]", vec!["hr-policy.md"]),
            ("Who approves flights over $800?", "  Your Director approves. \n", vec!["travel.md"]),
            ("Do remote employees need VPN?", "No supporting chunk.", vec!["policy.md"]),
        ]);
        let rows = vec![
            QaRow { question: "What is the PTO accrual cap?".into(), citation: "hr-policy:3".into() },
            QaRow { question: "Who approves flights over $800?".into(), citation: "travel.md".into() },
            QaRow { question: "Do remote employees need VPN?".into(), citation: "it.md".into() },
        ];

        let report = evaluate_rag(&answerer, &rows).await.unwrap();

        let hits: Vec<bool> = report.rows.iter().map(|r| r.hit).collect();
        assert_eq!(hits, vec![true, true, false]);
        assert_eq!(report.summary_line(), "Summary: 2/3 correct (66.7%)");
        assert_eq!(report.rows[1].observed, "travel.md");
        assert_eq!(report.rows[1].answer, "your director approves.");
        assert!(report.rows[1].render().contains("\nA: your director approves.\n"));
    }

    #[tokio::test]
    async fn test_evaluate_rag_aborts_on_failure() {
        let answerer = TableAnswerer(Vec::new());
        let rows = vec![QaRow { question: "?".into(), citation: "x".into() }];

        assert!(matches!(
            evaluate_rag(&answerer, &rows).await,
            Err(AppError::Upstream(_))
        ));
    }
}
