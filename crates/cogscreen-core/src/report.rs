//! Serializable session summary with JSON persistence.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::PartialScores;
use crate::results::AssessmentResult;

/// A snapshot of one session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentReport {
    /// Unique session identifier, regenerated on restart.
    pub id: Uuid,
    /// Local time the session was initialized.
    pub started_at: NaiveDateTime,
    /// Local time the results stage was reached.
    pub completed_at: Option<NaiveDateTime>,
    /// The five words, lower-case.
    pub words: Vec<String>,
    /// Animals named during fluency, in entry order.
    pub animals: Vec<String>,
    pub scores: PartialScores,
    /// "Label: N/Max" per subtest.
    pub breakdown: Vec<String>,
    /// Absent until the session completes.
    pub result: Option<AssessmentResult>,
}

impl AssessmentReport {
    pub fn is_complete(&self) -> bool {
        self.result.is_some()
    }

    /// Pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("failed to serialize report")
    }

    /// Save the report as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = self.to_json()?;
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Load a report from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report from {}", path.display()))?;
        let report: AssessmentReport =
            serde_json::from_str(&content).context("failed to parse report JSON")?;
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::results::compute_results;
    use chrono::NaiveDate;

    fn sample() -> AssessmentReport {
        let scores = PartialScores {
            orientation: 5,
            immediate_recall: 4,
            serial7s: 3,
            digit_forward: 2,
            digit_backward: 1,
            fluency: 2,
            stroop: 4,
            delayed_recall: 3,
        };
        let at = NaiveDate::from_ymd_opt(2024, 6, 1)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap();
        AssessmentReport {
            id: Uuid::new_v4(),
            started_at: at,
            completed_at: Some(at),
            words: vec!["apple".into(), "table".into()],
            animals: vec!["cat".into()],
            scores,
            breakdown: scores.breakdown(),
            result: Some(compute_results(&scores)),
        }
    }

    #[test]
    fn json_fields() {
        let report = sample();
        let value: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
        assert_eq!(value["scores"]["digit_forward"], 2);
        assert_eq!(value["result"]["raw"], 24);
        assert_eq!(value["result"]["normalized"], 22);
        assert_eq!(value["result"]["category"], "mild_impairment");
        assert_eq!(value["breakdown"][3], "Digit Span: 3/4");
    }

    #[test]
    fn save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reports").join("session.json");
        let report = sample();
        report.save_json(&path).unwrap();
        let loaded = AssessmentReport::load_json(&path).unwrap();
        assert_eq!(loaded, report);
        assert!(loaded.is_complete());
    }
}
