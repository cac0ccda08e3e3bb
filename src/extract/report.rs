//! Batch extraction report.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Result of processing one output document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Outcome {
    /// Document written to `output`.
    Written { output: PathBuf },

    /// Processing failed; nothing was written.
    Failed { error: String },
}

/// Outcome for a single fixture.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FixtureOutcome {
    pub fixture: PathBuf,

    #[serde(flatten)]
    pub outcome: Outcome,
}

/// Outcome of a whole extraction run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractReport {
    pub started_at: DateTime<Utc>,
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,

    /// Per-fixture outcomes in processing order.
    pub fixtures: Vec<FixtureOutcome>,

    /// Merged document outcome; None when not requested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub all_in_one: Option<Outcome>,
}

impl ExtractReport {
    pub fn new(input_dir: PathBuf, output_dir: PathBuf) -> Self {
        Self {
            started_at: Utc::now(),
            input_dir,
            output_dir,
            fixtures: Vec::new(),
            all_in_one: None,
        }
    }

    pub fn written_count(&self) -> usize {
        self.fixtures
            .iter()
            .filter(|f| matches!(f.outcome, Outcome::Written { .. }))
            .count()
    }

    pub fn failed_count(&self) -> usize {
        self.fixtures.len() - self.written_count()
    }

    /// True when any fixture, or the merged document, failed.
    pub fn has_failures(&self) -> bool {
        self.failed_count() > 0 || matches!(self.all_in_one, Some(Outcome::Failed { .. }))
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Human-readable summary.
    pub fn to_human(&self) -> String {
        let mut lines = vec![format!(
            "Processed {} fixtures from {} ({} written, {} failed)",
            self.fixtures.len(),
            self.input_dir.display(),
            self.written_count(),
            self.failed_count()
        )];

        for f in &self.fixtures {
            match &f.outcome {
                Outcome::Written { output } => {
                    lines.push(format!("  ok    {} -> {}", f.fixture.display(), output.display()))
                }
                Outcome::Failed { error } => {
                    lines.push(format!("  FAIL  {}: {}", f.fixture.display(), error))
                }
            }
        }

        match &self.all_in_one {
            Some(Outcome::Written { output }) => {
                lines.push(format!("All-in-one configuration: {}", output.display()))
            }
            Some(Outcome::Failed { error }) => {
                lines.push(format!("All-in-one configuration FAILED: {}", error))
            }
            None => {}
        }

        lines.join("\n")
    }
}
