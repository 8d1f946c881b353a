// pgfleet/src/report.rs
//! Per-item outcome records for a run.
//!
//! The orchestration loops isolate failures per database/key; these types
//! carry the results back to the caller so the final accounting does not
//! depend on scraping the log output.

use std::fmt;

/// Step of the per-item pipeline at which an item failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailedStep {
    Dump,
    Upload,
    Download,
    Decode,
    Restore,
}

impl fmt::Display for FailedStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let step = match self {
            FailedStep::Dump => "dump",
            FailedStep::Upload => "upload",
            FailedStep::Download => "download",
            FailedStep::Decode => "decode",
            FailedStep::Restore => "restore",
        };
        write!(f, "{}", step)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Succeeded,
    Failed { step: FailedStep, reason: String },
}

/// Result of one database (backup) or one object key (restore).
#[derive(Debug, Clone)]
pub struct ItemOutcome {
    pub item: String,
    pub outcome: Outcome,
}

/// Aggregated outcomes of one run, in processing order.
#[derive(Debug, Default)]
pub struct BatchReport {
    outcomes: Vec<ItemOutcome>,
}

impl BatchReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_success(&mut self, item: &str) {
        self.outcomes.push(ItemOutcome {
            item: item.to_string(),
            outcome: Outcome::Succeeded,
        });
    }

    pub fn record_failure(&mut self, item: &str, step: FailedStep, reason: String) {
        self.outcomes.push(ItemOutcome {
            item: item.to_string(),
            outcome: Outcome::Failed { step, reason },
        });
    }

    pub fn outcomes(&self) -> &[ItemOutcome] {
        &self.outcomes
    }

    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    pub fn succeeded(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| o.outcome == Outcome::Succeeded)
            .count()
    }

    pub fn failed(&self) -> usize {
        self.total() - self.succeeded()
    }

    pub fn is_clean(&self) -> bool {
        self.failed() == 0
    }

    /// One summary block for the end of the run. `noun` names the item
    /// kind ("database" for backup, "backup file" for restore).
    pub fn summary(&self, noun: &str) -> String {
        if self.total() == 0 {
            return format!("🏁 Nothing to do: no {}s found.", noun);
        }
        if self.is_clean() {
            return format!("🎉 All {} {}(s) processed successfully.", self.total(), noun);
        }
        let mut lines = format!(
            "⚠️ {} {}(s) processed: {} succeeded, {} failed.",
            self.total(),
            noun,
            self.succeeded(),
            self.failed()
        );
        for item_outcome in &self.outcomes {
            if let Outcome::Failed { step, reason } = &item_outcome.outcome {
                lines.push_str(&format!(
                    "\n   ❌ {}: failed at {}: {}",
                    item_outcome.item, step, reason
                ));
            }
        }
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_report_is_clean() {
        let report = BatchReport::new();
        assert_eq!(report.total(), 0);
        assert!(report.is_clean());
        assert!(report.summary("database").contains("Nothing to do"));
    }

    #[test]
    fn test_counts_and_order() {
        let mut report = BatchReport::new();
        report.record_success("admindb");
        report.record_failure("agentdb", FailedStep::Dump, "pg_dump exited with 1".into());
        report.record_success("userdb");

        assert_eq!(report.total(), 3);
        assert_eq!(report.succeeded(), 2);
        assert_eq!(report.failed(), 1);
        assert!(!report.is_clean());
        assert_eq!(report.outcomes()[1].item, "agentdb");
    }

    #[test]
    fn test_summary_lists_failures_with_step_and_reason() {
        let mut report = BatchReport::new();
        report.record_success("admindb");
        report.record_failure("agentdb", FailedStep::Upload, "connection reset".into());

        let summary = report.summary("database");
        assert!(summary.contains("1 succeeded, 1 failed"));
        assert!(summary.contains("agentdb: failed at upload: connection reset"));
    }

    #[test]
    fn test_clean_summary() {
        let mut report = BatchReport::new();
        report.record_success("admindb");
        let summary = report.summary("database");
        assert!(summary.contains("All 1 database(s) processed successfully"));
    }
}
