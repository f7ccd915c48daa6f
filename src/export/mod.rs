pub mod csv;
pub mod report;

pub use csv::generate_csv;
pub use report::{summary_report, use_case_report, SummaryStats};

use crate::usecase::UseCase;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};

/// Full-fidelity structured export: a pretty-printed JSON array of the exact
/// in-memory records, re-importable through the migration adapter.
pub fn generate_json(use_cases: &[UseCase]) -> Result<String> {
    serde_json::to_string_pretty(use_cases).context("Failed to serialize use cases")
}

/// Display-format a timestamp the way the reports and CSV do: "Jun 1, 2025".
pub fn format_date(date: DateTime<Utc>) -> String {
    date.format("%b %-d, %Y").to_string()
}
