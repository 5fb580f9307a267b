//! Report generators for change records.
//!
//! A [`ChangeRecord`](crate::diff::ChangeRecord) is an in-memory structure;
//! the generators here render it for storage or terminals. Rendering is
//! deterministic: identical records produce byte-identical output.

mod json;
mod summary;

pub use json::JsonReporter;
pub use summary::SummaryReporter;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Output format for reports
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
pub enum ReportFormat {
    /// Structured JSON output
    #[default]
    Json,
    /// Brief human-readable summary
    Summary,
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportFormat::Json => write!(f, "json"),
            ReportFormat::Summary => write!(f, "summary"),
        }
    }
}
