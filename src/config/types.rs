//! Configuration structures for CLI command handlers.
//!
//! `main.rs` translates parsed arguments into these structures; handlers in
//! [`crate::cli`] consume them. Keeping the two apart makes the handlers
//! testable without a terminal.

use crate::reports::ReportFormat;
use std::path::PathBuf;

/// Input paths for the diff command.
#[derive(Debug, Clone)]
pub struct DiffPaths {
    /// Schema-definition file (YAML or JSON)
    pub schema: PathBuf,
    /// Old version of the data graph
    pub old: PathBuf,
    /// New version of the data graph
    pub new: PathBuf,
}

/// Output routing and rendering options.
#[derive(Debug, Clone, Default)]
pub struct OutputConfig {
    /// Report format
    pub format: ReportFormat,
    /// Output file, stdout when unset
    pub file: Option<PathBuf>,
    /// Emit compact instead of pretty JSON
    pub compact: bool,
    /// Wrap the JSON record in an audit envelope
    pub envelope: bool,
}

/// Behavior flags shared by commands.
#[derive(Debug, Clone, Default)]
pub struct BehaviorConfig {
    /// Exit with a non-zero code when changes are detected
    pub fail_on_change: bool,
    /// Suppress non-essential output
    pub quiet: bool,
}

/// Full configuration for the diff command.
#[derive(Debug, Clone)]
pub struct DiffConfig {
    pub paths: DiffPaths,
    pub output: OutputConfig,
    pub behavior: BehaviorConfig,
    /// Root type override; defaults to the schema file's `root`
    pub root: Option<String>,
    /// Recursion depth guard
    pub max_depth: Option<usize>,
}

/// Configuration for the validate command.
#[derive(Debug, Clone)]
pub struct ValidateConfig {
    /// Schema-definition file to resolve
    pub schema: PathBuf,
    /// Suppress the per-type listing
    pub quiet: bool,
}
