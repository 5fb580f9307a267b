//! CLI command handlers.
//!
//! This module provides testable command handlers that are invoked by
//! main.rs. Each handler implements the business logic for a specific CLI
//! subcommand and returns the process exit code.

mod diff;
mod validate;

pub use diff::run_diff;
pub use validate::run_validate;

// Re-export config types used by handlers
pub use crate::config::{DiffConfig, ValidateConfig};

/// Process exit codes.
pub mod exit_codes {
    /// No changes detected (or `--fail-on-change` not set)
    pub const SUCCESS: i32 = 0;
    /// Changes detected and `--fail-on-change` set
    pub const CHANGES_DETECTED: i32 = 1;
    /// An error occurred
    pub const ERROR: i32 = 2;
}
