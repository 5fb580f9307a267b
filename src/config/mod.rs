//! Typed configuration consumed by the CLI command handlers.

mod types;

pub use types::{BehaviorConfig, DiffConfig, DiffPaths, OutputConfig, ValidateConfig};
