//! Diff command handler.
//!
//! Implements the `diff` subcommand: load a schema file, parse both
//! versions of the data graph, run the engine, and route the rendered
//! report to stdout or a file.

use super::exit_codes;
use crate::config::DiffConfig;
use crate::diff::DiffEngine;
use crate::error::{DeltaError, ErrorContext, OptionContext, Result, SchemaErrorKind};
use crate::model::{SchemaFile, TypeDescriptor};
use crate::reports::{JsonReporter, ReportFormat, SummaryReporter};
use serde_json::Value;
use std::path::Path;
use std::sync::Arc;

/// Run the diff command, returning the desired exit code.
///
/// The caller is responsible for calling `std::process::exit()` with the
/// returned code when it is non-zero.
pub fn run_diff(config: &DiffConfig) -> Result<i32> {
    let registry = SchemaFile::from_path(&config.paths.schema)
        .with_context(|| format!("loading schema {}", config.paths.schema.display()))?
        .resolve()?;

    let descriptor: Arc<TypeDescriptor> = match &config.root {
        Some(name) => registry
            .get(name)
            .with_context_none(|| format!("schema declares no type named '{name}'"))?,
        None => registry.root().ok_or_else(|| {
            DeltaError::schema("selecting diff root", SchemaErrorKind::NoRootType)
        })?,
    };

    let old = read_data_graph(&config.paths.old)?;
    let new = read_data_graph(&config.paths.new)?;

    let mut engine = DiffEngine::new();
    if let Some(limit) = config.max_depth {
        engine = engine.with_max_depth(limit);
    }
    let record = engine.diff(&old, &new, &descriptor)?;

    if !config.behavior.quiet {
        let summary = record.summarize();
        tracing::info!(
            total_changes = summary.total_changes,
            "Diffed '{}' against '{}' as {}",
            config.paths.old.display(),
            config.paths.new.display(),
            descriptor.name(),
        );
    }

    let rendered = match config.output.format {
        ReportFormat::Json => JsonReporter::new()
            .pretty(!config.output.compact)
            .with_envelope(config.output.envelope)
            .generate(&record)?,
        ReportFormat::Summary => SummaryReporter::new().generate(&record),
    };

    match &config.output.file {
        Some(path) => {
            std::fs::write(path, rendered.as_bytes()).map_err(|e| DeltaError::io(path, e))?;
            if !config.behavior.quiet {
                tracing::info!("Report written to {}", path.display());
            }
        }
        None => println!("{rendered}"),
    }

    if config.behavior.fail_on_change && !record.is_empty() {
        return Ok(exit_codes::CHANGES_DETECTED);
    }
    Ok(exit_codes::SUCCESS)
}

/// Read and parse one version of the data graph.
fn read_data_graph(path: &Path) -> Result<Value> {
    let content = std::fs::read_to_string(path).map_err(|e| DeltaError::io(path, e))?;
    serde_json::from_str(&content)
        .map_err(DeltaError::from)
        .with_context(|| format!("parsing data graph {}", path.display()))
}
