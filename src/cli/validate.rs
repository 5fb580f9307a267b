//! Validate command handler.
//!
//! Resolves a schema-definition file and reports what it declares, so
//! schema authors can catch unknown references, cycles, and missing
//! primary keys before the file reaches a diff pipeline.

use super::exit_codes;
use crate::config::ValidateConfig;
use crate::error::{ErrorContext, Result};
use crate::model::SchemaFile;

/// Run the validate command, returning the desired exit code.
///
/// Resolution failures propagate as errors; the caller maps them to
/// [`exit_codes::ERROR`].
pub fn run_validate(config: &ValidateConfig) -> Result<i32> {
    let registry = SchemaFile::from_path(&config.schema)
        .with_context(|| format!("loading schema {}", config.schema.display()))?
        .resolve()?;

    if !config.quiet {
        println!(
            "Schema {} resolved: {} type(s)",
            config.schema.display(),
            registry.len()
        );
        for (name, descriptor) in registry.iter() {
            let key = if descriptor.primary_key().is_empty() {
                "no primary key".to_string()
            } else {
                format!("primary key [{}]", descriptor.primary_key().join(", "))
            };
            println!(
                "  {name}: {} propert{}, {key}",
                descriptor.property_count(),
                if descriptor.property_count() == 1 { "y" } else { "ies" },
            );
        }
        if let Some(root) = registry.root_name() {
            println!("  root: {root}");
        }
    }

    Ok(exit_codes::SUCCESS)
}
