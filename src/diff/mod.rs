//! Schema-driven diff engine for nested data graphs.
//!
//! The engine walks two versions of a data graph property by property under
//! a [`TypeDescriptor`](crate::model::TypeDescriptor), reconciles complex
//! arrays by primary-key identity instead of position, and projects
//! one-sided elements into self-contained snapshots. The output is a sparse
//! [`ChangeRecord`] suitable for an audit trail.
//!
//! # Example
//!
//! ```ignore
//! use schema_delta::{DiffEngine, SchemaFile};
//!
//! let registry = SchemaFile::from_yaml_str(schema_yaml)?.resolve()?;
//! let root = registry.root().expect("schema declares a root");
//!
//! let engine = DiffEngine::new();
//! let record = engine.diff(&old_graph, &new_graph, &root)?;
//! if !record.is_empty() {
//!     println!("{}", serde_json::to_string_pretty(&record)?);
//! }
//! ```

mod engine;
mod reconcile;
mod result;
mod snapshot;

pub use engine::DiffEngine;
pub use result::{
    ChangeRecord, DiffSummary, ElementChange, ElementDelta, PropertyChange, ScalarChange,
    SetChange, ADDED_MARKER, REMOVED_MARKER,
};
