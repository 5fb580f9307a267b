//! **Schema-driven structural diff for audit trails.**
//!
//! `schema-delta` computes a minimal, context-preserving structural
//! difference between two versions of a schema-described data graph
//! (nested objects and arrays of objects). Unlike a line-based diff, it
//! identifies *which* nested entity changed - via a primary key declared in
//! the schema - rather than only what text changed, producing a compact
//! change record suitable for an audit trail.
//!
//! ## Core Concepts & Modules
//!
//! - **[`model`]**: The descriptor model. A [`TypeDescriptor`] declares the
//!   properties of one complex type, their kinds, and the primary key used
//!   to match array elements across versions. Descriptors are built once -
//!   by hand through [`TypeDescriptor::builder`] or from a [`SchemaFile`]
//!   document - and reused across many diff calls via a
//!   [`DescriptorRegistry`].
//! - **[`diff`]**: Home of the [`DiffEngine`], which recursively walks two
//!   versions of a data graph, reconciles arrays by primary-key identity,
//!   and projects wholly added/removed elements into self-contained
//!   snapshots. Its output is a sparse [`ChangeRecord`].
//! - **[`reports`]**: Deterministic JSON and human-readable renderings of a
//!   change record.
//! - **[`logging`]**: The [`DiffLogger`] capability the engine reports
//!   configuration faults through.
//!
//! ## Getting Started: Diffing Two Versions
//!
//! ```no_run
//! use schema_delta::{DiffEngine, SchemaFile};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let schema = SchemaFile::from_path("vehicles.schema.yaml".as_ref())?;
//!     let registry = schema.resolve()?;
//!     let root = registry.root().expect("schema declares a root type");
//!
//!     let old: serde_json::Value =
//!         serde_json::from_str(&std::fs::read_to_string("old.json")?)?;
//!     let new: serde_json::Value =
//!         serde_json::from_str(&std::fs::read_to_string("new.json")?)?;
//!
//!     let engine = DiffEngine::new();
//!     let record = engine.diff(&old, &new, &root)?;
//!
//!     if record.is_empty() {
//!         println!("No changes.");
//!     } else {
//!         println!("{}", serde_json::to_string_pretty(&record)?);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Output Shape
//!
//! The change record is sparse: only properties that actually differ appear,
//! at every nesting level. Scalar changes carry a two-sided marker using the
//! reserved tokens `-` (removed) and `+` (added); complex array elements
//! with no counterpart appear as full snapshots under those markers, and
//! matched elements that differ appear as their primary-key fields followed
//! by only the changed sub-properties:
//!
//! ```json
//! {
//!   "cars": [
//!     {"-": {"id": "car-1", "make": "Acme", "msrp": 12000}},
//!     {"+": {"id": "car-4", "make": "Bolt", "msrp": 22000}},
//!     {"id": "car-3", "msrp": {"-": 15000, "+": 16000}}
//!   ]
//! }
//! ```
//!
//! Property order is lexicographic at every level, so serialized output is
//! byte-identical across runs.
//!
//! ## Command-Line Interface (CLI)
//!
//! This documentation is for the `schema-delta` library crate. The binary of
//! the same name wires the engine to schema and data files; see the
//! project's README.

// Lint to discourage unwrap() in production code - prefer explicit error handling
#![warn(clippy::unwrap_used)]
#![allow(
    // Doc completeness: # Errors / # Panics sections are not tracked per fn
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    // Variable names like `old`/`new` or `from`/`to` are clear in context
    clippy::similar_names
)]

pub mod cli;
pub mod config;
pub mod diff;
pub mod error;
pub mod logging;
pub mod model;
pub mod reports;
mod utils;

// Re-export main types for convenience
pub use config::{BehaviorConfig, DiffConfig, DiffPaths, OutputConfig, ValidateConfig};
pub use diff::{
    ChangeRecord, DiffEngine, DiffSummary, ElementChange, ElementDelta, PropertyChange,
    ScalarChange, SetChange, ADDED_MARKER, REMOVED_MARKER,
};
pub use error::{DeltaError, DiffErrorKind, ErrorContext, OptionContext, Result, SchemaErrorKind};
pub use logging::{CollectingLogger, DiffLogger, LogEntry, LogLevel, TracingLogger};
pub use model::{
    DescriptorRegistry, PropertyDescriptor, PropertyKind, SchemaFile, TypeDescriptor,
    TypeDescriptorBuilder,
};
pub use reports::{JsonReporter, ReportFormat, SummaryReporter};
