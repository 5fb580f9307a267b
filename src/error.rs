//! Unified error types for schema-delta.
//!
//! This module provides the error hierarchy for the library, with rich
//! context for debugging and user-friendly messages. The taxonomy follows
//! the engine's fault model: schema errors (a descriptor definition is
//! malformed), diff errors (input data violates the shape the schema
//! promises, or an internal invariant broke), and report errors.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for schema-delta operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum DeltaError {
    /// Errors while loading or resolving schema definitions
    #[error("Schema definition error: {context}")]
    Schema {
        context: String,
        #[source]
        source: SchemaErrorKind,
    },

    /// Errors during diff computation
    #[error("Diff computation failed: {context}")]
    Diff {
        context: String,
        #[source]
        source: DiffErrorKind,
    },

    /// Errors during report generation
    #[error("Report generation failed: {context}")]
    Report {
        context: String,
        #[source]
        source: ReportErrorKind,
    },

    /// IO errors with context
    #[error("IO error at {path:?}: {message}")]
    Io {
        path: Option<PathBuf>,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration errors
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Validation errors
    #[error("Validation failed: {0}")]
    Validation(String),
}

/// Specific schema error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum SchemaErrorKind {
    #[error("Invalid schema document: {0}")]
    InvalidDocument(String),

    #[error("Unknown type '{name}' referenced by '{referrer}'")]
    UnknownType { name: String, referrer: String },

    #[error("Cyclic type graph involving: {names}")]
    CyclicTypes { names: String },

    #[error("Type '{type_name}' is used as an array element but declares no primary key")]
    MissingPrimaryKey { type_name: String },

    #[error("Primary key '{key}' of type '{type_name}' is not a declared property")]
    UnknownPrimaryKeyProperty { type_name: String, key: String },

    #[error("Primary key '{key}' of type '{type_name}' must be a primitive property")]
    ComplexPrimaryKeyProperty { type_name: String, key: String },

    #[error("Property name '{name}' on type '{type_name}' is reserved or empty")]
    InvalidPropertyName { type_name: String, name: String },

    #[error("Duplicate property '{name}' on type '{type_name}'")]
    DuplicateProperty { type_name: String, name: String },

    #[error("No root type declared - set 'root' in the schema or pass one explicitly")]
    NoRootType,
}

/// Specific diff error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum DiffErrorKind {
    #[error("Complex property '{path}' must be an array on both sides or nil on both: {detail}")]
    UnsupportedShape { path: String, detail: String },

    #[error("Duplicate primary key '{key}' within array at '{path}'")]
    DuplicateKey { path: String, key: String },

    #[error("Recursion depth limit of {limit} exceeded")]
    DepthExceeded { limit: usize },

    #[error("Internal invariant violated: matched key '{key}' not found at '{path}'")]
    MatchLookupFailed { path: String, key: String },
}

/// Specific report error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ReportErrorKind {
    #[error("JSON serialization failed: {0}")]
    JsonSerializationError(String),
}

// ============================================================================
// Result type alias
// ============================================================================

/// Convenient Result type for schema-delta operations
pub type Result<T> = std::result::Result<T, DeltaError>;

// ============================================================================
// Error construction helpers
// ============================================================================

impl DeltaError {
    /// Create a schema error with context
    pub fn schema(context: impl Into<String>, source: SchemaErrorKind) -> Self {
        Self::Schema {
            context: context.into(),
            source,
        }
    }

    /// Create a diff error with context
    pub fn diff(context: impl Into<String>, source: DiffErrorKind) -> Self {
        Self::Diff {
            context: context.into(),
            source,
        }
    }

    /// Create a report error with context
    pub fn report(context: impl Into<String>, source: ReportErrorKind) -> Self {
        Self::Report {
            context: context.into(),
            source,
        }
    }

    /// Create an IO error with path context
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        let message = format!("{source}");
        Self::Io {
            path: Some(path),
            message,
            source,
        }
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// True when this error is a data-shape fault in the diffed input,
    /// as opposed to a malformed schema or an internal bug.
    pub fn is_data_error(&self) -> bool {
        matches!(
            self,
            Self::Diff {
                source: DiffErrorKind::UnsupportedShape { .. } | DiffErrorKind::DuplicateKey { .. },
                ..
            }
        )
    }
}

// ============================================================================
// Conversions from existing error types
// ============================================================================

impl From<std::io::Error> for DeltaError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            path: None,
            message: format!("{err}"),
            source: err,
        }
    }
}

impl From<serde_json::Error> for DeltaError {
    fn from(err: serde_json::Error) -> Self {
        Self::schema(
            "JSON deserialization",
            SchemaErrorKind::InvalidDocument(err.to_string()),
        )
    }
}

impl From<serde_yaml::Error> for DeltaError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::schema(
            "YAML deserialization",
            SchemaErrorKind::InvalidDocument(err.to_string()),
        )
    }
}

// ============================================================================
// Error context extension trait
// ============================================================================

/// Extension trait for adding context to errors.
///
/// The context string is prepended to the error's existing context,
/// creating a chain that shows the path through the code.
pub trait ErrorContext<T> {
    /// Add context to an error.
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context from a closure (lazy evaluation).
    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>;
}

impl<T, E: Into<DeltaError>> ErrorContext<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        let ctx: String = context.into();
        self.map_err(|e| add_context_to_error(e.into(), &ctx))
    }

    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>,
    {
        self.map_err(|e| {
            let ctx: String = f().into();
            add_context_to_error(e.into(), &ctx)
        })
    }
}

/// Add context to an error, chaining with any existing context.
fn add_context_to_error(err: DeltaError, new_ctx: &str) -> DeltaError {
    match err {
        DeltaError::Schema {
            context: existing,
            source,
        } => DeltaError::Schema {
            context: chain_context(new_ctx, &existing),
            source,
        },
        DeltaError::Diff {
            context: existing,
            source,
        } => DeltaError::Diff {
            context: chain_context(new_ctx, &existing),
            source,
        },
        DeltaError::Report {
            context: existing,
            source,
        } => DeltaError::Report {
            context: chain_context(new_ctx, &existing),
            source,
        },
        DeltaError::Io {
            path,
            message,
            source,
        } => DeltaError::Io {
            path,
            message: chain_context(new_ctx, &message),
            source,
        },
        DeltaError::Config(msg) => DeltaError::Config(chain_context(new_ctx, &msg)),
        DeltaError::Validation(msg) => DeltaError::Validation(chain_context(new_ctx, &msg)),
    }
}

/// Chain two context strings together.
fn chain_context(new: &str, existing: &str) -> String {
    if existing.is_empty() {
        new.to_string()
    } else {
        format!("{new}: {existing}")
    }
}

/// Extension trait for Option types to convert to errors with context.
pub trait OptionContext<T> {
    /// Convert None to an error with the given context.
    fn context_none(self, context: impl Into<String>) -> Result<T>;

    /// Convert None to an error with context from a closure.
    fn with_context_none<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>;
}

impl<T> OptionContext<T> for Option<T> {
    fn context_none(self, context: impl Into<String>) -> Result<T> {
        self.ok_or_else(|| DeltaError::Validation(context.into()))
    }

    fn with_context_none<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>,
    {
        self.ok_or_else(|| DeltaError::Validation(f().into()))
    }
}
