//! JSON report generator.

use crate::diff::ChangeRecord;
use crate::error::{DeltaError, ReportErrorKind, Result};
use serde_json::json;

/// JSON report generator.
///
/// By default renders the raw change record. With the envelope enabled the
/// record is wrapped with tool identification and summary counts, the shape
/// typically stored in an audit trail. Output carries no timestamps, so
/// identical inputs serialize byte-identically.
pub struct JsonReporter {
    /// Pretty print output
    pretty: bool,
    /// Wrap the record in an audit envelope
    envelope: bool,
}

impl JsonReporter {
    /// Create a new JSON reporter
    #[must_use]
    pub const fn new() -> Self {
        Self {
            pretty: true,
            envelope: false,
        }
    }

    /// Set pretty printing
    #[must_use]
    pub const fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Wrap the record in an audit envelope with summary counts
    #[must_use]
    pub const fn with_envelope(mut self, envelope: bool) -> Self {
        self.envelope = envelope;
        self
    }

    /// Render the change record as JSON.
    pub fn generate(&self, record: &ChangeRecord) -> Result<String> {
        let value = if self.envelope {
            json!({
                "tool": {
                    "name": env!("CARGO_PKG_NAME"),
                    "version": env!("CARGO_PKG_VERSION"),
                },
                "summary": record.summarize(),
                "changes": record.to_value(),
            })
        } else {
            record.to_value()
        };

        let rendered = if self.pretty {
            serde_json::to_string_pretty(&value)
        } else {
            serde_json::to_string(&value)
        };
        rendered.map_err(|e| {
            DeltaError::report(
                "serializing change record",
                ReportErrorKind::JsonSerializationError(e.to_string()),
            )
        })
    }
}

impl Default for JsonReporter {
    fn default() -> Self {
        Self::new()
    }
}
