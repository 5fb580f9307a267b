//! Logger collaborator for the diff engine.
//!
//! The engine reports configuration faults through a capability trait
//! instead of a concrete sink, so callers can route diagnostics into their
//! own audit pipeline. The engine itself only ever calls [`DiffLogger::error`];
//! the remaining methods exist for callers sharing the same sink.

use std::sync::Mutex;

/// Severity of a captured log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Log,
    Error,
    Warn,
    Debug,
    Verbose,
}

/// A single captured log entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub level: LogLevel,
    pub message: String,
}

/// Capability set the engine logs through.
///
/// `debug` and `verbose` default to no-ops; most sinks only care about the
/// first three.
pub trait DiffLogger: Send + Sync {
    fn log(&self, message: &str);
    fn error(&self, message: &str);
    fn warn(&self, message: &str);
    fn debug(&self, _message: &str) {}
    fn verbose(&self, _message: &str) {}
}

/// Default logger routing to the `tracing` ecosystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl DiffLogger for TracingLogger {
    fn log(&self, message: &str) {
        tracing::info!("{message}");
    }

    fn error(&self, message: &str) {
        tracing::error!("{message}");
    }

    fn warn(&self, message: &str) {
        tracing::warn!("{message}");
    }

    fn debug(&self, message: &str) {
        tracing::debug!("{message}");
    }

    fn verbose(&self, message: &str) {
        tracing::trace!("{message}");
    }
}

/// Logger that captures entries in memory.
///
/// Useful in tests and for callers that attach engine diagnostics to the
/// audit record itself.
#[derive(Debug, Default)]
pub struct CollectingLogger {
    entries: Mutex<Vec<LogEntry>>,
}

impl CollectingLogger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all captured entries, in order.
    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }

    /// Messages captured at error level, in order.
    pub fn errors(&self) -> Vec<String> {
        self.entries()
            .into_iter()
            .filter(|e| e.level == LogLevel::Error)
            .map(|e| e.message)
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }

    fn push(&self, level: LogLevel, message: &str) {
        if let Ok(mut guard) = self.entries.lock() {
            guard.push(LogEntry {
                level,
                message: message.to_string(),
            });
        }
    }
}

impl DiffLogger for CollectingLogger {
    fn log(&self, message: &str) {
        self.push(LogLevel::Log, message);
    }

    fn error(&self, message: &str) {
        self.push(LogLevel::Error, message);
    }

    fn warn(&self, message: &str) {
        self.push(LogLevel::Warn, message);
    }

    fn debug(&self, message: &str) {
        self.push(LogLevel::Debug, message);
    }

    fn verbose(&self, message: &str) {
        self.push(LogLevel::Verbose, message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collecting_logger_captures_in_order() {
        let logger = CollectingLogger::new();
        logger.warn("first");
        logger.error("second");
        logger.log("third");

        let entries = logger.entries();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].level, LogLevel::Warn);
        assert_eq!(entries[1].message, "second");
        assert_eq!(logger.errors(), vec!["second".to_string()]);
    }

    #[test]
    fn test_default_debug_is_noop() {
        struct Minimal;
        impl DiffLogger for Minimal {
            fn log(&self, _: &str) {}
            fn error(&self, _: &str) {}
            fn warn(&self, _: &str) {}
        }
        Minimal.debug("ignored");
        Minimal.verbose("ignored");
    }
}
