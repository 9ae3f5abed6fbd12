//! Diagnostics Module
//!
//! Sink for the non-fatal conditions an accumulator runs into, such as a
//! `pop` with no open component. Embedders pick the sink; the default one
//! forwards to `tracing`.

use std::sync::Mutex;

/// Diagnostic level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug = 0,
    Info = 1,
    Warn = 2,
    Error = 3,
}

/// Receiver for accumulator diagnostics.
pub trait DiagnosticSink: Send + Sync {
    fn level(&self) -> LogLevel;
    fn debug(&self, msg: &str);
    fn info(&self, msg: &str);
    fn warn(&self, msg: &str);
    fn error(&self, msg: &str);
    fn is_enabled(&self, level: LogLevel) -> bool {
        level >= self.level()
    }
}

/// Forwards to the `tracing` macros; a level is enabled when the installed
/// subscriber would record it.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn level(&self) -> LogLevel {
        LogLevel::Debug
    }

    fn is_enabled(&self, level: LogLevel) -> bool {
        match level {
            LogLevel::Debug => tracing::enabled!(target: "message_accumulator", tracing::Level::DEBUG),
            LogLevel::Info => tracing::enabled!(target: "message_accumulator", tracing::Level::INFO),
            LogLevel::Warn => tracing::enabled!(target: "message_accumulator", tracing::Level::WARN),
            LogLevel::Error => tracing::enabled!(target: "message_accumulator", tracing::Level::ERROR),
        }
    }

    fn debug(&self, msg: &str) {
        tracing::debug!(target: "message_accumulator", "{}", msg);
    }

    fn info(&self, msg: &str) {
        tracing::info!(target: "message_accumulator", "{}", msg);
    }

    fn warn(&self, msg: &str) {
        tracing::warn!(target: "message_accumulator", "{}", msg);
    }

    fn error(&self, msg: &str) {
        tracing::error!(target: "message_accumulator", "{}", msg);
    }
}

/// Null sink (reports nothing).
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn level(&self) -> LogLevel {
        LogLevel::Error
    }
    fn debug(&self, _msg: &str) {}
    fn info(&self, _msg: &str) {}
    fn warn(&self, _msg: &str) {}
    fn error(&self, _msg: &str) {}
}

/// Keeps every enabled diagnostic in memory.
#[derive(Debug)]
pub struct CollectingSink {
    level: LogLevel,
    entries: Mutex<Vec<(LogLevel, String)>>,
}

impl CollectingSink {
    pub fn new(level: LogLevel) -> Self {
        CollectingSink {
            level,
            entries: Mutex::new(Vec::new()),
        }
    }

    pub fn entries(&self) -> Vec<(LogLevel, String)> {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    fn record(&self, level: LogLevel, msg: &str) {
        if self.is_enabled(level) {
            self.entries
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner())
                .push((level, msg.to_string()));
        }
    }
}

impl Default for CollectingSink {
    fn default() -> Self {
        Self::new(LogLevel::Warn)
    }
}

impl DiagnosticSink for CollectingSink {
    fn level(&self) -> LogLevel {
        self.level
    }

    fn debug(&self, msg: &str) {
        self.record(LogLevel::Debug, msg);
    }

    fn info(&self, msg: &str) {
        self.record(LogLevel::Info, msg);
    }

    fn warn(&self, msg: &str) {
        self.record(LogLevel::Warn, msg);
    }

    fn error(&self, msg: &str) {
        self.record(LogLevel::Error, msg);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collecting_sink_filters_by_level() {
        let sink = CollectingSink::new(LogLevel::Warn);
        sink.debug("hidden");
        sink.warn("shown");
        sink.error("also shown");
        assert_eq!(
            sink.entries(),
            vec![
                (LogLevel::Warn, "shown".to_string()),
                (LogLevel::Error, "also shown".to_string()),
            ]
        );
    }

    #[test]
    fn test_null_sink_level() {
        assert!(!NullSink.is_enabled(LogLevel::Warn));
        // no subscriber is installed in unit tests
        for level in [LogLevel::Debug, LogLevel::Info, LogLevel::Warn, LogLevel::Error] {
            assert!(!TracingSink.is_enabled(level), "Failed for input: {:?}", level);
        }
    }
}
