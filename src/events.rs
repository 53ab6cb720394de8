//! Structured sync event output.
//!
//! Sync progress is reported through an [`EventSink`] passed in at
//! construction rather than a global logger, so callers can capture or
//! redirect events. The default [`JsonEventSink`] emits one NDJSON line
//! per event for CI and log-pipeline consumption.

use std::io::{self, Write};
use std::sync::Mutex;

use chrono::Utc;

/// Structured sink for sync events.
///
/// `key` is a dotted event identifier (e.g. `sync.templates.create`) and
/// `fields` a flat set of contextual values.
pub trait EventSink: Send + Sync {
    /// Report normal progress.
    fn info(&self, key: &str, fields: &[(&str, String)]);

    /// Report a failure.
    fn error(&self, key: &str, fields: &[(&str, String)]);
}

/// Event sink that writes one JSON line per event.
pub struct JsonEventSink {
    /// Mutex to ensure thread-safe writes
    writer: Mutex<Box<dyn Write + Send>>,
    errors_only: bool,
}

impl JsonEventSink {
    /// Create a sink writing to stdout.
    pub fn stdout() -> Self {
        Self {
            writer: Mutex::new(Box::new(io::stdout())),
            errors_only: false,
        }
    }

    /// Create a stdout sink that suppresses info events.
    pub fn errors_only() -> Self {
        Self {
            writer: Mutex::new(Box::new(io::stdout())),
            errors_only: true,
        }
    }

    /// Create a sink writing to a custom writer (for testing).
    pub fn with_writer<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            writer: Mutex::new(Box::new(writer)),
            errors_only: false,
        }
    }

    fn write_line(&self, level: &str, key: &str, fields: &[(&str, String)]) {
        let mut line = serde_json::Map::new();
        line.insert("level".to_string(), level.into());
        line.insert("ts".to_string(), Utc::now().to_rfc3339().into());
        line.insert("key".to_string(), key.into());
        for (field, value) in fields {
            line.insert((*field).to_string(), value.clone().into());
        }

        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", serde_json::Value::Object(line));
            let _ = writer.flush();
        }
    }
}

impl EventSink for JsonEventSink {
    fn info(&self, key: &str, fields: &[(&str, String)]) {
        if !self.errors_only {
            self.write_line("INFO", key, fields);
        }
    }

    fn error(&self, key: &str, fields: &[(&str, String)]) {
        self.write_line("ERROR", key, fields);
    }
}

/// Sink that discards all events.
pub struct NullEventSink;

impl EventSink for NullEventSink {
    fn info(&self, _key: &str, _fields: &[(&str, String)]) {}
    fn error(&self, _key: &str, _fields: &[(&str, String)]) {}
}
