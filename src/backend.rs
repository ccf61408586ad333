//! Pluggable Logging Backend
//!
//! The seam between the bridge and whatever performs actual log output.
//! Logger instances are looked up by name — the bridge passes the emitting
//! component's fully-qualified type name, never a constant adapter name — and
//! each instance exposes one call per severity. Calls are synchronous; a
//! failing call surfaces as [`BridgeError::Backend`] and is never swallowed
//! here.
//!
//! Two implementations ship with the crate: [`TracingBackend`] over the
//! `tracing` facade, and [`JsonBackend`] writing line-delimited JSON records
//! to any `Write` sink.

use crate::error::{BridgeError, Result};
use crate::events::LogLevel;
use crate::mdc;
use parking_lot::{Mutex, RwLock};
use serde::Serialize;
use std::collections::HashMap;
use std::io::Write;
use std::sync::Arc;

/// Factory for named backend loggers
pub trait LogBackend: Send + Sync {
    /// Get or create the logger keyed by `name`
    fn logger(&self, name: &str) -> Arc<dyn BackendLogger>;
}

/// One named logger inside a backend
pub trait BackendLogger: Send + Sync {
    /// Name the logger was looked up under
    fn name(&self) -> &str;

    fn debug(&self, message: &str) -> Result<()>;
    fn info(&self, message: &str) -> Result<()>;
    fn warn(&self, message: &str) -> Result<()>;

    /// Error-level log; `cause` is passed through from the event unchanged
    fn error(&self, message: &str, cause: Option<&anyhow::Error>) -> Result<()>;
}

/// Backend over the `tracing` facade.
///
/// Emits one structured event per call, carrying the logger name and the
/// four ambient context attributes as fields. Logger instances are cached
/// per name.
#[derive(Default)]
pub struct TracingBackend {
    loggers: RwLock<HashMap<String, Arc<TracingLogger>>>,
}

impl TracingBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LogBackend for TracingBackend {
    fn logger(&self, name: &str) -> Arc<dyn BackendLogger> {
        if let Some(logger) = self.loggers.read().get(name) {
            return logger.clone();
        }
        let mut loggers = self.loggers.write();
        loggers
            .entry(name.to_string())
            .or_insert_with(|| Arc::new(TracingLogger { name: name.to_string() }))
            .clone()
    }
}

struct TracingLogger {
    name: String,
}

impl TracingLogger {
    fn emit(&self, level: LogLevel, message: &str, cause: Option<&anyhow::Error>) {
        let source = mdc::get(mdc::AKKA_SOURCE).unwrap_or_default();
        let thread = mdc::get(mdc::SOURCE_THREAD).unwrap_or_default();
        let timestamp = mdc::get(mdc::AKKA_TIMESTAMP).unwrap_or_default();
        let system = mdc::get(mdc::SOURCE_ACTOR_SYSTEM).unwrap_or_default();

        // Level argument to tracing macros must be const, so one arm per level.
        match (level, cause) {
            (LogLevel::Debug, _) => tracing::debug!(
                logger = %self.name,
                akka_source = %source,
                source_thread = %thread,
                akka_timestamp = %timestamp,
                source_actor_system = %system,
                "{}",
                message
            ),
            (LogLevel::Info, _) => tracing::info!(
                logger = %self.name,
                akka_source = %source,
                source_thread = %thread,
                akka_timestamp = %timestamp,
                source_actor_system = %system,
                "{}",
                message
            ),
            (LogLevel::Warning, _) => tracing::warn!(
                logger = %self.name,
                akka_source = %source,
                source_thread = %thread,
                akka_timestamp = %timestamp,
                source_actor_system = %system,
                "{}",
                message
            ),
            (LogLevel::Error, Some(cause)) => tracing::error!(
                logger = %self.name,
                akka_source = %source,
                source_thread = %thread,
                akka_timestamp = %timestamp,
                source_actor_system = %system,
                cause = %cause,
                "{}",
                message
            ),
            (LogLevel::Error, None) => tracing::error!(
                logger = %self.name,
                akka_source = %source,
                source_thread = %thread,
                akka_timestamp = %timestamp,
                source_actor_system = %system,
                "{}",
                message
            ),
        }
    }
}

impl BackendLogger for TracingLogger {
    fn name(&self) -> &str {
        &self.name
    }

    fn debug(&self, message: &str) -> Result<()> {
        self.emit(LogLevel::Debug, message, None);
        Ok(())
    }

    fn info(&self, message: &str) -> Result<()> {
        self.emit(LogLevel::Info, message, None);
        Ok(())
    }

    fn warn(&self, message: &str) -> Result<()> {
        self.emit(LogLevel::Warning, message, None);
        Ok(())
    }

    fn error(&self, message: &str, cause: Option<&anyhow::Error>) -> Result<()> {
        self.emit(LogLevel::Error, message, cause);
        Ok(())
    }
}

/// One line-delimited JSON record
#[derive(Serialize)]
struct JsonRecord<'a> {
    level: LogLevel,
    logger: &'a str,
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    cause: Option<String>,
    context: HashMap<&'static str, String>,
}

/// Backend writing one JSON object per line to a shared `Write` sink.
///
/// Records carry the full ambient context snapshot taken at call time, so
/// downstream tooling sees the same four attributes a structured subscriber
/// would.
pub struct JsonBackend<W: Write + Send + 'static> {
    sink: Arc<Mutex<W>>,
    loggers: RwLock<HashMap<String, Arc<JsonLogger<W>>>>,
}

impl<W: Write + Send + 'static> JsonBackend<W> {
    pub fn new(sink: W) -> Self {
        Self {
            sink: Arc::new(Mutex::new(sink)),
            loggers: RwLock::new(HashMap::new()),
        }
    }
}

impl<W: Write + Send + 'static> LogBackend for JsonBackend<W> {
    fn logger(&self, name: &str) -> Arc<dyn BackendLogger> {
        if let Some(logger) = self.loggers.read().get(name) {
            return logger.clone();
        }
        let mut loggers = self.loggers.write();
        loggers
            .entry(name.to_string())
            .or_insert_with(|| {
                Arc::new(JsonLogger {
                    name: name.to_string(),
                    sink: Arc::clone(&self.sink),
                })
            })
            .clone()
    }
}

struct JsonLogger<W: Write + Send + 'static> {
    name: String,
    sink: Arc<Mutex<W>>,
}

impl<W: Write + Send + 'static> JsonLogger<W> {
    fn write(&self, level: LogLevel, message: &str, cause: Option<&anyhow::Error>) -> Result<()> {
        let record = JsonRecord {
            level,
            logger: &self.name,
            message,
            cause: cause.map(|c| format!("{:#}", c)),
            context: mdc::snapshot(),
        };
        let line = serde_json::to_string(&record)
            .map_err(|e| BridgeError::backend_with_source(&self.name, "serialization failed", e))?;

        let mut sink = self.sink.lock();
        writeln!(sink, "{}", line)
            .and_then(|_| sink.flush())
            .map_err(|e| BridgeError::backend_with_source(&self.name, "sink write failed", e))
    }
}

impl<W: Write + Send + 'static> BackendLogger for JsonLogger<W> {
    fn name(&self) -> &str {
        &self.name
    }

    fn debug(&self, message: &str) -> Result<()> {
        self.write(LogLevel::Debug, message, None)
    }

    fn info(&self, message: &str) -> Result<()> {
        self.write(LogLevel::Info, message, None)
    }

    fn warn(&self, message: &str) -> Result<()> {
        self.write(LogLevel::Warning, message, None)
    }

    fn error(&self, message: &str, cause: Option<&anyhow::Error>) -> Result<()> {
        self.write(LogLevel::Error, message, cause)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mdc::ScopedMdc;

    /// Cloneable in-memory sink for inspecting backend output
    #[derive(Clone, Default)]
    struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl SharedBuf {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().clone()).unwrap()
        }
    }

    impl Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_tracing_backend_caches_loggers_by_name() {
        let backend = TracingBackend::new();
        let a = backend.logger("app::Worker");
        let b = backend.logger("app::Worker");
        let c = backend.logger("app::Supervisor");

        assert!(Arc::ptr_eq(&a, &b));
        assert!(!Arc::ptr_eq(&a, &c));
        assert_eq!(c.name(), "app::Supervisor");
    }

    #[test]
    fn test_json_backend_writes_record_with_context() {
        let buf = SharedBuf::default();
        let backend = JsonBackend::new(buf.clone());
        let logger = backend.logger("app::Worker");

        let _guard = ScopedMdc::install([
            (mdc::AKKA_SOURCE, "Worker#1".to_string()),
            (mdc::SOURCE_THREAD, "7".to_string()),
        ]);
        logger.info("starting up").unwrap();

        let record: serde_json::Value = serde_json::from_str(buf.contents().trim()).unwrap();
        assert_eq!(record["level"], "info");
        assert_eq!(record["logger"], "app::Worker");
        assert_eq!(record["message"], "starting up");
        assert_eq!(record["context"]["akkaSource"], "Worker#1");
        assert_eq!(record["context"]["sourceThread"], "7");
        assert!(record.get("cause").is_none());
    }

    #[test]
    fn test_json_backend_serializes_cause_chain() {
        let buf = SharedBuf::default();
        let backend = JsonBackend::new(buf.clone());
        let logger = backend.logger("app::Worker");

        let cause = anyhow::anyhow!("connection refused").context("flush failed");
        logger.error("write aborted", Some(&cause)).unwrap();

        let record: serde_json::Value = serde_json::from_str(buf.contents().trim()).unwrap();
        assert_eq!(record["level"], "error");
        let cause_text = record["cause"].as_str().unwrap();
        assert!(cause_text.contains("flush failed"));
        assert!(cause_text.contains("connection refused"));
    }

    #[test]
    fn test_json_backend_one_line_per_call() {
        let buf = SharedBuf::default();
        let backend = JsonBackend::new(buf.clone());
        let logger = backend.logger("app::Worker");

        logger.debug("one").unwrap();
        logger.warn("two").unwrap();

        let contents = buf.contents();
        assert_eq!(contents.lines().count(), 2);
    }
}
