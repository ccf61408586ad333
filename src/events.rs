//! Logger Lane Message Model
//!
//! The closed set of notifications delivered on the runtime's logger lane:
//! four severity-carrying log events plus the one-time initialization
//! handshake. The set is fixed, so dispatch is an exhaustive match rather
//! than open-ended handler registration.

use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};
use tokio::sync::oneshot;

/// Severity of a log event
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warning => "warning",
            LogLevel::Error => "error",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One application log line as emitted by the runtime.
///
/// `log_class` is the fully-qualified type name of the emitting component,
/// captured with `std::any::type_name`. Backend logger lookup is keyed by it
/// so output stays attributed to the original emitter, not the bridge.
#[derive(Debug, Clone, Serialize)]
pub struct LogEvent {
    pub message: String,
    pub log_source: String,
    pub log_class: &'static str,
    pub thread_id: u64,
    pub timestamp_ns: u64,
}

impl LogEvent {
    /// Create an event attributed to type `T`, stamped with the current
    /// thread and wall clock.
    pub fn new<T>(log_source: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            log_source: log_source.into(),
            log_class: std::any::type_name::<T>(),
            thread_id: current_thread_id(),
            timestamp_ns: now_ns(),
        }
    }
}

/// Numeric id of the calling thread.
///
/// `ThreadId` has no stable numeric accessor; its Debug form is
/// "ThreadId(N)". Falls back to hashing the id if that shape ever changes.
pub fn current_thread_id() -> u64 {
    let id = std::thread::current().id();
    let repr = format!("{:?}", id);
    repr.strip_prefix("ThreadId(")
        .and_then(|s| s.strip_suffix(')'))
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| {
            use std::hash::{Hash, Hasher};
            let mut hasher = std::collections::hash_map::DefaultHasher::new();
            id.hash(&mut hasher);
            hasher.finish()
        })
}

/// Current wall-clock time in nanoseconds since the Unix epoch
pub fn now_ns() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos() as u64
}

/// Acknowledgment sent back to the initialization requester exactly once
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LoggerInitialized;

/// Messages accepted on the logger lane.
///
/// Only the `Error` shape carries a cause; the others cannot, by
/// construction. `Initialize` carries its reply channel explicitly instead
/// of relying on ambient sender identity.
#[derive(Debug)]
pub enum LoggerMessage {
    Debug(Arc<LogEvent>),
    Info(Arc<LogEvent>),
    Warning(Arc<LogEvent>),
    Error(Arc<LogEvent>, Option<Arc<anyhow::Error>>),
    Initialize(oneshot::Sender<LoggerInitialized>),
}

impl LoggerMessage {
    /// Severity of the carried event, if any
    pub fn level(&self) -> Option<LogLevel> {
        match self {
            LoggerMessage::Debug(_) => Some(LogLevel::Debug),
            LoggerMessage::Info(_) => Some(LogLevel::Info),
            LoggerMessage::Warning(_) => Some(LogLevel::Warning),
            LoggerMessage::Error(_, _) => Some(LogLevel::Error),
            LoggerMessage::Initialize(_) => None,
        }
    }

    /// The carried event, if any
    pub fn event(&self) -> Option<&LogEvent> {
        match self {
            LoggerMessage::Debug(e)
            | LoggerMessage::Info(e)
            | LoggerMessage::Warning(e)
            | LoggerMessage::Error(e, _) => Some(e),
            LoggerMessage::Initialize(_) => None,
        }
    }
}
