//! Actor Runtime Log Bridge
//!
//! Forwards log events from an actor runtime's dedicated logger lane to an
//! external, pluggable logging backend. The bridge recognizes four severity
//! events plus the one-time initialization handshake, and attaches four
//! ambient context attributes around every backend call.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────┐    ┌───────────────┐    ┌──────────────────┐
//! │  Runtime logger  │    │   LogBridge   │    │   LogBackend     │
//! │  lane (mpsc)     │───▶│   exhaustive  │───▶│   per-log-class  │
//! │  non-blocking    │    │   match +     │    │   logger lookup  │
//! │  sequential      │    │   scoped MDC  │    │   (tracing/JSON) │
//! └──────────────────┘    └───────────────┘    └──────────────────┘
//! ```
//!
//! Context attributes (`akkaSource`, `sourceThread`, `akkaTimestamp`,
//! `sourceActorSystem`) are installed thread-locally before the backend call
//! and removed on every exit path via an RAII guard.
//!
//! # Examples
//!
//! ```rust,no_run
//! use logging_bridge::{spawn_logger, LogBridge, LogEvent, LoggerMessage, SystemHandle, TracingBackend};
//! use std::sync::Arc;
//!
//! # async fn demo() -> logging_bridge::Result<()> {
//! struct Worker;
//!
//! let bridge = LogBridge::new(Arc::new(TracingBackend::new()), SystemHandle::new("app"));
//! let (logger, _task) = spawn_logger(bridge);
//!
//! logger.initialize().await?;
//! logger.tell(LoggerMessage::Info(Arc::new(LogEvent::new::<Worker>(
//!     "Worker#1",
//!     "starting up",
//! ))))?;
//! # Ok(())
//! # }
//! ```

pub mod actor;
pub mod backend;
pub mod bridge;
pub mod error;
pub mod events;
pub mod mdc;

pub use actor::{spawn_logger, ActorBehavior, LoggerRef, SupervisorDirective};
pub use backend::{BackendLogger, JsonBackend, LogBackend, TracingBackend};
pub use bridge::{LogBridge, SystemHandle};
pub use error::{BridgeError, Result};
pub use events::{LogEvent, LogLevel, LoggerInitialized, LoggerMessage};
