//! Log Bridge Actor
//!
//! Receives the runtime's log notifications and forwards each one to the
//! configured backend. Recognized messages: `Debug`, `Info`, `Warning`,
//! `Error`, and the one-time `Initialize` handshake; the enum is closed so
//! nothing else can arrive.
//!
//! Around every forwarded call the bridge installs the four ambient context
//! attributes (`akkaSource`, `sourceThread`, `akkaTimestamp`,
//! `sourceActorSystem`) and removes them again on every exit path. Backend
//! failures are not caught here; after the context guard has cleared, the
//! error propagates to the hosting loop.

use crate::actor::ActorBehavior;
use crate::backend::{BackendLogger, LogBackend};
use crate::error::Result;
use crate::events::{LogEvent, LoggerInitialized, LoggerMessage};
use crate::mdc::{self, ScopedMdc};
use async_trait::async_trait;
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Handle onto the owning actor system.
///
/// The system name is read fresh on every forwarded event, not cached at
/// bridge construction, so a rename is visible to the very next log call.
#[derive(Debug, Clone)]
pub struct SystemHandle {
    system_id: String,
    name: Arc<RwLock<String>>,
}

impl SystemHandle {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            system_id: format!("system-{}", Uuid::new_v4()),
            name: Arc::new(RwLock::new(name.into())),
        }
    }

    /// Current system name
    pub fn name(&self) -> String {
        self.name.read().clone()
    }

    /// Rename the system; subsequent log calls carry the new name
    pub fn rename(&self, name: impl Into<String>) {
        *self.name.write() = name.into();
    }

    /// Unique system id for diagnostics
    pub fn system_id(&self) -> &str {
        &self.system_id
    }
}

/// The adapter between the logger lane and the backend
pub struct LogBridge {
    backend: Arc<dyn LogBackend>,
    system: SystemHandle,
}

impl LogBridge {
    pub fn new(backend: Arc<dyn LogBackend>, system: SystemHandle) -> Self {
        Self { backend, system }
    }

    /// Look up the logger for the event's log class, run `call` with the
    /// ambient context installed, and clear the context again.
    ///
    /// The guard's `Drop` is what guarantees removal when `call` fails.
    fn forward<F>(&self, event: &LogEvent, call: F) -> Result<()>
    where
        F: FnOnce(&dyn BackendLogger) -> Result<()>,
    {
        let logger = self.backend.logger(event.log_class);

        let _guard = ScopedMdc::install([
            (mdc::AKKA_SOURCE, event.log_source.clone()),
            (mdc::SOURCE_THREAD, event.thread_id.to_string()),
            (mdc::AKKA_TIMESTAMP, event.timestamp_ns.to_string()),
            (mdc::SOURCE_ACTOR_SYSTEM, self.system.name()),
        ]);

        call(logger.as_ref())
    }
}

#[async_trait]
impl ActorBehavior for LogBridge {
    type Message = LoggerMessage;

    async fn handle(&mut self, msg: LoggerMessage) -> Result<()> {
        match msg {
            LoggerMessage::Error(event, cause) => {
                self.forward(&event, |logger| logger.error(&event.message, cause.as_deref()))
            }
            LoggerMessage::Warning(event) => {
                self.forward(&event, |logger| logger.warn(&event.message))
            }
            LoggerMessage::Info(event) => {
                self.forward(&event, |logger| logger.info(&event.message))
            }
            LoggerMessage::Debug(event) => {
                self.forward(&event, |logger| logger.debug(&event.message))
            }
            LoggerMessage::Initialize(reply) => {
                info!(system_id = %self.system.system_id(), "LogBridge started");
                if reply.send(LoggerInitialized).is_err() {
                    // The requester going away is not a bridge failure.
                    warn!(
                        system_id = %self.system.system_id(),
                        "initialization requester dropped its reply channel"
                    );
                }
                Ok(())
            }
        }
    }

    async fn on_start(&mut self) -> Result<()> {
        debug!(
            system_id = %self.system.system_id(),
            system_name = %self.system.name(),
            "LogBridge attached to logger lane"
        );
        Ok(())
    }
}
