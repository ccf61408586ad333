//! Logger Lane Hosting
//!
//! Minimal runtime surface for hosting the bridge: a behavior trait, a
//! dedicated non-blocking mailbox, and one task draining it strictly
//! sequentially. Senders never block on logging — the lane is unbounded —
//! and the drain task never processes two messages concurrently, so the
//! ambient context for one message cannot interleave with another.
//!
//! Shutdown follows channel closure: dropping every [`LoggerRef`] ends the
//! loop after the remaining messages have been handled.

use crate::error::{BridgeError, Result};
use crate::events::{LoggerInitialized, LoggerMessage};
use async_trait::async_trait;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, error, warn};

/// Trait for message-handling behavior hosted on the logger lane
#[async_trait]
pub trait ActorBehavior: Send + 'static {
    type Message: Send + 'static;

    /// Handle one incoming message
    async fn handle(&mut self, msg: Self::Message) -> Result<()>;

    /// Called once before the first message
    async fn on_start(&mut self) -> Result<()> {
        Ok(())
    }

    /// Called after the mailbox has drained
    async fn on_stop(&mut self) -> Result<()> {
        Ok(())
    }

    /// Handle failure - return supervision directive
    async fn on_error(&mut self, error: &BridgeError) -> SupervisorDirective {
        error!(
            error = %error,
            category = error.category(),
            "logger message processing failed"
        );
        SupervisorDirective::Resume
    }
}

/// Supervision directive for handler errors.
///
/// The logger lane never restarts itself; richer policies belong to the
/// host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SupervisorDirective {
    /// Keep draining the mailbox
    Resume,
    /// Stop the lane
    Stop,
}

/// Cloneable sender half of the logger lane
#[derive(Debug, Clone)]
pub struct LoggerRef {
    tx: mpsc::UnboundedSender<LoggerMessage>,
}

impl LoggerRef {
    /// Enqueue a message without blocking
    pub fn tell(&self, msg: LoggerMessage) -> Result<()> {
        self.tx
            .send(msg)
            .map_err(|_| BridgeError::channel("logger mailbox closed"))
    }

    /// Run the initialization handshake and await the acknowledgment
    pub async fn initialize(&self) -> Result<LoggerInitialized> {
        let (tx, rx) = oneshot::channel();
        self.tell(LoggerMessage::Initialize(tx))?;
        rx.await
            .map_err(|_| BridgeError::handshake("logger stopped before acknowledging initialization"))
    }
}

/// Spawn a behavior onto its own logger lane.
///
/// Returns the sender handle and the drain task's join handle.
pub fn spawn_logger<A>(behavior: A) -> (LoggerRef, JoinHandle<()>)
where
    A: ActorBehavior<Message = LoggerMessage>,
{
    let (tx, rx) = mpsc::unbounded_channel();
    let handle = tokio::spawn(run(behavior, rx));
    (LoggerRef { tx }, handle)
}

async fn run<A>(mut behavior: A, mut rx: mpsc::UnboundedReceiver<LoggerMessage>)
where
    A: ActorBehavior<Message = LoggerMessage>,
{
    if let Err(e) = behavior.on_start().await {
        error!(error = %e, "logger actor failed to start");
        return;
    }

    debug!("logger actor entering message loop");

    while let Some(msg) = rx.recv().await {
        if let Err(e) = behavior.handle(msg).await {
            match behavior.on_error(&e).await {
                SupervisorDirective::Resume => continue,
                SupervisorDirective::Stop => {
                    warn!(error = %e, directive = "Stop", "stopping logger lane after error");
                    break;
                }
            }
        }
    }

    if let Err(e) = behavior.on_stop().await {
        error!(error = %e, "logger actor failed to stop cleanly");
    } else {
        debug!("logger actor stopped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::LogEvent;
    use parking_lot::Mutex;
    use std::sync::Arc;

    struct Worker;

    /// Behavior that records event messages in arrival order
    struct Recorder {
        seen: Arc<Mutex<Vec<String>>>,
        fail_on: Option<String>,
        directive: SupervisorDirective,
    }

    #[async_trait]
    impl ActorBehavior for Recorder {
        type Message = LoggerMessage;

        async fn handle(&mut self, msg: LoggerMessage) -> Result<()> {
            match msg {
                LoggerMessage::Initialize(reply) => {
                    let _ = reply.send(LoggerInitialized);
                    Ok(())
                }
                other => {
                    let text = other.event().map(|e| e.message.clone()).unwrap_or_default();
                    self.seen.lock().push(text.clone());
                    if self.fail_on.as_deref() == Some(text.as_str()) {
                        return Err(BridgeError::backend("test", "injected"));
                    }
                    Ok(())
                }
            }
        }

        async fn on_error(&mut self, _error: &BridgeError) -> SupervisorDirective {
            self.directive
        }
    }

    fn info_msg(text: &str) -> LoggerMessage {
        LoggerMessage::Info(Arc::new(LogEvent::new::<Worker>("Worker#1", text)))
    }

    #[tokio::test]
    async fn test_messages_delivered_in_order() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let (logger, handle) = spawn_logger(Recorder {
            seen: seen.clone(),
            fail_on: None,
            directive: SupervisorDirective::Resume,
        });

        logger.initialize().await.unwrap();
        for text in ["one", "two", "three"] {
            logger.tell(info_msg(text)).unwrap();
        }
        drop(logger);
        handle.await.unwrap();

        assert_eq!(*seen.lock(), vec!["one", "two", "three"]);
    }

    #[tokio::test]
    async fn test_resume_directive_keeps_lane_alive() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let (logger, handle) = spawn_logger(Recorder {
            seen: seen.clone(),
            fail_on: Some("bad".to_string()),
            directive: SupervisorDirective::Resume,
        });

        logger.tell(info_msg("bad")).unwrap();
        logger.tell(info_msg("after")).unwrap();
        drop(logger);
        handle.await.unwrap();

        assert_eq!(*seen.lock(), vec!["bad", "after"]);
    }

    #[tokio::test]
    async fn test_stop_directive_ends_lane() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let (logger, handle) = spawn_logger(Recorder {
            seen: seen.clone(),
            fail_on: Some("bad".to_string()),
            directive: SupervisorDirective::Stop,
        });

        logger.tell(info_msg("bad")).unwrap();
        // The lane may already be gone by the time this send happens.
        let _ = logger.tell(info_msg("never"));
        handle.await.unwrap();

        assert_eq!(*seen.lock(), vec!["bad"]);
        // Lane is gone; subsequent sends fail with a channel error.
        let err = logger.tell(info_msg("late")).unwrap_err();
        assert_eq!(err.category(), "channel");
    }

    /// Behavior that drops the initialization reply without answering
    struct Silent;

    #[async_trait]
    impl ActorBehavior for Silent {
        type Message = LoggerMessage;

        async fn handle(&mut self, msg: LoggerMessage) -> Result<()> {
            drop(msg);
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_unanswered_handshake_is_handshake_error() {
        let (logger, handle) = spawn_logger(Silent);

        let err = logger.initialize().await.unwrap_err();
        assert_eq!(err.category(), "handshake");

        drop(logger);
        handle.await.unwrap();
    }
}
