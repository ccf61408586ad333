//! Ambient Diagnostic Context
//!
//! Thread-local key/value metadata attached to a log call without being
//! threaded through every parameter. Keys are installed through a
//! [`ScopedMdc`] guard whose `Drop` removes them, so removal runs on every
//! exit path: normal return, `?` propagation, and panic.
//!
//! Each delivery thread has its own view; no cross-thread lock is needed.
//! Nothing here survives past the handling of one message.

use std::cell::RefCell;
use std::collections::HashMap;

/// Context key: numeric id of the thread that emitted the event
pub const SOURCE_THREAD: &str = "sourceThread";
/// Context key: name of the actor system the bridge runs inside
pub const SOURCE_ACTOR_SYSTEM: &str = "sourceActorSystem";
/// Context key: logical source identifier of the emitting component
pub const AKKA_SOURCE: &str = "akkaSource";
/// Context key: event timestamp, nanoseconds since the Unix epoch
pub const AKKA_TIMESTAMP: &str = "akkaTimestamp";

thread_local! {
    static MDC: RefCell<HashMap<&'static str, String>> = RefCell::new(HashMap::new());
}

/// Set a context value for the current thread
pub fn set(key: &'static str, value: impl Into<String>) {
    MDC.with(|mdc| {
        mdc.borrow_mut().insert(key, value.into());
    });
}

/// Read a context value on the current thread
pub fn get(key: &str) -> Option<String> {
    MDC.with(|mdc| mdc.borrow().get(key).cloned())
}

/// Remove a context value on the current thread
pub fn remove(key: &str) {
    MDC.with(|mdc| {
        mdc.borrow_mut().remove(key);
    });
}

/// Whether a key is currently set on this thread
pub fn contains(key: &str) -> bool {
    MDC.with(|mdc| mdc.borrow().contains_key(key))
}

/// Copy of the current thread's full context
pub fn snapshot() -> HashMap<&'static str, String> {
    MDC.with(|mdc| mdc.borrow().clone())
}

/// RAII guard over a set of context keys.
///
/// Installs the pairs on construction and removes exactly those keys when
/// dropped, whether the scope exits by return, error, or panic.
#[derive(Debug)]
pub struct ScopedMdc {
    keys: Vec<&'static str>,
}

impl ScopedMdc {
    pub fn install<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'static str, String)>,
    {
        let mut keys = Vec::new();
        for (key, value) in pairs {
            set(key, value);
            keys.push(key);
        }
        Self { keys }
    }
}

impl Drop for ScopedMdc {
    fn drop(&mut self) {
        for key in &self.keys {
            remove(key);
        }
    }
}
