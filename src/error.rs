//! Bridge Error Types
//!
//! Error handling for the logger lane: backend call failures, closed
//! channels, and initialization handshake problems.

use thiserror::Error;

/// Result type alias for bridge operations
pub type Result<T> = std::result::Result<T, BridgeError>;

/// Main bridge error type
#[derive(Error, Debug)]
pub enum BridgeError {
    /// The backend logging call itself failed
    #[error("Backend error: logger '{logger}': {message}")]
    Backend {
        logger: String,
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Logger mailbox channel errors
    #[error("Channel error: {message}")]
    Channel { message: String },

    /// Initialization handshake errors
    #[error("Handshake error: {message}")]
    Handshake { message: String },
}

impl BridgeError {
    /// Create a backend error
    pub fn backend(logger: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Backend {
            logger: logger.into(),
            message: message.into(),
            source: None,
        }
    }

    /// Create a backend error with source
    pub fn backend_with_source(
        logger: impl Into<String>,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Backend {
            logger: logger.into(),
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a channel error
    pub fn channel(message: impl Into<String>) -> Self {
        Self::Channel {
            message: message.into(),
        }
    }

    /// Create a handshake error
    pub fn handshake(message: impl Into<String>) -> Self {
        Self::Handshake {
            message: message.into(),
        }
    }

    /// Get error category for diagnostics
    pub fn category(&self) -> &'static str {
        match self {
            BridgeError::Backend { .. } => "backend",
            BridgeError::Channel { .. } => "channel",
            BridgeError::Handshake { .. } => "handshake",
        }
    }
}
