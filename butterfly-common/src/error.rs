//! Error types for the butterfly-guidance toolkit
//!
//! The collapsing passes themselves never fail: malformed step sequences are a
//! contract violation of the upstream producer and are caught by assertions.
//! These errors cover the boundaries where untrusted data enters (route files,
//! configuration files) before it is handed to the passes.

use thiserror::Error;

/// Main error type for butterfly-guidance operations
#[derive(Debug, Error)]
pub enum Error {
    /// A step sequence violates the Depart/Arrive anchoring invariants
    #[error("Invalid route (leg {leg}): {reason}")]
    InvalidRoute { leg: usize, reason: String },

    /// A single step carries values that cannot be collapsed
    #[error("Invalid step {index} (leg {leg}): {reason}")]
    InvalidStep {
        leg: usize,
        index: usize,
        reason: String,
    },

    /// File I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Route document could not be parsed or serialized
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Invalid configuration or parameters
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl Error {
    /// Shorthand for a route-level invariant failure
    pub fn invalid_route(leg: usize, reason: impl Into<String>) -> Self {
        Error::InvalidRoute {
            leg,
            reason: reason.into(),
        }
    }

    /// Shorthand for a step-level invariant failure
    pub fn invalid_step(leg: usize, index: usize, reason: impl Into<String>) -> Self {
        Error::InvalidStep {
            leg,
            index,
            reason: reason.into(),
        }
    }

    /// The leg the error refers to, if any
    pub fn leg(&self) -> Option<usize> {
        match self {
            Error::InvalidRoute { leg, .. } | Error::InvalidStep { leg, .. } => Some(*leg),
            _ => None,
        }
    }
}

/// Convenience result type for butterfly-guidance operations
pub type Result<T> = std::result::Result<T, Error>;
