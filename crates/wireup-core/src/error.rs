//! # Error Types
//!
//! The lifecycle errors the core itself produces, plus a transparent carrier
//! for whatever errors module `init` implementations raise. Child errors
//! propagate unmodified through ancestor `init` calls; the core adds no
//! wrapping, no retry, and no rollback.

use crate::status::NodeStatus;
use thiserror::Error;

/// Result alias used throughout the crate.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors produced by node lifecycle operations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Operation not valid for the node's current status. Returned by `stop`
    /// on a stopped node, and by `init` in strict mode on a running one.
    #[error("invalid state: cannot {operation} node '{id}' while {status}")]
    InvalidState {
        /// Node the operation was invoked on.
        id: String,
        /// The rejected operation.
        operation: &'static str,
        /// Status at the time of the call.
        status: NodeStatus,
    },

    /// Strict mode only: `init` re-entered while the same node is already
    /// mid-initialization (e.g. the node was registered inside its own
    /// subtree).
    #[error("init already in progress for node '{id}'")]
    InitInProgress {
        /// Node the re-entrant call was invoked on.
        id: String,
    },

    /// Await-ready mode only: a module returned a pending readiness and
    /// dropped its signal without ever completing it.
    #[error("module '{id}' abandoned its readiness signal")]
    ReadinessAbandoned {
        /// Id of the module that dropped its signal.
        id: String,
    },

    /// An error raised by a module's `init` implementation, passed through
    /// unchanged.
    #[error(transparent)]
    Module(#[from] anyhow::Error),
}

impl CoreError {
    /// Wrap an arbitrary error as a module initialization failure.
    pub fn module(error: impl Into<anyhow::Error>) -> Self {
        Self::Module(error.into())
    }
}
