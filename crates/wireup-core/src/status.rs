//! # Node Status
//!
//! The two-state lifecycle machine every node moves through.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of a node.
///
/// Transitions only via `init` (→ `Running`) and `stop` (→ `Stopped`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeStatus {
    /// Not running. The initial state, and the state after `stop`.
    Stopped,
    /// `init` has completed since construction or the last `stop`.
    Running,
}

impl Default for NodeStatus {
    fn default() -> Self {
        Self::Stopped
    }
}

impl fmt::Display for NodeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stopped => write!(f, "stopped"),
            Self::Running => write!(f, "running"),
        }
    }
}
