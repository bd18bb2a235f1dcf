//! # Node Configuration
//!
//! Construction-time knobs for a node's lifecycle behavior. There is no
//! environment or file loading; a config is passed to
//! [`Node::with_config`](crate::Node::with_config) and is immutable afterwards.

use serde::{Deserialize, Serialize};

/// Lifecycle configuration for a single node.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeConfig {
    /// When set, `init` on a node that is already running (or mid-init)
    /// returns an error instead of being a silent no-op.
    pub strict: bool,

    /// When set, `init` awaits each child's readiness signal before moving to
    /// the next child. By default deferred work is started, not awaited.
    pub await_ready: bool,
}
