//! # Wireup Core - Recursive Module Composition
//!
//! Wires independently-built subsystems ("modules") into a tree and brings
//! them up in dependency order with observable lifecycle events.
//!
//! ## Model
//!
//! A [`Node`] plays three roles at once:
//!
//! - **Identity & Registry**: a string id plus an ordered mapping of child
//!   modules ([`register`](Node::register) / [`register_as`](Node::register_as)).
//! - **Private Event Channel**: instance-scoped pub/sub carrying the
//!   lifecycle events `pre init`, `init`, `pre stop`, `stop`, and
//!   `change status`.
//! - **Shared Broadcast Channel**: one process-wide bus, reachable
//!   identically from every node, for coordination independent of tree
//!   position.
//!
//! [`Node::init`] recurses depth-first: every child's `init` is awaited, in
//! registration order, before the node flips its own status and emits its
//! own `init` event. Leaves therefore signal readiness before the nodes that
//! depend on them.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use wireup_core::Node;
//!
//! let storage = Arc::new(Node::with_id("storage"));
//! let index = Arc::new(Node::with_id("index"));
//! index.register(storage);
//!
//! let root = Node::with_id("app");
//! root.register(index);
//!
//! root.init().await?; // storage, then index, then app
//! ```
//!
//! Anything implementing the [`Module`] trait qualifies as a child; the
//! contract is identity plus an optional `init`. `Node` implements it too,
//! which is what makes trees of nodes possible.

// Nursery lints that are too strict
#![allow(clippy::missing_const_for_fn)]
// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
#![cfg_attr(test, allow(clippy::panic))]

pub mod config;
pub mod error;
pub mod module;
pub mod node;
pub mod registry;
pub mod status;

// Re-export main types
pub use config::NodeConfig;
pub use error::{CoreError, CoreResult};
pub use module::{DynModule, Module, Readiness, ReadinessSignal};
pub use node::{lifecycle, Node};
pub use registry::ModuleRegistry;
pub use status::NodeStatus;

// The channel types appear in this crate's public API.
pub use wireup_bus::{Event, EventChannel, SubscriptionId};
