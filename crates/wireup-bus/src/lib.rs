//! # Wireup Bus - Dual-Scope Event Channels
//!
//! Implements the publish/subscribe capability nodes compose over: every node
//! owns a private `EventChannel` for its own lifecycle notifications, and all
//! nodes share one process-wide channel for cross-cutting coordination.
//!
//! ## Scopes
//!
//! ```text
//! ┌────────────┐  emit()             ┌────────────┐  emit()
//! │   Node A   │──→ private channel  │   Node B   │──→ private channel
//! └─────┬──────┘    (A's listeners   └─────┬──────┘    (B's listeners
//!       │            only)                 │            only)
//!       │ publish()                        │ publish()
//!       ▼                                  ▼
//!  ┌────────────────────────────────────────────────┐
//!  │              shared channel (one per process)  │
//!  │   every subscriber sees every publication      │
//!  └────────────────────────────────────────────────┘
//! ```
//!
//! ## Delivery Semantics
//!
//! - **Synchronous push**: listeners run inside `emit`, before it returns.
//! - **Registration order**: listeners fire in the order they subscribed.
//! - **Reentrancy-safe**: no lock is held while listeners run, so a listener
//!   may subscribe, unsubscribe, or emit on the same channel.
//! - **Once semantics**: a once-listener is removed before it is invoked, so
//!   re-emitting from inside it cannot fire it twice.

// Nursery lints that are too strict
#![allow(clippy::missing_const_for_fn)]
// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
#![cfg_attr(test, allow(clippy::panic))]

pub mod channel;
pub mod event;
pub mod shared;

// Re-export main types
pub use channel::{EventChannel, SubscriptionId};
pub use event::Event;
pub use shared::shared_channel;
