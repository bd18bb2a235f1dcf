//! # Shared Channel - Process-Wide Broadcast Scope
//!
//! One [`EventChannel`] instance shared by every node in the process. Created
//! lazily on first access, lives for the process lifetime, never reset. A
//! message published here by any node is observable by every subscriber,
//! regardless of tree position.

use crate::channel::EventChannel;
use lazy_static::lazy_static;
use std::sync::Arc;

lazy_static! {
    /// The single process-wide channel. All handles alias this object.
    static ref SHARED_CHANNEL: Arc<EventChannel> = Arc::new(EventChannel::new());
}

/// Get a handle to the process-wide shared channel.
///
/// Every call returns a handle to the same underlying channel;
/// `Arc::ptr_eq` holds across any two of them.
#[must_use]
pub fn shared_channel() -> Arc<EventChannel> {
    Arc::clone(&SHARED_CHANNEL)
}
