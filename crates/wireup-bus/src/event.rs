//! # Event
//!
//! The message type carried by every channel.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A named event with an arbitrary JSON payload.
///
/// Lifecycle events carry `Value::Null`; anything richer (for example the
/// `change status` announcement) uses a JSON object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Event name, e.g. `"init"` or `"change status"`.
    pub name: String,

    /// Payload passed through to listeners unchanged.
    pub payload: Value,
}

impl Event {
    /// Create a new event.
    #[must_use]
    pub fn new(name: impl Into<String>, payload: Value) -> Self {
        Self {
            name: name.into(),
            payload,
        }
    }
}
