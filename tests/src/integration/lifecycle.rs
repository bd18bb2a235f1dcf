//! # Lifecycle Tests
//!
//! The init/stop state machine on a single node:
//!
//! 1. **Construction defaults**: stopped, empty registry, short hex id
//! 2. **Event ordering**: `pre init` → `init`, `pre stop` → `stop`
//! 3. **Status announcements**: one `change status` per transition, on both
//!    the private and the shared scope
//! 4. **Strict mode**: double-init errors instead of no-op

// =============================================================================
// TEST FIXTURES (only compiled during tests)
// =============================================================================

#[cfg(test)]
use std::sync::Arc;

#[cfg(test)]
use parking_lot::Mutex;

#[cfg(test)]
use wireup_core::{lifecycle, CoreError, Node, NodeConfig, NodeStatus};

/// Recording sink shared between listeners and assertions.
#[cfg(test)]
type EventLog = Arc<Mutex<Vec<String>>>;

#[cfg(test)]
fn event_log() -> EventLog {
    Arc::new(Mutex::new(Vec::new()))
}

/// Record every occurrence of `name` on the node's private channel.
#[cfg(test)]
fn record_private(node: &Node, name: &'static str, log: &EventLog) {
    let sink = Arc::clone(log);
    node.on(name, move |event| {
        sink.lock().push(event.name.clone());
    });
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fresh_node_is_stopped_and_empty() {
        let node = Node::new();
        assert_eq!(node.status(), NodeStatus::Stopped);
        assert_eq!(node.module_count(), 0);

        let id = node.id();
        assert!(!id.is_empty() && id.len() <= 2);
        assert!(u32::from_str_radix(&id, 16).unwrap() < 256);
    }

    #[tokio::test]
    async fn test_pre_init_fires_strictly_before_init() {
        let node = Node::with_id("lifecycle-order");
        let log = event_log();
        record_private(&node, lifecycle::PRE_INIT, &log);
        record_private(&node, lifecycle::INIT, &log);

        node.init().await.unwrap();

        assert_eq!(*log.lock(), vec!["pre init", "init"]);
        assert_eq!(node.status(), NodeStatus::Running);
    }

    #[tokio::test]
    async fn test_pre_stop_fires_strictly_before_stop() {
        let node = Node::with_id("lifecycle-stop-order");
        let log = event_log();
        record_private(&node, lifecycle::PRE_STOP, &log);
        record_private(&node, lifecycle::STOP, &log);

        node.init().await.unwrap();
        assert!(log.lock().is_empty());

        node.stop().unwrap();
        assert_eq!(*log.lock(), vec!["pre stop", "stop"]);
        assert_eq!(node.status(), NodeStatus::Stopped);
    }

    #[tokio::test]
    async fn test_change_status_payload_carries_id_and_status() {
        let node = Node::with_id("lifecycle-announce");
        let seen = Arc::new(Mutex::new(Vec::new()));

        let sink = Arc::clone(&seen);
        node.on(lifecycle::CHANGE_STATUS, move |event| {
            sink.lock().push(event.payload.clone());
        });

        node.init().await.unwrap();
        node.stop().unwrap();

        let payloads = seen.lock();
        assert_eq!(payloads.len(), 2);
        assert_eq!(payloads[0]["id"], "lifecycle-announce");
        assert_eq!(payloads[0]["status"], "running");
        assert_eq!(payloads[1]["id"], "lifecycle-announce");
        assert_eq!(payloads[1]["status"], "stopped");
    }

    #[tokio::test]
    async fn test_transitions_broadcast_once_on_shared_channel() {
        // Unique id: the shared channel spans the whole test binary.
        let node = Node::with_id("lifecycle-shared-announce-7f3a");
        let observer = Node::with_id("lifecycle-shared-observer");
        let seen = Arc::new(Mutex::new(Vec::new()));

        let sink = Arc::clone(&seen);
        let subscription = observer.subscribe(lifecycle::CHANGE_STATUS, move |event| {
            if event.payload["id"] == "lifecycle-shared-announce-7f3a" {
                sink.lock().push(event.payload["status"].clone());
            }
        });

        node.init().await.unwrap();
        node.stop().unwrap();

        assert_eq!(*seen.lock(), vec!["running", "stopped"]);
        observer.unsubscribe(lifecycle::CHANGE_STATUS, subscription);
    }

    #[tokio::test]
    async fn test_init_on_running_node_is_a_noop() {
        let node = Node::with_id("lifecycle-noop");
        let log = event_log();
        record_private(&node, lifecycle::INIT, &log);

        node.init().await.unwrap();
        node.init().await.unwrap();

        // Second call changed nothing and emitted nothing.
        assert_eq!(log.lock().len(), 1);
        assert_eq!(node.status(), NodeStatus::Running);
    }

    #[tokio::test]
    async fn test_strict_mode_rejects_double_init() {
        let config = NodeConfig {
            strict: true,
            ..NodeConfig::default()
        };
        let node = Node::with_config("lifecycle-strict", config);

        node.init().await.unwrap();
        let err = node.init().await.unwrap_err();

        assert!(matches!(
            err,
            CoreError::InvalidState {
                operation: "init",
                ..
            }
        ));
        assert_eq!(node.status(), NodeStatus::Running);
    }

    #[tokio::test]
    async fn test_stop_on_stopped_node_is_invalid() {
        let node = Node::with_id("lifecycle-bad-stop");

        let err = node.stop().unwrap_err();
        assert!(matches!(
            err,
            CoreError::InvalidState {
                operation: "stop",
                status: NodeStatus::Stopped,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_full_cycle_emits_lifecycle_events_each_round() {
        let node = Node::with_id("lifecycle-cycle");
        let log = event_log();
        for name in [
            lifecycle::PRE_INIT,
            lifecycle::INIT,
            lifecycle::PRE_STOP,
            lifecycle::STOP,
        ] {
            record_private(&node, name, &log);
        }

        node.init().await.unwrap();
        node.stop().unwrap();
        node.init().await.unwrap();

        assert_eq!(
            *log.lock(),
            vec!["pre init", "init", "pre stop", "stop", "pre init", "init"]
        );
        assert_eq!(node.status(), NodeStatus::Running);
    }
}
