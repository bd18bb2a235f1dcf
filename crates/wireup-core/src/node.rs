//! # Node - Identity, Registry, and Recursive Lifecycle
//!
//! The unit of composition. A node holds a string id, a two-state lifecycle
//! status, an ordered registry of child modules, a private event channel for
//! its own lifecycle notifications, and a handle to the process-wide shared
//! channel.
//!
//! `init` recurses depth-first: every child is brought up, in registration
//! order, before the node flips its own status and emits its own `init`
//! event. There is no separate scheduler; the recursion through the registry
//! *is* the scheduling algorithm.

use crate::config::NodeConfig;
use crate::error::{CoreError, CoreResult};
use crate::module::{DynModule, Module, Readiness};
use crate::registry::ModuleRegistry;
use crate::status::NodeStatus;
use async_trait::async_trait;
use parking_lot::RwLock;
use rand::Rng;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, info, warn};
use wireup_bus::{shared_channel, EventChannel, SubscriptionId};

/// Lifecycle event names emitted on the private channel.
///
/// `CHANGE_STATUS` is additionally published on the shared channel, once per
/// transition, so unrelated trees can observe each other's lifecycle.
pub mod lifecycle {
    /// Fired before any child is initialized.
    pub const PRE_INIT: &str = "pre init";
    /// Fired after all children initialized and status flipped to running.
    pub const INIT: &str = "init";
    /// Fired before the status flips to stopped.
    pub const PRE_STOP: &str = "pre stop";
    /// Fired after the status flipped to stopped.
    pub const STOP: &str = "stop";
    /// Fired on every transition, payload `{"id": .., "status": ..}`.
    pub const CHANGE_STATUS: &str = "change status";
}

/// The unit of composition.
///
/// Usable behind `Arc` from multiple tasks; interior state is lock-protected
/// and no lock is held across an await point.
pub struct Node {
    /// Identifier. Mutable: a registering parent may overwrite it.
    id: RwLock<String>,

    /// Lifecycle status.
    status: RwLock<NodeStatus>,

    /// Child modules, in registration order.
    modules: RwLock<ModuleRegistry>,

    /// Instance-scoped channel. Never shared between nodes.
    private: EventChannel,

    /// Process-wide channel. Every node aliases the same object.
    shared: Arc<EventChannel>,

    /// Lifecycle configuration, fixed at construction.
    config: NodeConfig,

    /// Set while `init` is running, to catch re-entrant calls when a node
    /// is registered inside its own subtree.
    initializing: AtomicBool,
}

impl Node {
    /// Create a node with a freshly generated random hex id.
    ///
    /// The id is uniform over [0, 256), rendered lowercase base 16 with no
    /// fixed width.
    #[must_use]
    pub fn new() -> Self {
        let token: u32 = rand::thread_rng().gen_range(0..256);
        Self::with_id(format!("{token:x}"))
    }

    /// Create a node with an explicit id.
    #[must_use]
    pub fn with_id(id: impl Into<String>) -> Self {
        Self::with_config(id, NodeConfig::default())
    }

    /// Create a node with an explicit id and lifecycle configuration.
    #[must_use]
    pub fn with_config(id: impl Into<String>, config: NodeConfig) -> Self {
        Self {
            id: RwLock::new(id.into()),
            status: RwLock::new(NodeStatus::Stopped),
            modules: RwLock::new(ModuleRegistry::new()),
            private: EventChannel::new(),
            shared: shared_channel(),
            config,
            initializing: AtomicBool::new(false),
        }
    }

    // -------------------------------------------------------------------
    // Identity
    // -------------------------------------------------------------------

    /// Current identifier.
    #[must_use]
    pub fn id(&self) -> String {
        self.id.read().clone()
    }

    /// Overwrite the identifier.
    pub fn set_id(&self, id: &str) {
        *self.id.write() = id.to_string();
    }

    /// Current lifecycle status.
    #[must_use]
    pub fn status(&self) -> NodeStatus {
        *self.status.read()
    }

    /// The node's lifecycle configuration.
    #[must_use]
    pub fn config(&self) -> NodeConfig {
        self.config
    }

    // -------------------------------------------------------------------
    // Registry
    // -------------------------------------------------------------------

    /// Register a child module under the id it already carries.
    ///
    /// Last-write-wins on id reuse; the replacement is logged, not an error.
    /// Returns `&Self` for fluent chaining.
    pub fn register(&self, module: DynModule) -> &Self {
        let key = module.id();
        self.store(key, module);
        self
    }

    /// Register a child module under an explicit id.
    ///
    /// The module's own id is overwritten with `id` before storage, so the
    /// registry key and the module's id always agree.
    pub fn register_as(&self, id: &str, module: DynModule) -> &Self {
        module.set_id(id);
        self.store(id.to_string(), module);
        self
    }

    /// Look up a registered module by id.
    #[must_use]
    pub fn module(&self, id: &str) -> Option<DynModule> {
        self.modules.read().get(id)
    }

    /// Whether a module is registered under `id`.
    #[must_use]
    pub fn has_module(&self, id: &str) -> bool {
        self.modules.read().contains(id)
    }

    /// Registered module ids, in registration order.
    #[must_use]
    pub fn module_ids(&self) -> Vec<String> {
        self.modules.read().ids()
    }

    /// Number of registered modules.
    #[must_use]
    pub fn module_count(&self) -> usize {
        self.modules.read().len()
    }

    fn store(&self, key: String, module: DynModule) {
        let replaced = self.modules.write().insert(key.clone(), module);
        if replaced {
            warn!(
                "[Node {}] module '{}' already registered, replacing",
                self.id(),
                key
            );
        } else {
            debug!("[Node {}] registered module '{}'", self.id(), key);
        }
    }

    // -------------------------------------------------------------------
    // Lifecycle
    // -------------------------------------------------------------------

    /// Bring the node up: children first, in registration order, then self.
    ///
    /// Effect sequence: emit `pre init`, initialize every child, flip status
    /// to running, emit `init`, announce `change status` on both channels.
    /// The node's own `init` event therefore fires strictly after every
    /// child subtree has been processed.
    ///
    /// On a node that is already running (or mid-init) this is a no-op,
    /// unless [`NodeConfig::strict`] is set, in which case it returns
    /// [`CoreError::InvalidState`] (or [`CoreError::InitInProgress`]).
    ///
    /// # Errors
    ///
    /// A child error aborts the sequence immediately and surfaces unchanged;
    /// already-initialized children keep whatever state they reached and
    /// this node stays stopped.
    pub async fn init(&self) -> CoreResult<()> {
        if self.status() == NodeStatus::Running {
            if self.config.strict {
                return Err(CoreError::InvalidState {
                    id: self.id(),
                    operation: "init",
                    status: NodeStatus::Running,
                });
            }
            debug!("[Node {}] already running, init is a no-op", self.id());
            return Ok(());
        }

        if self.initializing.swap(true, Ordering::SeqCst) {
            if self.config.strict {
                return Err(CoreError::InitInProgress { id: self.id() });
            }
            debug!("[Node {}] init re-entered, ignoring", self.id());
            return Ok(());
        }

        let result = self.run_init().await;
        self.initializing.store(false, Ordering::SeqCst);
        result
    }

    async fn run_init(&self) -> CoreResult<()> {
        let id = self.id();
        info!(
            "[Node {}] initializing ({} modules)",
            id,
            self.module_count()
        );

        self.private.emit(lifecycle::PRE_INIT, Value::Null);

        // Snapshot so no registry lock is held while child futures run.
        // Children registered mid-init are picked up by the next init cycle.
        let children = self.modules.read().entries();
        for (child_id, child) in children {
            let readiness = child.init().await?;
            match readiness {
                Readiness::Ready => {}
                Readiness::Pending(receiver) => {
                    if self.config.await_ready {
                        match receiver.await {
                            Ok(Ok(())) => {}
                            Ok(Err(error)) => return Err(error),
                            Err(_) => {
                                return Err(CoreError::ReadinessAbandoned { id: child_id })
                            }
                        }
                    }
                    // Default mode: the deferred work was started, which is
                    // all the ordering guarantee covers. Drop the receiver.
                }
            }
        }

        *self.status.write() = NodeStatus::Running;
        self.private.emit(lifecycle::INIT, Value::Null);
        self.announce_status(NodeStatus::Running);

        info!("[Node {}] running", id);
        Ok(())
    }

    /// Bring the node down.
    ///
    /// Effect sequence: emit `pre stop`, flip status to stopped, emit
    /// `stop`, announce `change status` on both channels. Children are not
    /// stopped; their lifecycle is independent.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidState`] when the node is not running,
    /// including freshly constructed nodes.
    pub fn stop(&self) -> CoreResult<()> {
        if self.status() != NodeStatus::Running {
            return Err(CoreError::InvalidState {
                id: self.id(),
                operation: "stop",
                status: self.status(),
            });
        }

        self.private.emit(lifecycle::PRE_STOP, Value::Null);
        *self.status.write() = NodeStatus::Stopped;
        self.private.emit(lifecycle::STOP, Value::Null);
        self.announce_status(NodeStatus::Stopped);

        info!("[Node {}] stopped", self.id());
        Ok(())
    }

    /// One `change status` per transition, on both scopes. The id field in
    /// the payload lets shared-channel listeners filter, since that channel
    /// is process-global.
    fn announce_status(&self, status: NodeStatus) {
        let payload = json!({ "id": self.id(), "status": status });
        self.private.emit(lifecycle::CHANGE_STATUS, payload.clone());
        self.shared.emit(lifecycle::CHANGE_STATUS, payload);
    }

    // -------------------------------------------------------------------
    // Private events (instance scope)
    // -------------------------------------------------------------------

    /// Register a listener on this node's private channel.
    pub fn on(
        &self,
        name: &str,
        listener: impl Fn(&wireup_bus::Event) + Send + Sync + 'static,
    ) -> SubscriptionId {
        self.private.subscribe(name, listener)
    }

    /// Register a once-listener on this node's private channel.
    pub fn once(
        &self,
        name: &str,
        listener: impl Fn(&wireup_bus::Event) + Send + Sync + 'static,
    ) -> SubscriptionId {
        self.private.subscribe_once(name, listener)
    }

    /// Remove a private-channel listener. Returns whether one was removed.
    pub fn off(&self, name: &str, subscription: SubscriptionId) -> bool {
        self.private.unsubscribe(name, subscription)
    }

    /// Emit on this node's private channel. Returns listeners invoked.
    pub fn emit(&self, name: &str, payload: Value) -> usize {
        self.private.emit(name, payload)
    }

    // -------------------------------------------------------------------
    // Shared events (process scope)
    // -------------------------------------------------------------------

    /// Publish on the process-wide shared channel. Returns listeners
    /// invoked, across every subscriber in the process.
    pub fn publish(&self, name: &str, payload: Value) -> usize {
        self.shared.emit(name, payload)
    }

    /// Register a listener on the shared channel.
    pub fn subscribe(
        &self,
        name: &str,
        listener: impl Fn(&wireup_bus::Event) + Send + Sync + 'static,
    ) -> SubscriptionId {
        self.shared.subscribe(name, listener)
    }

    /// Register a once-listener on the shared channel.
    pub fn subscribe_once(
        &self,
        name: &str,
        listener: impl Fn(&wireup_bus::Event) + Send + Sync + 'static,
    ) -> SubscriptionId {
        self.shared.subscribe_once(name, listener)
    }

    /// Remove a shared-channel listener. Returns whether one was removed.
    pub fn unsubscribe(&self, name: &str, subscription: SubscriptionId) -> bool {
        self.shared.unsubscribe(name, subscription)
    }

    /// Handle to the process-wide channel this node publishes on.
    #[must_use]
    pub fn shared_channel(&self) -> Arc<EventChannel> {
        Arc::clone(&self.shared)
    }
}

impl Default for Node {
    fn default() -> Self {
        Self::new()
    }
}

/// A node is itself a module, which is what makes trees of nodes possible.
/// A parent awaiting this `init` therefore awaits the whole subtree, so for
/// pure-node trees invocation order and completion order coincide.
#[async_trait]
impl Module for Node {
    fn id(&self) -> String {
        Node::id(self)
    }

    fn set_id(&self, id: &str) {
        Node::set_id(self, id);
    }

    async fn init(&self) -> CoreResult<Readiness> {
        Node::init(self).await?;
        Ok(Readiness::Ready)
    }
}
