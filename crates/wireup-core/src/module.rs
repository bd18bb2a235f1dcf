//! # Module Trait - The Composition Contract
//!
//! Anything registered as a child of a node implements [`Module`]: identity
//! plus an optional `init`. The provided default `init` makes a module that
//! needs no bring-up a one-impl affair, and [`Node`](crate::Node) itself
//! implements the trait, which is what makes trees of nodes possible.
//!
//! ## Example Implementation
//!
//! ```rust,ignore
//! use wireup_core::{CoreResult, Module, Readiness};
//! use async_trait::async_trait;
//! use parking_lot::RwLock;
//!
//! pub struct Cache {
//!     id: RwLock<String>,
//! }
//!
//! #[async_trait]
//! impl Module for Cache {
//!     fn id(&self) -> String {
//!         self.id.read().clone()
//!     }
//!
//!     fn set_id(&self, id: &str) {
//!         *self.id.write() = id.to_string();
//!     }
//!
//!     async fn init(&self) -> CoreResult<Readiness> {
//!         // warm the cache ...
//!         Ok(Readiness::Ready)
//!     }
//! }
//! ```

use crate::error::{CoreError, CoreResult};
use async_trait::async_trait;
use tokio::sync::oneshot;

/// Completion signal returned by [`Module::init`].
///
/// A synchronous module returns `Ready`. A module that starts background
/// work returns `Pending` with the receiving half of a
/// [`Readiness::deferred`] pair; whether the parent awaits it is decided by
/// the parent's [`NodeConfig::await_ready`](crate::NodeConfig::await_ready).
#[derive(Debug)]
pub enum Readiness {
    /// Initialization finished before `init` returned.
    Ready,
    /// Initialization continues in the background; completion arrives on the
    /// receiver.
    Pending(oneshot::Receiver<CoreResult<()>>),
}

impl Readiness {
    /// Create a deferred-completion pair.
    ///
    /// The module keeps the [`ReadinessSignal`] and returns the `Readiness`
    /// from `init`. Dropping the signal without completing it surfaces as
    /// [`CoreError::ReadinessAbandoned`] to an awaiting parent.
    #[must_use]
    pub fn deferred() -> (ReadinessSignal, Self) {
        let (tx, rx) = oneshot::channel();
        (ReadinessSignal(tx), Self::Pending(rx))
    }
}

/// Sending half of a deferred readiness, held by the module.
#[derive(Debug)]
pub struct ReadinessSignal(oneshot::Sender<CoreResult<()>>);

impl ReadinessSignal {
    /// Report successful completion of the deferred work.
    pub fn ready(self) {
        let _ = self.0.send(Ok(()));
    }

    /// Report failure of the deferred work.
    pub fn failed(self, error: CoreError) {
        let _ = self.0.send(Err(error));
    }
}

/// The contract a child must satisfy to be registered under a node.
///
/// Identity is interior-mutable (`set_id` takes `&self`) because modules are
/// shared behind `Arc` and a registering parent may rename them.
#[async_trait]
pub trait Module: Send + Sync {
    /// Current identifier of this module.
    fn id(&self) -> String;

    /// Overwrite the identifier. Called by a parent registering this module
    /// under an explicit key.
    fn set_id(&self, id: &str);

    /// Bring the module up.
    ///
    /// Called by the parent node during its own `init`, in registration
    /// order. The default implementation does nothing and reports immediate
    /// readiness, which is the Rust rendering of "init is optional".
    async fn init(&self) -> CoreResult<Readiness> {
        Ok(Readiness::Ready)
    }
}

/// A type-erased module handle, the form the registry stores.
pub type DynModule = std::sync::Arc<dyn Module>;
