use crate::backend::memory::InMemoryConnector;
use crate::backend::{CollectionHandle, Connector};
use crate::errors::DocstashResult;
use crate::registry::ConnectionIdentity;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;

/// Cache of open collection handles, keyed by connection identity.
///
/// # Characteristics
/// - At most one successful `connect` per identity for the registry's
///   lifetime. Racing first uses of one identity wait on a per-identity
///   gate and share the single connection it opens.
/// - A slow or failing `connect` only blocks callers of the same identity;
///   cached lookups of other identities never wait on it.
/// - Failed connections are not cached; the next call tries again.
/// - No eviction. Handles live until the last registry clone is dropped.
/// - Cloning is cheap and clones share the cache.
///
/// # Examples
///
/// ```rust
/// use docstash::registry::{ConnectionIdentity, ConnectionRegistry};
///
/// let registry = ConnectionRegistry::in_memory();
/// let identity = ConnectionIdentity::new("library", "books");
///
/// let first = registry.get_collection(&identity).unwrap();
/// let second = registry.get_collection(&identity).unwrap();
/// assert!(first.same_handle(&second));
/// assert_eq!(registry.len(), 1);
/// ```
#[derive(Clone)]
pub struct ConnectionRegistry {
    inner: Arc<ConnectionRegistryInner>,
}

impl ConnectionRegistry {
    pub fn new<C: Connector + 'static>(connector: C) -> Self {
        ConnectionRegistry {
            inner: Arc::new(ConnectionRegistryInner::new(Box::new(connector))),
        }
    }

    /// A registry over a fresh in-process store.
    pub fn in_memory() -> Self {
        Self::new(InMemoryConnector::new())
    }

    /// A registry that connects to MongoDB servers.
    #[cfg(feature = "mongodb")]
    pub fn mongo() -> Self {
        Self::new(crate::backend::mongo::MongoConnector::new())
    }

    /// Returns the cached handle for `identity`, opening it on first use.
    ///
    /// # Errors
    ///
    /// `ConnectionError` from the connector when the handle cannot be opened.
    pub fn get_collection(&self, identity: &ConnectionIdentity) -> DocstashResult<CollectionHandle> {
        self.inner.get_collection(identity)
    }

    pub fn has_collection(&self, identity: &ConnectionIdentity) -> bool {
        self.inner.handles.lock().contains_key(identity)
    }

    /// Number of cached handles.
    pub fn len(&self) -> usize {
        self.inner.handles.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

struct ConnectionRegistryInner {
    connector: Box<dyn Connector>,
    handles: Mutex<HashMap<ConnectionIdentity, CollectionHandle>>,
    gates: Mutex<HashMap<ConnectionIdentity, Arc<Mutex<()>>>>,
}

impl ConnectionRegistryInner {
    fn new(connector: Box<dyn Connector>) -> Self {
        ConnectionRegistryInner {
            connector,
            handles: Mutex::new(HashMap::new()),
            gates: Mutex::new(HashMap::new()),
        }
    }

    fn cached(&self, identity: &ConnectionIdentity) -> Option<CollectionHandle> {
        self.handles.lock().get(identity).cloned()
    }

    fn get_collection(&self, identity: &ConnectionIdentity) -> DocstashResult<CollectionHandle> {
        if let Some(handle) = self.cached(identity) {
            return Ok(handle);
        }

        let gate = self
            .gates
            .lock()
            .entry(identity.clone())
            .or_default()
            .clone();
        let _connecting = gate.lock();

        // another caller may have connected while we waited on the gate
        if let Some(handle) = self.cached(identity) {
            return Ok(handle);
        }

        log::debug!("No cached handle for {}, connecting", identity);
        let handle = self.connector.connect(identity)?;
        self.handles.lock().insert(identity.clone(), handle.clone());
        Ok(handle)
    }
}
