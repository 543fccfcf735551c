use crate::storable::Record;
use dashmap::DashMap;
use parking_lot::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// One simulated server: an online flag and its collections by namespace.
pub(crate) struct InMemoryServer {
    online: AtomicBool,
    collections: DashMap<String, Arc<RwLock<Vec<Record>>>>,
}

impl InMemoryServer {
    pub(crate) fn new() -> Self {
        InMemoryServer {
            online: AtomicBool::new(true),
            collections: DashMap::new(),
        }
    }

    pub(crate) fn is_online(&self) -> bool {
        self.online.load(Ordering::Acquire)
    }

    pub(crate) fn set_online(&self, online: bool) {
        self.online.store(online, Ordering::Release);
    }

    /// Returns the record list for `namespace`, creating it on first use.
    pub(crate) fn records(&self, namespace: &str) -> Arc<RwLock<Vec<Record>>> {
        self.collections
            .entry(namespace.to_string())
            .or_insert_with(|| Arc::new(RwLock::new(Vec::new())))
            .value()
            .clone()
    }
}
