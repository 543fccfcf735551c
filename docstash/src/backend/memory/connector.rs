use super::{InMemoryCollection, InMemoryServer};
use crate::backend::{CollectionHandle, Connector};
use crate::errors::{DocstashError, DocstashResult, ErrorKind};
use crate::registry::ConnectionIdentity;
use dashmap::DashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Connector for the in-process document store.
///
/// # Characteristics
/// - Servers are keyed by `(host, port)`; timeouts do not affect which data
///   a connection sees.
/// - Clones share the same servers and records.
/// - [`set_online`](InMemoryConnector::set_online) takes a server down: new
///   connections fail with `ConnectionError`, reads on existing handles fail
///   with `ConnectionError` and writes with `StoreError`.
///
/// # Usage
/// ```rust
/// use docstash::backend::memory::InMemoryConnector;
/// use docstash::backend::Connector;
/// use docstash::registry::ConnectionIdentity;
///
/// let connector = InMemoryConnector::new();
/// let handle = connector.connect(&ConnectionIdentity::new("app", "docs")).unwrap();
/// assert_eq!(handle.namespace(), "app.docs");
/// assert_eq!(connector.connection_count(), 1);
/// ```
#[derive(Clone, Default)]
pub struct InMemoryConnector {
    inner: Arc<InMemoryConnectorInner>,
}

impl InMemoryConnector {
    pub fn new() -> Self {
        InMemoryConnector::default()
    }

    /// Brings the server at `host:port` up or down.
    pub fn set_online(&self, host: &str, port: u16, online: bool) {
        self.inner.server(host, port).set_online(online);
    }

    /// Number of successful `connect` calls made through this connector and
    /// its clones.
    pub fn connection_count(&self) -> usize {
        self.inner.connections.load(Ordering::Acquire)
    }
}

impl Connector for InMemoryConnector {
    fn connect(&self, identity: &ConnectionIdentity) -> DocstashResult<CollectionHandle> {
        self.inner.connect(identity)
    }
}

#[derive(Default)]
struct InMemoryConnectorInner {
    servers: DashMap<(String, u16), Arc<InMemoryServer>>,
    connections: AtomicUsize,
}

impl InMemoryConnectorInner {
    fn server(&self, host: &str, port: u16) -> Arc<InMemoryServer> {
        self.servers
            .entry((host.to_string(), port))
            .or_insert_with(|| Arc::new(InMemoryServer::new()))
            .value()
            .clone()
    }

    fn connect(&self, identity: &ConnectionIdentity) -> DocstashResult<CollectionHandle> {
        let server = self.server(identity.host(), identity.port());
        if !server.is_online() {
            log::error!("Cannot connect to {}: server is offline", identity);
            return Err(DocstashError::new(
                &format!("Cannot connect to {}:{}", identity.host(), identity.port()),
                ErrorKind::ConnectionError,
            ));
        }

        let collection = InMemoryCollection::new(identity.namespace(), server);
        self.connections.fetch_add(1, Ordering::AcqRel);
        log::debug!("Opened in-memory collection {}", identity);
        Ok(CollectionHandle::new(collection))
    }
}
