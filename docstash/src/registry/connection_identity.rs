use crate::common::{DEFAULT_CONNECT_TIMEOUT_MS, DEFAULT_HOST, DEFAULT_PORT, DEFAULT_SOCKET_TIMEOUT_MS};
use std::fmt::{Display, Formatter};
use std::time::Duration;

/// Everything needed to open a collection handle on a document store.
///
/// Two identities are equal only when host, port, database, collection and
/// both timeouts match, so configurations that point the same
/// database/collection names at different servers never share a handle.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConnectionIdentity {
    host: String,
    port: u16,
    database: String,
    collection: String,
    connect_timeout: Duration,
    socket_timeout: Duration,
}

impl ConnectionIdentity {
    /// Creates an identity on `localhost:27017` with default timeouts.
    pub fn new(database: &str, collection: &str) -> Self {
        ConnectionIdentity {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            database: database.to_string(),
            collection: collection.to_string(),
            connect_timeout: Duration::from_millis(DEFAULT_CONNECT_TIMEOUT_MS),
            socket_timeout: Duration::from_millis(DEFAULT_SOCKET_TIMEOUT_MS),
        }
    }

    pub fn with_address(mut self, host: &str, port: u16) -> Self {
        self.host = host.to_string();
        self.port = port;
        self
    }

    pub fn with_timeouts(mut self, connect_timeout: Duration, socket_timeout: Duration) -> Self {
        self.connect_timeout = connect_timeout;
        self.socket_timeout = socket_timeout;
        self
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn database(&self) -> &str {
        &self.database
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    pub fn connect_timeout(&self) -> Duration {
        self.connect_timeout
    }

    pub fn socket_timeout(&self) -> Duration {
        self.socket_timeout
    }

    /// The `database.collection` namespace this identity addresses.
    pub fn namespace(&self) -> String {
        format!("{}.{}", self.database, self.collection)
    }
}

impl Display for ConnectionIdentity {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}/{}.{}", self.host, self.port, self.database, self.collection)
    }
}
