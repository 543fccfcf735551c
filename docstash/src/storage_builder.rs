use crate::common::{
    DEFAULT_CONNECT_TIMEOUT_MS, DEFAULT_HOST, DEFAULT_PORT, DEFAULT_SOCKET_TIMEOUT_MS,
    INVALID_COLLECTION_CHARS, INVALID_DATABASE_CHARS, SYSTEM_COLLECTION_PREFIX,
};
use crate::errors::{DocstashError, DocstashResult, ErrorKind};
use crate::registry::ConnectionIdentity;
use crate::storage_config::StorageConfig;
use std::time::Duration;

/// Builder for [`StorageConfig`].
///
/// Setters validate their input as they go. The first validation error is
/// captured and returned from [`build`](StorageConfigBuilder::build), so a
/// chain of setters never needs intermediate `?`.
///
/// `key_attr`, `database` and `collection` are required. Everything else
/// falls back to `localhost:27017` with a 10s connect timeout and a 30s
/// socket timeout.
#[derive(Debug)]
pub struct StorageConfigBuilder {
    error: Option<DocstashError>,
    key_attr: Option<String>,
    host: String,
    port: u16,
    database: Option<String>,
    collection: Option<String>,
    connect_timeout_ms: u64,
    socket_timeout_ms: u64,
    journal: bool,
}

impl Default for StorageConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl StorageConfigBuilder {
    pub fn new() -> Self {
        StorageConfigBuilder {
            error: None,
            key_attr: None,
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            database: None,
            collection: None,
            connect_timeout_ms: DEFAULT_CONNECT_TIMEOUT_MS,
            socket_timeout_ms: DEFAULT_SOCKET_TIMEOUT_MS,
            journal: false,
        }
    }

    /// Sets the name of the field that identifies a record.
    pub fn key_attr(mut self, key_attr: &str) -> Self {
        if key_attr.is_empty() {
            self.capture("Key attribute cannot be empty");
        } else if key_attr.starts_with('$') || key_attr.contains('\0') {
            self.capture(&format!("Invalid key attribute '{}'", key_attr));
        }
        self.key_attr = Some(key_attr.to_string());
        self
    }

    pub fn host(mut self, host: &str) -> Self {
        if host.trim().is_empty() {
            self.capture("Host cannot be empty");
        }
        self.host = host.to_string();
        self
    }

    pub fn port(mut self, port: u16) -> Self {
        if port == 0 {
            self.capture("Port cannot be 0");
        }
        self.port = port;
        self
    }

    pub fn database(mut self, database: &str) -> Self {
        if database.is_empty() {
            self.capture("Database name cannot be empty");
        } else if database.contains(INVALID_DATABASE_CHARS) {
            self.capture(&format!("Invalid database name '{}'", database));
        }
        self.database = Some(database.to_string());
        self
    }

    pub fn collection(mut self, collection: &str) -> Self {
        if collection.is_empty() {
            self.capture("Collection name cannot be empty");
        } else if collection.contains(INVALID_COLLECTION_CHARS)
            || collection.starts_with(SYSTEM_COLLECTION_PREFIX)
        {
            self.capture(&format!("Invalid collection name '{}'", collection));
        }
        self.collection = Some(collection.to_string());
        self
    }

    pub fn connect_timeout_ms(mut self, timeout: u64) -> Self {
        if timeout == 0 {
            self.capture("Connect timeout must be greater than 0");
        }
        self.connect_timeout_ms = timeout;
        self
    }

    pub fn socket_timeout_ms(mut self, timeout: u64) -> Self {
        if timeout == 0 {
            self.capture("Socket timeout must be greater than 0");
        }
        self.socket_timeout_ms = timeout;
        self
    }

    pub fn journal(mut self, journal: bool) -> Self {
        self.journal = journal;
        self
    }

    /// Validates the collected settings and produces a [`StorageConfig`].
    ///
    /// # Errors
    ///
    /// `InvalidConfiguration` for the first invalid setter call, or for a
    /// missing key attribute, database or collection.
    pub fn build(self) -> DocstashResult<StorageConfig> {
        if let Some(error) = self.error {
            return Err(error);
        }

        let key_attr = required(self.key_attr, "key attribute")?;
        let database = required(self.database, "database")?;
        let collection = required(self.collection, "collection")?;

        let identity = ConnectionIdentity::new(&database, &collection)
            .with_address(&self.host, self.port)
            .with_timeouts(
                Duration::from_millis(self.connect_timeout_ms),
                Duration::from_millis(self.socket_timeout_ms),
            );
        Ok(StorageConfig::new(key_attr, identity, self.journal))
    }

    fn capture(&mut self, message: &str) {
        if self.error.is_none() {
            log::error!("{}", message);
            self.error = Some(DocstashError::new(message, ErrorKind::InvalidConfiguration));
        }
    }
}

fn required(value: Option<String>, name: &str) -> DocstashResult<String> {
    value.ok_or_else(|| {
        log::error!("Storage configuration is missing the {}", name);
        DocstashError::new(
            &format!("Storage configuration is missing the {}", name),
            ErrorKind::InvalidConfiguration,
        )
    })
}
