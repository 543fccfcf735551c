//! Configuration for a document client.

use crate::registry::ConnectionIdentity;
use crate::storage_builder::StorageConfigBuilder;

/// Where and how a [`DocumentClient`](crate::client::DocumentClient) stores
/// its records.
///
/// Built through [`StorageConfig::builder`], which validates names and
/// timeouts before a configuration can exist.
///
/// # Examples
///
/// ```rust
/// use docstash::storage_config::StorageConfig;
///
/// let config = StorageConfig::builder()
///     .key_attr("doc_id")
///     .database("library")
///     .collection("books")
///     .build()
///     .unwrap();
///
/// assert_eq!(config.key_attr(), "doc_id");
/// assert_eq!(config.identity().to_string(), "localhost:27017/library.books");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageConfig {
    key_attr: String,
    identity: ConnectionIdentity,
    journal: bool,
}

impl StorageConfig {
    pub fn builder() -> StorageConfigBuilder {
        StorageConfigBuilder::new()
    }

    pub(crate) fn new(key_attr: String, identity: ConnectionIdentity, journal: bool) -> Self {
        StorageConfig {
            key_attr,
            identity,
            journal,
        }
    }

    /// Name of the field whose value addresses a record.
    pub fn key_attr(&self) -> &str {
        &self.key_attr
    }

    pub fn identity(&self) -> &ConnectionIdentity {
        &self.identity
    }

    /// Whether writes wait for the server's journal.
    pub fn journal(&self) -> bool {
        self.journal
    }

    /// Returns a builder pre-filled with this configuration, for deriving a
    /// variant (another database, another server) from it.
    pub fn to_builder(&self) -> StorageConfigBuilder {
        StorageConfigBuilder::new()
            .key_attr(&self.key_attr)
            .host(self.identity.host())
            .port(self.identity.port())
            .database(self.identity.database())
            .collection(self.identity.collection())
            .connect_timeout_ms(self.identity.connect_timeout().as_millis() as u64)
            .socket_timeout_ms(self.identity.socket_timeout().as_millis() as u64)
            .journal(self.journal)
    }
}
