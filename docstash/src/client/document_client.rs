use crate::backend::{CollectionHandle, WriteOptions};
use crate::client::StoreResult;
use crate::common::{lookup_path, DOC_ID};
use crate::errors::{DocstashError, DocstashResult, ErrorKind};
use crate::registry::ConnectionRegistry;
use crate::storable::{Packable, Record, Storable, UnpackOptions};
use crate::storage_config::StorageConfig;
use bson::Bson;
use std::marker::PhantomData;

/// Stores, loads and checks values of type `T` in one collection.
///
/// Every record is addressed by the value of the configured key attribute.
/// `store` is an upsert with full-document replace semantics, `load`
/// rebuilds a value through [`Packable::unpack`], and `exists` only checks
/// for a match. A lookup miss is `Ok(None)` / `Ok(false)`, never an error.
///
/// The collection handle is resolved through the registry on every call and
/// never cached on the client itself; clients built from clones of one
/// registry share connections.
///
/// # Examples
///
/// ```rust
/// use docstash::client::DocumentClient;
/// use docstash::errors::DocstashResult;
/// use docstash::registry::ConnectionRegistry;
/// use docstash::storable::{serde_pack, Packable, Record, Storable, UnpackOptions};
/// use docstash::storage_config::StorageConfig;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Serialize, Deserialize)]
/// struct Note {
///     slug: String,
///     body: String,
/// }
///
/// impl Packable for Note {
///     fn pack(&self) -> DocstashResult<Record> {
///         serde_pack::pack(self)
///     }
///
///     fn unpack(record: Record, options: &UnpackOptions) -> DocstashResult<Self> {
///         serde_pack::unpack(record, options)
///     }
/// }
///
/// impl Storable for Note {
///     fn storage_config() -> DocstashResult<StorageConfig> {
///         StorageConfig::builder()
///             .key_attr("slug")
///             .database("notes")
///             .collection("notes")
///             .build()
///     }
/// }
///
/// # fn main() -> DocstashResult<()> {
/// let client = DocumentClient::<Note>::new(ConnectionRegistry::in_memory())?;
/// client.store(&Note { slug: "hello".into(), body: "world".into() })?;
///
/// let note = client.load("hello", &UnpackOptions::default())?.unwrap();
/// assert_eq!(note.body, "world");
/// assert!(!client.exists("missing")?);
/// # Ok(())
/// # }
/// ```
pub struct DocumentClient<T: Packable> {
    registry: ConnectionRegistry,
    config: StorageConfig,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Storable> DocumentClient<T> {
    /// Creates a client using `T`'s own storage configuration.
    ///
    /// # Errors
    ///
    /// `InvalidConfiguration` when `T::storage_config()` fails.
    pub fn new(registry: ConnectionRegistry) -> DocstashResult<Self> {
        Ok(Self::with_config(registry, T::storage_config()?))
    }
}

impl<T: Packable> DocumentClient<T> {
    /// Creates a client with an explicit configuration.
    pub fn with_config(registry: ConnectionRegistry, config: StorageConfig) -> Self {
        DocumentClient {
            registry,
            config,
            _marker: PhantomData,
        }
    }

    pub fn config(&self) -> &StorageConfig {
        &self.config
    }

    pub fn registry(&self) -> &ConnectionRegistry {
        &self.registry
    }

    /// Upserts `object` under its key value, replacing any stored record
    /// with the same key.
    ///
    /// # Errors
    ///
    /// - `ObjectMappingError` when packing fails
    /// - `InvalidArgument` when the packed record has no key value, or a
    ///   null one; the store is not contacted
    /// - `ConnectionError` when the collection cannot be opened
    /// - `StoreError` when the write fails
    pub fn store(&self, object: &T) -> DocstashResult<StoreResult> {
        let record = object.pack()?;
        let key_value = lookup_path(&record, self.config.key_attr())
            .cloned()
            .unwrap_or(Bson::Null);
        let filter = self.key_filter(key_value)?;

        let collection = self.collection()?;
        let options = WriteOptions {
            journal: self.config.journal(),
        };
        let result = collection.upsert_one(filter, record, &options)?;
        log::debug!(
            "Stored record in {} (matched {}, modified {}, inserted {})",
            self.config.identity(),
            result.matched_count(),
            result.modified_count(),
            result.is_insert()
        );
        Ok(result)
    }

    /// Loads the value stored under `key`.
    ///
    /// Returns `Ok(None)` when no record has that key.
    ///
    /// # Errors
    ///
    /// - `InvalidArgument` when `key` is null; the store is not contacted
    /// - `ConnectionError` when the collection cannot be opened or queried
    /// - `ObjectMappingError` when the record cannot be unpacked
    pub fn load(&self, key: impl Into<Bson>, options: &UnpackOptions) -> DocstashResult<Option<T>> {
        let filter = self.key_filter(key.into())?;
        let collection = self.collection()?;

        match collection.find_one(filter)? {
            Some(mut record) => {
                if options.strip_id() && self.config.key_attr() != DOC_ID {
                    record.remove(DOC_ID);
                }
                T::unpack(record, options).map(Some)
            }
            None => {
                log::debug!("No record found in {}", self.config.identity());
                Ok(None)
            }
        }
    }

    /// Whether a record is stored under `key`.
    ///
    /// # Errors
    ///
    /// - `InvalidArgument` when `key` is null; the store is not contacted
    /// - `ConnectionError` when the collection cannot be opened or queried
    pub fn exists(&self, key: impl Into<Bson>) -> DocstashResult<bool> {
        let filter = self.key_filter(key.into())?;
        let collection = self.collection()?;
        Ok(collection.count(filter, 1)? > 0)
    }

    fn collection(&self) -> DocstashResult<CollectionHandle> {
        self.registry.get_collection(self.config.identity())
    }

    fn key_filter(&self, key_value: Bson) -> DocstashResult<Record> {
        if matches!(key_value, Bson::Null | Bson::Undefined) {
            log::error!(
                "Key attribute '{}' has no value for {}",
                self.config.key_attr(),
                self.config.identity()
            );
            return Err(DocstashError::new(
                &format!("Key attribute '{}' must have a non-null value", self.config.key_attr()),
                ErrorKind::InvalidArgument,
            ));
        }

        let mut filter = Record::new();
        filter.insert(self.config.key_attr(), key_value);
        Ok(filter)
    }
}

impl<T: Packable> Clone for DocumentClient<T> {
    fn clone(&self) -> Self {
        DocumentClient {
            registry: self.registry.clone(),
            config: self.config.clone(),
            _marker: PhantomData,
        }
    }
}
