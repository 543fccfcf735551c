use crate::client::StoreResult;
use crate::errors::DocstashResult;
use crate::storable::Record;
use std::ops::Deref;
use std::sync::Arc;

/// Write settings passed with every upsert.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriteOptions {
    /// Wait until the write reached the server's journal.
    pub journal: bool,
}

/// Low-level operations on one named collection.
///
/// # Purpose
/// The contract every backend collection fulfils. The document client only
/// ever issues the three operations below, always with an equality filter on
/// a single key field.
///
/// # Thread Safety
/// Implementers must be `Send + Sync`; one handle is shared by every client
/// configured with the same connection identity.
pub trait CollectionProvider: Send + Sync {
    /// The `database.collection` namespace of this collection.
    fn namespace(&self) -> String;

    /// Replaces the record matching `filter` with `replacement`, or inserts
    /// `replacement` when nothing matches.
    ///
    /// # Errors
    /// `StoreError` when the write fails or is not acknowledged.
    fn upsert_one(
        &self,
        filter: Record,
        replacement: Record,
        options: &WriteOptions,
    ) -> DocstashResult<StoreResult>;

    /// Returns the first record matching `filter`, if any.
    ///
    /// # Errors
    /// `ConnectionError` when the lookup cannot be completed.
    fn find_one(&self, filter: Record) -> DocstashResult<Option<Record>>;

    /// Counts the records matching `filter`, stopping at `limit` when it is
    /// non-zero.
    ///
    /// # Errors
    /// `ConnectionError` when the count cannot be completed.
    fn count(&self, filter: Record, limit: u64) -> DocstashResult<u64>;
}

/// Shared handle to an opened collection.
///
/// Cloning is cheap; all clones point at the same provider. Dereferences to
/// the provider so its operations can be called directly.
#[derive(Clone)]
pub struct CollectionHandle {
    inner: Arc<dyn CollectionProvider>,
}

impl CollectionHandle {
    pub fn new<T: CollectionProvider + 'static>(inner: T) -> Self {
        CollectionHandle {
            inner: Arc::new(inner),
        }
    }

    /// True when both handles share the same underlying provider.
    pub fn same_handle(&self, other: &CollectionHandle) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Deref for CollectionHandle {
    type Target = Arc<dyn CollectionProvider>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl std::fmt::Debug for CollectionHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CollectionHandle")
            .field("namespace", &self.inner.namespace())
            .finish()
    }
}
