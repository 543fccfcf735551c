use crate::backend::CollectionHandle;
use crate::errors::DocstashResult;
use crate::registry::ConnectionIdentity;

/// Opens collection handles on a document store.
///
/// # Errors
///
/// Implementations report `ConnectionError` when the client cannot be built,
/// the server cannot be reached, or the database/collection cannot be
/// resolved. A failed `connect` must not leave anything behind that a later
/// call would observe.
pub trait Connector: Send + Sync {
    /// Opens a handle to the collection named by `identity`.
    fn connect(&self, identity: &ConnectionIdentity) -> DocstashResult<CollectionHandle>;
}
