use crate::errors::DocstashResult;
use crate::storable::Packable;
use crate::storage_config::StorageConfig;

/// A [`Packable`] type with a default storage location.
///
/// Usually derived: `#[derive(Storable)]` with
/// `#[storage(key = "...", database = "...", collection = "...")]`.
pub trait Storable: Packable {
    /// The configuration [`DocumentClient::new`](crate::client::DocumentClient::new)
    /// uses for this type.
    fn storage_config() -> DocstashResult<StorageConfig>;
}
