//! `pack`/`unpack` for any serde type, through BSON.
//!
//! `#[derive(Packable)]` expands to calls into this module.

use crate::errors::{DocstashError, DocstashResult};
use crate::storable::{Record, UnpackOptions};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Serializes `value` into a record.
///
/// # Errors
///
/// `ObjectMappingError` when the value does not serialize to a document
/// (a bare scalar or sequence, say) or a field cannot be represented in BSON.
pub fn pack<T: Serialize>(value: &T) -> DocstashResult<Record> {
    bson::to_document(value).map_err(|err| {
        log::error!("Failed to pack {}: {}", std::any::type_name::<T>(), err);
        DocstashError::from(err)
    })
}

/// Applies `options` to `record` and deserializes the result.
///
/// # Errors
///
/// `ObjectMappingError` when the record does not match `T`'s shape.
pub fn unpack<T: DeserializeOwned>(record: Record, options: &UnpackOptions) -> DocstashResult<T> {
    let record = options.apply(record);
    bson::from_document(record).map_err(|err| {
        log::error!("Failed to unpack {}: {}", std::any::type_name::<T>(), err);
        DocstashError::from(err)
    })
}
