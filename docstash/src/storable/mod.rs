//! The object side of storage: how typed values become records and back.
//!
//! # Traits
//!
//! - [`Packable`] converts a value into a [`Record`] and rebuilds it from one.
//! - [`Storable`] adds the per-type [`StorageConfig`](crate::storage_config::StorageConfig)
//!   a [`DocumentClient`](crate::client::DocumentClient) uses by default.
//!
//! Both are normally derived with `docstash_derive`:
//!
//! ```rust,ignore
//! use docstash_derive::{Packable, Storable};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize, Deserialize, Packable, Storable)]
//! #[storage(key = "doc_id", database = "library", collection = "books")]
//! pub struct Book {
//!     pub doc_id: String,
//!     pub title: String,
//! }
//! ```
//!
//! Hand-written implementations can reuse [`serde_pack`] or build records
//! with `bson::doc!`.

mod packable;
pub mod serde_pack;
mod storable;
mod unpack_options;

pub use packable::*;
pub use storable::*;
pub use unpack_options::*;

/// A structured record: string keys mapping to nested BSON values.
pub type Record = bson::Document;
