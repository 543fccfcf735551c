//! # docstash - typed values in a document store
//!
//! docstash persists Rust values into a document database, one record per
//! value, addressed by the value of a configured key attribute. It offers
//! exactly three operations: `store` (upsert with full replace), `load`
//! (point lookup by key) and `exists`.
//!
//! ## Key Features
//!
//! - **Typed**: clients are generic over any [`Packable`](storable::Packable) type
//! - **Derivable**: `#[derive(Packable, Storable)]` from the `docstash_derive` crate
//! - **Shared connections**: a [`ConnectionRegistry`](registry::ConnectionRegistry)
//!   opens one handle per connection identity and shares it
//! - **Pluggable backends**: MongoDB (`mongodb` feature) and an in-memory store
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use docstash::client::DocumentClient;
//! use docstash::registry::ConnectionRegistry;
//! use docstash::storable::UnpackOptions;
//! use docstash_derive::{Packable, Storable};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize, Deserialize, Packable, Storable)]
//! #[storage(key = "doc_id", database = "library", collection = "papers")]
//! struct Paper {
//!     doc_id: String,
//!     title: String,
//! }
//!
//! # fn main() -> docstash::errors::DocstashResult<()> {
//! let registry = ConnectionRegistry::mongo();
//! let client = DocumentClient::<Paper>::new(registry)?;
//!
//! client.store(&Paper { doc_id: "foo12".into(), title: "On Storage".into() })?;
//! assert!(client.exists("foo12")?);
//!
//! let paper = client.load("foo12", &UnpackOptions::default())?;
//! assert_eq!(paper.map(|p| p.title), Some("On Storage".to_string()));
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Organization
//!
//! - [`backend`] - Connectors and collection providers (MongoDB, in-memory)
//! - [`client`] - The typed document client and its write result
//! - [`common`] - Shared constants and record helpers
//! - [`errors`] - Error types and result definitions
//! - [`registry`] - Connection identities and the connection registry
//! - [`storable`] - `Packable`/`Storable` traits, records, unpack options
//! - [`storage_builder`] - Builder for storage configuration
//! - [`storage_config`] - Storage configuration

pub mod backend;
pub mod client;
pub mod common;
pub mod errors;
pub mod registry;
pub mod storable;
pub mod storage_builder;
pub mod storage_config;

pub use bson;
