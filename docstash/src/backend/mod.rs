//! Document store backends.
//!
//! A backend is a [`Connector`] that opens [`CollectionHandle`]s. The
//! registry calls the connector at most once per connection identity and
//! hands out clones of the resulting handle.
//!
//! # Backends
//!
//! - **MongoDB** (`mongodb` feature, on by default): [`mongo::MongoConnector`]
//!   talks to a server through the synchronous MongoDB driver.
//! - **In-Memory**: [`memory::InMemoryConnector`] keeps records in process,
//!   for tests and embedding.

mod collection_provider;
mod connector;
pub mod memory;
#[cfg(feature = "mongodb")]
pub mod mongo;

pub use collection_provider::*;
pub use connector::*;
