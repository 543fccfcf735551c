//! Connection registry.
//!
//! The registry memoizes collection handles per [`ConnectionIdentity`] so
//! that every client configured for the same store shares one connection.
//! It is an ordinary value: create one, clone it into every client that
//! should share connections, and drop it to release them.

mod connection_identity;
mod connection_registry;

pub use connection_identity::*;
pub use connection_registry::*;
