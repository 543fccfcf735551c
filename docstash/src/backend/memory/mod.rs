//! In-process document store.
//!
//! Records live in memory, grouped by server address and namespace. Cloned
//! connectors share the same data, and a server can be taken offline to
//! simulate an unreachable store.

mod collection;
mod connector;
mod server;

pub use collection::*;
pub use connector::*;
pub(crate) use server::*;
