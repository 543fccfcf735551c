//! Typed store/load/exists over one collection.

mod document_client;
mod store_result;

pub use document_client::*;
pub use store_result::*;
