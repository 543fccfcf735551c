//! MongoDB backend built on the synchronous driver.
//!
//! Connecting pings the target database, so an unreachable server surfaces
//! as `ConnectionError` when the handle is first requested rather than on
//! the first write.

mod collection;
mod connector;

pub use collection::*;
pub use connector::*;
