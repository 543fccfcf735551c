//! Shared constants and record helpers.

mod constants;
mod record_path;

pub use constants::*;
pub use record_path::*;
