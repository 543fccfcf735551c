use crate::errors::DocstashResult;
use crate::storable::{Record, UnpackOptions};

/// Conversion between a value and its stored [`Record`].
///
/// `unpack(pack(x))` must produce a value whose `pack()` equals `pack(x)`.
/// The record handed to `unpack` may carry fields the store added (such as
/// `_id`, unless stripped) and fields injected through [`UnpackOptions`].
///
/// # Errors
///
/// Both directions report failures as `ObjectMappingError`.
pub trait Packable: Sized {
    fn pack(&self) -> DocstashResult<Record>;

    fn unpack(record: Record, options: &UnpackOptions) -> DocstashResult<Self>;
}
