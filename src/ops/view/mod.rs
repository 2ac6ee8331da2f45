//! Operations that reinterpret tensor layout, sharing storage when possible.

mod contiguous;
mod reshape;
mod transpose;

pub use contiguous::contiguous_op;
pub use reshape::reshape_op;
pub use transpose::transpose_op;
