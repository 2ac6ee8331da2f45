//! Linear algebra operations.

mod matmul;

pub use matmul::matmul_op;
