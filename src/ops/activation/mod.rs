//! Activation functions.

mod relu;

pub use relu::relu_op;
