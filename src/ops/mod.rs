//! Tensor operations.
//!
//! Each operation lives in a submodule grouped by category and exposes an
//! `xxx_op` function performing the forward computation and wiring up the
//! backward pass. Operations requiring gradients have a `XxxBackward` struct
//! implementing [`BackwardOp`](crate::autograd::BackwardOp) that stores the
//! forward-pass context (strong handles to the inputs, saved shapes) needed
//! to compute input gradients.
//!
//! The `Tensor` methods (`t.add(&u)`, `t.matmul(&u)`, ...) are thin wrappers
//! over these functions and are defined next to them.

pub mod activation;
pub mod arithmetic;
pub mod linalg;
pub mod reduction;
pub mod view;

use std::sync::Arc;

use crate::autograd::BackwardOp;
use crate::error::FerrogradError;
use crate::tensor::Tensor;
use crate::types::DType;

/// Whether an op consuming `t` must record a backward node.
pub(crate) fn tracks_grad(t: &Tensor) -> bool {
    let guard = t.read_data();
    guard.requires_grad || guard.grad_fn.is_some()
}

/// Installs `op` as the backward node of `output` and marks it as part of
/// the graph.
pub(crate) fn attach_grad_fn(
    output: &Tensor,
    op: Arc<dyn BackwardOp>,
) -> Result<(), FerrogradError> {
    let mut guard = output.write_data();
    guard.grad_fn = Some(op);
    guard.requires_grad = true;
    Ok(())
}

/// Validates device and dtype agreement for a binary op, returning the
/// common dtype.
pub(crate) fn check_binary_compat(
    a: &Tensor,
    b: &Tensor,
    operation: &str,
) -> Result<DType, FerrogradError> {
    if a.device() != b.device() {
        return Err(FerrogradError::DeviceMismatch {
            expected: a.device(),
            actual: b.device(),
            operation: operation.to_string(),
        });
    }
    if a.dtype() != b.dtype() {
        return Err(FerrogradError::DataTypeMismatch {
            expected: a.dtype(),
            actual: b.dtype(),
            operation: operation.to_string(),
        });
    }
    Ok(a.dtype())
}
