use std::sync::Arc;

use crate::autograd::{BackwardOp, NodeId};
use crate::error::FerrogradError;
use crate::ops::{attach_grad_fn, tracks_grad};
use crate::tensor::Tensor;
use crate::tensor_data::TensorData;

/// Swaps two dimensions of a tensor, returning a view (no data copy, only
/// shape and strides change).
pub fn transpose_op(t: &Tensor, dim0: usize, dim1: usize) -> Result<Tensor, FerrogradError> {
    let rank = t.rank();
    if dim0 >= rank {
        return Err(FerrogradError::InvalidDimension { dim: dim0, rank });
    }
    if dim1 >= rank {
        return Err(FerrogradError::InvalidDimension { dim: dim1, rank });
    }

    let output = {
        let guard = t.read_data();
        let mut shape = guard.shape.clone();
        let mut strides = guard.strides.clone();
        shape.swap(dim0, dim1);
        strides.swap(dim0, dim1);
        Tensor::from_data(TensorData::new_view(
            Arc::clone(guard.buffer()),
            guard.offset,
            shape,
            strides,
        ))
    };

    if tracks_grad(t) {
        let grad_fn = TransposeBackward {
            input: t.clone(),
            dim0,
            dim1,
        };
        attach_grad_fn(&output, Arc::new(grad_fn))?;
    }
    Ok(output)
}

/// The gradient of a transpose is the same transpose applied to the
/// incoming gradient.
#[derive(Debug)]
struct TransposeBackward {
    input: Tensor,
    dim0: usize,
    dim1: usize,
}

impl BackwardOp for TransposeBackward {
    fn backward(&self, grad_output: &Tensor) -> Result<Vec<Tensor>, FerrogradError> {
        Ok(vec![transpose_op(grad_output, self.dim0, self.dim1)?])
    }

    fn inputs(&self) -> Vec<NodeId> {
        vec![self.input.node_id()]
    }
}

impl Tensor {
    /// Swaps two dimensions, returning a view.
    pub fn transpose(&self, dim0: usize, dim1: usize) -> Result<Tensor, FerrogradError> {
        transpose_op(self, dim0, dim1)
    }

    /// Transposes a 2-D tensor (shorthand for `transpose(0, 1)`).
    pub fn t(&self) -> Result<Tensor, FerrogradError> {
        transpose_op(self, 0, 1)
    }
}

#[cfg(test)]
#[path = "transpose_test.rs"]
mod tests;
