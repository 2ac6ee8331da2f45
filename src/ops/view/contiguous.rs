use std::sync::Arc;

use crate::autograd::{BackwardOp, NodeId};
use crate::error::FerrogradError;
use crate::ops::{attach_grad_fn, tracks_grad};
use crate::tensor::Tensor;
use crate::types::DType;

/// Returns a tensor with the same logical content laid out contiguously.
///
/// Already-contiguous tensors are returned as the same handle (no copy, no
/// new graph node).
pub fn contiguous_op(t: &Tensor) -> Result<Tensor, FerrogradError> {
    if t.is_contiguous() {
        return Ok(t.clone());
    }

    let shape = t.shape();
    let output = {
        let guard = t.read_data();
        match guard.dtype {
            DType::F32 => Tensor::from_vec(guard.contiguous_vec::<f32>()?, shape)?,
            DType::F64 => Tensor::from_vec(guard.contiguous_vec::<f64>()?, shape)?,
        }
    };

    if tracks_grad(t) {
        attach_grad_fn(&output, Arc::new(ContiguousBackward { input: t.clone() }))?;
    }
    Ok(output)
}

/// Materializing a layout does not change values, so the gradient passes
/// through unchanged.
#[derive(Debug)]
struct ContiguousBackward {
    input: Tensor,
}

impl BackwardOp for ContiguousBackward {
    fn backward(&self, grad_output: &Tensor) -> Result<Vec<Tensor>, FerrogradError> {
        Ok(vec![grad_output.clone()])
    }

    fn inputs(&self) -> Vec<NodeId> {
        vec![self.input.node_id()]
    }
}

impl Tensor {
    /// Returns a contiguously laid out tensor with the same content.
    pub fn contiguous(&self) -> Result<Tensor, FerrogradError> {
        contiguous_op(self)
    }
}

#[cfg(test)]
#[path = "contiguous_test.rs"]
mod tests;
