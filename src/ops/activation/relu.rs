use std::sync::Arc;

use num_traits::Zero;

use crate::autograd::{BackwardOp, NodeId};
use crate::buffer::CpuElement;
use crate::error::FerrogradError;
use crate::ops::arithmetic::unary_map;
use crate::ops::{attach_grad_fn, tracks_grad};
use crate::tensor::Tensor;
use crate::types::DType;

/// Rectified linear unit: `max(0, x)` element-wise.
pub fn relu_op(t: &Tensor) -> Result<Tensor, FerrogradError> {
    let shape = t.shape();
    let output = {
        let guard = t.read_data();
        match guard.dtype {
            DType::F32 => Tensor::from_vec(
                unary_map::<f32>(&guard, |x| if x > 0.0 { x } else { 0.0 })?,
                shape,
            )?,
            DType::F64 => Tensor::from_vec(
                unary_map::<f64>(&guard, |x| if x > 0.0 { x } else { 0.0 })?,
                shape,
            )?,
        }
    };

    if tracks_grad(t) {
        attach_grad_fn(&output, Arc::new(ReluBackward { input: t.clone() }))?;
    }
    Ok(output)
}

/// dReLU/dx = 1 where x > 0, else 0 (the subgradient at 0 is taken as 0).
#[derive(Debug)]
struct ReluBackward {
    input: Tensor,
}

impl ReluBackward {
    fn mask_grad<T: CpuElement>(&self, grad: &Tensor) -> Result<Tensor, FerrogradError> {
        let input = self.input.read_data().contiguous_vec::<T>()?;
        let g = grad.read_data().contiguous_vec::<T>()?;
        let masked: Vec<T> = input
            .into_iter()
            .zip(g)
            .map(|(x, dy)| if x > T::zero() { dy } else { T::zero() })
            .collect();
        Tensor::from_vec(masked, self.input.shape())
    }
}

impl BackwardOp for ReluBackward {
    fn backward(&self, grad_output: &Tensor) -> Result<Vec<Tensor>, FerrogradError> {
        let grad = match self.input.dtype() {
            DType::F32 => self.mask_grad::<f32>(grad_output)?,
            DType::F64 => self.mask_grad::<f64>(grad_output)?,
        };
        Ok(vec![grad])
    }

    fn inputs(&self) -> Vec<NodeId> {
        vec![self.input.node_id()]
    }
}

impl Tensor {
    /// Rectified linear unit, element-wise.
    pub fn relu(&self) -> Result<Tensor, FerrogradError> {
        relu_op(self)
    }
}

#[cfg(test)]
#[path = "relu_test.rs"]
mod tests;
