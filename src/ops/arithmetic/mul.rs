use std::sync::Arc;

use crate::autograd::{BackwardOp, NodeId};
use crate::error::FerrogradError;
use crate::ops::arithmetic::broadcast_zip;
use crate::ops::{attach_grad_fn, check_binary_compat, tracks_grad};
use crate::tensor::broadcast_utils::reduce_to_shape;
use crate::tensor::utils::broadcast_shapes;
use crate::tensor::Tensor;
use crate::types::DType;

/// Element-wise multiplication with broadcasting: `a * b`.
pub fn mul_op(a: &Tensor, b: &Tensor) -> Result<Tensor, FerrogradError> {
    let dtype = check_binary_compat(a, b, "mul")?;
    let out_shape = broadcast_shapes(&a.shape(), &b.shape())?;

    let output = {
        let a_guard = a.read_data();
        let b_guard = b.read_data();
        match dtype {
            DType::F32 => {
                let data = broadcast_zip::<f32>(&a_guard, &b_guard, &out_shape, |x, y| x * y)?;
                Tensor::from_vec(data, out_shape)?
            }
            DType::F64 => {
                let data = broadcast_zip::<f64>(&a_guard, &b_guard, &out_shape, |x, y| x * y)?;
                Tensor::from_vec(data, out_shape)?
            }
        }
    };

    if tracks_grad(a) || tracks_grad(b) {
        let grad_fn = MulBackward {
            a: a.clone(),
            b: b.clone(),
            a_shape: a.shape(),
            b_shape: b.shape(),
        };
        attach_grad_fn(&output, Arc::new(grad_fn))?;
    }
    Ok(output)
}

/// d(a * b)/da = b, d(a * b)/db = a. The saved inputs are detached before
/// use so the gradient computation stays out of the graph.
#[derive(Debug)]
struct MulBackward {
    a: Tensor,
    b: Tensor,
    a_shape: Vec<usize>,
    b_shape: Vec<usize>,
}

impl BackwardOp for MulBackward {
    fn backward(&self, grad_output: &Tensor) -> Result<Vec<Tensor>, FerrogradError> {
        let grad_a = reduce_to_shape(&mul_op(grad_output, &self.b.detach())?, &self.a_shape)?;
        let grad_b = reduce_to_shape(&mul_op(grad_output, &self.a.detach())?, &self.b_shape)?;
        Ok(vec![grad_a, grad_b])
    }

    fn inputs(&self) -> Vec<NodeId> {
        vec![self.a.node_id(), self.b.node_id()]
    }
}

impl Tensor {
    /// Element-wise multiplication with broadcasting.
    pub fn mul(&self, other: &Tensor) -> Result<Tensor, FerrogradError> {
        mul_op(self, other)
    }
}

#[cfg(test)]
#[path = "mul_test.rs"]
mod tests;
