use std::sync::Arc;

use crate::autograd::{BackwardOp, NodeId};
use crate::error::FerrogradError;
use crate::ops::arithmetic::{broadcast_zip, mul_op, neg_op};
use crate::ops::{attach_grad_fn, check_binary_compat, tracks_grad};
use crate::tensor::broadcast_utils::reduce_to_shape;
use crate::tensor::utils::broadcast_shapes;
use crate::tensor::Tensor;
use crate::types::DType;

/// Element-wise division with broadcasting: `a / b`.
///
/// Division by zero follows IEEE 754 semantics (inf / NaN), matching the
/// behavior of the underlying float types.
pub fn div_op(a: &Tensor, b: &Tensor) -> Result<Tensor, FerrogradError> {
    let dtype = check_binary_compat(a, b, "div")?;
    let out_shape = broadcast_shapes(&a.shape(), &b.shape())?;

    let output = {
        let a_guard = a.read_data();
        let b_guard = b.read_data();
        match dtype {
            DType::F32 => {
                let data = broadcast_zip::<f32>(&a_guard, &b_guard, &out_shape, |x, y| x / y)?;
                Tensor::from_vec(data, out_shape)?
            }
            DType::F64 => {
                let data = broadcast_zip::<f64>(&a_guard, &b_guard, &out_shape, |x, y| x / y)?;
                Tensor::from_vec(data, out_shape)?
            }
        }
    };

    if tracks_grad(a) || tracks_grad(b) {
        let grad_fn = DivBackward {
            a: a.clone(),
            b: b.clone(),
            a_shape: a.shape(),
            b_shape: b.shape(),
        };
        attach_grad_fn(&output, Arc::new(grad_fn))?;
    }
    Ok(output)
}

/// d(a / b)/da = 1 / b, d(a / b)/db = -a / b^2.
#[derive(Debug)]
struct DivBackward {
    a: Tensor,
    b: Tensor,
    a_shape: Vec<usize>,
    b_shape: Vec<usize>,
}

impl BackwardOp for DivBackward {
    fn backward(&self, grad_output: &Tensor) -> Result<Vec<Tensor>, FerrogradError> {
        let a = self.a.detach();
        let b = self.b.detach();

        let grad_a = reduce_to_shape(&div_op(grad_output, &b)?, &self.a_shape)?;

        let b_squared = mul_op(&b, &b)?;
        let num = mul_op(grad_output, &a)?;
        let grad_b = reduce_to_shape(&neg_op(&div_op(&num, &b_squared)?)?, &self.b_shape)?;

        Ok(vec![grad_a, grad_b])
    }

    fn inputs(&self) -> Vec<NodeId> {
        vec![self.a.node_id(), self.b.node_id()]
    }
}

impl Tensor {
    /// Element-wise division with broadcasting.
    pub fn div(&self, other: &Tensor) -> Result<Tensor, FerrogradError> {
        div_op(self, other)
    }
}

#[cfg(test)]
#[path = "div_test.rs"]
mod tests;
