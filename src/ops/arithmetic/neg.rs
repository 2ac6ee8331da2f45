use std::sync::Arc;

use crate::autograd::{BackwardOp, NodeId};
use crate::error::FerrogradError;
use crate::ops::arithmetic::unary_map;
use crate::ops::{attach_grad_fn, tracks_grad};
use crate::tensor::Tensor;
use crate::types::DType;

/// Element-wise negation: `-a`.
pub fn neg_op(a: &Tensor) -> Result<Tensor, FerrogradError> {
    let shape = a.shape();
    let output = {
        let guard = a.read_data();
        match guard.dtype {
            DType::F32 => Tensor::from_vec(unary_map::<f32>(&guard, |x| -x)?, shape)?,
            DType::F64 => Tensor::from_vec(unary_map::<f64>(&guard, |x| -x)?, shape)?,
        }
    };

    if tracks_grad(a) {
        attach_grad_fn(&output, Arc::new(NegBackward { input: a.clone() }))?;
    }
    Ok(output)
}

/// d(-a)/da = -1.
#[derive(Debug)]
struct NegBackward {
    input: Tensor,
}

impl BackwardOp for NegBackward {
    fn backward(&self, grad_output: &Tensor) -> Result<Vec<Tensor>, FerrogradError> {
        Ok(vec![neg_op(grad_output)?])
    }

    fn inputs(&self) -> Vec<NodeId> {
        vec![self.input.node_id()]
    }
}

impl Tensor {
    /// Element-wise negation.
    pub fn neg(&self) -> Result<Tensor, FerrogradError> {
        neg_op(self)
    }
}

#[cfg(test)]
#[path = "neg_test.rs"]
mod tests;
