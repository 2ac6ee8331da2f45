use std::sync::Arc;

use crate::autograd::{BackwardOp, NodeId};
use crate::error::FerrogradError;
use crate::ops::{attach_grad_fn, tracks_grad};
use crate::tensor::utils::calculate_strides;
use crate::tensor::Tensor;
use crate::tensor_data::TensorData;
use crate::types::DType;

/// Reinterprets a tensor with a new shape holding the same elements.
///
/// Contiguous tensors are reshaped as a view (shared storage); strided views
/// are gathered into a fresh contiguous buffer first.
pub fn reshape_op(t: &Tensor, new_shape: Vec<usize>) -> Result<Tensor, FerrogradError> {
    let old_shape = t.shape();
    let old_numel: usize = old_shape.iter().product();
    let new_numel: usize = new_shape.iter().product();
    if old_numel != new_numel {
        return Err(FerrogradError::IncompatibleShapes {
            lhs: old_shape.clone(),
            rhs: new_shape,
            operation: "reshape".to_string(),
        });
    }

    let output = {
        let guard = t.read_data();
        if guard.is_contiguous() {
            let strides = calculate_strides(&new_shape);
            Tensor::from_data(TensorData::new_view(
                Arc::clone(guard.buffer()),
                guard.offset,
                new_shape,
                strides,
            ))
        } else {
            match guard.dtype {
                DType::F32 => Tensor::from_vec(guard.contiguous_vec::<f32>()?, new_shape)?,
                DType::F64 => Tensor::from_vec(guard.contiguous_vec::<f64>()?, new_shape)?,
            }
        }
    };

    if tracks_grad(t) {
        let grad_fn = ReshapeBackward {
            input: t.clone(),
            input_shape: old_shape,
        };
        attach_grad_fn(&output, Arc::new(grad_fn))?;
    }
    Ok(output)
}

/// The gradient of a reshape is the incoming gradient reshaped back to the
/// input's shape.
#[derive(Debug)]
struct ReshapeBackward {
    input: Tensor,
    input_shape: Vec<usize>,
}

impl BackwardOp for ReshapeBackward {
    fn backward(&self, grad_output: &Tensor) -> Result<Vec<Tensor>, FerrogradError> {
        Ok(vec![reshape_op(grad_output, self.input_shape.clone())?])
    }

    fn inputs(&self) -> Vec<NodeId> {
        vec![self.input.node_id()]
    }
}

impl Tensor {
    /// Reinterprets this tensor with a new shape holding the same elements.
    pub fn reshape(&self, new_shape: Vec<usize>) -> Result<Tensor, FerrogradError> {
        reshape_op(self, new_shape)
    }
}

#[cfg(test)]
#[path = "reshape_test.rs"]
mod tests;
