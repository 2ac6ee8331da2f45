use std::sync::Arc;

use num_traits::Zero;

use crate::autograd::{BackwardOp, NodeId};
use crate::buffer::CpuElement;
use crate::error::FerrogradError;
use crate::ops::view::transpose_op;
use crate::ops::{attach_grad_fn, check_binary_compat, tracks_grad};
use crate::tensor::Tensor;
use crate::tensor_data::TensorData;
use crate::types::DType;

/// Matrix multiplication of two 2-D tensors: `[m, k] x [k, n] -> [m, n]`.
pub fn matmul_op(a: &Tensor, b: &Tensor) -> Result<Tensor, FerrogradError> {
    let dtype = check_binary_compat(a, b, "matmul")?;
    let a_shape = a.shape();
    let b_shape = b.shape();

    if a_shape.len() != 2 || b_shape.len() != 2 {
        return Err(FerrogradError::UnsupportedOperation(format!(
            "matmul expects 2-D tensors, got ranks {} and {}",
            a_shape.len(),
            b_shape.len()
        )));
    }
    if a_shape[1] != b_shape[0] {
        return Err(FerrogradError::IncompatibleShapes {
            lhs: a_shape.clone(),
            rhs: b_shape.clone(),
            operation: "matmul".to_string(),
        });
    }

    let (m, k, n) = (a_shape[0], a_shape[1], b_shape[1]);
    let output = {
        let a_guard = a.read_data();
        let b_guard = b.read_data();
        match dtype {
            DType::F32 => {
                let data = matmul_kernel::<f32>(&a_guard, &b_guard, m, k, n)?;
                Tensor::from_vec(data, vec![m, n])?
            }
            DType::F64 => {
                let data = matmul_kernel::<f64>(&a_guard, &b_guard, m, k, n)?;
                Tensor::from_vec(data, vec![m, n])?
            }
        }
    };

    if tracks_grad(a) || tracks_grad(b) {
        let grad_fn = MatmulBackward {
            a: a.clone(),
            b: b.clone(),
        };
        attach_grad_fn(&output, Arc::new(grad_fn))?;
    }
    Ok(output)
}

/// Naive triple-loop kernel addressing both inputs through their strides,
/// so transposed views multiply without a copy.
fn matmul_kernel<T: CpuElement>(
    a: &TensorData,
    b: &TensorData,
    m: usize,
    k: usize,
    n: usize,
) -> Result<Vec<T>, FerrogradError> {
    let a_slice = T::cpu_slice(a.buffer())?;
    let b_slice = T::cpu_slice(b.buffer())?;
    let mut out = vec![T::zero(); m * n];
    for i in 0..m {
        for j in 0..n {
            let mut acc = T::zero();
            for p in 0..k {
                let av = a_slice[a.offset + i * a.strides[0] + p * a.strides[1]];
                let bv = b_slice[b.offset + p * b.strides[0] + j * b.strides[1]];
                acc += av * bv;
            }
            out[i * n + j] = acc;
        }
    }
    Ok(out)
}

/// For C = A x B: dA = dC x B^T and dB = A^T x dC.
#[derive(Debug)]
struct MatmulBackward {
    a: Tensor,
    b: Tensor,
}

impl BackwardOp for MatmulBackward {
    fn backward(&self, grad_output: &Tensor) -> Result<Vec<Tensor>, FerrogradError> {
        let a = self.a.detach();
        let b = self.b.detach();
        let grad_a = matmul_op(grad_output, &transpose_op(&b, 0, 1)?)?;
        let grad_b = matmul_op(&transpose_op(&a, 0, 1)?, grad_output)?;
        Ok(vec![grad_a, grad_b])
    }

    fn inputs(&self) -> Vec<NodeId> {
        vec![self.a.node_id(), self.b.node_id()]
    }
}

impl Tensor {
    /// Matrix multiplication of two 2-D tensors.
    pub fn matmul(&self, other: &Tensor) -> Result<Tensor, FerrogradError> {
        matmul_op(self, other)
    }
}

#[cfg(test)]
#[path = "matmul_test.rs"]
mod tests;
