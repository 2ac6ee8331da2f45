use std::sync::Arc;

use num_traits::Zero;

use crate::autograd::{BackwardOp, NodeId};
use crate::buffer::CpuElement;
use crate::error::FerrogradError;
use crate::ops::{attach_grad_fn, tracks_grad};
use crate::tensor::utils::calculate_strides;
use crate::tensor::Tensor;
use crate::tensor_data::TensorData;
use crate::types::DType;

/// Sums a tensor over the given axes.
///
/// An empty `axes` slice reduces over every dimension, yielding a scalar
/// (shape `[]`) when `keep_dims` is false. With `keep_dims` the reduced
/// dimensions remain in the output with size 1, which keeps the result
/// broadcastable against the input.
pub fn sum_op(t: &Tensor, axes: &[usize], keep_dims: bool) -> Result<Tensor, FerrogradError> {
    let shape = t.shape();
    let rank = shape.len();
    for &ax in axes {
        if ax >= rank {
            return Err(FerrogradError::InvalidDimension { dim: ax, rank });
        }
    }

    let mut reduce = vec![false; rank];
    if axes.is_empty() {
        reduce.iter_mut().for_each(|r| *r = true);
    } else {
        for &ax in axes {
            reduce[ax] = true;
        }
    }

    let mut out_shape = Vec::new();
    for (dim, &size) in shape.iter().enumerate() {
        if reduce[dim] {
            if keep_dims {
                out_shape.push(1);
            }
        } else {
            out_shape.push(size);
        }
    }

    let output = {
        let guard = t.read_data();
        match guard.dtype {
            DType::F32 => {
                let data = sum_kernel::<f32>(&guard, &reduce, &out_shape, keep_dims)?;
                Tensor::from_vec(data, out_shape)?
            }
            DType::F64 => {
                let data = sum_kernel::<f64>(&guard, &reduce, &out_shape, keep_dims)?;
                Tensor::from_vec(data, out_shape)?
            }
        }
    };

    if tracks_grad(t) {
        let grad_fn = SumBackward {
            input: t.clone(),
            input_shape: shape,
            reduce,
            keep_dims,
        };
        attach_grad_fn(&output, Arc::new(grad_fn))?;
    }
    Ok(output)
}

/// Maps the coordinates of an input element to the flat index of the output
/// cell it reduces into.
fn reduced_flat_index(
    coords: &[usize],
    reduce: &[bool],
    out_strides: &[usize],
    keep_dims: bool,
) -> usize {
    let mut flat = 0;
    let mut out_dim = 0;
    for (dim, &coord) in coords.iter().enumerate() {
        if reduce[dim] {
            if keep_dims {
                out_dim += 1;
            }
        } else {
            flat += coord * out_strides[out_dim];
            out_dim += 1;
        }
    }
    flat
}

fn sum_kernel<T: CpuElement>(
    data: &TensorData,
    reduce: &[bool],
    out_shape: &[usize],
    keep_dims: bool,
) -> Result<Vec<T>, FerrogradError> {
    let slice = T::cpu_slice(data.buffer())?;
    let out_strides = calculate_strides(out_shape);
    let out_numel: usize = out_shape.iter().product();
    let mut out = vec![T::zero(); out_numel];

    let numel = data.numel();
    let mut coords = vec![0usize; data.shape.len()];
    for _ in 0..numel {
        let flat = reduced_flat_index(&coords, reduce, &out_strides, keep_dims);
        out[flat] += slice[data.get_offset(&coords)];
        for dim in (0..coords.len()).rev() {
            coords[dim] += 1;
            if coords[dim] < data.shape[dim] {
                break;
            }
            coords[dim] = 0;
        }
    }
    Ok(out)
}

/// dSum/dx = 1 for every element: the output gradient is broadcast back to
/// the cells that contributed to each reduced value.
#[derive(Debug)]
struct SumBackward {
    input: Tensor,
    input_shape: Vec<usize>,
    reduce: Vec<bool>,
    keep_dims: bool,
}

impl SumBackward {
    fn expand<T: CpuElement>(&self, grad: &[T]) -> Vec<T> {
        let mut out_shape = Vec::new();
        for (dim, &size) in self.input_shape.iter().enumerate() {
            if self.reduce[dim] {
                if self.keep_dims {
                    out_shape.push(1);
                }
            } else {
                out_shape.push(size);
            }
        }
        let out_strides = calculate_strides(&out_shape);

        let numel: usize = self.input_shape.iter().product();
        let mut expanded = Vec::with_capacity(numel);
        let mut coords = vec![0usize; self.input_shape.len()];
        for _ in 0..numel {
            let flat = reduced_flat_index(&coords, &self.reduce, &out_strides, self.keep_dims);
            expanded.push(grad[flat]);
            for dim in (0..coords.len()).rev() {
                coords[dim] += 1;
                if coords[dim] < self.input_shape[dim] {
                    break;
                }
                coords[dim] = 0;
            }
        }
        expanded
    }
}

impl BackwardOp for SumBackward {
    fn backward(&self, grad_output: &Tensor) -> Result<Vec<Tensor>, FerrogradError> {
        let grad = match grad_output.dtype() {
            DType::F32 => {
                let g = grad_output.get_f32_data()?;
                Tensor::from_vec(self.expand::<f32>(&g), self.input_shape.clone())?
            }
            DType::F64 => {
                let g = grad_output.get_f64_data()?;
                Tensor::from_vec(self.expand::<f64>(&g), self.input_shape.clone())?
            }
        };
        Ok(vec![grad])
    }

    fn inputs(&self) -> Vec<NodeId> {
        vec![self.input.node_id()]
    }
}

impl Tensor {
    /// Sums over the given axes (empty slice sums everything).
    pub fn sum(&self, axes: &[usize], keep_dims: bool) -> Result<Tensor, FerrogradError> {
        sum_op(self, axes, keep_dims)
    }
}

#[cfg(test)]
#[path = "sum_test.rs"]
mod tests;
