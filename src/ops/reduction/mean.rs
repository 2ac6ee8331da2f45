use crate::error::FerrogradError;
use crate::ops::arithmetic::mul_op;
use crate::ops::reduction::sum_op;
use crate::tensor::Tensor;
use crate::types::DType;

/// Averages a tensor over the given axes.
///
/// Composed as `sum(t, axes) * (1 / count)`, so the backward pass falls out
/// of the sum and multiplication nodes with no bespoke gradient code.
pub fn mean_op(t: &Tensor, axes: &[usize], keep_dims: bool) -> Result<Tensor, FerrogradError> {
    let shape = t.shape();
    let rank = shape.len();
    for &ax in axes {
        if ax >= rank {
            return Err(FerrogradError::InvalidDimension { dim: ax, rank });
        }
    }

    let count: usize = if axes.is_empty() {
        shape.iter().product()
    } else {
        let mut seen = vec![false; rank];
        for &ax in axes {
            seen[ax] = true;
        }
        shape
            .iter()
            .enumerate()
            .filter(|&(dim, _)| seen[dim])
            .map(|(_, &size)| size)
            .product()
    };
    if count == 0 {
        return Err(FerrogradError::UnsupportedOperation(
            "mean over zero elements".to_string(),
        ));
    }

    let summed = sum_op(t, axes, keep_dims)?;
    let scale = match t.dtype() {
        DType::F32 => Tensor::new(vec![1.0f32 / count as f32], vec![])?,
        DType::F64 => Tensor::new_f64(vec![1.0f64 / count as f64], vec![])?,
    };
    mul_op(&summed, &scale)
}

impl Tensor {
    /// Averages over the given axes (empty slice averages everything).
    pub fn mean(&self, axes: &[usize], keep_dims: bool) -> Result<Tensor, FerrogradError> {
        mean_op(self, axes, keep_dims)
    }
}

#[cfg(test)]
#[path = "mean_test.rs"]
mod tests;
