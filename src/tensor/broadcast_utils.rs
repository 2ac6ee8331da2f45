use crate::error::FerrogradError;
use crate::ops::reduction::sum_op;
use crate::ops::view::reshape_op;
use crate::tensor::Tensor;

/// Reduces a gradient computed at a broadcast shape back to the shape of the
/// input that was broadcast.
///
/// Sums over the leading dimensions the broadcast introduced, then over every
/// dimension the input exposed as size 1. Used by the backward passes of the
/// broadcasting elementwise ops.
pub(crate) fn reduce_to_shape(
    grad: &Tensor,
    target_shape: &[usize],
) -> Result<Tensor, FerrogradError> {
    let grad_shape = grad.shape();
    if grad_shape == target_shape {
        return Ok(grad.clone());
    }

    let rank_diff = grad_shape.len().saturating_sub(target_shape.len());
    let mut reduced = grad.clone();
    if rank_diff > 0 {
        let leading: Vec<usize> = (0..rank_diff).collect();
        reduced = sum_op(&reduced, &leading, false)?;
    }

    let axes: Vec<usize> = target_shape
        .iter()
        .enumerate()
        .filter(|&(i, &dim)| dim == 1 && reduced.shape()[i] != 1)
        .map(|(i, _)| i)
        .collect();
    if !axes.is_empty() {
        reduced = sum_op(&reduced, &axes, true)?;
    }

    if reduced.shape() != target_shape {
        // Ranks can differ when the target is a scalar reduced from [1, 1, ...].
        reduced = reshape_op(&reduced, target_shape.to_vec())?;
    }
    Ok(reduced)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reduce_identity() {
        let g = Tensor::new(vec![1.0, 2.0], vec![2]).unwrap();
        let r = reduce_to_shape(&g, &[2]).unwrap();
        assert_eq!(r.get_f32_data().unwrap(), vec![1.0, 2.0]);
    }

    #[test]
    fn test_reduce_leading_dim() {
        let g = Tensor::new(vec![1.0, 2.0, 3.0, 4.0], vec![2, 2]).unwrap();
        let r = reduce_to_shape(&g, &[2]).unwrap();
        assert_eq!(r.shape(), vec![2]);
        assert_eq!(r.get_f32_data().unwrap(), vec![4.0, 6.0]);
    }

    #[test]
    fn test_reduce_size_one_dim() {
        let g = Tensor::new(vec![1.0, 2.0, 3.0, 4.0], vec![2, 2]).unwrap();
        let r = reduce_to_shape(&g, &[1, 2]).unwrap();
        assert_eq!(r.shape(), vec![1, 2]);
        assert_eq!(r.get_f32_data().unwrap(), vec![4.0, 6.0]);
    }
}
