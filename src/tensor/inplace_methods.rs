use std::sync::Arc;

use crate::buffer::{Buffer, CpuBuffer};
use crate::error::FerrogradError;
use crate::tensor::Tensor;
use crate::types::DType;

impl Tensor {
    /// In-place `self += alpha * other`, elementwise over equal shapes.
    ///
    /// This is the primitive behind parameter updates (`w -= lr * g` is
    /// `w.add_scaled_(&g, -lr)`). The update happens outside the autograd
    /// graph: it neither creates nor clears a `grad_fn`, and it is legal on
    /// leaf tensors that require grad.
    ///
    /// Copy-on-write: if the underlying buffer is shared with views, it is
    /// cloned before mutation so other tensors keep their old values.
    pub fn add_scaled_(&self, other: &Tensor, alpha: f64) -> Result<(), FerrogradError> {
        if other.shape() != self.shape() {
            return Err(FerrogradError::ShapeMismatch {
                expected: self.shape(),
                actual: other.shape(),
                operation: "add_scaled_".to_string(),
            });
        }
        if other.dtype() != self.dtype() {
            return Err(FerrogradError::DataTypeMismatch {
                expected: self.dtype(),
                actual: other.dtype(),
                operation: "add_scaled_".to_string(),
            });
        }

        // Gather the addend before taking the write lock, so that
        // `t.add_scaled_(&t, a)` cannot deadlock on the shared RwLock.
        let dtype = self.dtype();
        let other_f32;
        let other_f64;
        match dtype {
            DType::F32 => {
                other_f32 = other.read_data().contiguous_vec::<f32>()?;
                other_f64 = Vec::new();
            }
            DType::F64 => {
                other_f64 = other.read_data().contiguous_vec::<f64>()?;
                other_f32 = Vec::new();
            }
        }

        let mut guard = self.write_data();
        let shape = guard.shape.clone();
        let strides = guard.strides.clone();
        let offset = guard.offset;
        let numel = guard.numel();

        match guard.dtype {
            DType::F32 => {
                let Buffer::Cpu(CpuBuffer::F32(vec_arc)) = Arc::make_mut(&mut guard.buffer)
                else {
                    return Err(FerrogradError::InternalError(
                        "dtype tag disagrees with buffer variant".to_string(),
                    ));
                };
                let vec = Arc::make_mut(vec_arc);
                apply_scaled(vec, &other_f32, alpha as f32, &shape, &strides, offset, numel);
            }
            DType::F64 => {
                let Buffer::Cpu(CpuBuffer::F64(vec_arc)) = Arc::make_mut(&mut guard.buffer)
                else {
                    return Err(FerrogradError::InternalError(
                        "dtype tag disagrees with buffer variant".to_string(),
                    ));
                };
                let vec = Arc::make_mut(vec_arc);
                apply_scaled(vec, &other_f64, alpha, &shape, &strides, offset, numel);
            }
        }
        Ok(())
    }
}

/// Walks logical indices (strides + offset) and applies `data += alpha * other`.
fn apply_scaled<T>(
    data: &mut [T],
    other: &[T],
    alpha: T,
    shape: &[usize],
    strides: &[usize],
    base_offset: usize,
    numel: usize,
) where
    T: Copy + std::ops::Mul<Output = T> + std::ops::AddAssign,
{
    let mut indices = vec![0usize; shape.len()];
    for flat in 0..numel {
        let mut offset = base_offset;
        for (dim, &idx) in indices.iter().enumerate() {
            offset += idx * strides[dim];
        }
        data[offset] += alpha * other[flat];
        for dim in (0..indices.len()).rev() {
            indices[dim] += 1;
            if indices[dim] < shape[dim] {
                break;
            }
            indices[dim] = 0;
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::error::FerrogradError;
    use crate::tensor::Tensor;

    #[test]
    fn test_add_scaled_basic() {
        let t = Tensor::new(vec![1.0, 2.0, 3.0], vec![3]).unwrap();
        let g = Tensor::new(vec![10.0, 10.0, 10.0], vec![3]).unwrap();
        t.add_scaled_(&g, -0.1).unwrap();
        let data = t.get_f32_data().unwrap();
        assert!((data[0] - 0.0).abs() < 1e-6);
        assert!((data[1] - 1.0).abs() < 1e-6);
        assert!((data[2] - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_add_scaled_shape_mismatch() {
        let t = Tensor::new(vec![1.0, 2.0], vec![2]).unwrap();
        let g = Tensor::new(vec![1.0], vec![1]).unwrap();
        assert!(matches!(
            t.add_scaled_(&g, 1.0),
            Err(FerrogradError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn test_add_scaled_copy_on_write() {
        let t = Tensor::new(vec![1.0, 2.0], vec![2]).unwrap();
        let frozen = t.detach();
        // detach shares the buffer; mutating t must not change frozen
        t.add_scaled_(&Tensor::new(vec![1.0, 1.0], vec![2]).unwrap(), 1.0)
            .unwrap();
        assert_eq!(t.get_f32_data().unwrap(), vec![2.0, 3.0]);
        assert_eq!(frozen.get_f32_data().unwrap(), vec![1.0, 2.0]);
    }
}
