mod autograd_methods;
mod debug;
mod inplace_methods;

pub mod broadcast_utils;
pub mod create;
pub mod utils;

pub use create::{full, full_f64, ones, ones_f64, ones_like, zeros, zeros_f64, zeros_like};

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::autograd::NodeId;
use crate::buffer::CpuElement;
use crate::device::StorageDevice;
use crate::error::FerrogradError;
use crate::tensor_data::TensorData;
use crate::types::DType;

/// A multi-dimensional array with optional gradient tracking.
///
/// `Tensor` is a handle over `Arc<RwLock<TensorData>>`:
/// 1. **Shared ownership** — clones share the underlying storage (cheap).
/// 2. **Interior mutability** — autograd metadata (`requires_grad`, `grad`)
///    can be updated through an immutable handle, guarded by the `RwLock`.
pub struct Tensor {
    pub(crate) data: Arc<RwLock<TensorData>>,
}

impl Clone for Tensor {
    /// Clones the handle, not the storage.
    fn clone(&self) -> Self {
        Tensor {
            data: Arc::clone(&self.data),
        }
    }
}

impl Tensor {
    /// Creates a new F32 tensor on the CPU from raw data, with contiguous
    /// strides. The primary constructor.
    pub fn new(data_vec: Vec<f32>, shape: Vec<usize>) -> Result<Self, FerrogradError> {
        Self::from_vec(data_vec, shape)
    }

    /// Creates a new F64 tensor on the CPU from raw data.
    pub fn new_f64(data_vec: Vec<f64>, shape: Vec<usize>) -> Result<Self, FerrogradError> {
        Self::from_vec(data_vec, shape)
    }

    /// Generic constructor used by the typed entry points and the ops.
    pub(crate) fn from_vec<T: CpuElement>(
        data_vec: Vec<T>,
        shape: Vec<usize>,
    ) -> Result<Self, FerrogradError> {
        let tensor_data = TensorData::from_vec(data_vec, shape)?;
        Ok(Tensor {
            data: Arc::new(RwLock::new(tensor_data)),
        })
    }

    /// Wraps an already-built `TensorData` (views, detached tensors).
    pub(crate) fn from_data(tensor_data: TensorData) -> Self {
        Tensor {
            data: Arc::new(RwLock::new(tensor_data)),
        }
    }

    /// Returns the data type of the tensor elements.
    pub fn dtype(&self) -> DType {
        self.read_data().dtype
    }

    /// Returns the device where the tensor's data resides.
    pub fn device(&self) -> StorageDevice {
        self.read_data().device
    }

    /// Returns a clone of the tensor's shape.
    pub fn shape(&self) -> Vec<usize> {
        self.read_data().shape.clone()
    }

    /// Returns a clone of the tensor's strides.
    pub fn strides(&self) -> Vec<usize> {
        self.read_data().strides.clone()
    }

    /// Number of dimensions.
    pub fn rank(&self) -> usize {
        self.read_data().shape.len()
    }

    /// Number of elements.
    pub fn numel(&self) -> usize {
        self.read_data().numel()
    }

    pub fn is_contiguous(&self) -> bool {
        self.read_data().is_contiguous()
    }

    /// Stable identity of this tensor's node in the computation graph.
    pub(crate) fn node_id(&self) -> NodeId {
        Arc::as_ptr(&self.data)
    }

    /// Acquires a read lock on the tensor's data.
    ///
    /// Panics if the lock is poisoned; a poisoned tensor lock means a panic
    /// already happened mid-mutation and the data cannot be trusted.
    pub fn read_data(&self) -> RwLockReadGuard<'_, TensorData> {
        self.data.read().expect("Tensor RwLock poisoned")
    }

    /// Acquires a write lock on the tensor's data.
    pub fn write_data(&self) -> RwLockWriteGuard<'_, TensorData> {
        self.data.write().expect("Tensor RwLock poisoned")
    }

    /// Copies the logical elements (honoring strides) into a `Vec<f32>`.
    pub fn get_f32_data(&self) -> Result<Vec<f32>, FerrogradError> {
        self.read_data().contiguous_vec::<f32>()
    }

    /// Copies the logical elements (honoring strides) into a `Vec<f64>`.
    pub fn get_f64_data(&self) -> Result<Vec<f64>, FerrogradError> {
        self.read_data().contiguous_vec::<f64>()
    }

    /// Reads a single element at the given multi-dimensional index.
    pub fn get_f32(&self, indices: &[usize]) -> Result<f32, FerrogradError> {
        let guard = self.read_data();
        Self::check_indices(indices, &guard.shape)?;
        let slice = f32::cpu_slice(guard.buffer())?;
        Ok(slice[guard.get_offset(indices)])
    }

    /// Reads a single element of an F64 tensor.
    pub fn get_f64(&self, indices: &[usize]) -> Result<f64, FerrogradError> {
        let guard = self.read_data();
        Self::check_indices(indices, &guard.shape)?;
        let slice = f64::cpu_slice(guard.buffer())?;
        Ok(slice[guard.get_offset(indices)])
    }

    /// Extracts the value of a single-element F32 tensor.
    pub fn item_f32(&self) -> Result<f32, FerrogradError> {
        if self.numel() != 1 {
            return Err(FerrogradError::UnsupportedOperation(format!(
                "item_f32 requires a single-element tensor, got shape {:?}",
                self.shape()
            )));
        }
        Ok(self.get_f32_data()?[0])
    }

    /// Extracts the value of a single-element F64 tensor.
    pub fn item_f64(&self) -> Result<f64, FerrogradError> {
        if self.numel() != 1 {
            return Err(FerrogradError::UnsupportedOperation(format!(
                "item_f64 requires a single-element tensor, got shape {:?}",
                self.shape()
            )));
        }
        Ok(self.get_f64_data()?[0])
    }

    fn check_indices(indices: &[usize], shape: &[usize]) -> Result<(), FerrogradError> {
        let in_bounds = indices.len() == shape.len()
            && indices.iter().zip(shape.iter()).all(|(i, s)| i < s);
        if in_bounds {
            Ok(())
        } else {
            Err(FerrogradError::IndexOutOfBounds {
                index: indices.to_vec(),
                shape: shape.to_vec(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_and_accessors() {
        let t = Tensor::new(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], vec![2, 3]).unwrap();
        assert_eq!(t.shape(), vec![2, 3]);
        assert_eq!(t.strides(), vec![3, 1]);
        assert_eq!(t.numel(), 6);
        assert_eq!(t.dtype(), DType::F32);
        assert_eq!(t.device(), StorageDevice::CPU);
        assert!(t.is_contiguous());
        assert_eq!(t.get_f32(&[1, 2]).unwrap(), 6.0);
    }

    #[test]
    fn test_new_shape_mismatch() {
        let result = Tensor::new(vec![1.0, 2.0, 3.0], vec![2, 2]);
        assert!(matches!(
            result,
            Err(FerrogradError::TensorCreationError { data_len: 3, .. })
        ));
    }

    #[test]
    fn test_clone_shares_storage() {
        let t = Tensor::new(vec![1.0, 2.0], vec![2]).unwrap();
        let u = t.clone();
        assert_eq!(t.node_id(), u.node_id());
    }

    #[test]
    fn test_item_on_scalar() {
        let t = Tensor::new(vec![42.0], vec![]).unwrap();
        assert_eq!(t.item_f32().unwrap(), 42.0);
        let m = Tensor::new(vec![1.0, 2.0], vec![2]).unwrap();
        assert!(m.item_f32().is_err());
    }

    #[test]
    fn test_get_out_of_bounds() {
        let t = Tensor::new(vec![1.0, 2.0, 3.0, 4.0], vec![2, 2]).unwrap();
        assert!(matches!(
            t.get_f32(&[2, 0]),
            Err(FerrogradError::IndexOutOfBounds { .. })
        ));
    }
}
