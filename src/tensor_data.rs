use std::sync::Arc;

use crate::autograd::BackwardOp;
use crate::buffer::{Buffer, CpuElement};
use crate::device::StorageDevice;
use crate::error::FerrogradError;
use crate::tensor::utils::calculate_strides;
use crate::tensor::Tensor;
use crate::types::DType;

/// Internal storage and metadata for a Tensor.
///
/// Holds the actual data buffer, shape, strides, device, data type, and
/// autograd-related information. Always wrapped in `Arc<RwLock<TensorData>>`
/// by the `Tensor` struct to allow shared ownership and interior mutability.
#[derive(Debug)]
pub struct TensorData {
    /// The underlying data buffer, shared (via Arc) with views and clones.
    pub(crate) buffer: Arc<Buffer>,
    /// The device where the buffer resides.
    pub(crate) device: StorageDevice,
    /// The data type of the elements in the buffer.
    pub(crate) dtype: DType,

    /// The shape (dimensions) of the tensor.
    pub(crate) shape: Vec<usize>,
    /// Strides: the jump in buffer elements to move one step along a dimension.
    pub(crate) strides: Vec<usize>,
    /// Offset into the buffer of the first element (used by views).
    pub(crate) offset: usize,

    /// Whether operations on this tensor are tracked in the computation graph.
    pub(crate) requires_grad: bool,
    /// The accumulated gradient, populated during the backward pass.
    /// Same shape and dtype as this tensor.
    pub(crate) grad: Option<Tensor>,
    /// The backward node of the operation that produced this tensor.
    /// Leaf tensors (created directly by the user) have `grad_fn = None`.
    pub(crate) grad_fn: Option<Arc<dyn BackwardOp>>,
}

impl TensorData {
    /// Creates a new `TensorData` from typed data, with contiguous strides.
    ///
    /// # Errors
    /// Returns `FerrogradError::TensorCreationError` if the data length does
    /// not match the number of elements implied by `shape`.
    pub fn from_vec<T: CpuElement>(
        data_vec: Vec<T>,
        shape: Vec<usize>,
    ) -> Result<Self, FerrogradError> {
        let numel: usize = shape.iter().product();
        if data_vec.len() != numel {
            return Err(FerrogradError::TensorCreationError {
                data_len: data_vec.len(),
                shape,
            });
        }

        let strides = calculate_strides(&shape);
        let buffer = Arc::new(Buffer::Cpu(T::into_cpu_buffer(data_vec)));

        Ok(TensorData {
            buffer,
            device: StorageDevice::CPU,
            dtype: T::DTYPE,
            shape,
            strides,
            offset: 0,
            requires_grad: false,
            grad: None,
            grad_fn: None,
        })
    }

    /// Creates a `TensorData` representing a view of an existing buffer.
    ///
    /// Shares `buffer` without copying; only the metadata (offset, shape,
    /// strides) differs. Views start without autograd state; callers wire up
    /// `grad_fn` themselves when the view participates in the graph.
    pub(crate) fn new_view(
        buffer: Arc<Buffer>,
        offset: usize,
        shape: Vec<usize>,
        strides: Vec<usize>,
    ) -> Self {
        let dtype = buffer.dtype();
        TensorData {
            buffer,
            device: StorageDevice::CPU,
            dtype,
            shape,
            strides,
            offset,
            requires_grad: false,
            grad: None,
            grad_fn: None,
        }
    }

    /// Immutable access to the shared data buffer.
    pub fn buffer(&self) -> &Arc<Buffer> {
        &self.buffer
    }

    pub fn numel(&self) -> usize {
        self.shape.iter().product()
    }

    /// Calculates the linear offset into the underlying buffer for the given
    /// multi-dimensional indices, honoring strides and the view offset.
    ///
    /// # Panics
    /// Panics if the number of indices does not match the rank or an index is
    /// out of bounds; callers validate logical indices first.
    pub fn get_offset(&self, indices: &[usize]) -> usize {
        assert_eq!(
            indices.len(),
            self.shape.len(),
            "Number of indices ({}) does not match tensor rank ({})",
            indices.len(),
            self.shape.len(),
        );
        let mut relative_offset = 0;
        for (dim, &idx) in indices.iter().enumerate() {
            assert!(
                idx < self.shape[dim],
                "Index {} out of bounds for dimension {} with size {}",
                idx,
                dim,
                self.shape[dim],
            );
            relative_offset += idx * self.strides[dim];
        }
        self.offset + relative_offset
    }

    /// Checks if the tensor is laid out contiguously (row-major, no gaps).
    pub fn is_contiguous(&self) -> bool {
        let mut current_stride = 1;
        for i in (0..self.shape.len()).rev() {
            let dim = self.shape[i];
            if dim == 0 {
                return true;
            }
            if dim != 1 {
                if self.strides[i] != current_stride {
                    return false;
                }
                current_stride *= dim;
            }
        }
        true
    }

    /// Gathers the logical elements of this tensor into a fresh contiguous
    /// vector, walking strides. Works for views and transposed layouts.
    pub(crate) fn contiguous_vec<T: CpuElement>(&self) -> Result<Vec<T>, FerrogradError> {
        let slice = T::cpu_slice(&self.buffer)?;
        let numel = self.numel();
        if self.is_contiguous() {
            return Ok(slice[self.offset..self.offset + numel].to_vec());
        }
        let mut out = Vec::with_capacity(numel);
        let mut indices = vec![0usize; self.shape.len()];
        for _ in 0..numel {
            out.push(slice[self.get_offset(&indices)]);
            // Odometer-style index increment, last dimension fastest.
            for dim in (0..indices.len()).rev() {
                indices[dim] += 1;
                if indices[dim] < self.shape[dim] {
                    break;
                }
                indices[dim] = 0;
            }
        }
        Ok(out)
    }
}
