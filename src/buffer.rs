use std::fmt::Debug;
use std::sync::Arc;

use num_traits::{Float, NumAssignOps};

use crate::error::FerrogradError;
use crate::types::DType;

/// Enum representing the data buffer backing a tensor.
///
/// Only CPU buffers exist today; the enum keeps the door open for device
/// buffers without touching `TensorData`.
#[derive(Debug, Clone)]
pub enum Buffer {
    /// Data resides on the CPU.
    Cpu(CpuBuffer),
}

/// Enum for CPU-specific buffer types.
///
/// The inner `Arc<Vec<_>>` is shared by views and cheap tensor clones.
#[derive(Debug, Clone)]
pub enum CpuBuffer {
    F32(Arc<Vec<f32>>),
    F64(Arc<Vec<f64>>),
}

impl Buffer {
    /// Number of elements physically stored in the buffer.
    pub fn len(&self) -> usize {
        match self {
            Buffer::Cpu(CpuBuffer::F32(data)) => data.len(),
            Buffer::Cpu(CpuBuffer::F64(data)) => data.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The data type of the elements stored in the buffer.
    pub fn dtype(&self) -> DType {
        match self {
            Buffer::Cpu(CpuBuffer::F32(_)) => DType::F32,
            Buffer::Cpu(CpuBuffer::F64(_)) => DType::F64,
        }
    }
}

/// A trait for scalar types that can live in a CPU buffer.
///
/// Bounds the generic kernels of tensor operations (f32, f64) and bridges
/// between the dynamically-typed `Buffer` and typed slices.
pub trait CpuElement:
    Float + NumAssignOps + PartialOrd + Debug + Copy + Send + Sync + 'static
{
    /// The dynamic tag matching `Self`.
    const DTYPE: DType;

    /// Views the buffer as a typed slice, or errors if the dtype differs.
    fn cpu_slice(buffer: &Buffer) -> Result<&[Self], FerrogradError>;

    /// Wraps an owned vector into the matching CPU buffer variant.
    fn into_cpu_buffer(data: Vec<Self>) -> CpuBuffer;
}

impl CpuElement for f32 {
    const DTYPE: DType = DType::F32;

    fn cpu_slice(buffer: &Buffer) -> Result<&[f32], FerrogradError> {
        match buffer {
            Buffer::Cpu(CpuBuffer::F32(data)) => Ok(data.as_slice()),
            other => Err(FerrogradError::DataTypeMismatch {
                expected: DType::F32,
                actual: other.dtype(),
                operation: "cpu_slice".to_string(),
            }),
        }
    }

    fn into_cpu_buffer(data: Vec<f32>) -> CpuBuffer {
        CpuBuffer::F32(Arc::new(data))
    }
}

impl CpuElement for f64 {
    const DTYPE: DType = DType::F64;

    fn cpu_slice(buffer: &Buffer) -> Result<&[f64], FerrogradError> {
        match buffer {
            Buffer::Cpu(CpuBuffer::F64(data)) => Ok(data.as_slice()),
            other => Err(FerrogradError::DataTypeMismatch {
                expected: DType::F64,
                actual: other.dtype(),
                operation: "cpu_slice".to_string(),
            }),
        }
    }

    fn into_cpu_buffer(data: Vec<f64>) -> CpuBuffer {
        CpuBuffer::F64(Arc::new(data))
    }
}
