use std::fmt;

use crate::tensor::Tensor;
use crate::types::DType;

// Tensors can be large; the formatter prints at most this many elements.
const MAX_PRINT_ELEMS: usize = 16;

impl fmt::Debug for Tensor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let guard = self.read_data();
        write!(
            f,
            "Tensor(shape={:?}, dtype={:?}, device={:?}, requires_grad={}",
            guard.shape, guard.dtype, guard.device, guard.requires_grad
        )?;
        drop(guard);

        let numel = self.numel();
        let shown = numel.min(MAX_PRINT_ELEMS);
        match self.dtype() {
            DType::F32 => {
                if let Ok(data) = self.get_f32_data() {
                    write!(f, ", data={:?}", &data[..shown])?;
                }
            }
            DType::F64 => {
                if let Ok(data) = self.get_f64_data() {
                    write!(f, ", data={:?}", &data[..shown])?;
                }
            }
        }
        if numel > shown {
            write!(f, " (+{} more)", numel - shown)?;
        }
        write!(f, ")")
    }
}
