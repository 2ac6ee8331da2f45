//! Element-wise arithmetic with broadcasting.

mod add;
mod div;
mod mul;
mod neg;
mod sub;

pub use add::add_op;
pub use div::div_op;
pub use mul::mul_op;
pub use neg::neg_op;
pub use sub::sub_op;

use crate::buffer::CpuElement;
use crate::error::FerrogradError;
use crate::tensor::utils::index_to_coord;
use crate::tensor_data::TensorData;

/// Applies `f` element-wise over two tensors broadcast to `out_shape`,
/// producing a contiguous output vector.
///
/// Inputs are addressed through their own strides and offsets, so views and
/// transposed layouts work without a gather. `out_shape` must be the result
/// of `broadcast_shapes` on the two input shapes.
pub(crate) fn broadcast_zip<T: CpuElement>(
    a: &TensorData,
    b: &TensorData,
    out_shape: &[usize],
    f: impl Fn(T, T) -> T,
) -> Result<Vec<T>, FerrogradError> {
    let a_slice = T::cpu_slice(a.buffer())?;
    let b_slice = T::cpu_slice(b.buffer())?;
    let numel: usize = out_shape.iter().product();
    let rank_diff_a = out_shape.len() - a.shape.len();
    let rank_diff_b = out_shape.len() - b.shape.len();

    let mut out = Vec::with_capacity(numel);
    let mut a_coords = vec![0usize; a.shape.len()];
    let mut b_coords = vec![0usize; b.shape.len()];
    for i in 0..numel {
        let coords = index_to_coord(i, out_shape);
        for dim in 0..a.shape.len() {
            a_coords[dim] = if a.shape[dim] == 1 { 0 } else { coords[rank_diff_a + dim] };
        }
        for dim in 0..b.shape.len() {
            b_coords[dim] = if b.shape[dim] == 1 { 0 } else { coords[rank_diff_b + dim] };
        }
        out.push(f(
            a_slice[a.get_offset(&a_coords)],
            b_slice[b.get_offset(&b_coords)],
        ));
    }
    Ok(out)
}

/// Applies `f` element-wise over a single tensor, producing a contiguous
/// output vector in logical order.
pub(crate) fn unary_map<T: CpuElement>(
    a: &TensorData,
    f: impl Fn(T) -> T,
) -> Result<Vec<T>, FerrogradError> {
    let data = a.contiguous_vec::<T>()?;
    Ok(data.into_iter().map(f).collect())
}
