use crate::error::FerrogradError;

/// Calculates the strides for a contiguous (row-major) layout of `shape`.
pub fn calculate_strides(shape: &[usize]) -> Vec<usize> {
    let mut strides = vec![0; shape.len()];
    if shape.is_empty() {
        return strides;
    }
    strides[shape.len() - 1] = 1;
    for i in (0..shape.len() - 1).rev() {
        strides[i] = strides[i + 1] * shape[i + 1];
    }
    strides
}

/// Computes the broadcast result shape of two shapes, following the usual
/// trailing-dimension alignment rules (a dimension of size 1 stretches).
pub fn broadcast_shapes(a: &[usize], b: &[usize]) -> Result<Vec<usize>, FerrogradError> {
    let rank = a.len().max(b.len());
    let mut out = vec![0; rank];
    for i in 0..rank {
        let dim_a = if i < rank - a.len() { 1 } else { a[i - (rank - a.len())] };
        let dim_b = if i < rank - b.len() { 1 } else { b[i - (rank - b.len())] };
        out[i] = if dim_a == dim_b {
            dim_a
        } else if dim_a == 1 {
            dim_b
        } else if dim_b == 1 {
            dim_a
        } else {
            return Err(FerrogradError::BroadcastError {
                shape1: a.to_vec(),
                shape2: b.to_vec(),
            });
        };
    }
    Ok(out)
}

/// Converts a flat index into multi-dimensional coordinates for `shape`.
pub fn index_to_coord(mut index: usize, shape: &[usize]) -> Vec<usize> {
    let mut coord = vec![0; shape.len()];
    for i in (0..shape.len()).rev() {
        if shape[i] > 0 {
            coord[i] = index % shape[i];
            index /= shape[i];
        }
    }
    coord
}
