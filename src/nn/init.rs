use rand::Rng;

use crate::error::FerrogradError;
use crate::tensor::Tensor;

/// Samples an F32 tensor uniformly from `[low, high)`.
pub fn uniform(shape: &[usize], low: f32, high: f32) -> Result<Tensor, FerrogradError> {
    if low >= high {
        return Err(FerrogradError::UnsupportedOperation(format!(
            "uniform init requires low < high, got [{}, {})",
            low, high
        )));
    }
    let numel = shape.iter().product();
    let mut rng = rand::thread_rng();
    let data: Vec<f32> = (0..numel).map(|_| rng.gen_range(low..high)).collect();
    Tensor::new(data, shape.to_vec())
}

/// The default fan-in based initialization for linear layers: uniform over
/// `[-1/sqrt(fan_in), 1/sqrt(fan_in))`.
pub fn uniform_fan_in(shape: &[usize], fan_in: usize) -> Result<Tensor, FerrogradError> {
    let bound = 1.0 / (fan_in.max(1) as f32).sqrt();
    uniform(shape, -bound, bound)
}
