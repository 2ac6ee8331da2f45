use rand::Rng;
use rand_distr::StandardNormal;

use crate::error::FerrogradError;
use crate::tensor::Tensor;
use crate::types::DType;

/// Creates a new F32 tensor filled with zeros.
pub fn zeros(shape: &[usize]) -> Result<Tensor, FerrogradError> {
    let numel = shape.iter().product();
    Tensor::new(vec![0.0f32; numel], shape.to_vec())
}

/// Creates a new F64 tensor filled with zeros.
pub fn zeros_f64(shape: &[usize]) -> Result<Tensor, FerrogradError> {
    let numel = shape.iter().product();
    Tensor::new_f64(vec![0.0f64; numel], shape.to_vec())
}

/// Creates a new F32 tensor filled with ones.
pub fn ones(shape: &[usize]) -> Result<Tensor, FerrogradError> {
    let numel = shape.iter().product();
    Tensor::new(vec![1.0f32; numel], shape.to_vec())
}

/// Creates a new F64 tensor filled with ones.
pub fn ones_f64(shape: &[usize]) -> Result<Tensor, FerrogradError> {
    let numel = shape.iter().product();
    Tensor::new_f64(vec![1.0f64; numel], shape.to_vec())
}

/// Creates a new F32 tensor filled with `value`.
pub fn full(shape: &[usize], value: f32) -> Result<Tensor, FerrogradError> {
    let numel = shape.iter().product();
    Tensor::new(vec![value; numel], shape.to_vec())
}

/// Creates a new F64 tensor filled with `value`.
pub fn full_f64(shape: &[usize], value: f64) -> Result<Tensor, FerrogradError> {
    let numel = shape.iter().product();
    Tensor::new_f64(vec![value; numel], shape.to_vec())
}

/// Creates a tensor of zeros with the same shape and dtype as `tensor`.
pub fn zeros_like(tensor: &Tensor) -> Result<Tensor, FerrogradError> {
    match tensor.dtype() {
        DType::F32 => zeros(&tensor.shape()),
        DType::F64 => zeros_f64(&tensor.shape()),
    }
}

/// Creates a tensor of ones with the same shape and dtype as `tensor`.
pub fn ones_like(tensor: &Tensor) -> Result<Tensor, FerrogradError> {
    match tensor.dtype() {
        DType::F32 => ones(&tensor.shape()),
        DType::F64 => ones_f64(&tensor.shape()),
    }
}

/// Creates a 1-D F32 tensor with values `start, start+step, ...` up to (not
/// including) `end`.
pub fn arange(start: f32, end: f32, step: f32) -> Result<Tensor, FerrogradError> {
    if step == 0.0 || (end > start && step < 0.0) || (end < start && step > 0.0) {
        return Err(FerrogradError::UnsupportedOperation(format!(
            "Invalid step {} for arange({}, {})",
            step, start, end
        )));
    }
    let numel = ((end - start) / step).ceil().max(0.0) as usize;
    let data: Vec<f32> = (0..numel).map(|i| start + i as f32 * step).collect();
    Tensor::new(data, vec![numel])
}

/// Creates an `n` x `n` F32 identity matrix.
pub fn eye(n: usize) -> Result<Tensor, FerrogradError> {
    let mut data = vec![0.0f32; n * n];
    for i in 0..n {
        data[i * n + i] = 1.0;
    }
    Tensor::new(data, vec![n, n])
}

/// Creates an F32 tensor with elements sampled uniformly from [0, 1).
pub fn rand(shape: &[usize]) -> Result<Tensor, FerrogradError> {
    let numel = shape.iter().product();
    let mut rng = rand::thread_rng();
    let data: Vec<f32> = (0..numel).map(|_| rng.gen::<f32>()).collect();
    Tensor::new(data, shape.to_vec())
}

/// Creates an F32 tensor with elements sampled from the standard normal
/// distribution.
pub fn randn(shape: &[usize]) -> Result<Tensor, FerrogradError> {
    let numel = shape.iter().product();
    let mut rng = rand::thread_rng();
    let data: Vec<f32> = (0..numel).map(|_| rng.sample(StandardNormal)).collect();
    Tensor::new(data, shape.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zeros_ones_full() {
        let z = zeros(&[2, 2]).unwrap();
        assert_eq!(z.get_f32_data().unwrap(), vec![0.0; 4]);
        let o = ones(&[3]).unwrap();
        assert_eq!(o.get_f32_data().unwrap(), vec![1.0; 3]);
        let f = full(&[2], 7.5).unwrap();
        assert_eq!(f.get_f32_data().unwrap(), vec![7.5, 7.5]);
    }

    #[test]
    fn test_like_constructors_preserve_dtype() {
        let t = zeros_f64(&[2, 2]).unwrap();
        let o = ones_like(&t).unwrap();
        assert_eq!(o.dtype(), DType::F64);
        assert_eq!(o.shape(), vec![2, 2]);
    }

    #[test]
    fn test_arange() {
        let t = arange(0.0, 5.0, 1.0).unwrap();
        assert_eq!(t.get_f32_data().unwrap(), vec![0.0, 1.0, 2.0, 3.0, 4.0]);
        assert!(arange(0.0, 5.0, 0.0).is_err());
        assert!(arange(5.0, 0.0, 1.0).is_err());
    }

    #[test]
    fn test_eye() {
        let t = eye(3).unwrap();
        assert_eq!(t.get_f32(&[0, 0]).unwrap(), 1.0);
        assert_eq!(t.get_f32(&[0, 1]).unwrap(), 0.0);
        assert_eq!(t.get_f32(&[2, 2]).unwrap(), 1.0);
    }

    #[test]
    fn test_rand_bounds() {
        let t = rand(&[100]).unwrap();
        for v in t.get_f32_data().unwrap() {
            assert!((0.0..1.0).contains(&v));
        }
    }

    #[test]
    fn test_randn_shape() {
        let t = randn(&[4, 5]).unwrap();
        assert_eq!(t.shape(), vec![4, 5]);
        assert_eq!(t.numel(), 20);
    }
}
