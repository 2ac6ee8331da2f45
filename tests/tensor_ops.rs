//! Cross-module tensor behavior exercised through the public API.

use approx::assert_relative_eq;
use ferrograd::nn::MSELoss;
use ferrograd::tensor::{ones, zeros_like};
use ferrograd::{DType, FerrogradError, StorageDevice, Tensor};

#[test]
fn matmul_2x3_by_3x2_gives_2x2() {
    let a = Tensor::new(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], vec![2, 3]).unwrap();
    let b = Tensor::new(vec![7.0, 8.0, 9.0, 10.0, 11.0, 12.0], vec![3, 2]).unwrap();
    let c = a.matmul(&b).unwrap();
    assert_eq!(c.shape(), vec![2, 2]);
    assert_eq!(c.get_f32(&[0, 0]).unwrap(), 58.0);
    assert_eq!(c.get_f32(&[1, 1]).unwrap(), 154.0);
}

#[test]
fn broadcasting_matches_manual_expansion() {
    let m = Tensor::new(vec![1.0, 2.0, 3.0, 4.0], vec![2, 2]).unwrap();
    let col = Tensor::new(vec![10.0, 20.0], vec![2, 1]).unwrap();
    let sum = m.add(&col).unwrap();
    assert_eq!(sum.get_f32_data().unwrap(), vec![11.0, 12.0, 23.0, 24.0]);
}

#[test]
fn mse_is_nonnegative_and_zero_iff_equal() {
    let a = Tensor::new(vec![1.0, -2.0, 0.5], vec![3]).unwrap();
    let b = Tensor::new(vec![0.5, -2.5, 1.5], vec![3]).unwrap();

    let loss = MSELoss::default().calculate(&a, &b).unwrap().item_f32().unwrap();
    assert!(loss > 0.0);

    let zero = MSELoss::default()
        .calculate(&a, &a.clone())
        .unwrap()
        .item_f32()
        .unwrap();
    assert_relative_eq!(zero, 0.0);
}

#[test]
fn metadata_accessors() {
    let t = ones(&[3, 4]).unwrap();
    assert_eq!(t.dtype(), DType::F32);
    assert_eq!(t.device(), StorageDevice::CPU);
    assert_eq!(t.rank(), 2);
    assert_eq!(t.numel(), 12);

    let z = zeros_like(&t).unwrap();
    assert_eq!(z.shape(), t.shape());
    assert_eq!(z.sum(&[], false).unwrap().item_f32().unwrap(), 0.0);
}

#[test]
fn view_then_math_respects_layout() {
    let t = Tensor::new(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], vec![2, 3]).unwrap();
    let tt = t.t().unwrap();
    // (a^T + a^T) read back in the transposed layout.
    let doubled = tt.add(&tt).unwrap();
    assert_eq!(doubled.shape(), vec![3, 2]);
    assert_eq!(
        doubled.get_f32_data().unwrap(),
        vec![2.0, 8.0, 4.0, 10.0, 6.0, 12.0]
    );
}

#[test]
fn dtype_mismatch_is_reported() {
    let a = Tensor::new(vec![1.0], vec![1]).unwrap();
    let b = Tensor::new_f64(vec![1.0], vec![1]).unwrap();
    assert!(matches!(
        a.add(&b),
        Err(FerrogradError::DataTypeMismatch { .. })
    ));
}
