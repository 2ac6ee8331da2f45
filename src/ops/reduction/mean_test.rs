use super::*;
use approx::assert_relative_eq;

#[test]
fn test_mean_all() {
    let t = Tensor::new(vec![1.0, 2.0, 3.0, 4.0], vec![2, 2]).unwrap();
    let m = mean_op(&t, &[], false).unwrap();
    assert_eq!(m.shape(), Vec::<usize>::new());
    assert_relative_eq!(m.item_f32().unwrap(), 2.5);
}

#[test]
fn test_mean_axis() {
    let t = Tensor::new(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], vec![2, 3]).unwrap();
    let m = mean_op(&t, &[1], false).unwrap();
    assert_eq!(m.shape(), vec![2]);
    let data = m.get_f32_data().unwrap();
    assert_relative_eq!(data[0], 2.0);
    assert_relative_eq!(data[1], 5.0);
}

#[test]
fn test_mean_backward_scales_by_count() {
    let t = Tensor::new(vec![1.0, 2.0, 3.0, 4.0], vec![2, 2]).unwrap();
    t.set_requires_grad(true).unwrap();
    let m = mean_op(&t, &[], false).unwrap();
    m.backward(None).unwrap();
    let g = t.grad().unwrap().get_f32_data().unwrap();
    for v in g {
        assert_relative_eq!(v, 0.25);
    }
}

#[test]
fn test_mean_empty_tensor_rejected() {
    let t = Tensor::new(vec![], vec![0]).unwrap();
    assert!(matches!(
        mean_op(&t, &[], false),
        Err(FerrogradError::UnsupportedOperation(_))
    ));
}
