use super::*;
use approx::assert_relative_eq;

#[test]
fn test_div_same_shape() {
    let a = Tensor::new(vec![10.0, 9.0, 8.0], vec![3]).unwrap();
    let b = Tensor::new(vec![2.0, 3.0, 4.0], vec![3]).unwrap();
    let c = div_op(&a, &b).unwrap();
    assert_eq!(c.get_f32_data().unwrap(), vec![5.0, 3.0, 2.0]);
}

#[test]
fn test_div_by_zero_is_ieee() {
    let a = Tensor::new(vec![1.0, 0.0], vec![2]).unwrap();
    let b = Tensor::new(vec![0.0, 0.0], vec![2]).unwrap();
    let c = div_op(&a, &b).unwrap();
    let data = c.get_f32_data().unwrap();
    assert!(data[0].is_infinite());
    assert!(data[1].is_nan());
}

#[test]
fn test_div_backward() {
    // y = a / b, dy/da = 1/b, dy/db = -a/b^2
    let a = Tensor::new(vec![6.0], vec![1]).unwrap();
    let b = Tensor::new(vec![2.0], vec![1]).unwrap();
    a.set_requires_grad(true).unwrap();
    b.set_requires_grad(true).unwrap();

    let c = div_op(&a, &b).unwrap();
    c.backward(Some(Tensor::new(vec![1.0], vec![1]).unwrap()))
        .unwrap();

    assert_relative_eq!(a.grad().unwrap().get_f32_data().unwrap()[0], 0.5);
    assert_relative_eq!(b.grad().unwrap().get_f32_data().unwrap()[0], -1.5);
}

#[test]
fn test_div_broadcast_denominator_backward() {
    let a = Tensor::new(vec![2.0, 4.0, 6.0, 8.0], vec![2, 2]).unwrap();
    let b = Tensor::new(vec![2.0], vec![]).unwrap();
    b.set_requires_grad(true).unwrap();

    let c = div_op(&a, &b).unwrap();
    c.backward(Some(Tensor::new(vec![1.0; 4], vec![2, 2]).unwrap()))
        .unwrap();

    // dy/db = sum(-a / b^2) = -(2+4+6+8)/4 = -5
    let gb = b.grad().unwrap();
    assert_eq!(gb.shape(), Vec::<usize>::new());
    assert_relative_eq!(gb.get_f32_data().unwrap()[0], -5.0);
}
