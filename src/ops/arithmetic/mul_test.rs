use super::*;
use approx::assert_relative_eq;

#[test]
fn test_mul_same_shape() {
    let a = Tensor::new(vec![1.0, 2.0, 3.0], vec![3]).unwrap();
    let b = Tensor::new(vec![4.0, 5.0, 6.0], vec![3]).unwrap();
    let c = mul_op(&a, &b).unwrap();
    assert_eq!(c.get_f32_data().unwrap(), vec![4.0, 10.0, 18.0]);
}

#[test]
fn test_mul_scalar_broadcast() {
    let a = Tensor::new(vec![1.0, 2.0, 3.0, 4.0], vec![2, 2]).unwrap();
    let s = Tensor::new(vec![0.5], vec![]).unwrap();
    let c = mul_op(&a, &s).unwrap();
    assert_eq!(c.shape(), vec![2, 2]);
    assert_eq!(c.get_f32_data().unwrap(), vec![0.5, 1.0, 1.5, 2.0]);
}

#[test]
fn test_mul_backward_routes_other_operand() {
    let a = Tensor::new(vec![2.0, 3.0], vec![2]).unwrap();
    let b = Tensor::new(vec![5.0, 7.0], vec![2]).unwrap();
    a.set_requires_grad(true).unwrap();
    b.set_requires_grad(true).unwrap();

    let c = mul_op(&a, &b).unwrap();
    c.backward(Some(Tensor::new(vec![1.0, 1.0], vec![2]).unwrap()))
        .unwrap();

    assert_eq!(a.grad().unwrap().get_f32_data().unwrap(), vec![5.0, 7.0]);
    assert_eq!(b.grad().unwrap().get_f32_data().unwrap(), vec![2.0, 3.0]);
}

#[test]
fn test_mul_backward_chains_grad_output() {
    let a = Tensor::new(vec![2.0], vec![1]).unwrap();
    let b = Tensor::new(vec![3.0], vec![1]).unwrap();
    a.set_requires_grad(true).unwrap();

    let c = mul_op(&a, &b).unwrap();
    c.backward(Some(Tensor::new(vec![10.0], vec![1]).unwrap()))
        .unwrap();

    assert_relative_eq!(a.grad().unwrap().get_f32_data().unwrap()[0], 30.0);
    assert!(b.grad().is_none());
}

#[test]
fn test_mul_same_tensor_squares() {
    // y = x * x, dy/dx = 2x (the two routed gradients accumulate)
    let x = Tensor::new(vec![3.0], vec![1]).unwrap();
    x.set_requires_grad(true).unwrap();
    let y = mul_op(&x, &x).unwrap();
    y.backward(Some(Tensor::new(vec![1.0], vec![1]).unwrap()))
        .unwrap();
    assert_relative_eq!(x.grad().unwrap().get_f32_data().unwrap()[0], 6.0);
}
