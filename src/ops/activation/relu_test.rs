use super::*;

#[test]
fn test_relu_forward() {
    let t = Tensor::new(vec![-1.0, 0.0, 2.0, -3.0], vec![4]).unwrap();
    let r = relu_op(&t).unwrap();
    assert_eq!(r.get_f32_data().unwrap(), vec![0.0, 0.0, 2.0, 0.0]);
}

#[test]
fn test_relu_backward_masks_negative() {
    let t = Tensor::new(vec![-1.0, 0.5, 2.0], vec![3]).unwrap();
    t.set_requires_grad(true).unwrap();
    let r = relu_op(&t).unwrap();
    r.backward(Some(Tensor::new(vec![10.0, 10.0, 10.0], vec![3]).unwrap()))
        .unwrap();
    assert_eq!(
        t.grad().unwrap().get_f32_data().unwrap(),
        vec![0.0, 10.0, 10.0]
    );
}

#[test]
fn test_relu_zero_gets_zero_grad() {
    let t = Tensor::new(vec![0.0], vec![1]).unwrap();
    t.set_requires_grad(true).unwrap();
    let r = relu_op(&t).unwrap();
    r.backward(Some(Tensor::new(vec![5.0], vec![1]).unwrap()))
        .unwrap();
    assert_eq!(t.grad().unwrap().get_f32_data().unwrap(), vec![0.0]);
}
