use super::*;

#[test]
fn test_sub_same_shape() {
    let a = Tensor::new(vec![5.0, 7.0, 9.0], vec![3]).unwrap();
    let b = Tensor::new(vec![1.0, 2.0, 3.0], vec![3]).unwrap();
    let c = sub_op(&a, &b).unwrap();
    assert_eq!(c.get_f32_data().unwrap(), vec![4.0, 5.0, 6.0]);
}

#[test]
fn test_sub_backward_signs() {
    let a = Tensor::new(vec![5.0, 7.0], vec![2]).unwrap();
    let b = Tensor::new(vec![1.0, 2.0], vec![2]).unwrap();
    a.set_requires_grad(true).unwrap();
    b.set_requires_grad(true).unwrap();

    let c = sub_op(&a, &b).unwrap();
    c.backward(Some(Tensor::new(vec![1.0, 2.0], vec![2]).unwrap()))
        .unwrap();

    assert_eq!(a.grad().unwrap().get_f32_data().unwrap(), vec![1.0, 2.0]);
    assert_eq!(b.grad().unwrap().get_f32_data().unwrap(), vec![-1.0, -2.0]);
}

#[test]
fn test_sub_broadcast_backward() {
    let a = Tensor::new(vec![1.0, 2.0, 3.0, 4.0], vec![2, 2]).unwrap();
    let b = Tensor::new(vec![1.0], vec![1]).unwrap();
    b.set_requires_grad(true).unwrap();

    let c = sub_op(&a, &b).unwrap();
    c.backward(Some(Tensor::new(vec![1.0; 4], vec![2, 2]).unwrap()))
        .unwrap();

    let gb = b.grad().unwrap();
    assert_eq!(gb.shape(), vec![1]);
    assert_eq!(gb.get_f32_data().unwrap(), vec![-4.0]);
}
