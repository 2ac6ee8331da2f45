use super::*;
use crate::ops::view::transpose_op;

#[test]
fn test_contiguous_noop_on_contiguous() {
    let t = Tensor::new(vec![1.0, 2.0], vec![2]).unwrap();
    let c = contiguous_op(&t).unwrap();
    assert_eq!(t.node_id(), c.node_id());
}

#[test]
fn test_contiguous_materializes_view() {
    let t = Tensor::new(vec![1.0, 2.0, 3.0, 4.0], vec![2, 2]).unwrap();
    let tt = transpose_op(&t, 0, 1).unwrap();
    let c = contiguous_op(&tt).unwrap();
    assert!(c.is_contiguous());
    assert_eq!(c.strides(), vec![2, 1]);
    assert_eq!(c.get_f32_data().unwrap(), vec![1.0, 3.0, 2.0, 4.0]);
}

#[test]
fn test_contiguous_backward_is_identity() {
    let t = Tensor::new(vec![1.0, 2.0, 3.0, 4.0], vec![2, 2]).unwrap();
    t.set_requires_grad(true).unwrap();
    let tt = transpose_op(&t, 0, 1).unwrap();
    let c = contiguous_op(&tt).unwrap();
    c.backward(Some(Tensor::new(vec![1.0, 2.0, 3.0, 4.0], vec![2, 2]).unwrap()))
        .unwrap();
    // Passed through contiguous unchanged, then un-transposed.
    assert_eq!(
        t.grad().unwrap().get_f32_data().unwrap(),
        vec![1.0, 3.0, 2.0, 4.0]
    );
}
