use super::*;
use approx::assert_relative_eq;

#[test]
fn test_matmul_2x3_3x2() {
    let a = Tensor::new(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], vec![2, 3]).unwrap();
    let b = Tensor::new(vec![7.0, 8.0, 9.0, 10.0, 11.0, 12.0], vec![3, 2]).unwrap();
    let c = matmul_op(&a, &b).unwrap();
    assert_eq!(c.shape(), vec![2, 2]);
    assert_eq!(c.get_f32_data().unwrap(), vec![58.0, 64.0, 139.0, 154.0]);
}

#[test]
fn test_matmul_inner_dim_mismatch() {
    let a = Tensor::new(vec![1.0, 2.0, 3.0, 4.0], vec![2, 2]).unwrap();
    let b = Tensor::new(vec![1.0, 2.0, 3.0], vec![3, 1]).unwrap();
    assert!(matches!(
        matmul_op(&a, &b),
        Err(FerrogradError::IncompatibleShapes { .. })
    ));
}

#[test]
fn test_matmul_rejects_non_2d() {
    let a = Tensor::new(vec![1.0, 2.0], vec![2]).unwrap();
    let b = Tensor::new(vec![1.0, 2.0], vec![2, 1]).unwrap();
    assert!(matches!(
        matmul_op(&a, &b),
        Err(FerrogradError::UnsupportedOperation(_))
    ));
}

#[test]
fn test_matmul_with_transposed_view() {
    // B is a stride-swapped view; the kernel must honor its strides.
    let a = Tensor::new(vec![1.0, 2.0, 3.0, 4.0], vec![2, 2]).unwrap();
    let b = Tensor::new(vec![1.0, 2.0, 3.0, 4.0], vec![2, 2]).unwrap();
    let bt = transpose_op(&b, 0, 1).unwrap();
    let c = matmul_op(&a, &bt).unwrap();
    // [[1,2],[3,4]] x [[1,3],[2,4]] = [[5,11],[11,25]]
    assert_eq!(c.get_f32_data().unwrap(), vec![5.0, 11.0, 11.0, 25.0]);
}

#[test]
fn test_matmul_backward() {
    let a = Tensor::new(vec![1.0, 2.0, 3.0, 4.0], vec![2, 2]).unwrap();
    let b = Tensor::new(vec![5.0, 6.0, 7.0, 8.0], vec![2, 2]).unwrap();
    a.set_requires_grad(true).unwrap();
    b.set_requires_grad(true).unwrap();

    let c = matmul_op(&a, &b).unwrap();
    c.backward(Some(Tensor::new(vec![1.0; 4], vec![2, 2]).unwrap()))
        .unwrap();

    // dA = dC x B^T with dC = ones: rows sum B's rows
    let ga = a.grad().unwrap().get_f32_data().unwrap();
    assert_relative_eq!(ga[0], 11.0);
    assert_relative_eq!(ga[1], 15.0);
    assert_relative_eq!(ga[2], 11.0);
    assert_relative_eq!(ga[3], 15.0);

    // dB = A^T x dC with dC = ones: rows sum A's columns
    let gb = b.grad().unwrap().get_f32_data().unwrap();
    assert_relative_eq!(gb[0], 4.0);
    assert_relative_eq!(gb[1], 4.0);
    assert_relative_eq!(gb[2], 6.0);
    assert_relative_eq!(gb[3], 6.0);
}
