use super::*;
use approx::assert_relative_eq;

#[test]
fn test_mse_mean() {
    let pred = Tensor::new(vec![1.0, 2.0, 3.0], vec![3]).unwrap();
    let target = Tensor::new(vec![1.0, 0.0, 1.0], vec![3]).unwrap();
    let loss = MSELoss::new(Reduction::Mean)
        .calculate(&pred, &target)
        .unwrap();
    assert_eq!(loss.shape(), Vec::<usize>::new());
    // (0 + 4 + 4) / 3
    assert_relative_eq!(loss.item_f32().unwrap(), 8.0 / 3.0);
}

#[test]
fn test_mse_sum() {
    let pred = Tensor::new(vec![1.0, 2.0], vec![2]).unwrap();
    let target = Tensor::new(vec![0.0, 0.0], vec![2]).unwrap();
    let loss = MSELoss::new(Reduction::Sum)
        .calculate(&pred, &target)
        .unwrap();
    assert_relative_eq!(loss.item_f32().unwrap(), 5.0);
}

#[test]
fn test_mse_zero_iff_equal() {
    let pred = Tensor::new(vec![1.5, -2.0], vec![2]).unwrap();
    let loss = MSELoss::default().calculate(&pred, &pred.clone()).unwrap();
    assert_relative_eq!(loss.item_f32().unwrap(), 0.0);

    let other = Tensor::new(vec![1.5, -2.1], vec![2]).unwrap();
    let loss = MSELoss::default().calculate(&pred, &other).unwrap();
    assert!(loss.item_f32().unwrap() > 0.0);
}

#[test]
fn test_mse_shape_mismatch() {
    let pred = Tensor::new(vec![1.0, 2.0], vec![2]).unwrap();
    let target = Tensor::new(vec![1.0], vec![1]).unwrap();
    assert!(matches!(
        MSELoss::default().calculate(&pred, &target),
        Err(FerrogradError::ShapeMismatch { .. })
    ));
}

#[test]
fn test_mse_backward() {
    // loss = mean((p - t)^2), dloss/dp = 2 (p - t) / n
    let pred = Tensor::new(vec![2.0, 4.0], vec![2]).unwrap();
    let target = Tensor::new(vec![1.0, 1.0], vec![2]).unwrap();
    pred.set_requires_grad(true).unwrap();

    let loss = MSELoss::default().calculate(&pred, &target).unwrap();
    loss.backward(None).unwrap();

    let g = pred.grad().unwrap().get_f32_data().unwrap();
    assert_relative_eq!(g[0], 1.0); // 2 * 1 / 2
    assert_relative_eq!(g[1], 3.0); // 2 * 3 / 2
}

#[test]
fn test_reduction_from_str() {
    assert_eq!("mean".parse::<Reduction>().unwrap(), Reduction::Mean);
    assert_eq!("sum".parse::<Reduction>().unwrap(), Reduction::Sum);
    assert!("avg".parse::<Reduction>().is_err());
}
