//! Reverse-mode autograd on a few scalar and matrix expressions.
//!
//! Run with: `cargo run --example autograd_intro`

use ferrograd::{FerrogradError, Tensor};

fn main() -> Result<(), FerrogradError> {
    env_logger::init();

    // y = x * x + 3x at x = 2; dy/dx = 2x + 3 = 7.
    let x = Tensor::new(vec![2.0], vec![])?;
    x.set_requires_grad(true)?;
    let three = Tensor::new(vec![3.0], vec![])?;
    let y = x.mul(&x)?.add(&x.mul(&three)?)?;
    println!("y = {}", y.item_f32()?);
    y.backward(None)?;
    if let Some(g) = x.grad() {
        println!("dy/dx = {}", g.item_f32()?);
    }

    // Gradients accumulate across backward calls until cleared.
    x.clear_grad();
    let y1 = x.mul(&x)?;
    y1.backward(None)?;
    let y2 = x.mul(&x)?;
    y2.backward(None)?;
    if let Some(g) = x.grad() {
        println!("accumulated d(x^2)/dx over two passes = {}", g.item_f32()?);
    }

    // A matrix chain: loss = mean(relu(X W)).
    let xs = Tensor::new(vec![1.0, -1.0, 0.5, 2.0], vec![2, 2])?;
    let w = Tensor::new(vec![0.5, -0.25, 1.0, 0.75], vec![2, 2])?;
    w.set_requires_grad(true)?;

    let loss = xs.matmul(&w)?.relu()?.mean(&[], false)?;
    println!("loss = {}", loss.item_f32()?);
    loss.backward(None)?;
    println!("dloss/dW = {:?}", w.grad());

    // Interior nodes route gradients but do not keep them.
    let h = xs.matmul(&w)?;
    let l = h.mean(&[], false)?;
    l.backward(None)?;
    println!("interior grad is None: {}", h.grad().is_none());

    Ok(())
}
