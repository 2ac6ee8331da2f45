//! Fits a sequential linear model to a toy regression problem with MSE loss
//! and manual gradient-descent updates.
//!
//! Run with: `cargo run --example sequential_regression`

use ferrograd::model::Sequential;
use ferrograd::nn::{Linear, MSELoss, Module};
use ferrograd::{FerrogradError, Tensor};

fn main() -> Result<(), FerrogradError> {
    env_logger::init();

    // Ground truth: y = 2 x0 - 3 x1 + 1.
    let x = Tensor::new(
        vec![
            0.0, 0.0, //
            1.0, 0.0, //
            0.0, 1.0, //
            1.0, 1.0, //
            2.0, 1.0, //
            1.0, 2.0,
        ],
        vec![6, 2],
    )?;
    let y = Tensor::new(vec![1.0, 3.0, -2.0, 0.0, 2.0, -3.0], vec![6, 1])?;

    let mut model = Sequential::new();
    model.add_module("fit", Box::new(Linear::new(2, 1)?));
    let loss_fn = MSELoss::default();
    let lr = 0.05;

    for epoch in 0..300 {
        let pred = model.forward(&x)?;
        let loss = loss_fn.calculate(&pred, &y)?;

        model.zero_grad();
        loss.backward(None)?;

        // Manual update: p -= lr * grad, applied outside the graph.
        for param in model.parameters() {
            if let Some(grad) = param.grad() {
                param.add_scaled_(&grad.detach(), -lr)?;
            }
        }

        if epoch % 50 == 0 {
            println!("epoch {:3}  loss {:.6}", epoch, loss.item_f32()?);
        }
    }

    let final_loss = loss_fn.calculate(&model.forward(&x)?, &y)?;
    println!("final loss {:.6}", final_loss.item_f32()?);
    for (name, param) in model.named_parameters() {
        println!("{} = {:?}", name, param.tensor());
    }
    Ok(())
}
