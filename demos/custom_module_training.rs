//! A hand-written two-layer module trained with the SGD optimizer.
//!
//! Run with: `cargo run --example custom_module_training`

use ferrograd::nn::{Linear, MSELoss, Module, Parameter};
use ferrograd::optim::{Optimizer, Sgd};
use ferrograd::{FerrogradError, Tensor};

/// Two linear layers with a ReLU in between.
#[derive(Debug)]
struct TwoLayerNet {
    hidden: Linear,
    output: Linear,
}

impl TwoLayerNet {
    fn new(in_features: usize, hidden_size: usize, out_features: usize) -> Result<Self, FerrogradError> {
        Ok(TwoLayerNet {
            hidden: Linear::new(in_features, hidden_size)?,
            output: Linear::new(hidden_size, out_features)?,
        })
    }
}

impl Module for TwoLayerNet {
    fn forward(&self, input: &Tensor) -> Result<Tensor, FerrogradError> {
        let h = self.hidden.forward(input)?.relu()?;
        self.output.forward(&h)
    }

    fn parameters(&self) -> Vec<Parameter> {
        let mut params = self.hidden.parameters();
        params.extend(self.output.parameters());
        params
    }
}

fn main() -> Result<(), FerrogradError> {
    env_logger::init();

    // XOR-ish targets: nonlinear, so the hidden layer has work to do.
    let x = Tensor::new(
        vec![
            0.0, 0.0, //
            0.0, 1.0, //
            1.0, 0.0, //
            1.0, 1.0,
        ],
        vec![4, 2],
    )?;
    let y = Tensor::new(vec![0.0, 1.0, 1.0, 0.0], vec![4, 1])?;

    let model = TwoLayerNet::new(2, 8, 1)?;
    let loss_fn = MSELoss::default();
    let mut opt = Sgd::with_momentum(model.parameters(), 0.1, 0.9)?;

    for epoch in 0..500 {
        let pred = model.forward(&x)?;
        let loss = loss_fn.calculate(&pred, &y)?;

        opt.zero_grad();
        loss.backward(None)?;
        opt.step()?;

        if epoch % 100 == 0 {
            println!("epoch {:3}  loss {:.6}", epoch, loss.item_f32()?);
        }
    }

    let pred = model.forward(&x)?;
    println!("predictions = {:?}", pred.get_f32_data()?);
    println!("targets     = {:?}", y.get_f32_data()?);
    Ok(())
}
