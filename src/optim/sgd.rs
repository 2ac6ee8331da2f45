use crate::error::FerrogradError;
use crate::nn::parameter::Parameter;
use crate::ops::arithmetic::{add_op, mul_op};
use crate::optim::optimizer::Optimizer;
use crate::tensor::Tensor;
use crate::types::DType;

/// Stochastic gradient descent with optional classical momentum.
///
/// Without momentum each step is `p -= lr * grad`. With momentum the update
/// direction is a running buffer `v = momentum * v + grad`, stepped as
/// `p -= lr * v`. Updates happen through `add_scaled_`, so they never enter
/// the computation graph.
pub struct Sgd {
    params: Vec<Parameter>,
    lr: f64,
    momentum: f64,
    velocity: Vec<Option<Tensor>>,
}

impl Sgd {
    pub fn new(params: Vec<Parameter>, lr: f64) -> Result<Self, FerrogradError> {
        Self::with_momentum(params, lr, 0.0)
    }

    pub fn with_momentum(
        params: Vec<Parameter>,
        lr: f64,
        momentum: f64,
    ) -> Result<Self, FerrogradError> {
        if lr <= 0.0 || !lr.is_finite() {
            return Err(FerrogradError::UnsupportedOperation(format!(
                "Invalid learning rate: {}",
                lr
            )));
        }
        if momentum < 0.0 || momentum >= 1.0 {
            return Err(FerrogradError::UnsupportedOperation(format!(
                "Invalid momentum: {}",
                momentum
            )));
        }
        let velocity = vec![None; params.len()];
        Ok(Sgd {
            params,
            lr,
            momentum,
            velocity,
        })
    }

    pub fn learning_rate(&self) -> f64 {
        self.lr
    }

    pub fn set_learning_rate(&mut self, lr: f64) -> Result<(), FerrogradError> {
        if lr <= 0.0 || !lr.is_finite() {
            return Err(FerrogradError::UnsupportedOperation(format!(
                "Invalid learning rate: {}",
                lr
            )));
        }
        self.lr = lr;
        Ok(())
    }
}

impl Optimizer for Sgd {
    fn step(&mut self) -> Result<(), FerrogradError> {
        for (index, param) in self.params.iter().enumerate() {
            let grad = match param.grad() {
                Some(g) => g.detach(),
                None => continue,
            };

            let direction = if self.momentum > 0.0 {
                let updated = match &self.velocity[index] {
                    Some(v) => {
                        let scale = momentum_scalar(param.dtype(), self.momentum)?;
                        add_op(&mul_op(v, &scale)?, &grad)?
                    }
                    None => grad,
                };
                self.velocity[index] = Some(updated.clone());
                updated
            } else {
                grad
            };

            log::trace!(
                "sgd step: param {} ({:?}), lr {}",
                param.name().unwrap_or("<unnamed>"),
                param.shape(),
                self.lr
            );
            param.add_scaled_(&direction, -self.lr)?;
        }
        Ok(())
    }

    fn zero_grad(&mut self) {
        for param in &self.params {
            param.zero_grad();
        }
    }
}

fn momentum_scalar(dtype: DType, momentum: f64) -> Result<Tensor, FerrogradError> {
    match dtype {
        DType::F32 => Tensor::new(vec![momentum as f32], vec![]),
        DType::F64 => Tensor::new_f64(vec![momentum], vec![]),
    }
}

#[cfg(test)]
#[path = "sgd_test.rs"]
mod tests;
