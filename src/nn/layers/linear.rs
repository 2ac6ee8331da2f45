use crate::error::FerrogradError;
use crate::nn::init;
use crate::nn::module::Module;
use crate::nn::parameter::Parameter;
use crate::tensor::{zeros, Tensor};

/// A fully connected layer: `y = x W^T + b`.
///
/// The weight has shape `[out_features, in_features]` and the optional bias
/// `[out_features]`. Inputs are `[batch, in_features]`; the bias broadcasts
/// over the batch dimension. The forward pass is composed from matmul,
/// transpose and add, so the backward pass needs no dedicated gradient code.
#[derive(Debug)]
pub struct Linear {
    weight: Parameter,
    bias: Option<Parameter>,
    in_features: usize,
    out_features: usize,
}

impl Linear {
    /// Creates a layer with weights drawn uniformly from
    /// `[-1/sqrt(in_features), 1/sqrt(in_features))`, bias included.
    pub fn new(in_features: usize, out_features: usize) -> Result<Self, FerrogradError> {
        Self::build(in_features, out_features, true)
    }

    /// Creates a layer without a bias term.
    pub fn new_no_bias(in_features: usize, out_features: usize) -> Result<Self, FerrogradError> {
        Self::build(in_features, out_features, false)
    }

    fn build(
        in_features: usize,
        out_features: usize,
        has_bias: bool,
    ) -> Result<Self, FerrogradError> {
        let weight_tensor = init::uniform_fan_in(&[out_features, in_features], in_features)?;
        let weight = Parameter::new(weight_tensor, Some("weight".to_string()));

        let bias = if has_bias {
            let bias_tensor = zeros(&[out_features])?;
            Some(Parameter::new(bias_tensor, Some("bias".to_string())))
        } else {
            None
        };

        Ok(Linear {
            weight,
            bias,
            in_features,
            out_features,
        })
    }

    /// Replaces the weight tensor (shape `[out_features, in_features]`).
    /// Useful for tests and deterministic setups.
    pub fn set_weight(&mut self, weight: Tensor) -> Result<(), FerrogradError> {
        let expected = vec![self.out_features, self.in_features];
        if weight.shape() != expected {
            return Err(FerrogradError::ShapeMismatch {
                expected,
                actual: weight.shape(),
                operation: "Linear::set_weight".to_string(),
            });
        }
        self.weight = Parameter::new(weight, Some("weight".to_string()));
        Ok(())
    }

    /// Replaces the bias tensor (shape `[out_features]`). Errors if the
    /// layer was built without a bias.
    pub fn set_bias(&mut self, bias: Tensor) -> Result<(), FerrogradError> {
        if self.bias.is_none() {
            return Err(FerrogradError::UnsupportedOperation(
                "Linear layer has no bias".to_string(),
            ));
        }
        let expected = vec![self.out_features];
        if bias.shape() != expected {
            return Err(FerrogradError::ShapeMismatch {
                expected,
                actual: bias.shape(),
                operation: "Linear::set_bias".to_string(),
            });
        }
        self.bias = Some(Parameter::new(bias, Some("bias".to_string())));
        Ok(())
    }

    pub fn weight(&self) -> &Parameter {
        &self.weight
    }

    pub fn bias(&self) -> Option<&Parameter> {
        self.bias.as_ref()
    }

    pub fn in_features(&self) -> usize {
        self.in_features
    }

    pub fn out_features(&self) -> usize {
        self.out_features
    }
}

impl Module for Linear {
    fn forward(&self, input: &Tensor) -> Result<Tensor, FerrogradError> {
        let input_shape = input.shape();
        if input_shape.len() != 2 || input_shape[1] != self.in_features {
            return Err(FerrogradError::ShapeMismatch {
                expected: vec![input_shape.first().copied().unwrap_or(1), self.in_features],
                actual: input_shape,
                operation: "Linear::forward".to_string(),
            });
        }

        let projected = input.matmul(&self.weight.t()?)?;
        match &self.bias {
            Some(bias) => projected.add(bias.tensor()),
            None => Ok(projected),
        }
    }

    fn parameters(&self) -> Vec<Parameter> {
        let mut params = vec![self.weight.clone()];
        if let Some(bias) = &self.bias {
            params.push(bias.clone());
        }
        params
    }
}

#[cfg(test)]
#[path = "linear_test.rs"]
mod tests;
