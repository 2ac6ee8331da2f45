use std::str::FromStr;

use crate::error::FerrogradError;
use crate::ops::reduction::{mean_op, sum_op};
use crate::tensor::Tensor;

/// How a loss collapses its per-element values into a scalar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Reduction {
    /// Average over all elements.
    #[default]
    Mean,
    /// Sum over all elements.
    Sum,
}

impl FromStr for Reduction {
    type Err = FerrogradError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mean" => Ok(Reduction::Mean),
            "sum" => Ok(Reduction::Sum),
            other => Err(FerrogradError::UnsupportedOperation(format!(
                "Unknown reduction '{}', expected 'mean' or 'sum'",
                other
            ))),
        }
    }
}

/// Mean squared error: `reduce((predictions - targets)^2)`.
///
/// Composed from subtraction, multiplication and a reduction, so gradients
/// flow through the existing op backwards. The result is non-negative and
/// zero exactly when predictions equal targets.
#[derive(Debug, Clone, Copy, Default)]
pub struct MSELoss {
    reduction: Reduction,
}

impl MSELoss {
    pub fn new(reduction: Reduction) -> Self {
        MSELoss { reduction }
    }

    pub fn reduction(&self) -> Reduction {
        self.reduction
    }

    /// Computes the loss as a scalar tensor (shape `[]`).
    pub fn calculate(
        &self,
        predictions: &Tensor,
        targets: &Tensor,
    ) -> Result<Tensor, FerrogradError> {
        if predictions.shape() != targets.shape() {
            return Err(FerrogradError::ShapeMismatch {
                expected: predictions.shape(),
                actual: targets.shape(),
                operation: "MSELoss".to_string(),
            });
        }
        let diff = predictions.sub(targets)?;
        let squared = diff.mul(&diff)?;
        match self.reduction {
            Reduction::Mean => mean_op(&squared, &[], false),
            Reduction::Sum => sum_op(&squared, &[], false),
        }
    }
}

#[cfg(test)]
#[path = "mse_test.rs"]
mod tests;
