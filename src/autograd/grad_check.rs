use std::sync::Arc;

use thiserror::Error;

use crate::buffer::{Buffer, CpuBuffer};
use crate::error::FerrogradError;
use crate::ops::arithmetic::mul_op;
use crate::ops::reduction::sum_op;
use crate::tensor::Tensor;
use crate::types::DType;

/// Failures surfaced by [`check_grad`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GradCheckError {
    #[error(
        "Gradient mismatch for input {input_index}, element {element_index}: \
         analytical {analytical:?} vs numerical {numerical:?} (diff {difference:?})"
    )]
    GradientMismatch {
        input_index: usize,
        element_index: usize,
        analytical: f64,
        numerical: f64,
        difference: f64,
    },

    #[error("Gradient check requires F64 tensors, input {input_index} is {dtype:?}")]
    UnsupportedDType { input_index: usize, dtype: DType },

    #[error("Gradient check inputs must be contiguous leaf tensors (input {input_index})")]
    InvalidInput { input_index: usize },

    #[error("Input {input_index} requires grad but received none during backward")]
    MissingAnalyticalGrad { input_index: usize },

    #[error("Numerical gradient is not finite for input {input_index}, element {element_index}")]
    NumericalGradNotFinite {
        input_index: usize,
        element_index: usize,
    },

    #[error("Tensor error during gradient check: {0}")]
    TensorError(#[from] FerrogradError),
}

/// Compares analytical gradients against central finite differences.
///
/// `func` is evaluated repeatedly with the elements of `inputs` perturbed by
/// `epsilon`; the scalar loss used for differencing is `sum(func(inputs) *
/// output_grad)`, so the analytical gradients to match are those produced by
/// `func(inputs).backward(output_grad)`.
///
/// Inputs must be contiguous F64 leaf tensors; F32 rounding drowns the
/// finite-difference signal.
pub fn check_grad<F>(
    func: F,
    inputs: &[Tensor],
    output_grad: &Tensor,
    epsilon: f64,
    tolerance: f64,
) -> Result<(), GradCheckError>
where
    F: Fn(&[Tensor]) -> Result<Tensor, FerrogradError>,
{
    for (input_index, input) in inputs.iter().enumerate() {
        if input.dtype() != DType::F64 {
            return Err(GradCheckError::UnsupportedDType {
                input_index,
                dtype: input.dtype(),
            });
        }
        if !input.is_contiguous() || input.grad_fn().is_some() {
            return Err(GradCheckError::InvalidInput { input_index });
        }
        input.clear_grad();
    }

    // Analytical pass.
    let output = func(inputs)?;
    output.backward(Some(output_grad.detach()))?;

    let loss = |inputs: &[Tensor]| -> Result<f64, GradCheckError> {
        let out = func(inputs)?;
        let weighted = mul_op(&out.detach(), &output_grad.detach())?;
        Ok(sum_op(&weighted, &[], false)?.item_f64()?)
    };

    for (input_index, input) in inputs.iter().enumerate() {
        if !input.requires_grad() {
            continue;
        }
        let analytical = input
            .grad()
            .ok_or(GradCheckError::MissingAnalyticalGrad { input_index })?
            .get_f64_data()?;

        for element_index in 0..input.numel() {
            nudge(input, element_index, epsilon)?;
            let loss_plus = loss(inputs)?;
            nudge(input, element_index, -2.0 * epsilon)?;
            let loss_minus = loss(inputs)?;
            nudge(input, element_index, epsilon)?;

            let numerical = (loss_plus - loss_minus) / (2.0 * epsilon);
            if !numerical.is_finite() {
                return Err(GradCheckError::NumericalGradNotFinite {
                    input_index,
                    element_index,
                });
            }

            let a = analytical[element_index];
            let difference = (a - numerical).abs();
            let scale = 1.0f64.max(a.abs()).max(numerical.abs());
            if difference > tolerance * scale {
                return Err(GradCheckError::GradientMismatch {
                    input_index,
                    element_index,
                    analytical: a,
                    numerical,
                    difference,
                });
            }
        }
    }
    Ok(())
}

/// Adds `delta` to one element of a contiguous F64 tensor, in place.
fn nudge(t: &Tensor, flat_index: usize, delta: f64) -> Result<(), FerrogradError> {
    let mut guard = t.write_data();
    let offset = guard.offset + flat_index;
    let Buffer::Cpu(CpuBuffer::F64(vec_arc)) = Arc::make_mut(&mut guard.buffer) else {
        return Err(FerrogradError::InternalError(
            "grad check nudge expects an F64 CPU buffer".to_string(),
        ));
    };
    let vec = Arc::make_mut(vec_arc);
    vec[offset] += delta;
    Ok(())
}
