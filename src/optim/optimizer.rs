use crate::error::FerrogradError;

/// Common interface for optimization algorithms.
///
/// The usual training loop is: forward, loss, `zero_grad`, backward, `step`.
pub trait Optimizer {
    /// Applies one update to every managed parameter using its accumulated
    /// gradient. Parameters without a gradient are left untouched.
    fn step(&mut self) -> Result<(), FerrogradError>;

    /// Clears the gradients of every managed parameter.
    fn zero_grad(&mut self);
}
