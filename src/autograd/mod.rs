pub mod grad_check;
pub mod graph;

pub use graph::NodeId;
pub(crate) use graph::topological_sort;

use std::fmt::Debug;

use crate::error::FerrogradError;
use crate::tensor::Tensor;

/// Defines the interface for the backward pass of a differentiable operation.
///
/// Any operation that creates a non-leaf `Tensor` stores one of these in the
/// output's `grad_fn` field. During `backward()` the node receives the
/// gradient of the loss with respect to the operation's output and must
/// produce the gradient with respect to each input.
///
/// `Send + Sync` because the `Arc<dyn BackwardOp>` is shared through tensor
/// clones that may cross threads.
pub trait BackwardOp: Debug + Send + Sync {
    /// Computes dL/dInput_i for each input, given dL/dOutput.
    ///
    /// The returned gradients must be in the same order as `inputs()`, and
    /// each must have the shape and dtype of the corresponding input.
    fn backward(&self, grad_output: &Tensor) -> Result<Vec<Tensor>, FerrogradError>;

    /// Identifiers of the input nodes that participated in the forward pass,
    /// in the same order as the gradients returned by `backward()`.
    ///
    /// Backward nodes hold strong handles to their inputs, so these pointers
    /// stay valid for as long as the node itself is alive.
    fn inputs(&self) -> Vec<NodeId>;
}
