use crate::error::FerrogradError;
use crate::nn::parameter::Parameter;
use crate::tensor::Tensor;

/// The base trait for neural network modules (layers and containers).
///
/// `Send + Sync` because modules are shared through `Box<dyn Module>` in
/// containers that may cross threads.
pub trait Module: std::fmt::Debug + Send + Sync {
    /// Performs a forward pass of the module.
    fn forward(&self, input: &Tensor) -> Result<Tensor, FerrogradError>;

    /// Returns handles to every learnable parameter of the module, including
    /// those of sub-modules. The handles share storage with the module's own
    /// parameters, so optimizer updates through them are visible here.
    fn parameters(&self) -> Vec<Parameter>;

    /// Parameters paired with hierarchical names ("layer1.weight", ...).
    /// Unnamed parameters fall back to their index.
    fn named_parameters(&self) -> Vec<(String, Parameter)> {
        self.parameters()
            .into_iter()
            .enumerate()
            .map(|(i, p)| {
                let name = p.name().map(str::to_string).unwrap_or_else(|| i.to_string());
                (name, p)
            })
            .collect()
    }

    /// Clears the gradients of every parameter.
    fn zero_grad(&self) {
        for p in self.parameters() {
            p.zero_grad();
        }
    }
}
