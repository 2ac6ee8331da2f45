use std::fmt;
use std::ops::Deref;

use crate::tensor::Tensor;

/// A learnable tensor belonging to a module.
///
/// Wrapping a tensor in a `Parameter` turns on gradient tracking; optimizers
/// consume `Parameter`s and update the underlying tensors in place. Cloning
/// is shallow: both handles address the same storage and gradient.
pub struct Parameter {
    tensor: Tensor,
    name: Option<String>,
}

impl Parameter {
    /// Wraps `tensor` as a named learnable parameter.
    pub fn new(tensor: Tensor, name: Option<String>) -> Self {
        // Parameters are always leaves of the graph.
        let _ = tensor.set_requires_grad(true);
        Parameter { tensor, name }
    }

    /// Wraps `tensor` without a name.
    pub fn new_unnamed(tensor: Tensor) -> Self {
        Self::new(tensor, None)
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// The underlying tensor handle.
    pub fn tensor(&self) -> &Tensor {
        &self.tensor
    }

    /// Consumes the parameter and returns the underlying tensor.
    pub fn into_inner(self) -> Tensor {
        self.tensor
    }

    /// Clears the accumulated gradient.
    pub fn zero_grad(&self) {
        self.tensor.clear_grad();
    }
}

impl Deref for Parameter {
    type Target = Tensor;

    fn deref(&self) -> &Self::Target {
        &self.tensor
    }
}

impl Clone for Parameter {
    fn clone(&self) -> Self {
        Parameter {
            tensor: self.tensor.clone(),
            name: self.name.clone(),
        }
    }
}

impl fmt::Debug for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "Parameter(\"{}\", {:?})", name, self.tensor),
            None => write!(f, "Parameter({:?})", self.tensor),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parameter_requires_grad() {
        let p = Parameter::new_unnamed(Tensor::new(vec![1.0, 2.0], vec![2]).unwrap());
        assert!(p.requires_grad());
    }

    #[test]
    fn test_parameter_zero_grad() {
        let p = Parameter::new_unnamed(Tensor::new(vec![1.0], vec![1]).unwrap());
        p.acc_grad(Tensor::new(vec![3.0], vec![1]).unwrap()).unwrap();
        assert!(p.grad().is_some());
        p.zero_grad();
        assert!(p.grad().is_none());
    }

    #[test]
    fn test_parameter_clone_shares_storage() {
        let p = Parameter::new(Tensor::new(vec![1.0], vec![1]).unwrap(), Some("w".to_string()));
        let q = p.clone();
        assert_eq!(p.node_id(), q.node_id());
        assert_eq!(q.name(), Some("w"));
    }
}
