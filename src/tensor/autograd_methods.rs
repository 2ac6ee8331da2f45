use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::autograd::{topological_sort, BackwardOp, NodeId};
use crate::buffer::CpuElement;
use crate::error::FerrogradError;
use crate::tensor::create::ones_like;
use crate::tensor::Tensor;
use crate::tensor_data::TensorData;
use crate::types::DType;

impl Tensor {
    /// Checks if this tensor requires gradient computation.
    pub fn requires_grad(&self) -> bool {
        self.read_data().requires_grad
    }

    /// Sets the `requires_grad` flag for this tensor.
    pub fn set_requires_grad(&self, requires_grad: bool) -> Result<(), FerrogradError> {
        let mut guard = self.write_data();
        if requires_grad && guard.grad_fn.is_some() {
            log::warn!(
                "set_requires_grad(true) on a non-leaf tensor; gradients accumulate on leaves only"
            );
        }
        guard.requires_grad = requires_grad;
        Ok(())
    }

    /// Returns a handle to the accumulated gradient, if any.
    pub fn grad(&self) -> Option<Tensor> {
        self.read_data().grad.clone()
    }

    /// Returns the backward node of the operation that produced this tensor.
    pub fn grad_fn(&self) -> Option<Arc<dyn BackwardOp>> {
        self.read_data().grad_fn.clone()
    }

    /// Installs the backward node for this tensor (used by ops).
    pub(crate) fn set_grad_fn(
        &self,
        grad_fn: Option<Arc<dyn BackwardOp>>,
    ) -> Result<(), FerrogradError> {
        self.write_data().grad_fn = grad_fn;
        Ok(())
    }

    /// Clears the accumulated gradient.
    pub fn clear_grad(&self) {
        self.write_data().grad = None;
    }

    /// Returns a new tensor sharing this tensor's storage but severed from
    /// the computation graph (no `grad_fn`, `requires_grad = false`).
    pub fn detach(&self) -> Tensor {
        let guard = self.read_data();
        Tensor::from_data(TensorData::new_view(
            Arc::clone(guard.buffer()),
            guard.offset,
            guard.shape.clone(),
            guard.strides.clone(),
        ))
    }

    /// Accumulates `grad_to_add` into this tensor's `grad` field (additive
    /// across backward passes until `clear_grad`).
    pub fn acc_grad(&self, grad_to_add: Tensor) -> Result<(), FerrogradError> {
        accumulate_grad(&self.data, grad_to_add)
    }

    /// Performs the backward pass starting from this tensor.
    ///
    /// Computes dLoss/dLeaf for every leaf tensor in the graph that requires
    /// grad, applying the chain rule in reverse topological order, and
    /// accumulates the results into the leaves' `grad` fields.
    ///
    /// # Arguments
    /// * `gradient`: initial gradient for this tensor (dL/dself). If `None`,
    ///   defaults to 1.0, which is only legal for single-element tensors.
    ///
    /// # Errors
    /// * `RequiresGradNotMet` if this tensor does not require grad.
    /// * `BackwardNonScalar` if `gradient` is `None` and this tensor is not
    ///   a single-element tensor.
    /// * `ShapeMismatch` / `DataTypeMismatch` if a provided `gradient` does
    ///   not match this tensor.
    pub fn backward(&self, gradient: Option<Tensor>) -> Result<(), FerrogradError> {
        if !self.requires_grad() {
            return Err(FerrogradError::RequiresGradNotMet);
        }

        let seed = match gradient {
            Some(g) => {
                if g.shape() != self.shape() {
                    return Err(FerrogradError::ShapeMismatch {
                        expected: self.shape(),
                        actual: g.shape(),
                        operation: "backward seed".to_string(),
                    });
                }
                if g.dtype() != self.dtype() {
                    return Err(FerrogradError::DataTypeMismatch {
                        expected: self.dtype(),
                        actual: g.dtype(),
                        operation: "backward seed".to_string(),
                    });
                }
                g.detach()
            }
            None => {
                if self.numel() != 1 {
                    return Err(FerrogradError::BackwardNonScalar);
                }
                ones_like(self)?
            }
        };

        let mut grad_map: HashMap<NodeId, Tensor> = HashMap::new();
        grad_map.insert(self.node_id(), seed);

        let sorted = topological_sort(self.node_id())?;
        log::debug!("backward: traversing {} graph node(s)", sorted.len());

        for node_id in sorted {
            let accumulated = match grad_map.remove(&node_id) {
                Some(g) => g,
                None => continue,
            };

            // Safety: the backward nodes reachable from `self` hold strong
            // handles to their inputs, so every NodeId from the sort points
            // to a live allocation while this loop runs.
            let node_lock = unsafe { &*node_id };
            let (grad_fn, node_requires_grad) = {
                let guard = node_lock.read().map_err(|_| {
                    FerrogradError::InternalError(
                        "Poisoned tensor lock during backward".to_string(),
                    )
                })?;
                (guard.grad_fn.clone(), guard.requires_grad)
            };

            match grad_fn {
                None => {
                    // Leaf: store the gradient.
                    if node_requires_grad {
                        accumulate_grad(node_lock, accumulated)?;
                    }
                }
                Some(op) => {
                    let input_grads = op.backward(&accumulated)?;
                    let input_ids = op.inputs();
                    if input_grads.len() != input_ids.len() {
                        return Err(FerrogradError::BackwardError(format!(
                            "backward node {:?} returned {} gradients for {} inputs",
                            op,
                            input_grads.len(),
                            input_ids.len()
                        )));
                    }
                    for (input_id, grad) in input_ids.into_iter().zip(input_grads) {
                        // Gradients never re-enter the graph.
                        let grad = grad.detach();
                        let wants_grad = {
                            let guard = unsafe { &*input_id }.read().map_err(|_| {
                                FerrogradError::InternalError(
                                    "Poisoned tensor lock during backward".to_string(),
                                )
                            })?;
                            guard.requires_grad || guard.grad_fn.is_some()
                        };
                        if !wants_grad {
                            continue;
                        }
                        let merged = match grad_map.remove(&input_id) {
                            Some(existing) => {
                                crate::ops::arithmetic::add_op(&existing, &grad)?
                            }
                            None => grad,
                        };
                        grad_map.insert(input_id, merged);
                    }
                }
            }
        }

        Ok(())
    }
}

/// Accumulates a gradient into a tensor node's `grad` field, validating
/// shape, dtype and device. Works directly on the lock so the backward
/// driver can use raw `NodeId`s.
fn accumulate_grad(
    node: &RwLock<TensorData>,
    grad_to_add: Tensor,
) -> Result<(), FerrogradError> {
    let mut guard = node
        .write()
        .map_err(|_| FerrogradError::InternalError("Poisoned tensor lock in acc_grad".to_string()))?;

    let grad_guard = grad_to_add.read_data();
    if grad_guard.shape != guard.shape {
        return Err(FerrogradError::ShapeMismatch {
            expected: guard.shape.clone(),
            actual: grad_guard.shape.clone(),
            operation: "acc_grad".to_string(),
        });
    }
    if grad_guard.dtype != guard.dtype {
        return Err(FerrogradError::DataTypeMismatch {
            expected: guard.dtype,
            actual: grad_guard.dtype,
            operation: "acc_grad".to_string(),
        });
    }
    if grad_guard.device != guard.device {
        return Err(FerrogradError::DeviceMismatch {
            expected: guard.device,
            actual: grad_guard.device,
            operation: "acc_grad".to_string(),
        });
    }

    let summed = match guard.grad.take() {
        Some(existing) => match guard.dtype {
            DType::F32 => sum_grads::<f32>(&existing, &grad_guard)?,
            DType::F64 => sum_grads::<f64>(&existing, &grad_guard)?,
        },
        None => {
            drop(grad_guard);
            grad_to_add
        }
    };
    guard.grad = Some(summed);
    Ok(())
}

fn sum_grads<T: CpuElement>(
    existing: &Tensor,
    incoming: &TensorData,
) -> Result<Tensor, FerrogradError> {
    let mut data = existing.read_data().contiguous_vec::<T>()?;
    let add = incoming.contiguous_vec::<T>()?;
    if data.len() != add.len() {
        return Err(FerrogradError::InternalError(
            "Gradient buffer length mismatch despite shape match in acc_grad".to_string(),
        ));
    }
    for (d, a) in data.iter_mut().zip(add.iter()) {
        *d += *a;
    }
    Tensor::from_vec(data, incoming.shape.clone())
}

#[cfg(test)]
mod tests {
    use crate::error::FerrogradError;
    use crate::tensor::Tensor;

    #[test]
    fn test_requires_grad_flag() {
        let t = Tensor::new(vec![1.0], vec![1]).unwrap();
        assert!(!t.requires_grad());
        t.set_requires_grad(true).unwrap();
        assert!(t.requires_grad());
    }

    #[test]
    fn test_acc_grad_accumulates() {
        let t = Tensor::new(vec![1.0, 2.0], vec![2]).unwrap();
        t.set_requires_grad(true).unwrap();
        t.acc_grad(Tensor::new(vec![0.5, 0.5], vec![2]).unwrap()).unwrap();
        t.acc_grad(Tensor::new(vec![1.0, 2.0], vec![2]).unwrap()).unwrap();
        let g = t.grad().unwrap();
        assert_eq!(g.get_f32_data().unwrap(), vec![1.5, 2.5]);
        t.clear_grad();
        assert!(t.grad().is_none());
    }

    #[test]
    fn test_acc_grad_shape_mismatch() {
        let t = Tensor::new(vec![1.0, 2.0], vec![2]).unwrap();
        let bad = Tensor::new(vec![1.0], vec![1]).unwrap();
        assert!(matches!(
            t.acc_grad(bad),
            Err(FerrogradError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn test_backward_requires_grad() {
        let t = Tensor::new(vec![1.0], vec![1]).unwrap();
        assert_eq!(t.backward(None), Err(FerrogradError::RequiresGradNotMet));
    }

    #[test]
    fn test_backward_non_scalar_needs_seed() {
        let t = Tensor::new(vec![1.0, 2.0], vec![2]).unwrap();
        t.set_requires_grad(true).unwrap();
        assert_eq!(t.backward(None), Err(FerrogradError::BackwardNonScalar));
    }

    #[test]
    fn test_backward_on_leaf_scalar() {
        let t = Tensor::new(vec![3.0], vec![]).unwrap();
        t.set_requires_grad(true).unwrap();
        t.backward(None).unwrap();
        assert_eq!(t.grad().unwrap().get_f32_data().unwrap(), vec![1.0]);
    }

    #[test]
    fn test_detach_shares_data_but_not_graph() {
        let t = Tensor::new(vec![1.0, 2.0], vec![2]).unwrap();
        t.set_requires_grad(true).unwrap();
        let d = t.detach();
        assert!(!d.requires_grad());
        assert!(d.grad_fn().is_none());
        assert_eq!(d.get_f32_data().unwrap(), vec![1.0, 2.0]);
    }
}
