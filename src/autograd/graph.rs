use std::collections::HashSet;
use std::sync::RwLock;

use crate::error::FerrogradError;
use crate::tensor_data::TensorData;

/// Stable identity of a tensor node in the computation graph.
///
/// `Tensor` structs are just handles around `Arc<RwLock<TensorData>>`; the
/// pointer to the shared lock survives handle clones and drops, which makes
/// it usable as a map key during the backward pass. Validity relies on the
/// backward nodes holding strong handles to their inputs.
pub type NodeId = *const RwLock<TensorData>;

/// Returns the nodes reachable from `root` through `grad_fn` links, ordered
/// so that every node appears before all of its inputs (output-first).
///
/// Iterative depth-first post-order; the forward pass can only reference
/// previously created tensors, so a cycle indicates graph corruption and is
/// reported as `CycleDetected`.
pub(crate) fn topological_sort(root: NodeId) -> Result<Vec<NodeId>, FerrogradError> {
    enum Visit {
        Enter(NodeId),
        Exit(NodeId),
    }

    let mut sorted = Vec::new();
    let mut visited: HashSet<NodeId> = HashSet::new();
    let mut on_path: HashSet<NodeId> = HashSet::new();
    let mut stack = vec![Visit::Enter(root)];

    while let Some(visit) = stack.pop() {
        match visit {
            Visit::Enter(node) => {
                if visited.contains(&node) {
                    continue;
                }
                if !on_path.insert(node) {
                    return Err(FerrogradError::CycleDetected);
                }
                stack.push(Visit::Exit(node));

                // Safety: backward nodes keep their inputs alive, and the
                // caller holds the root tensor, so every reachable pointer
                // refers to a live allocation for the duration of the sort.
                let guard = unsafe { &*node }.read().map_err(|_| {
                    FerrogradError::InternalError(
                        "Poisoned tensor lock during graph traversal".to_string(),
                    )
                })?;
                if let Some(grad_fn) = guard.grad_fn.as_ref() {
                    for input in grad_fn.inputs() {
                        if !visited.contains(&input) {
                            stack.push(Visit::Enter(input));
                        }
                    }
                }
            }
            Visit::Exit(node) => {
                on_path.remove(&node);
                visited.insert(node);
                sorted.push(node);
            }
        }
    }

    sorted.reverse();
    Ok(sorted)
}
