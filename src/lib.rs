//! Ferrograd: a small CPU tensor framework with reverse-mode automatic
//! differentiation.
//!
//! The building blocks mirror the usual deep-learning stack:
//! - [`Tensor`]: a shared handle over multi-dimensional F32/F64 data, with
//!   views, broadcasting element-wise math, matmul and reductions.
//! - [`autograd`]: a dynamic computation graph recorded by the ops; calling
//!   [`Tensor::backward`] accumulates gradients into the leaf tensors.
//! - [`nn`] and [`model`]: parameters, the [`nn::Module`] trait, a linear
//!   layer, MSE loss and a sequential container.
//! - [`optim`]: gradient descent over module parameters.
//!
//! ```no_run
//! use ferrograd::nn::{Linear, MSELoss, Module};
//! use ferrograd::model::Sequential;
//! use ferrograd::optim::{Optimizer, Sgd};
//! use ferrograd::Tensor;
//!
//! # fn main() -> Result<(), ferrograd::FerrogradError> {
//! let mut model = Sequential::new();
//! model.add_module("layer", Box::new(Linear::new(2, 1)?));
//!
//! let x = Tensor::new(vec![1.0, 2.0], vec![1, 2])?;
//! let y = Tensor::new(vec![3.0], vec![1, 1])?;
//!
//! let mut opt = Sgd::new(model.parameters(), 0.01)?;
//! for _ in 0..100 {
//!     let pred = model.forward(&x)?;
//!     let loss = MSELoss::default().calculate(&pred, &y)?;
//!     opt.zero_grad();
//!     loss.backward(None)?;
//!     opt.step()?;
//! }
//! # Ok(())
//! # }
//! ```

pub mod autograd;
pub mod buffer;
pub mod device;
pub mod error;
pub mod model;
pub mod nn;
pub mod ops;
pub mod optim;
pub mod tensor;
pub mod tensor_data;
pub mod types;

pub use device::StorageDevice;
pub use error::FerrogradError;
pub use tensor::Tensor;
pub use types::DType;
