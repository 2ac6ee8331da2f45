//! Optimizers: consume parameter gradients and update the parameters in
//! place, outside the computation graph.

pub mod optimizer;
pub mod sgd;

pub use optimizer::Optimizer;
pub use sgd::Sgd;
