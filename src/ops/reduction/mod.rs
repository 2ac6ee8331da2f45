//! Reductions over tensor dimensions.

mod mean;
mod sum;

pub use mean::mean_op;
pub use sum::sum_op;
