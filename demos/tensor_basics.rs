//! Tensor construction, shapes, views and basic math.
//!
//! Run with: `cargo run --example tensor_basics`

use ferrograd::tensor::{ones, zeros};
use ferrograd::{FerrogradError, Tensor};

fn main() -> Result<(), FerrogradError> {
    env_logger::init();

    // Constructors.
    let a = Tensor::new(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], vec![2, 3])?;
    println!("a = {:?}", a);
    println!("shape {:?}, strides {:?}, numel {}", a.shape(), a.strides(), a.numel());

    let z = zeros(&[2, 3])?;
    let o = ones(&[2, 3])?;
    println!("zeros = {:?}", z);
    println!("ones  = {:?}", o);

    // Element-wise math with broadcasting.
    let row = Tensor::new(vec![10.0, 20.0, 30.0], vec![3])?;
    let shifted = a.add(&row)?;
    println!("a + row = {:?}", shifted);

    let scaled = a.mul(&Tensor::new(vec![2.0], vec![])?)?;
    println!("a * 2 = {:?}", scaled);

    // Views: transpose swaps strides, no copy.
    let at = a.t()?;
    println!("a^T = {:?}", at);
    println!("a^T contiguous? {}", at.is_contiguous());

    // Matrix multiplication: [2, 3] x [3, 2] -> [2, 2].
    let b = Tensor::new(vec![7.0, 8.0, 9.0, 10.0, 11.0, 12.0], vec![3, 2])?;
    let c = a.matmul(&b)?;
    println!("a @ b = {:?}", c);

    // Reductions.
    println!("sum(a) = {}", a.sum(&[], false)?.item_f32()?);
    println!("mean(a, axis=1) = {:?}", a.mean(&[1], false)?);

    Ok(())
}
