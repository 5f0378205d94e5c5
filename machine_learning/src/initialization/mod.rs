//! Initial values for the parameters of a layer.

mod constant;
mod uniform;

use ndarray::{Array1, Array2};

pub use constant::ConstInit;
pub use uniform::{InvalidRange, UniformInit};

/// Produces the starting weights and biases of a dense layer.
pub trait Initializer {
    /// Returns an `(out_dim, in_dim)` weight matrix, filled in flat index order.
    fn weights(&mut self, dim: (usize, usize)) -> Array2<f32>;

    /// Returns `out_dim` biases.
    fn biases(&mut self, out_dim: usize) -> Array1<f32>;
}
