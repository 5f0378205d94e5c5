use ndarray::{Array1, Array2};

use super::Initializer;

/// Sets every weight and every bias to a fixed value. Mostly useful in tests.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConstInit {
    weight: f32,
    bias: f32,
}

impl ConstInit {
    pub fn new(weight: f32, bias: f32) -> Self {
        Self { weight, bias }
    }
}

impl Initializer for ConstInit {
    fn weights(&mut self, (in_dim, out_dim): (usize, usize)) -> Array2<f32> {
        Array2::from_elem((out_dim, in_dim), self.weight)
    }

    fn biases(&mut self, out_dim: usize) -> Array1<f32> {
        Array1::from_elem(out_dim, self.bias)
    }
}
