use std::{
    error::Error,
    fmt::{self, Display},
};

use ndarray::{Array1, Array2};
use rand::Rng;
use rand_distr::{Distribution, Uniform};

use super::Initializer;

/// The bounds given to `UniformInit` don't describe a range to sample from.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InvalidRange {
    pub low: f32,
    pub high: f32,
}

impl Display for InvalidRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Can't sample uniformly from [{}, {})", self.low, self.high)
    }
}

impl Error for InvalidRange {}

/// Draws weights uniformly from `[low, high)` and starts every bias at zero.
///
/// The random number generator is borrowed, so every layer initialized with the same
/// `UniformInit` continues the same seeded stream.
pub struct UniformInit<'r, R: Rng> {
    rng: &'r mut R,
    distribution: Uniform<f32>,
}

impl<'r, R: Rng> UniformInit<'r, R> {
    /// Creates a new `UniformInit`.
    ///
    /// # Arguments
    /// * `rng` - The source of randomness.
    /// * `low` - The inclusive lower bound.
    /// * `high` - The exclusive upper bound.
    ///
    /// # Returns
    /// An error unless `low < high` and both are finite.
    pub fn new(rng: &'r mut R, low: f32, high: f32) -> Result<Self, InvalidRange> {
        let distribution = Uniform::new(low, high).map_err(|_| InvalidRange { low, high })?;
        Ok(Self { rng, distribution })
    }
}

impl<R: Rng> Initializer for UniformInit<'_, R> {
    fn weights(&mut self, (in_dim, out_dim): (usize, usize)) -> Array2<f32> {
        Array2::from_shape_simple_fn((out_dim, in_dim), || {
            self.distribution.sample(&mut *self.rng)
        })
    }

    fn biases(&mut self, out_dim: usize) -> Array1<f32> {
        Array1::zeros(out_dim)
    }
}
