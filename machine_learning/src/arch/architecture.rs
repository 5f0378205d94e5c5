use rand::Rng;

use super::{Sequential, layers::Dense};
use crate::{Result, initialization::UniformInit};

/// The shape of a two layer sigmoid network: `input -> hidden -> output`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Architecture {
    input: usize,
    hidden: usize,
    output: usize,
}

impl Architecture {
    /// 28x28 greyscale digits, 256 hidden units and one output per digit.
    pub const DIGITS: Self = Self::new(784, 256, 10);

    pub const fn new(input: usize, hidden: usize, output: usize) -> Self {
        Self {
            input,
            hidden,
            output,
        }
    }

    pub fn input(&self) -> usize {
        self.input
    }

    pub fn hidden(&self) -> usize {
        self.hidden
    }

    pub fn output(&self) -> usize {
        self.output
    }

    /// Builds a freshly initialized model for this architecture.
    ///
    /// Weights are drawn uniformly from `[-1, 1)`, layer by layer and in flat index order,
    /// and every bias starts at zero.
    ///
    /// # Arguments
    /// * `rng` - The random number generator the weights are drawn from.
    pub fn build<R: Rng>(&self, rng: &mut R) -> Result<Sequential> {
        let mut init = UniformInit::new(rng, -1., 1.)?;

        let hidden = Dense::init((self.input, self.hidden), &mut init)?;
        let output = Dense::init((self.hidden, self.output), &mut init)?;

        Sequential::new([hidden, output])
    }
}

impl Default for Architecture {
    fn default() -> Self {
        Self::DIGITS
    }
}
