use ndarray::{Zip, prelude::*};

use crate::{
    MlErr, Result,
    arch::{Activations, activations::Sigmoid},
    initialization::Initializer,
};

/// A fully connected layer followed by a sigmoid.
///
/// The weights are held as an `(out_dim, in_dim)` matrix in standard (row-major) layout,
/// so the element for input `i` and output `o` lives at flat index `i + o * in_dim`. That
/// flat order is the one the model file uses.
#[derive(Clone, Debug, PartialEq)]
pub struct Dense {
    weights: Array2<f32>,
    biases: Array1<f32>,
    act_fn: Sigmoid,
}

/// The gradient of the loss with respect to the parameters of a single `Dense` layer.
#[derive(Clone, Debug, PartialEq)]
pub struct Gradient {
    pub weights: Array2<f32>,
    pub biases: Array1<f32>,
}

impl Dense {
    /// Creates a new `Dense` layer from its flattened parameters.
    ///
    /// # Arguments
    /// * `dim` - The `(in_dim, out_dim)` dimension of the layer.
    /// * `weights` - `in_dim * out_dim` weights, flattened row-major with one row per output.
    /// * `biases` - `out_dim` biases.
    ///
    /// # Returns
    /// A new `Dense` instance or an error if the lengths don't match the dimension.
    pub fn new(dim: (usize, usize), weights: Vec<f32>, biases: Vec<f32>) -> Result<Self> {
        let (in_dim, out_dim) = dim;

        if in_dim == 0 || out_dim == 0 {
            return Err(MlErr::EmptyModel);
        }

        if biases.len() != out_dim {
            return Err(MlErr::SizeMismatch {
                what: "biases",
                got: biases.len(),
                expected: out_dim,
            });
        }

        let got = weights.len();
        let weights =
            Array2::from_shape_vec((out_dim, in_dim), weights).map_err(|_| MlErr::SizeMismatch {
                what: "weights",
                got,
                expected: in_dim * out_dim,
            })?;

        Ok(Self {
            weights,
            biases: Array1::from(biases),
            act_fn: Sigmoid::new(),
        })
    }

    /// Creates a new `Dense` layer with its initial parameters.
    ///
    /// # Arguments
    /// * `dim` - The `(in_dim, out_dim)` dimension of the layer.
    /// * `init` - Produces the weights, then the biases.
    pub fn init<I: Initializer>(dim: (usize, usize), init: &mut I) -> Result<Self> {
        if dim.0 == 0 || dim.1 == 0 {
            return Err(MlErr::EmptyModel);
        }

        Ok(Self {
            weights: init.weights(dim),
            biases: init.biases(dim.1),
            act_fn: Sigmoid::new(),
        })
    }

    /// Returns the `(in_dim, out_dim)` dimension of this layer.
    pub fn dim(&self) -> (usize, usize) {
        (self.in_dim(), self.out_dim())
    }

    pub fn in_dim(&self) -> usize {
        self.weights.ncols()
    }

    pub fn out_dim(&self) -> usize {
        self.weights.nrows()
    }

    /// Returns the amount of parameters this layer has.
    pub fn size(&self) -> usize {
        self.weights.len() + self.biases.len()
    }

    /// The weight connecting `input` to `output`.
    pub fn weight(&self, input: usize, output: usize) -> f32 {
        self.weights[[output, input]]
    }

    pub fn bias(&self, output: usize) -> f32 {
        self.biases[output]
    }

    /// A view of the weight matrix, one row per output unit.
    pub fn weights(&self) -> ArrayView2<'_, f32> {
        self.weights.view()
    }

    pub fn biases(&self) -> ArrayView1<'_, f32> {
        self.biases.view()
    }

    /// Mutable access to the weight matrix and bias vector, used by the optimizers.
    pub fn params_mut(&mut self) -> (ArrayViewMut2<'_, f32>, ArrayViewMut1<'_, f32>) {
        (self.weights.view_mut(), self.biases.view_mut())
    }

    /// Computes `z = W x + b` and `a = sigmoid(z)`.
    ///
    /// Every weighted sum is accumulated in input order starting from zero and the bias is
    /// added last.
    pub fn forward(&self, x: ArrayView1<f32>) -> Result<Activations> {
        if x.len() != self.in_dim() {
            return Err(MlErr::SizeMismatch {
                what: "layer input",
                got: x.len(),
                expected: self.in_dim(),
            });
        }

        let z: Array1<f32> = self
            .weights
            .outer_iter()
            .zip(&self.biases)
            .map(|(row, &b)| dot(x, row) + b)
            .collect();

        let a = z.mapv(|z| self.act_fn.f(z));
        Ok(Activations { z, a })
    }

    /// Turns the derivative of the loss with respect to this layer's activations into the
    /// layer's error signal, `delta = d * sigmoid'(z)`.
    pub fn delta(&self, z: ArrayView1<f32>, d: ArrayView1<f32>) -> Array1<f32> {
        Zip::from(d).and(z).map_collect(|&d, &z| d * self.act_fn.df(z))
    }

    /// Sends an error signal back through the weights, yielding the derivative of the loss
    /// with respect to this layer's input: `sum_o delta[o] * W[i, o]` for every input `i`.
    pub fn propagate(&self, delta: ArrayView1<f32>) -> Array1<f32> {
        self.weights
            .columns()
            .into_iter()
            .map(|column| dot(delta, column))
            .collect()
    }

    /// Computes the parameter gradient for an error signal and the input that produced it.
    pub fn gradient(&self, delta: Array1<f32>, x: ArrayView1<f32>) -> Gradient {
        let weights = Array2::from_shape_fn(self.weights.raw_dim(), |(o, i)| delta[o] * x[i]);

        Gradient {
            weights,
            biases: delta,
        }
    }
}

/// Sequential dot product, `sum += lhs[k] * rhs[k]` in index order.
fn dot(lhs: ArrayView1<f32>, rhs: ArrayView1<f32>) -> f32 {
    lhs.iter().zip(rhs).fold(0., |sum, (l, r)| sum + l * r)
}
