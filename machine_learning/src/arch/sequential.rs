use ndarray::{Array1, ArrayView1};

use super::{
    Activations, ForwardState,
    layers::{Dense, Gradient},
    loss::LossFn,
};
use crate::{MlErr, Result, optimization::Optimizer};

/// A sequential model: information flows forward when computing an output and backward when
/// computing the *deltas* of its layers.
#[derive(Clone, Debug, PartialEq)]
pub struct Sequential {
    layers: Vec<Dense>,
}

impl Sequential {
    /// Creates a new `Sequential`.
    ///
    /// # Arguments
    /// * `layers` - The layers the sequential is composed of.
    ///
    /// # Returns
    /// A new `Sequential` instance, or an error if there are no layers or the output of a
    /// layer doesn't fit the input of the next one.
    pub fn new<I>(layers: I) -> Result<Self>
    where
        I: IntoIterator<Item = Dense>,
    {
        let layers: Vec<Dense> = layers.into_iter().collect();

        if layers.is_empty() {
            return Err(MlErr::EmptyModel);
        }

        for pair in layers.windows(2) {
            if pair[0].out_dim() != pair[1].in_dim() {
                return Err(MlErr::SizeMismatch {
                    what: "chained layers",
                    got: pair[1].in_dim(),
                    expected: pair[0].out_dim(),
                });
            }
        }

        Ok(Self { layers })
    }

    pub fn layers(&self) -> &[Dense] {
        &self.layers
    }

    /// The length of the input vectors this model accepts.
    pub fn input_size(&self) -> usize {
        self.layers[0].in_dim()
    }

    /// The amount of outputs, that is, of classes.
    pub fn output_size(&self) -> usize {
        self.layers[self.layers.len() - 1].out_dim()
    }

    /// Returns the amount of parameters in the model.
    pub fn size(&self) -> usize {
        self.layers.iter().map(Dense::size).sum()
    }

    /// Makes a forward pass through the network.
    ///
    /// # Arguments
    /// * `x` - The input vector.
    ///
    /// # Returns
    /// The weighted sums and activations of every layer, or an error if `x` has the wrong
    /// length.
    pub fn forward(&self, x: ArrayView1<f32>) -> Result<ForwardState> {
        let mut states: Vec<Activations> = Vec::with_capacity(self.layers.len());

        for layer in &self.layers {
            let acts = match states.last() {
                Some(prev) => layer.forward(prev.a.view())?,
                None => layer.forward(x)?,
            };

            states.push(acts);
        }

        Ok(ForwardState::new(states))
    }

    /// Runs a forward pass and keeps only the output activations.
    pub fn predict(&self, x: ArrayView1<f32>) -> Result<Array1<f32>> {
        let state = self.forward(x)?;
        Ok(state.output().a.clone())
    }

    /// Computes the gradient of the loss with respect to every parameter, without touching
    /// them.
    ///
    /// The error signal of each layer is computed with the weights of the following layer as
    /// they were during the forward pass.
    ///
    /// # Arguments
    /// * `x` - The input vector the forward pass was run on.
    /// * `state` - The result of that forward pass.
    /// * `y` - The expected output.
    /// * `loss_fn` - The loss function.
    ///
    /// # Returns
    /// One gradient per layer, in layer order.
    pub fn backward<L: LossFn>(
        &self,
        x: ArrayView1<f32>,
        state: &ForwardState,
        y: ArrayView1<f32>,
        loss_fn: &L,
    ) -> Result<Vec<Gradient>> {
        let nlayers = self.layers.len();

        if state.layers().len() != nlayers {
            return Err(MlErr::SizeMismatch {
                what: "forward state",
                got: state.layers().len(),
                expected: nlayers,
            });
        }

        if x.len() != self.input_size() {
            return Err(MlErr::SizeMismatch {
                what: "input",
                got: x.len(),
                expected: self.input_size(),
            });
        }

        for (layer, acts) in self.layers.iter().zip(state.layers()) {
            for got in [acts.z.len(), acts.a.len()] {
                if got != layer.out_dim() {
                    return Err(MlErr::SizeMismatch {
                        what: "layer activations",
                        got,
                        expected: layer.out_dim(),
                    });
                }
            }
        }

        let output = state.output();
        if y.len() != output.a.len() {
            return Err(MlErr::SizeMismatch {
                what: "target",
                got: y.len(),
                expected: output.a.len(),
            });
        }

        let mut grads = Vec::with_capacity(nlayers);
        let mut d = loss_fn.loss_prime(output.a.view(), y);

        for (i, layer) in self.layers.iter().enumerate().rev() {
            let delta = layer.delta(state.layers()[i].z.view(), d.view());

            let input = match i {
                0 => x,
                _ => state.layers()[i - 1].a.view(),
            };

            if i > 0 {
                d = layer.propagate(delta.view());
            }

            grads.push(layer.gradient(delta, input));
        }

        grads.reverse();
        Ok(grads)
    }

    /// Applies a gradient to the parameters following the optimizer's rule.
    pub fn apply<O: Optimizer>(&mut self, grads: &[Gradient], optimizer: &mut O) -> Result<()> {
        if grads.len() != self.layers.len() {
            return Err(MlErr::SizeMismatch {
                what: "gradients",
                got: grads.len(),
                expected: self.layers.len(),
            });
        }

        for (layer, grad) in self.layers.iter_mut().zip(grads) {
            let (weights, biases) = layer.params_mut();
            optimizer.update_params(weights, grad.weights.view());
            optimizer.update_params(biases, grad.biases.view());
        }

        Ok(())
    }

    /// A full online training step on a single sample: forward, backward and update.
    ///
    /// # Returns
    /// The loss of the prediction made before the update.
    pub fn train_step<L, O>(
        &mut self,
        x: ArrayView1<f32>,
        y: ArrayView1<f32>,
        loss_fn: &L,
        optimizer: &mut O,
    ) -> Result<f32>
    where
        L: LossFn,
        O: Optimizer,
    {
        let state = self.forward(x)?;
        let loss = loss_fn.loss(state.output().a.view(), y);
        let grads = self.backward(x, &state, y, loss_fn)?;
        self.apply(&grads, optimizer)?;
        Ok(loss)
    }
}
