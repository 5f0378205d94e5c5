use ndarray::Array1;

/// The weighted sums and activations a layer produced for a single input.
#[derive(Clone, Debug, PartialEq)]
pub struct Activations {
    pub z: Array1<f32>,
    pub a: Array1<f32>,
}

/// Everything the forward pass computed for one sample, kept around for the backward pass.
#[derive(Clone, Debug, PartialEq)]
pub struct ForwardState {
    layers: Vec<Activations>,
}

impl ForwardState {
    pub(super) fn new(layers: Vec<Activations>) -> Self {
        Self { layers }
    }

    /// The activations of the `i`-th layer, if there is one.
    pub fn layer(&self, i: usize) -> Option<&Activations> {
        self.layers.get(i)
    }

    pub fn layers(&self) -> &[Activations] {
        &self.layers
    }

    /// The activations of the first layer, the hidden one in a two layer model.
    pub fn hidden(&self) -> &Activations {
        &self.layers[0]
    }

    /// The activations of the last layer.
    pub fn output(&self) -> &Activations {
        &self.layers[self.layers.len() - 1]
    }
}
