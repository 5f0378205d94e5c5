use ndarray::{ArrayView, ArrayViewMut, Dimension, Zip};

use super::Optimizer;

/// Gradient descent optimization algorithm.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GradientDescent {
    learning_rate: f32,
}

impl GradientDescent {
    /// Returns a new `GradientDescent`.
    ///
    /// # Arguments
    /// * `learning_rate` - The *length* of the steps taken on `update_params`.
    pub fn new(learning_rate: f32) -> Self {
        Self { learning_rate }
    }

    pub fn learning_rate(&self) -> f32 {
        self.learning_rate
    }
}

impl Optimizer for GradientDescent {
    /// Makes a step in the opposite direction of the gradient, `w -= learning_rate * g`.
    ///
    /// # Arguments
    /// * `params` - The parameters that are going to be modified.
    /// * `grad` - The gradient used for taking the step.
    fn update_params<D: Dimension>(
        &mut self,
        params: ArrayViewMut<f32, D>,
        grad: ArrayView<f32, D>,
    ) {
        let lr = self.learning_rate;

        Zip::from(params).and(grad).for_each(|w, &g| *w -= lr * g);
    }
}
