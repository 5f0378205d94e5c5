use ndarray::{ArrayView, ArrayViewMut, Dimension};

/// A learning rule: how a gradient turns into a change of the parameters.
pub trait Optimizer {
    /// Updates `params` in place given the gradient of the loss with respect to them.
    ///
    /// Both arrays have the same shape.
    fn update_params<D: Dimension>(
        &mut self,
        params: ArrayViewMut<f32, D>,
        grad: ArrayView<f32, D>,
    );
}
