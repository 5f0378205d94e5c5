use ndarray::{Array1, ArrayView1};

use super::LossFn;

/// Mean squared error loss function.
///
/// `loss` reports the mean of the squared errors. `loss_prime` is the raw difference
/// `y_pred - y`, the gradient of `0.5 * sum((y_pred - y)^2)` with no averaging, which is
/// the scale the weight updates are tuned for.
#[derive(Default, Clone, Copy, Debug)]
pub struct Mse;

impl Mse {
    /// Returns a new `Mse`.
    pub fn new() -> Self {
        Self
    }
}

impl LossFn for Mse {
    fn loss(&self, y_pred: ArrayView1<f32>, y: ArrayView1<f32>) -> f32 {
        (&y_pred - &y)
            .mapv(|x| x.powi(2))
            .mean()
            .unwrap_or_default()
    }

    fn loss_prime(&self, y_pred: ArrayView1<f32>, y: ArrayView1<f32>) -> Array1<f32> {
        &y_pred - &y
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn loss_is_the_mean_of_the_squared_errors() {
        let y_pred = array![0.5f32, 0.0, 1.0, 0.0];
        let y = array![1.0f32, 0.0, 0.0, 0.0];

        assert_eq!(Mse.loss(y_pred.view(), y.view()), (0.25 + 1.0) / 4.0);
    }

    #[test]
    fn loss_prime_is_the_raw_difference() {
        let y_pred = array![0.75f32, 0.25];
        let y = array![1.0f32, 0.0];

        assert_eq!(Mse.loss_prime(y_pred.view(), y.view()), array![-0.25f32, 0.25]);
    }

    #[test]
    fn perfect_prediction_has_no_loss() {
        let y = array![0.0f32, 1.0, 0.0];
        assert_eq!(Mse.loss(y.view(), y.view()), 0.0);
        assert!(Mse.loss_prime(y.view(), y.view()).iter().all(|&d| d == 0.0));
    }
}
