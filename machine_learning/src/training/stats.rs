use log::warn;

use crate::{
    Result,
    arch::{Sequential, loss::LossFn},
    dataset::Dataset,
};

/// What a single epoch went through.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EpochStats {
    /// One-based epoch number.
    pub epoch: usize,
    /// Mean loss over the visited samples, measured before each update.
    pub loss: f32,
    pub samples: usize,
    pub skipped: usize,
}

/// Computes the mean loss of a model over a dataset without training it.
///
/// Unreadable samples are skipped with a warning. An empty or fully unreadable dataset
/// has a loss of zero.
pub fn mean_loss<D, L>(model: &Sequential, dataset: &D, loss_fn: &L) -> Result<f32>
where
    D: Dataset,
    L: LossFn,
{
    let classes = model.output_size();
    let mut total = 0.;
    let mut visited = 0;

    for i in 0..dataset.len() {
        let sample = match dataset.get(i) {
            Ok(sample) => sample,
            Err(e) => {
                warn!("skipping {}: {e}", dataset.describe(i));
                continue;
            }
        };

        let y_pred = model.predict(sample.input())?;
        let y = sample.target(classes)?;
        total += loss_fn.loss(y_pred.view(), y.view());
        visited += 1;
    }

    if visited == 0 {
        return Ok(0.);
    }

    Ok(total / visited as f32)
}
