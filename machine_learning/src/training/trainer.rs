use log::{debug, info, warn};
use rand::{Rng, seq::SliceRandom};

use super::{EpochStats, TrainerConfig};
use crate::{
    Result,
    arch::{Sequential, loss::LossFn},
    dataset::Dataset,
    optimization::{GradientDescent, Optimizer},
};

/// Runs online training: every sample is followed by an update of the parameters.
pub struct Trainer<O: Optimizer, L: LossFn, R: Rng> {
    optimizer: O,
    loss_fn: L,
    epochs: usize,
    shuffle: bool,
    rng: R,
}

impl<O: Optimizer, L: LossFn, R: Rng> Trainer<O, L, R> {
    /// Creates a new `Trainer`.
    ///
    /// # Arguments
    /// * `optimizer` - The learning rule.
    /// * `loss_fn` - The loss whose gradient drives the updates.
    /// * `epochs` - The amount of full passes over the dataset.
    /// * `shuffle` - Whether the visiting order is reshuffled on every epoch.
    /// * `rng` - The random number generator used for shuffling.
    pub fn new(optimizer: O, loss_fn: L, epochs: usize, shuffle: bool, rng: R) -> Self {
        Self {
            optimizer,
            loss_fn,
            epochs,
            shuffle,
            rng,
        }
    }

    /// Trains `model` over `dataset` for the configured amount of epochs.
    ///
    /// Samples are visited in dataset order unless shuffling was enabled. A sample the
    /// dataset fails to produce is skipped with a warning; any other failure stops the
    /// training.
    ///
    /// # Returns
    /// The statistics of every epoch, in order.
    pub fn train<D: Dataset>(
        &mut self,
        model: &mut Sequential,
        dataset: &D,
    ) -> Result<Vec<EpochStats>> {
        let mut order: Vec<usize> = (0..dataset.len()).collect();
        let mut history = Vec::new();

        for epoch in 1..=self.epochs {
            if self.shuffle {
                order.shuffle(&mut self.rng);
            }

            let stats = self.train_epoch(model, dataset, &order, epoch)?;
            info!(
                "epoch {epoch}/{}: loss {:.6} over {} samples",
                self.epochs, stats.loss, stats.samples
            );

            history.push(stats);
        }

        Ok(history)
    }

    /// Makes a single pass over the samples of `dataset` listed in `order`.
    ///
    /// # Arguments
    /// * `model` - The model being trained.
    /// * `dataset` - The samples.
    /// * `order` - The indices to visit, in visiting order.
    /// * `epoch` - The number this epoch is reported with.
    pub fn train_epoch<D: Dataset>(
        &mut self,
        model: &mut Sequential,
        dataset: &D,
        order: &[usize],
        epoch: usize,
    ) -> Result<EpochStats> {
        let classes = model.output_size();
        let mut total = 0.;
        let mut samples = 0;
        let mut skipped = 0;

        for &i in order {
            let sample = match dataset.get(i) {
                Ok(sample) => sample,
                Err(e) => {
                    warn!("skipping {}: {e}", dataset.describe(i));
                    skipped += 1;
                    continue;
                }
            };

            let y = sample.target(classes)?;
            let x = sample.input();
            total += model.train_step(x, y.view(), &self.loss_fn, &mut self.optimizer)?;
            samples += 1;
        }

        if skipped > 0 {
            debug!("epoch {epoch} skipped {skipped} samples");
        }

        let loss = match samples {
            0 => 0.,
            n => total / n as f32,
        };

        Ok(EpochStats {
            epoch,
            loss,
            samples,
            skipped,
        })
    }
}

impl<L: LossFn, R: Rng> Trainer<GradientDescent, L, R> {
    /// Creates a gradient descent `Trainer` from its configuration.
    pub fn from_config(config: &TrainerConfig, loss_fn: L, rng: R) -> Self {
        Self::new(
            GradientDescent::new(config.learning_rate()),
            loss_fn,
            config.epochs(),
            config.shuffle(),
            rng,
        )
    }
}
