use std::path::Path;

use log::{debug, warn};
use ndarray::ArrayView1;

use super::argmax;
use crate::{
    MlErr, Result,
    arch::Sequential,
    codec::{self, CodecErr},
    dataset::Dataset,
};

/// Classifies inputs with a trained model it never modifies.
#[derive(Clone, Debug)]
pub struct Predictor {
    model: Sequential,
}

/// The outcome of running a `Predictor` over a labelled dataset.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Evaluation {
    pub correct: usize,
    pub total: usize,
    pub skipped: usize,
}

impl Evaluation {
    /// The fraction of predictions that matched their label, zero if nothing was evaluated.
    pub fn accuracy(&self) -> f32 {
        match self.total {
            0 => 0.,
            n => self.correct as f32 / n as f32,
        }
    }
}

impl Predictor {
    pub fn new(model: Sequential) -> Self {
        Self { model }
    }

    /// Creates a `Predictor` from a model file.
    pub fn load_file<P: AsRef<Path>>(path: P) -> std::result::Result<Self, CodecErr> {
        codec::load_file(path).map(Self::new)
    }

    pub fn model(&self) -> &Sequential {
        &self.model
    }

    /// Returns the class the model assigns to `x`.
    pub fn predict(&self, x: ArrayView1<f32>) -> Result<usize> {
        let output = self.model.predict(x)?;
        argmax(&output).ok_or(MlErr::EmptyModel)
    }

    /// Predicts every sample of `dataset` and compares it against its label.
    ///
    /// Unreadable samples are skipped with a warning and counted apart.
    pub fn evaluate<D: Dataset>(&self, dataset: &D) -> Result<Evaluation> {
        let mut eval = Evaluation::default();

        for i in 0..dataset.len() {
            let sample = match dataset.get(i) {
                Ok(sample) => sample,
                Err(e) => {
                    warn!("skipping {}: {e}", dataset.describe(i));
                    eval.skipped += 1;
                    continue;
                }
            };

            let prediction = self.predict(sample.input())?;
            debug!(
                "{}: predicted {prediction}, labelled {}",
                dataset.describe(i),
                sample.label()
            );

            eval.total += 1;
            if prediction == sample.label() {
                eval.correct += 1;
            }
        }

        Ok(eval)
    }
}
