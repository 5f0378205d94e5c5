use ndarray::{Array1, ArrayView1};

use crate::{MlErr, Result};

/// A single input vector and the class it belongs to.
#[derive(Clone, Debug, PartialEq)]
pub struct Sample {
    input: Vec<f32>,
    label: usize,
}

impl Sample {
    pub fn new(input: Vec<f32>, label: usize) -> Self {
        Self { input, label }
    }

    pub fn input(&self) -> ArrayView1<'_, f32> {
        ArrayView1::from(&self.input)
    }

    pub fn label(&self) -> usize {
        self.label
    }

    /// Builds the one-hot target vector for this sample's label.
    ///
    /// # Arguments
    /// * `classes` - The length of the target, the amount of outputs of the model.
    ///
    /// # Returns
    /// The target, or an error if the label is not a valid class.
    pub fn target(&self, classes: usize) -> Result<Array1<f32>> {
        if self.label >= classes {
            return Err(MlErr::LabelOutOfRange {
                label: self.label,
                classes,
            });
        }

        let mut target = Array1::zeros(classes);
        target[self.label] = 1.;
        Ok(target)
    }
}
