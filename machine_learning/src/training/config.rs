/// The hyperparameters of a training run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrainerConfig {
    epochs: usize,
    learning_rate: f32,
    shuffle: bool,
}

impl TrainerConfig {
    /// Creates a new `TrainerConfig`.
    ///
    /// # Arguments
    /// * `epochs` - The amount of full passes over the dataset.
    /// * `learning_rate` - The step length of gradient descent.
    /// * `shuffle` - Whether the visiting order is reshuffled on every epoch.
    pub fn new(epochs: usize, learning_rate: f32, shuffle: bool) -> Self {
        Self {
            epochs,
            learning_rate,
            shuffle,
        }
    }

    pub fn epochs(&self) -> usize {
        self.epochs
    }

    pub fn learning_rate(&self) -> f32 {
        self.learning_rate
    }

    pub fn shuffle(&self) -> bool {
        self.shuffle
    }
}

impl Default for TrainerConfig {
    fn default() -> Self {
        Self::new(300, 0.01, false)
    }
}
