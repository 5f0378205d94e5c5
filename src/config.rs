use std::{
    fs,
    path::{Path, PathBuf},
};

use machine_learning::{arch::Architecture, training::TrainerConfig};
use serde::{Deserialize, Serialize};

use crate::{AppErr, Result};

/// How the corpus is fed to the trainer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Decode every image once, before the first epoch.
    #[default]
    InMemory,
    /// Decode every image again on every epoch.
    Streaming,
}

/// Everything a run needs, loaded from an optional JSON file.
///
/// Missing fields take their default value.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub corpus_root: PathBuf,
    pub samples_per_label: usize,
    pub labels: usize,
    pub epochs: usize,
    pub learning_rate: f32,
    pub hidden: usize,
    pub input: usize,
    pub model_path: PathBuf,
    pub seed: Option<u64>,
    pub shuffle: bool,
    pub strategy: Strategy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            corpus_root: PathBuf::from("../public/train_bmp"),
            samples_per_label: 500,
            labels: 10,
            epochs: 300,
            learning_rate: 0.01,
            hidden: 256,
            input: 784,
            model_path: PathBuf::from("model.bin"),
            seed: None,
            shuffle: false,
            strategy: Strategy::InMemory,
        }
    }
}

impl Config {
    /// Reads a config from a JSON file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| AppErr::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;

        serde_json::from_str(&raw).map_err(|source| AppErr::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Checks the values no model can be built or trained with.
    pub fn validate(&self) -> Result<()> {
        if self.input == 0 || self.hidden == 0 || self.labels == 0 {
            return Err(AppErr::InvalidConfig(
                "input, hidden and labels must be non-zero".into(),
            ));
        }

        if !self.learning_rate.is_finite() || self.learning_rate <= 0. {
            return Err(AppErr::InvalidConfig(format!(
                "learning rate must be positive, got {}",
                self.learning_rate
            )));
        }

        Ok(())
    }

    pub fn architecture(&self) -> Architecture {
        Architecture::new(self.input, self.hidden, self.labels)
    }

    pub fn trainer_config(&self) -> TrainerConfig {
        TrainerConfig::new(self.epochs, self.learning_rate, self.shuffle)
    }
}
