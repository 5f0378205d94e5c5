mod config;
mod stats;
mod trainer;

pub use config::TrainerConfig;
pub use stats::{EpochStats, mean_loss};
pub use trainer::Trainer;
