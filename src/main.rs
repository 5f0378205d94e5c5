use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use digit_recognition::{Config, Strategy, engine};
use log::info;

#[derive(Parser)]
#[command(name = "digit-recognition")]
#[command(about = "Train and run a two layer digit classifier on bitmap images")]
#[command(version)]
struct Cli {
    /// JSON config file, every missing field takes its default
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Root of the `<label>/<label>_<index>.bmp` corpus
    #[arg(long, global = true)]
    corpus: Option<PathBuf>,

    /// Model file to write or read
    #[arg(short, long, global = true)]
    model: Option<PathBuf>,

    /// Images per label
    #[arg(long, global = true)]
    samples_per_label: Option<usize>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Train a new model on the corpus and save it
    Train {
        /// Decode the corpus on every epoch instead of once
        #[arg(long)]
        streaming: bool,

        /// Number of epochs
        #[arg(short, long)]
        epochs: Option<usize>,

        /// Gradient descent step length
        #[arg(long)]
        learning_rate: Option<f32>,

        /// Random seed for reproducibility
        #[arg(long)]
        seed: Option<u64>,

        /// Reshuffle the samples on every epoch
        #[arg(long)]
        shuffle: bool,
    },

    /// Classify a single image
    Infer {
        /// The bitmap to classify
        image: PathBuf,
    },

    /// Measure the accuracy of the saved model over the corpus
    Evaluate,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let mut config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };

    if let Some(corpus) = cli.corpus {
        config.corpus_root = corpus;
    }
    if let Some(model) = cli.model {
        config.model_path = model;
    }
    if let Some(n) = cli.samples_per_label {
        config.samples_per_label = n;
    }

    match cli.command {
        Commands::Train {
            streaming,
            epochs,
            learning_rate,
            seed,
            shuffle,
        } => {
            if streaming {
                config.strategy = Strategy::Streaming;
            }
            if let Some(epochs) = epochs {
                config.epochs = epochs;
            }
            if let Some(lr) = learning_rate {
                config.learning_rate = lr;
            }
            if seed.is_some() {
                config.seed = seed;
            }
            config.shuffle |= shuffle;

            let history = engine::train(&config).context("training failed")?;
            if let Some(last) = history.last() {
                info!("final loss {:.6}", last.loss);
            }
        }
        Commands::Infer { image } => {
            let digit = engine::infer(&config, &image)
                .with_context(|| format!("failed to classify {}", image.display()))?;
            println!("{digit}");
        }
        Commands::Evaluate => {
            let eval = engine::evaluate(&config).context("evaluation failed")?;
            println!(
                "{}/{} correct ({:.2}%)",
                eval.correct,
                eval.total,
                eval.accuracy() * 100.
            );
        }
    }

    Ok(())
}
