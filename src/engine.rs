use std::path::Path;

use log::{debug, info};
use machine_learning::{
    arch::loss::Mse,
    codec,
    dataset::Dataset,
    inference::{Evaluation, Predictor},
    training::{EpochStats, Trainer},
};
use rand::{SeedableRng, rngs::StdRng};

use crate::{
    Config, Result, Strategy,
    corpus::{BitmapDataset, Corpus},
};

/// Trains a new model with the configured strategy and saves it.
pub fn train(config: &Config) -> Result<Vec<EpochStats>> {
    config.validate()?;

    match config.strategy {
        Strategy::InMemory => train_in_memory(config),
        Strategy::Streaming => train_streaming(config),
    }
}

/// Decodes the whole corpus once, then trains a new model on it and saves it.
pub fn train_in_memory(config: &Config) -> Result<Vec<EpochStats>> {
    config.validate()?;

    let dataset = corpus_dataset(config).load();
    train_on(config, &dataset)
}

/// Trains a new model decoding the corpus again on every epoch, then saves it.
pub fn train_streaming(config: &Config) -> Result<Vec<EpochStats>> {
    config.validate()?;

    let dataset = corpus_dataset(config);
    train_on(config, &dataset)
}

/// Classifies a single image with the saved model.
pub fn infer<P: AsRef<Path>>(config: &Config, image: P) -> Result<usize> {
    let predictor = Predictor::load_file(&config.model_path)?;
    info!("loaded model from {}", config.model_path.display());

    let bitmap = bitmap::decode(image.as_ref())?;
    let input = bitmap.to_input(predictor.model().input_size())?;
    let digit = predictor.predict(input.as_slice().into())?;

    info!("{} is a {digit}", image.as_ref().display());
    Ok(digit)
}

/// Runs the saved model over the whole corpus and compares its predictions with the labels.
pub fn evaluate(config: &Config) -> Result<Evaluation> {
    let predictor = Predictor::load_file(&config.model_path)?;
    info!("loaded model from {}", config.model_path.display());

    let dataset = BitmapDataset::new(
        Corpus::new(&config.corpus_root, config.labels, config.samples_per_label),
        predictor.model().input_size(),
    );

    let eval = predictor.evaluate(&dataset)?;
    info!(
        "accuracy {:.2}% ({} of {} correct, {} skipped)",
        eval.accuracy() * 100.,
        eval.correct,
        eval.total,
        eval.skipped
    );

    Ok(eval)
}

fn corpus_dataset(config: &Config) -> BitmapDataset {
    let corpus = Corpus::new(&config.corpus_root, config.labels, config.samples_per_label);
    BitmapDataset::new(corpus, config.input)
}

fn train_on<D: Dataset>(config: &Config, dataset: &D) -> Result<Vec<EpochStats>> {
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let arch = config.architecture();
    let mut model = arch.build(&mut rng)?;
    debug!("built model {arch:?} with {} parameters", model.size());

    info!(
        "training on {} samples for {} epochs",
        dataset.len(),
        config.epochs
    );

    let mut trainer = Trainer::from_config(&config.trainer_config(), Mse, rng);
    let history = trainer.train(&mut model, dataset)?;

    codec::save_file(&model, &config.model_path)?;
    info!("saved model to {}", config.model_path.display());

    Ok(history)
}
