use std::{fs, path::Path};

use digit_recognition::{AppErr, Config, Strategy, engine};
use machine_learning::codec::{self, CodecErr};

/// Label 0 lights up the left half of a 4x1 image, label 1 the right half.
fn pattern(label: usize, index: usize) -> [u8; 4] {
    let dim = (index * 10) as u8;
    match label {
        0 => [255 - dim, 230 - dim, dim, 0],
        _ => [0, dim, 230 - dim, 255 - dim],
    }
}

fn write_corpus(root: &Path, labels: usize, samples: usize) {
    for label in 0..labels {
        let dir = root.join(label.to_string());
        fs::create_dir_all(&dir).unwrap();

        for index in 1..=samples {
            let bytes = bitmap::encode_grey8(4, 1, &pattern(label, index)).unwrap();
            fs::write(dir.join(format!("{label}_{index}.bmp")), bytes).unwrap();
        }
    }
}

fn config(root: &Path, strategy: Strategy) -> Config {
    Config {
        corpus_root: root.join("corpus"),
        samples_per_label: 3,
        labels: 2,
        epochs: 1000,
        learning_rate: 0.5,
        hidden: 3,
        input: 4,
        model_path: root.join(format!("{strategy:?}.bin")),
        seed: Some(17),
        shuffle: false,
        strategy,
    }
}

#[test]
fn train_save_load_evaluate() {
    let dir = tempfile::tempdir().unwrap();
    write_corpus(&dir.path().join("corpus"), 2, 3);
    let config = config(dir.path(), Strategy::InMemory);

    let history = engine::train(&config).unwrap();
    assert_eq!(history.len(), 1000);
    assert!(history.iter().all(|s| s.samples == 6 && s.skipped == 0));
    assert!(history[999].loss < history[0].loss);

    let model = codec::load_file(&config.model_path).unwrap();
    assert_eq!(model.input_size(), 4);
    assert_eq!(model.output_size(), 2);

    let eval = engine::evaluate(&config).unwrap();
    assert_eq!(eval.total, 6);
    assert_eq!(eval.correct, 6);
    assert_eq!(eval.accuracy(), 1.);

    let image = config.corpus_root.join("1/1_2.bmp");
    assert_eq!(engine::infer(&config, image).unwrap(), 1);
}

#[test]
fn both_strategies_train_the_same_model() {
    let dir = tempfile::tempdir().unwrap();
    write_corpus(&dir.path().join("corpus"), 2, 3);

    let in_memory = config(dir.path(), Strategy::InMemory);
    let streaming = Config {
        epochs: 5,
        ..config(dir.path(), Strategy::Streaming)
    };
    let in_memory = Config {
        epochs: 5,
        ..in_memory
    };

    let a = engine::train(&in_memory).unwrap();
    let b = engine::train(&streaming).unwrap();

    assert_eq!(a, b);
    assert_eq!(
        fs::read(&in_memory.model_path).unwrap(),
        fs::read(&streaming.model_path).unwrap()
    );
}

#[test]
fn unreadable_images_are_skipped() {
    let dir = tempfile::tempdir().unwrap();
    let corpus = dir.path().join("corpus");
    write_corpus(&corpus, 2, 3);
    fs::write(corpus.join("0/0_2.bmp"), b"not a bitmap").unwrap();
    fs::remove_file(corpus.join("1/1_3.bmp")).unwrap();

    for strategy in [Strategy::InMemory, Strategy::Streaming] {
        let config = Config {
            epochs: 2,
            ..config(dir.path(), strategy)
        };

        let history = engine::train(&config).unwrap();
        let expected_skips = match strategy {
            Strategy::InMemory => 0,
            Strategy::Streaming => 2,
        };

        assert!(history.iter().all(|s| s.samples == 4));
        assert!(history.iter().all(|s| s.skipped == expected_skips));

        let eval = engine::evaluate(&config).unwrap();
        assert_eq!((eval.total, eval.skipped), (4, 2));
    }
}

#[test]
fn inference_needs_a_model() {
    let dir = tempfile::tempdir().unwrap();
    write_corpus(&dir.path().join("corpus"), 1, 1);
    let config = config(dir.path(), Strategy::InMemory);

    let result = engine::infer(&config, config.corpus_root.join("0/0_1.bmp"));
    assert!(matches!(result, Err(AppErr::Codec(CodecErr::Open { .. }))));
}

#[test]
fn corrupt_models_are_rejected() {
    let dir = tempfile::tempdir().unwrap();
    write_corpus(&dir.path().join("corpus"), 2, 1);
    let config = config(dir.path(), Strategy::InMemory);
    fs::write(&config.model_path, [16, 0, 0, 0, 4, 0, 0, 0, 1, 2]).unwrap();

    let result = engine::evaluate(&config);
    assert!(matches!(
        result,
        Err(AppErr::Codec(CodecErr::CorruptModel(_)))
    ));
}
