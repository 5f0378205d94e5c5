use std::{
    borrow::Cow,
    path::{Path, PathBuf},
};

use log::{info, warn};
use machine_learning::dataset::{DataErr, Dataset, InMemoryDataset, Sample};

/// A labelled image in the corpus.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Entry {
    pub path: PathBuf,
    pub label: usize,
}

/// The training images laid out as `<root>/<label>/<label>_<index>.bmp`.
///
/// Entries are ordered by label and then by index, which is the order training visits
/// them in.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Corpus {
    entries: Vec<Entry>,
}

impl Corpus {
    /// Lists the corpus, whether the files exist or not.
    ///
    /// # Arguments
    /// * `root` - The directory holding one subdirectory per label.
    /// * `labels` - Labels go from `0` to `labels - 1`.
    /// * `samples_per_label` - Indices go from `1` to `samples_per_label`.
    pub fn new<P: AsRef<Path>>(root: P, labels: usize, samples_per_label: usize) -> Self {
        let root = root.as_ref();
        let entries = (0..labels)
            .flat_map(|label| {
                (1..=samples_per_label).map(move |index| Entry {
                    path: root
                        .join(label.to_string())
                        .join(format!("{label}_{index}.bmp")),
                    label,
                })
            })
            .collect();

        Self { entries }
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }
}

/// A dataset that decodes its bitmaps every time a sample is requested.
#[derive(Clone, Debug)]
pub struct BitmapDataset {
    corpus: Corpus,
    input_len: usize,
}

impl BitmapDataset {
    /// # Arguments
    /// * `corpus` - The images and their labels.
    /// * `input_len` - The amount of pixel bytes a usable image has.
    pub fn new(corpus: Corpus, input_len: usize) -> Self {
        Self { corpus, input_len }
    }

    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    /// Decodes every image once, skipping the ones that fail with a warning.
    pub fn load(&self) -> InMemoryDataset {
        let mut dataset = InMemoryDataset::default();

        for i in 0..self.len() {
            match self.get(i) {
                Ok(sample) => dataset.push(sample.into_owned()),
                Err(e) => warn!("skipping {}: {e}", self.describe(i)),
            }
        }

        info!(
            "loaded {} of {} samples into memory",
            dataset.len(),
            self.len()
        );

        dataset
    }
}

impl Dataset for BitmapDataset {
    fn len(&self) -> usize {
        self.corpus.entries.len()
    }

    fn get(&self, index: usize) -> Result<Cow<'_, Sample>, DataErr> {
        let entry = self.corpus.entries.get(index).ok_or(DataErr::OutOfBounds {
            index,
            len: self.len(),
        })?;

        let unreadable = |e: bitmap::BmpErr| DataErr::Unreadable {
            index,
            source: Box::new(e),
        };

        let input = bitmap::decode(&entry.path)
            .and_then(|bmp| bmp.to_input(self.input_len))
            .map_err(unreadable)?;

        Ok(Cow::Owned(Sample::new(input, entry.label)))
    }

    fn describe(&self, index: usize) -> String {
        match self.corpus.entries.get(index) {
            Some(entry) => entry.path.display().to_string(),
            None => format!("sample #{index}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn entries_are_ordered_by_label_then_index() {
        let corpus = Corpus::new("train", 2, 3);
        let entries: Vec<_> = corpus
            .entries()
            .iter()
            .map(|e| (e.path.clone(), e.label))
            .collect();

        assert_eq!(
            entries,
            [
                (PathBuf::from("train/0/0_1.bmp"), 0),
                (PathBuf::from("train/0/0_2.bmp"), 0),
                (PathBuf::from("train/0/0_3.bmp"), 0),
                (PathBuf::from("train/1/1_1.bmp"), 1),
                (PathBuf::from("train/1/1_2.bmp"), 1),
                (PathBuf::from("train/1/1_3.bmp"), 1),
            ]
        );
    }

    #[test]
    fn missing_and_unsupported_images_are_unreadable() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("0")).unwrap();
        fs::write(
            dir.path().join("0/0_1.bmp"),
            bitmap::encode_grey8(4, 1, &[0, 255, 0, 255]).unwrap(),
        )
        .unwrap();
        fs::write(
            dir.path().join("0/0_2.bmp"),
            bitmap::encode_grey8(3, 2, &[0; 6]).unwrap(),
        )
        .unwrap();

        let dataset = BitmapDataset::new(Corpus::new(dir.path(), 1, 3), 4);

        let sample = dataset.get(0).unwrap();
        assert_eq!(sample.input().to_vec(), [0., 1., 0., 1.]);
        assert_eq!(sample.label(), 0);

        assert!(matches!(dataset.get(1), Err(DataErr::Unreadable { index: 1, .. })));
        assert!(matches!(dataset.get(2), Err(DataErr::Unreadable { index: 2, .. })));
        assert!(matches!(dataset.get(3), Err(DataErr::OutOfBounds { .. })));

        let loaded = dataset.load();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded.samples()[0], *sample);
    }
}
