use std::borrow::Cow;

use super::{DataErr, Dataset, Sample};

/// A dataset whose samples were all produced up front.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct InMemoryDataset {
    samples: Vec<Sample>,
}

impl InMemoryDataset {
    pub fn new(samples: Vec<Sample>) -> Self {
        Self { samples }
    }

    pub fn push(&mut self, sample: Sample) {
        self.samples.push(sample);
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }
}

impl FromIterator<Sample> for InMemoryDataset {
    fn from_iter<I: IntoIterator<Item = Sample>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl Dataset for InMemoryDataset {
    fn len(&self) -> usize {
        self.samples.len()
    }

    fn get(&self, index: usize) -> Result<Cow<'_, Sample>, DataErr> {
        self.samples
            .get(index)
            .map(Cow::Borrowed)
            .ok_or(DataErr::OutOfBounds {
                index,
                len: self.samples.len(),
            })
    }
}
