mod error;
mod in_memory;
mod sample;

use std::borrow::Cow;

pub use error::DataErr;
pub use in_memory::InMemoryDataset;
pub use sample::Sample;

/// An indexed collection of labelled samples.
///
/// Implementors may hold every sample in memory or produce them on demand, in which case
/// `get` may fail for a single index without invalidating the rest of the dataset.
pub trait Dataset {
    /// The amount of samples, readable or not.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the sample at `index`.
    ///
    /// # Arguments
    /// * `index` - The position of the sample, in `0..len()`.
    ///
    /// # Returns
    /// The sample, borrowed if the dataset already holds it, or an error if it is out of
    /// bounds or could not be produced.
    fn get(&self, index: usize) -> Result<Cow<'_, Sample>, DataErr>;

    /// A short description of the sample at `index`, used when reporting failures.
    fn describe(&self, index: usize) -> String {
        format!("sample #{index}")
    }
}
