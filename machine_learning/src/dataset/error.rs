use std::{
    error::Error,
    fmt::{self, Display},
};

/// Failures yielded by a `Dataset` for a single index.
#[derive(Debug)]
pub enum DataErr {
    OutOfBounds {
        index: usize,
        len: usize,
    },
    Unreadable {
        index: usize,
        source: Box<dyn Error + Send + Sync>,
    },
}

impl Display for DataErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataErr::OutOfBounds { index, len } => write!(
                f,
                "The index {index} is out of bounds for a dataset of {len} samples"
            ),
            DataErr::Unreadable { index, source } => {
                write!(f, "The sample #{index} could not be read: {source}")
            }
        }
    }
}

impl Error for DataErr {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            DataErr::Unreadable { source, .. } => Some(source.as_ref()),
            DataErr::OutOfBounds { .. } => None,
        }
    }
}
