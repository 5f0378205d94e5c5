use std::{
    error::Error,
    fmt::{self, Display},
};

use crate::initialization::InvalidRange;

/// The result type used in the entire machine learning module.
pub type Result<T> = std::result::Result<T, MlErr>;

/// The machine learning module's error type.
#[derive(Debug)]
pub enum MlErr {
    SizeMismatch {
        what: &'static str,
        got: usize,
        expected: usize,
    },
    LabelOutOfRange {
        label: usize,
        classes: usize,
    },
    EmptyModel,
    Init(InvalidRange),
}

impl Display for MlErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MlErr::SizeMismatch {
                what,
                got,
                expected,
            } => write!(
                f,
                "There's a size mismatch for {what}, got {got} and expected {expected}"
            ),
            MlErr::LabelOutOfRange { label, classes } => write!(
                f,
                "The label {label} is out of range, the model only has {classes} classes"
            ),
            MlErr::EmptyModel => write!(f, "A model must have at least one non-empty layer"),
            MlErr::Init(e) => write!(f, "Failed to initialize parameters: {e}"),
        }
    }
}

impl Error for MlErr {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            MlErr::Init(e) => Some(e),
            _ => None,
        }
    }
}

impl From<InvalidRange> for MlErr {
    fn from(value: InvalidRange) -> Self {
        Self::Init(value)
    }
}
