use std::{
    error::Error,
    fmt::{self, Display},
    io,
    path::PathBuf,
};

/// The result type of the model codec.
pub type Result<T> = std::result::Result<T, CodecErr>;

/// The model codec's error type.
#[derive(Debug)]
pub enum CodecErr {
    Io(io::Error),
    Open { path: PathBuf, source: io::Error },
    CorruptModel(String),
    UnsupportedDepth { got: usize },
}

impl CodecErr {
    pub(super) fn corrupt(reason: impl Into<String>) -> Self {
        Self::CorruptModel(reason.into())
    }
}

impl Display for CodecErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodecErr::Io(e) => write!(f, "I/O error: {e}"),
            CodecErr::Open { path, source } => {
                write!(f, "Failed to open model file {}: {source}", path.display())
            }
            CodecErr::CorruptModel(reason) => write!(f, "Corrupt model: {reason}"),
            CodecErr::UnsupportedDepth { got } => write!(
                f,
                "Only two layer models can be stored, this one has {got} layers"
            ),
        }
    }
}

impl Error for CodecErr {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            CodecErr::Io(e) | CodecErr::Open { source: e, .. } => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for CodecErr {
    fn from(value: io::Error) -> Self {
        match value.kind() {
            io::ErrorKind::UnexpectedEof => Self::corrupt("unexpected end of file"),
            _ => Self::Io(value),
        }
    }
}
