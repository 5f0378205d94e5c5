use std::{
    error::Error,
    fmt::{self, Display},
    io,
    path::PathBuf,
};

use bitmap::BmpErr;
use machine_learning::{MlErr, codec::CodecErr};

/// The result type of the application.
pub type Result<T> = std::result::Result<T, AppErr>;

/// Every failure the entry points can report.
#[derive(Debug)]
pub enum AppErr {
    ConfigRead { path: PathBuf, source: io::Error },
    ConfigParse {
        path: PathBuf,
        source: serde_json::Error,
    },
    InvalidConfig(String),
    Bitmap(BmpErr),
    Ml(MlErr),
    Codec(CodecErr),
}

impl Display for AppErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigRead { path, source } => {
                write!(f, "failed to read config {}: {source}", path.display())
            }
            Self::ConfigParse { path, source } => {
                write!(f, "failed to parse config {}: {source}", path.display())
            }
            Self::InvalidConfig(msg) => write!(f, "invalid config: {msg}"),
            Self::Bitmap(e) => write!(f, "bitmap error: {e}"),
            Self::Ml(e) => write!(f, "model error: {e}"),
            Self::Codec(e) => write!(f, "model file error: {e}"),
        }
    }
}

impl Error for AppErr {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::ConfigRead { source, .. } => Some(source),
            Self::ConfigParse { source, .. } => Some(source),
            Self::InvalidConfig(_) => None,
            Self::Bitmap(e) => Some(e),
            Self::Ml(e) => Some(e),
            Self::Codec(e) => Some(e),
        }
    }
}

impl From<BmpErr> for AppErr {
    fn from(e: BmpErr) -> Self {
        Self::Bitmap(e)
    }
}

impl From<MlErr> for AppErr {
    fn from(e: MlErr) -> Self {
        Self::Ml(e)
    }
}

impl From<CodecErr> for AppErr {
    fn from(e: CodecErr) -> Self {
        Self::Codec(e)
    }
}
