use std::{
    error::Error,
    fmt::{self, Display},
    io,
    path::PathBuf,
};

/// The result type of the bitmap crate.
pub type Result<T> = std::result::Result<T, BmpErr>;

/// The bitmap crate's error type.
#[derive(Debug)]
pub enum BmpErr {
    Open {
        path: PathBuf,
        source: io::Error,
    },
    BadSignature([u8; 2]),
    TruncatedHeader,
    InvalidDimensions {
        width: i64,
        height: i64,
        bit_depth: u16,
    },
    UnsupportedInput {
        bit_depth: u16,
        len: usize,
        expected: usize,
    },
    Io(io::Error),
}

impl Display for BmpErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BmpErr::Open { path, source } => {
                write!(f, "Failed to open {}: {source}", path.display())
            }
            BmpErr::BadSignature(sig) => write!(
                f,
                "Not a bitmap, the signature is {sig:02x?} instead of \"BM\""
            ),
            BmpErr::TruncatedHeader => write!(f, "The file ends before its headers do"),
            BmpErr::InvalidDimensions {
                width,
                height,
                bit_depth,
            } => write!(
                f,
                "Invalid dimensions {width}x{height} at {bit_depth} bits per pixel"
            ),
            BmpErr::UnsupportedInput {
                bit_depth,
                len,
                expected,
            } => write!(
                f,
                "Only 8 bit bitmaps of {expected} pixel bytes are supported, got {len} bytes at {bit_depth} bits per pixel"
            ),
            BmpErr::Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}

impl Error for BmpErr {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            BmpErr::Open { source: e, .. } | BmpErr::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for BmpErr {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}
