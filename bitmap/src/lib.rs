mod bitmap;
mod decoder;
mod encoder;
mod error;
mod header;

pub use bitmap::Bitmap;
pub use decoder::{decode, decode_into, read_into};
pub use encoder::encode_grey8;
pub use error::{BmpErr, Result};
pub use header::{BmpHeader, row_stride};
