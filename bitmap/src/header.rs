use std::io::{self, Read};

use crate::{BmpErr, Result};

/// Size of the file header plus the info header.
pub(crate) const HEADERS_SIZE: usize = 14 + 40;

/// Largest pixel buffer a header may declare.
const MAX_IMAGE_SIZE: usize = 1 << 30;

/// The fields of the bitmap headers the decoder needs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BmpHeader {
    pub data_offset: u32,
    pub width: u32,
    pub height: u32,
    /// Whether the stored height was negative. The rows are never reordered.
    pub top_down: bool,
    pub bit_depth: u16,
}

/// Returns the size in bytes of a row padded to a multiple of 4 bytes,
/// `ceil(width * bit_depth / 32) * 4`, or `None` on overflow.
pub fn row_stride(width: u32, bit_depth: u16) -> Option<usize> {
    let bits = (width as usize).checked_mul(bit_depth as usize)?;
    Some(bits.checked_add(31)? / 32 * 4)
}

impl BmpHeader {
    /// Reads and validates both headers from the start of `reader`.
    ///
    /// # Errors
    /// `TruncatedHeader` if the stream ends before the headers do, `BadSignature` if the
    /// file doesn't start with "BM" and `InvalidDimensions` for a negative width or a pixel
    /// buffer too large to be addressed.
    pub fn read<R: Read>(reader: &mut R) -> Result<Self> {
        let mut buf = [0u8; HEADERS_SIZE];
        reader.read_exact(&mut buf).map_err(|e| match e.kind() {
            io::ErrorKind::UnexpectedEof => BmpErr::TruncatedHeader,
            _ => BmpErr::Io(e),
        })?;

        let signature = [buf[0], buf[1]];
        if &signature != b"BM" {
            return Err(BmpErr::BadSignature(signature));
        }

        let data_offset = u32::from_le(bytemuck::pod_read_unaligned(&buf[10..14]));
        let width = i32::from_le(bytemuck::pod_read_unaligned(&buf[18..22]));
        let height = i32::from_le(bytemuck::pod_read_unaligned(&buf[22..26]));
        let bit_depth = u16::from_le(bytemuck::pod_read_unaligned(&buf[28..30]));

        let invalid = || BmpErr::InvalidDimensions {
            width: width as i64,
            height: height as i64,
            bit_depth,
        };

        if width < 0 {
            return Err(invalid());
        }

        let header = Self {
            data_offset,
            width: width.unsigned_abs(),
            height: height.unsigned_abs(),
            top_down: height < 0,
            bit_depth,
        };

        match header.image_size() {
            Some(size) if size <= MAX_IMAGE_SIZE => Ok(header),
            _ => Err(invalid()),
        }
    }

    pub fn row_stride(&self) -> Option<usize> {
        row_stride(self.width, self.bit_depth)
    }

    /// The size of the pixel buffer, `row_stride * |height|`.
    pub fn image_size(&self) -> Option<usize> {
        self.row_stride()?.checked_mul(self.height as usize)
    }
}
