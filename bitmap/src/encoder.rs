use crate::{BmpErr, Result, header::HEADERS_SIZE, row_stride};

const PALETTE_SIZE: usize = 256 * 4;

/// Encodes an 8 bit greyscale bitmap.
///
/// # Arguments
/// * `width` - Pixels per row.
/// * `height` - Amount of rows, written bottom-up as stored.
/// * `pixels` - `width * height` bytes, row after row, without padding.
///
/// # Returns
/// The whole file: headers, a grey palette and the rows padded to 4 bytes.
pub fn encode_grey8(width: u32, height: u32, pixels: &[u8]) -> Result<Vec<u8>> {
    let invalid = || BmpErr::InvalidDimensions {
        width: width as i64,
        height: height as i64,
        bit_depth: 8,
    };

    let w = width as usize;
    let stride = row_stride(width, 8).ok_or_else(invalid)?;
    let size = stride.checked_mul(height as usize).ok_or_else(invalid)?;

    if w.checked_mul(height as usize) != Some(pixels.len()) {
        return Err(invalid());
    }

    let offset = HEADERS_SIZE + PALETTE_SIZE;
    let file_size = u32::try_from(offset + size).map_err(|_| invalid())?;
    let signed = |n: u32| i32::try_from(n).map_err(|_| invalid());

    let mut buf = Vec::with_capacity(offset + size);
    buf.extend_from_slice(b"BM");
    buf.extend_from_slice(&file_size.to_le_bytes());
    buf.extend_from_slice(&0u32.to_le_bytes());
    buf.extend_from_slice(&(offset as u32).to_le_bytes());

    buf.extend_from_slice(&40u32.to_le_bytes());
    buf.extend_from_slice(&signed(width)?.to_le_bytes());
    buf.extend_from_slice(&signed(height)?.to_le_bytes());
    buf.extend_from_slice(&1u16.to_le_bytes());
    buf.extend_from_slice(&8u16.to_le_bytes());
    buf.extend_from_slice(&0u32.to_le_bytes()); // uncompressed
    buf.extend_from_slice(&(size as u32).to_le_bytes());
    buf.extend_from_slice(&2835i32.to_le_bytes());
    buf.extend_from_slice(&2835i32.to_le_bytes());
    buf.extend_from_slice(&256u32.to_le_bytes());
    buf.extend_from_slice(&0u32.to_le_bytes());

    for level in 0..=255u8 {
        buf.extend_from_slice(&[level, level, level, 0]);
    }

    if w > 0 {
        for row in pixels.chunks_exact(w) {
            buf.extend_from_slice(row);
            buf.resize(buf.len() + stride - w, 0);
        }
    }

    Ok(buf)
}
