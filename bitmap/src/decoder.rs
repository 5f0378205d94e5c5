use std::{
    fs::File,
    io::{BufReader, Read, Seek, SeekFrom},
    path::Path,
};

use log::{debug, warn};

use crate::{Bitmap, BmpErr, BmpHeader, Result};

/// Reads the pixel buffer of a bitmap into `dst`.
///
/// The whole `row_stride * |height|` buffer declared by the header is read from the data
/// offset, padding included and rows in stored order. If the stream ends early the
/// missing bytes are zeros. `dst` is only replaced once the pixels were read, so on error it
/// keeps its previous contents.
///
/// # Arguments
/// * `reader` - The bitmap, positioned at its first byte.
/// * `dst` - The buffer the pixels end up in.
///
/// # Returns
/// The parsed header or the reason the bitmap couldn't be read.
pub fn read_into<R: Read + Seek>(reader: &mut R, dst: &mut Vec<u8>) -> Result<BmpHeader> {
    let header = BmpHeader::read(reader)?;
    let size = header.image_size().ok_or(BmpErr::InvalidDimensions {
        width: header.width as i64,
        height: header.height as i64,
        bit_depth: header.bit_depth,
    })?;

    debug!(
        "bitmap {}x{} at {} bpp, stride {:?}, {size} pixel bytes from offset {}",
        header.width,
        header.height,
        header.bit_depth,
        header.row_stride(),
        header.data_offset
    );

    reader.seek(SeekFrom::Start(header.data_offset as u64))?;

    let mut pixels = Vec::with_capacity(size);
    let read = reader.by_ref().take(size as u64).read_to_end(&mut pixels)?;

    if read < size {
        warn!("bitmap pixel data is short, read {read} of {size} bytes, zero filling the rest");
        pixels.resize(size, 0);
    }

    *dst = pixels;
    Ok(header)
}

/// Reads the pixel buffer of the bitmap file at `path` into `dst`, see `read_into`.
pub fn decode_into<P: AsRef<Path>>(path: P, dst: &mut Vec<u8>) -> Result<BmpHeader> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| BmpErr::Open {
        path: path.to_path_buf(),
        source,
    })?;

    read_into(&mut BufReader::new(file), dst)
}

/// Decodes the bitmap file at `path`.
pub fn decode<P: AsRef<Path>>(path: P) -> Result<Bitmap> {
    let mut pixels = Vec::new();
    let header = decode_into(path, &mut pixels)?;
    Ok(Bitmap::new(header, pixels))
}

#[cfg(test)]
mod tests {
    use std::{fs, io::Cursor};

    use super::*;
    use crate::encode_grey8;

    fn gradient(width: u32, height: u32) -> Vec<u8> {
        (0..width * height).map(|i| (i % 256) as u8).collect()
    }

    #[test]
    fn reads_padded_rows_in_stored_order() {
        let bytes = encode_grey8(5, 2, &[1, 2, 3, 4, 5, 6, 7, 8, 9, 10]).unwrap();

        let mut pixels = Vec::new();
        let header = read_into(&mut Cursor::new(bytes), &mut pixels).unwrap();

        assert_eq!(header.row_stride(), Some(8));
        assert_eq!(pixels, [1, 2, 3, 4, 5, 0, 0, 0, 6, 7, 8, 9, 10, 0, 0, 0]);
    }

    #[test]
    fn bad_signature_leaves_the_buffer_untouched() {
        let mut bytes = encode_grey8(2, 2, &[1, 2, 3, 4]).unwrap();
        bytes[0] = b'X';

        let mut pixels = vec![42; 3];
        let result = read_into(&mut Cursor::new(bytes), &mut pixels);

        assert!(matches!(result, Err(BmpErr::BadSignature([b'X', b'M']))));
        assert_eq!(pixels, [42; 3]);
    }

    #[test]
    fn short_pixel_data_is_zero_filled() {
        let bytes = encode_grey8(28, 28, &gradient(28, 28)).unwrap();
        let cut = bytes.len() - 100;

        let mut pixels = Vec::new();
        read_into(&mut Cursor::new(&bytes[..cut]), &mut pixels).unwrap();

        assert_eq!(pixels.len(), 784);
        assert_eq!(pixels[..684], gradient(28, 28)[..684]);
        assert!(pixels[684..].iter().all(|&p| p == 0));
    }

    #[test]
    fn decodes_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("0_1.bmp");
        fs::write(&path, encode_grey8(28, 28, &gradient(28, 28)).unwrap()).unwrap();

        let bitmap = decode(&path).unwrap();

        assert_eq!(bitmap.header().width, 28);
        assert_eq!(bitmap.pixels(), gradient(28, 28));
    }

    #[test]
    fn missing_files_fail_to_open() {
        let dir = tempfile::tempdir().unwrap();
        let mut pixels = vec![7];

        let result = decode_into(dir.path().join("nope.bmp"), &mut pixels);

        assert!(matches!(result, Err(BmpErr::Open { .. })));
        assert_eq!(pixels, [7]);
    }
}
