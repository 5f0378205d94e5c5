use crate::{BmpErr, BmpHeader, Result};

/// A decoded bitmap: its header and raw pixel buffer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bitmap {
    header: BmpHeader,
    pixels: Vec<u8>,
}

impl Bitmap {
    pub fn new(header: BmpHeader, pixels: Vec<u8>) -> Self {
        Self { header, pixels }
    }

    pub fn header(&self) -> &BmpHeader {
        &self.header
    }

    /// The pixel buffer as stored, padding included.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Maps every byte to `byte / 255`, keeping the stored order.
    pub fn normalized(&self) -> Vec<f32> {
        self.pixels.iter().map(|&p| p as f32 / 255.).collect()
    }

    /// Converts the bitmap into a model input of `expected_len` values.
    ///
    /// # Errors
    /// `UnsupportedInput` unless the bitmap is 8 bits per pixel and its pixel buffer holds
    /// exactly `expected_len` bytes.
    pub fn to_input(&self, expected_len: usize) -> Result<Vec<f32>> {
        if self.header.bit_depth != 8 || self.pixels.len() != expected_len {
            return Err(BmpErr::UnsupportedInput {
                bit_depth: self.header.bit_depth,
                len: self.pixels.len(),
                expected: expected_len,
            });
        }

        Ok(self.normalized())
    }
}
