//! The binary model file.
//!
//! Each layer is stored, in order, as its weights length and biases length (`u32`) followed
//! by the weights and the biases (`f32`), everything little-endian. Weights are written in
//! flat index order, `input + output * in_dim`.

mod error;

use std::{
    fs::{self, File},
    io::{BufReader, BufWriter, Read, Write},
    path::Path,
};

use log::debug;

pub use error::{CodecErr, Result};

use crate::arch::{Sequential, layers::Dense};

/// The amount of layers a model file holds.
pub const DEPTH: usize = 2;

/// Elements read per chunk, so a lying header can't force a huge allocation up front.
const CHUNK: usize = 1 << 16;

/// Writes `model` to `writer`.
///
/// # Errors
/// `UnsupportedDepth` if the model doesn't have exactly `DEPTH` layers, `CorruptModel` if a
/// layer is too large for the format.
pub fn save<W: Write>(model: &Sequential, writer: &mut W) -> Result<()> {
    let nlayers = model.layers().len();
    if nlayers != DEPTH {
        return Err(CodecErr::UnsupportedDepth { got: nlayers });
    }

    for layer in model.layers() {
        let weights: Vec<f32> = layer.weights().iter().map(|&w| to_le(w)).collect();
        let biases: Vec<f32> = layer.biases().iter().map(|&b| to_le(b)).collect();

        let header = [len_field(weights.len())?, len_field(biases.len())?];
        debug!("writing layer of {} weights and {} biases", header[0], header[1]);

        let header = header.map(u32::to_le);
        writer.write_all(bytemuck::cast_slice(&header))?;
        writer.write_all(bytemuck::cast_slice(&weights))?;
        writer.write_all(bytemuck::cast_slice(&biases))?;
    }

    Ok(())
}

/// Reads a model from `reader`.
///
/// Nothing is returned unless every layer was read completely and the layers chain. Bytes
/// after the last layer are left unread.
///
/// # Errors
/// `CorruptModel` if the stream ends early or describes an impossible model, `Io` for any
/// other read failure.
pub fn load<R: Read>(reader: &mut R) -> Result<Sequential> {
    let mut layers = Vec::with_capacity(DEPTH);

    for i in 0..DEPTH {
        let mut header = [0u32; 2];
        reader.read_exact(bytemuck::cast_slice_mut(&mut header))?;
        let [w_len, b_len] = header.map(|n| u32::from_le(n) as usize);
        debug!("reading layer {i} of {w_len} weights and {b_len} biases");

        if b_len == 0 || w_len == 0 {
            return Err(CodecErr::corrupt(format!("layer {i} is empty")));
        }

        if w_len % b_len != 0 {
            return Err(CodecErr::corrupt(format!(
                "layer {i} has {w_len} weights, not a multiple of its {b_len} biases"
            )));
        }

        let weights = read_f32s(reader, w_len)?;
        let biases = read_f32s(reader, b_len)?;

        let layer = Dense::new((w_len / b_len, b_len), weights, biases)
            .map_err(|e| CodecErr::corrupt(format!("layer {i}: {e}")))?;

        layers.push(layer);
    }

    Sequential::new(layers).map_err(|e| CodecErr::corrupt(e.to_string()))
}

/// Writes `model` to a new file at `path`, replacing any previous one.
///
/// The model is encoded first and written next to `path` before being moved over it, so a
/// failed save leaves the previous file as it was.
pub fn save_file<P: AsRef<Path>>(model: &Sequential, path: P) -> Result<()> {
    let path = path.as_ref();

    let mut bytes = Vec::new();
    save(model, &mut bytes)?;

    let mut tmp_name = path.file_name().unwrap_or_default().to_os_string();
    tmp_name.push(".tmp");
    let tmp = path.with_file_name(tmp_name);

    let written =
        write_new(&tmp, &bytes).and_then(|()| fs::rename(&tmp, path).map_err(CodecErr::from));
    if written.is_err() {
        let _ = fs::remove_file(&tmp);
    }

    written
}

fn write_new(path: &Path, bytes: &[u8]) -> Result<()> {
    let file = File::create(path).map_err(|source| CodecErr::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let mut writer = BufWriter::new(file);
    writer.write_all(bytes)?;
    writer.flush()?;
    Ok(())
}

/// Reads a model from the file at `path`.
pub fn load_file<P: AsRef<Path>>(path: P) -> Result<Sequential> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| CodecErr::Open {
        path: path.to_path_buf(),
        source,
    })?;

    load(&mut BufReader::new(file))
}

fn len_field(len: usize) -> Result<u32> {
    u32::try_from(len)
        .map_err(|_| CodecErr::corrupt(format!("{len} values don't fit a u32 length")))
}

fn to_le(x: f32) -> f32 {
    f32::from_bits(x.to_bits().to_le())
}

fn from_le(x: f32) -> f32 {
    f32::from_bits(u32::from_le(x.to_bits()))
}

fn read_f32s<R: Read>(reader: &mut R, n: usize) -> Result<Vec<f32>> {
    let mut nums: Vec<f32> = Vec::new();

    while nums.len() < n {
        let start = nums.len();
        let end = n.min(start + CHUNK);
        nums.resize(end, 0.);
        reader.read_exact(bytemuck::cast_slice_mut(&mut nums[start..]))?;
    }

    nums.iter_mut().for_each(|x| *x = from_le(*x));
    Ok(nums)
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use rand::{SeedableRng, rngs::StdRng};

    use super::*;
    use crate::arch::Architecture;

    fn model() -> Sequential {
        Architecture::new(5, 3, 2)
            .build(&mut StdRng::seed_from_u64(4))
            .unwrap()
    }

    fn bytes(model: &Sequential) -> Vec<u8> {
        let mut buf = Vec::new();
        save(model, &mut buf).unwrap();
        buf
    }

    fn header(w_len: u32, b_len: u32) -> Vec<u8> {
        let mut buf = w_len.to_le_bytes().to_vec();
        buf.extend_from_slice(&b_len.to_le_bytes());
        buf
    }

    #[test]
    fn layout_is_lengths_then_payloads() {
        let hidden = Dense::new((2, 1), vec![1.5, -2.], vec![0.25]).unwrap();
        let output = Dense::new((1, 1), vec![3.], vec![-1.]).unwrap();
        let model = Sequential::new([hidden, output]).unwrap();

        let mut expected = header(2, 1);
        for x in [1.5f32, -2., 0.25] {
            expected.extend_from_slice(&x.to_le_bytes());
        }
        expected.extend(header(1, 1));
        for x in [3f32, -1.] {
            expected.extend_from_slice(&x.to_le_bytes());
        }

        assert_eq!(bytes(&model), expected);
    }

    #[test]
    fn loads_what_was_saved() {
        let model = model();
        let buf = bytes(&model);

        assert_eq!(buf.len(), 2 * 8 + (5 * 3 + 3 + 3 * 2 + 2) * 4);
        assert_eq!(load(&mut Cursor::new(&buf)).unwrap(), model);
    }

    #[test]
    fn trailing_bytes_are_ignored() {
        let model = model();
        let mut buf = bytes(&model);
        buf.extend_from_slice(&[0xde, 0xad]);

        assert_eq!(load(&mut Cursor::new(&buf)).unwrap(), model);
    }

    #[test]
    fn truncated_streams_are_corrupt() {
        let buf = bytes(&model());

        for len in [0, 3, 8, 20, buf.len() - 1] {
            let result = load(&mut Cursor::new(&buf[..len]));
            assert!(matches!(result, Err(CodecErr::CorruptModel(_))), "len {len}");
        }
    }

    #[test]
    fn lying_lengths_are_corrupt() {
        // Biases that don't divide the weights.
        let mut buf = header(5, 2);
        buf.extend(vec![0; 7 * 4]);
        assert!(matches!(load(&mut Cursor::new(&buf)), Err(CodecErr::CorruptModel(_))));

        // No biases.
        let buf = header(4, 0);
        assert!(matches!(load(&mut Cursor::new(&buf)), Err(CodecErr::CorruptModel(_))));

        // A huge length with no data behind it.
        let buf = header(u32::MAX - 2, 1);
        assert!(matches!(load(&mut Cursor::new(&buf)), Err(CodecErr::CorruptModel(_))));
    }

    #[test]
    fn layers_must_chain() {
        let mut buf = header(6, 3);
        buf.extend(vec![0; 9 * 4]);
        buf.extend(header(4, 2));
        buf.extend(vec![0; 6 * 4]);

        assert!(matches!(load(&mut Cursor::new(&buf)), Err(CodecErr::CorruptModel(_))));
    }

    #[test]
    fn only_two_layers_are_saved() {
        let single = Dense::new((2, 1), vec![0.; 2], vec![0.]).unwrap();
        let model = Sequential::new([single]).unwrap();

        assert!(matches!(
            save(&model, &mut Vec::new()),
            Err(CodecErr::UnsupportedDepth { got: 1 })
        ));
    }

    #[test]
    fn failed_save_keeps_the_previous_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.bin");
        let previous = bytes(&model());
        std::fs::write(&path, &previous).unwrap();

        let single = Dense::new((2, 1), vec![0.; 2], vec![0.]).unwrap();
        let result = save_file(&Sequential::new([single]).unwrap(), &path);

        assert!(matches!(result, Err(CodecErr::UnsupportedDepth { got: 1 })));
        assert_eq!(std::fs::read(&path).unwrap(), previous);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn save_file_replaces_the_previous_model() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.bin");
        std::fs::write(&path, [1, 2, 3]).unwrap();

        let model = model();
        save_file(&model, &path).unwrap();

        assert_eq!(load_file(&path).unwrap(), model);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn missing_file_fails_to_open() {
        let result = load_file("definitely/not/a/model.bin");
        assert!(matches!(result, Err(CodecErr::Open { .. })));
    }
}
