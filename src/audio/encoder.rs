//! WAV encoding using hound
//!
//! Serializes processed samples as an in-memory 16-bit PCM mono WAV file.
//! Samples are clamped to [-1, 1] before quantization so effects that push
//! past full scale (echo summation) cannot overflow the 16-bit range.

use crate::error::{Error, Result};
use hound::{SampleFormat, WavSpec, WavWriter};
use std::io::Cursor;

/// Encode mono f32 samples as a complete WAV file image.
///
/// Quantization truncates toward zero at scale 32767, so encoded samples
/// always land in [-32767, 32767].
///
/// # Errors
/// Returns [`Error::Encode`] only on serialization failure; clamping makes
/// quantization itself infallible.
pub fn encode_wav(samples: &[f32], sample_rate: u32) -> Result<Vec<u8>> {
    let spec = WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };

    let mut cursor = Cursor::new(Vec::new());
    let mut writer =
        WavWriter::new(&mut cursor, spec).map_err(|e| Error::Encode(e.to_string()))?;

    for &sample in samples {
        let clamped = sample.clamp(-1.0, 1.0);
        let quantized = (clamped * 32767.0) as i16;
        writer
            .write_sample(quantized)
            .map_err(|e| Error::Encode(e.to_string()))?;
    }

    writer.finalize().map_err(|e| Error::Encode(e.to_string()))?;

    Ok(cursor.into_inner())
}
