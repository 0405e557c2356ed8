//! Audio test fixture generation
//!
//! Builds deterministic in-memory WAV images with known characteristics
//! for exercising the processing pipeline:
//! - Silent audio (all zeros), including zero-length clips
//! - Sine waves at specific frequencies
//!
//! All fixtures are 16-bit PCM, written with hound into a byte buffer
//! exactly as a browser upload would arrive.

use hound::{SampleFormat, WavSpec, WavWriter};
use std::f32::consts::PI;
use std::io::Cursor;

fn spec(sample_rate: u32, channels: u16) -> WavSpec {
    WavSpec {
        channels,
        sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    }
}

/// Generate a silent WAV image.
///
/// `duration_ms` of zero produces a valid WAV with an empty data chunk.
pub fn silent_wav_bytes(sample_rate: u32, channels: u16, duration_ms: u64) -> Vec<u8> {
    let mut cursor = Cursor::new(Vec::new());
    let mut writer = WavWriter::new(&mut cursor, spec(sample_rate, channels)).unwrap();

    let total_frames = (sample_rate as u64 * duration_ms) / 1000;
    for _ in 0..total_frames * channels as u64 {
        writer.write_sample(0i16).unwrap();
    }

    writer.finalize().unwrap();
    cursor.into_inner()
}

/// Generate a sine wave WAV image.
///
/// All channels carry the same signal. Amplitude 0.5 is recommended to
/// stay clear of clipping.
pub fn sine_wav_bytes(
    sample_rate: u32,
    channels: u16,
    duration_ms: u64,
    frequency_hz: f32,
    amplitude: f32,
) -> Vec<u8> {
    let mut cursor = Cursor::new(Vec::new());
    let mut writer = WavWriter::new(&mut cursor, spec(sample_rate, channels)).unwrap();

    let total_frames = (sample_rate as u64 * duration_ms) / 1000;
    for frame_idx in 0..total_frames {
        let t = frame_idx as f32 / sample_rate as f32;
        let value = (2.0 * PI * frequency_hz * t).sin() * amplitude;
        let value_i16 = (value * 32767.0) as i16;
        for _ in 0..channels {
            writer.write_sample(value_i16).unwrap();
        }
    }

    writer.finalize().unwrap();
    cursor.into_inner()
}

/// Parse a WAV image back into its spec and i16 samples.
pub fn read_wav_bytes(bytes: &[u8]) -> (WavSpec, Vec<i16>) {
    let mut reader = hound::WavReader::new(Cursor::new(bytes)).unwrap();
    let spec = reader.spec();
    let samples: Vec<i16> = reader.samples::<i16>().map(|s| s.unwrap()).collect();
    (spec, samples)
}
