//! Audio decoder using symphonia
//!
//! Decodes an in-memory byte buffer in any supported container/codec format
//! (WAV, MP3, FLAC, AAC, MP4/M4A, Ogg Vorbis per Cargo.toml features)
//! to mono f32 PCM samples at the source's native sample rate.
//!
//! # Sample format
//!
//! - Output: mono f32 samples in [-1.0, 1.0]
//! - Multi-channel sources are downmixed by averaging channels per frame
//! - Integer PCM is normalized by the full-scale divisor implied by the
//!   source bit depth: 16-bit / 32768.0, 32-bit / 2147483648.0; other depths
//!   are widened (or narrowed) to 16-bit range and use the 16-bit divisor

use crate::error::{Error, Result};
use symphonia::core::audio::{AudioBuffer, AudioBufferRef, Signal};
use symphonia::core::codecs::{DecoderOptions, CODEC_TYPE_NULL};
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;
use symphonia::core::sample::Sample;
use tracing::{debug, warn};

/// Decode an audio byte buffer to mono f32 samples.
///
/// The input is a complete file image as uploaded by the caller; no hint
/// about its container is available, so symphonia probes the content.
///
/// # Returns
/// - `samples`: mono f32 samples at the source's native rate
/// - `sample_rate`: native sample rate (before resampling)
///
/// # Errors
/// Returns [`Error::Decode`] when the buffer is empty, not a recognized
/// audio container, or contains no audio track.
pub fn decode(raw: Vec<u8>) -> Result<(Vec<f32>, u32)> {
    if raw.is_empty() {
        return Err(Error::Decode("Input buffer is empty".to_string()));
    }

    debug!("Decoding {} byte buffer", raw.len());

    let mss = MediaSourceStream::new(Box::new(std::io::Cursor::new(raw)), Default::default());

    // No filename available for an in-memory upload; probe content only
    let hint = Hint::new();
    let format_opts = FormatOptions::default();
    let metadata_opts = MetadataOptions::default();

    let probed = symphonia::default::get_probe()
        .format(&hint, mss, &format_opts, &metadata_opts)
        .map_err(|e| Error::Decode(format!("Failed to probe format: {}", e)))?;

    let mut format = probed.format;

    // Get the default audio track
    let track = format
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
        .ok_or_else(|| Error::Decode("No audio track found".to_string()))?;

    let track_id = track.id;
    let codec_params = track.codec_params.clone();

    let sample_rate = codec_params
        .sample_rate
        .ok_or_else(|| Error::Decode("Sample rate not found".to_string()))?;

    let channels = codec_params
        .channels
        .map(|c| c.count())
        .ok_or_else(|| Error::Decode("Channel count not found".to_string()))?;

    debug!(
        "Source format: sample_rate={}, channels={}",
        sample_rate, channels
    );

    let decoder_opts = DecoderOptions::default();
    let mut decoder = symphonia::default::get_codecs()
        .make(&codec_params, &decoder_opts)
        .map_err(|e| Error::Decode(format!("Failed to create decoder: {}", e)))?;

    // Decode all packets
    let mut samples = Vec::new();

    loop {
        let packet = match format.next_packet() {
            Ok(packet) => packet,
            Err(symphonia::core::errors::Error::IoError(ref e))
                if e.kind() == std::io::ErrorKind::UnexpectedEof =>
            {
                // End of stream
                break;
            }
            Err(e) => {
                warn!("Error reading packet: {}", e);
                break;
            }
        };

        // Skip packets for other tracks
        if packet.track_id() != track_id {
            continue;
        }

        match decoder.decode(&packet) {
            Ok(decoded) => {
                convert_to_mono_f32(&decoded, &mut samples);
            }
            Err(e) => {
                warn!("Decode error: {}", e);
                continue;
            }
        }
    }

    debug!("Decoded {} mono samples", samples.len());

    Ok((samples, sample_rate))
}

/// Convert a symphonia buffer to mono f32, normalizing by source bit depth.
fn convert_to_mono_f32(decoded: &AudioBufferRef, output: &mut Vec<f32>) {
    match decoded {
        AudioBufferRef::F32(buf) => downmix(buf, output, |s: f32| s),
        AudioBufferRef::F64(buf) => downmix(buf, output, |s: f64| s as f32),
        AudioBufferRef::S32(buf) => {
            downmix(buf, output, |s: i32| s as f32 / 2_147_483_648.0)
        }
        AudioBufferRef::S16(buf) => downmix(buf, output, |s: i16| s as f32 / 32768.0),
        AudioBufferRef::U32(buf) => downmix(buf, output, |s: u32| {
            (s as i64 - 2_147_483_648) as f32 / 2_147_483_648.0
        }),
        AudioBufferRef::U16(buf) => {
            downmix(buf, output, |s: u16| (s as i32 - 32768) as f32 / 32768.0)
        }
        AudioBufferRef::U8(buf) => downmix(buf, output, |s: u8| {
            (((s as i32) - 128) << 8) as f32 / 32768.0
        }),
        AudioBufferRef::S8(buf) => {
            downmix(buf, output, |s: i8| ((s as i32) << 8) as f32 / 32768.0)
        }
        AudioBufferRef::S24(buf) => downmix(buf, output, |s: symphonia::core::sample::i24| {
            (s.inner() >> 8) as f32 / 32768.0
        }),
        AudioBufferRef::U24(buf) => downmix(buf, output, |s: symphonia::core::sample::u24| {
            ((s.inner() as i32 - 8_388_608) >> 8) as f32 / 32768.0
        }),
    }
}

/// Downmix a planar buffer to mono by averaging channels per frame.
fn downmix<S, F>(buf: &AudioBuffer<S>, output: &mut Vec<f32>, to_f32: F)
where
    S: Sample,
    F: Fn(S) -> f32,
{
    let num_channels = buf.spec().channels.count();
    let num_frames = buf.frames();

    output.reserve(num_frames);

    for frame_idx in 0..num_frames {
        let mut sum = 0.0f32;
        for ch_idx in 0..num_channels {
            sum += to_f32(buf.chan(ch_idx)[frame_idx]);
        }
        output.push(sum / num_channels as f32);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hound::{SampleFormat, WavSpec, WavWriter};
    use std::io::Cursor;

    fn sine_wav_bytes(sample_rate: u32, channels: u16, samples_per_channel: usize) -> Vec<u8> {
        let spec = WavSpec {
            channels,
            sample_rate,
            bits_per_sample: 16,
            sample_format: SampleFormat::Int,
        };
        let mut cursor = Cursor::new(Vec::new());
        let mut writer = WavWriter::new(&mut cursor, spec).unwrap();
        for i in 0..samples_per_channel {
            let t = i as f32 / sample_rate as f32;
            let value = (2.0 * std::f32::consts::PI * 440.0 * t).sin() * 0.5;
            let value_i16 = (value * 32767.0) as i16;
            for _ in 0..channels {
                writer.write_sample(value_i16).unwrap();
            }
        }
        writer.finalize().unwrap();
        cursor.into_inner()
    }

    #[test]
    fn test_decode_mono_wav() {
        let bytes = sine_wav_bytes(22050, 1, 2205);
        let (samples, rate) = decode(bytes).unwrap();

        assert_eq!(rate, 22050);
        assert_eq!(samples.len(), 2205);
        assert!(samples.iter().all(|s| s.abs() <= 1.0));
        // Peak of a 0.5 amplitude sine should be near 0.5
        let peak = samples.iter().fold(0.0f32, |m, s| m.max(s.abs()));
        assert!((peak - 0.5).abs() < 0.01, "peak was {}", peak);
    }

    #[test]
    fn test_decode_stereo_downmix() {
        let bytes = sine_wav_bytes(44100, 2, 4410);
        let (samples, rate) = decode(bytes).unwrap();

        assert_eq!(rate, 44100);
        // Identical L/R channels downmix to one mono sample per frame
        assert_eq!(samples.len(), 4410);
    }

    #[test]
    fn test_decode_8_bit_normalization() {
        let spec = WavSpec {
            channels: 1,
            sample_rate: 22050,
            bits_per_sample: 8,
            sample_format: SampleFormat::Int,
        };
        let mut cursor = Cursor::new(Vec::new());
        let mut writer = WavWriter::new(&mut cursor, spec).unwrap();
        for _ in 0..100 {
            writer.write_sample(64i8).unwrap();
        }
        writer.finalize().unwrap();

        let (samples, _) = decode(cursor.into_inner()).unwrap();

        // 8-bit samples are widened to 16-bit range before the 16-bit
        // divisor applies, so +64 (half of 8-bit full scale) decodes to
        // 0.5 rather than a near-zero level
        assert_eq!(samples.len(), 100);
        for &s in &samples {
            assert!((s - 0.5).abs() < 1e-6, "sample was {}", s);
        }
    }

    #[test]
    fn test_decode_empty_buffer() {
        let result = decode(Vec::new());
        assert!(matches!(result, Err(Error::Decode(_))));
    }

    #[test]
    fn test_decode_garbage_buffer() {
        let result = decode(vec![0x13; 256]);
        assert!(matches!(result, Err(Error::Decode(_))));
    }
}
