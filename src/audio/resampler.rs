//! Audio resampling using rubato
//!
//! Converts decoded mono audio to the canonical processing sample rate.

use crate::error::{Error, Result};
use rubato::{FastFixedIn, Resampler as RubatoResampler};
use tracing::debug;

/// Resample mono audio to the target sample rate.
///
/// # Arguments
/// - `input`: mono audio samples
/// - `input_rate`: input sample rate
/// - `output_rate`: target sample rate
///
/// # Returns
/// Resampled mono audio at `output_rate`.
///
/// # Notes
/// If input is already at the target rate, returns a copy without
/// resampling. An empty input yields an empty output.
pub fn resample(input: &[f32], input_rate: u32, output_rate: u32) -> Result<Vec<f32>> {
    if input_rate == output_rate {
        debug!("Sample rate already at {}Hz, skipping resample", output_rate);
        return Ok(input.to_vec());
    }

    if input.is_empty() {
        return Ok(Vec::new());
    }

    debug!("Resampling from {}Hz to {}Hz", input_rate, output_rate);

    // Whole buffer processed as a single chunk; rubato expects planar input
    let planar_input = vec![input.to_vec()];
    let input_frames = input.len();

    let mut resampler = create_resampler(input_rate, output_rate, input_frames)?;

    let planar_output = resampler
        .process(&planar_input, None)
        .map_err(|e| Error::Decode(format!("Resampling failed: {}", e)))?;

    let output = planar_output
        .into_iter()
        .next()
        .unwrap_or_default();

    debug!(
        "Resampled {} input frames to {} output frames",
        input_frames,
        output.len()
    );

    Ok(output)
}

/// Create a rubato resampler.
///
/// Uses FastFixedIn for efficiency (good quality/performance tradeoff).
fn create_resampler(
    input_rate: u32,
    output_rate: u32,
    chunk_size: usize,
) -> Result<FastFixedIn<f32>> {
    let resampler = FastFixedIn::<f32>::new(
        output_rate as f64 / input_rate as f64,
        1.0, // max_relative_ratio (no runtime changes)
        rubato::PolynomialDegree::Septic, // High quality polynomial
        chunk_size,
        1, // mono
    )
    .map_err(|e| Error::Decode(format!("Failed to create resampler: {}", e)))?;

    Ok(resampler)
}
