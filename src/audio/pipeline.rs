//! Processing pipeline
//!
//! Composes decoder → resampler → effect engine → encoder into the single
//! entry point the transport layer calls. Each invocation is independent
//! and stateless; the only instance data is the immutable configuration,
//! so one pipeline can be shared across concurrent requests.

use crate::audio::{decoder, effects::Effect, encoder, resampler};
use crate::config::PipelineConfig;
use crate::error::Result;
use tracing::debug;

/// Stateless audio processing pipeline.
#[derive(Debug, Clone)]
pub struct AudioPipeline {
    config: PipelineConfig,
}

impl AudioPipeline {
    /// Create a pipeline with the given configuration.
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    /// The pipeline's immutable configuration.
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Process an uploaded audio buffer with the named effect.
    ///
    /// Decodes any supported container/codec, converts to mono at the
    /// canonical sample rate, applies the effect (unknown identifiers pass
    /// through unchanged), and returns a complete 16-bit PCM WAV image.
    ///
    /// # Errors
    /// Fails with [`crate::Error::Decode`] when the input is not decodable
    /// audio, or [`crate::Error::Encode`] on serialization failure. An
    /// unrecognized effect identifier is not an error.
    pub fn process(&self, raw: Vec<u8>, effect_id: &str) -> Result<Vec<u8>> {
        let (native_samples, native_rate) = decoder::decode(raw)?;

        let samples = resampler::resample(&native_samples, native_rate, self.config.sample_rate)?;

        let effect = Effect::from_id(effect_id);
        debug!(
            "Applying {:?} to {} samples at {}Hz",
            effect,
            samples.len(),
            self.config.sample_rate
        );
        let processed = effect.apply(samples, &self.config);

        encoder::encode_wav(&processed, self.config.sample_rate)
    }
}

impl Default for AudioPipeline {
    fn default() -> Self {
        Self::new(PipelineConfig::default())
    }
}
