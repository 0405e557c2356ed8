//! Pipeline configuration
//!
//! All tunables live in one immutable struct passed to the pipeline at
//! construction. There is no hidden global state: tests can build a pipeline
//! with alternate values without touching the production defaults.

/// Audio pipeline configuration
///
/// Immutable after construction; safely read-shared across concurrent
/// requests.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Canonical sample rate all processing operates at (Hz)
    pub sample_rate: u32,
    /// Echo tap delay in seconds
    pub echo_delay_secs: f32,
    /// Echo wet-signal gain
    pub echo_level: f32,
    /// Semitone shift for the "deep" effect
    pub deep_semitones: f32,
    /// Semitone shift for the "chipmunk" effect
    pub chipmunk_semitones: f32,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            sample_rate: 22050,
            echo_delay_secs: 0.3,
            echo_level: 0.5,
            deep_semitones: -4.0,
            chipmunk_semitones: 5.0,
        }
    }
}
