//! Audio processing pipeline
//!
//! Decode → resample → effect → encode, all operating on mono f32 sample
//! buffers at the canonical sample rate.

pub mod decoder;
pub mod effects;
pub mod encoder;
pub mod pipeline;
pub mod pitch;
pub mod resampler;
