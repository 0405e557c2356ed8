//! # Voice Morpher Library
//!
//! Audio effect processing service: decode an uploaded clip, apply a named
//! voice effect, return a playable WAV file.
//!
//! **Purpose:** Convert arbitrary browser-recorded audio to mono 22.05 kHz,
//! apply one of the built-in effects (deep, chipmunk, echo, reverse), and
//! re-encode as 16-bit PCM WAV.
//!
//! **Architecture:** Stateless processing pipeline using symphonia + rubato +
//! rustfft + hound, fronted by an Axum HTTP API.

pub mod api;
pub mod audio;
pub mod config;
pub mod error;

pub use audio::pipeline::AudioPipeline;
pub use config::PipelineConfig;
pub use error::{Error, Result};
