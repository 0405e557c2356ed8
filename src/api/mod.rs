//! HTTP API for the voice morpher service
//!
//! Thin transport boundary over [`crate::AudioPipeline`]: route definitions,
//! CORS policy, and multipart upload parsing live here; all audio semantics
//! live in the `audio` module.

pub mod handlers;
pub mod server;

pub use server::{create_router, AppContext};
