//! Test helper modules for voice-morpher integration tests
//!
//! Each integration test binary compiles its own copy, so not every helper
//! is used from every test file.
#![allow(dead_code)]

pub mod audio_generator;
