//! Voice effect engine
//!
//! Pure transforms over mono f32 sample buffers at the canonical sample
//! rate. Dispatch is over a closed enum parsed from the request's effect
//! identifier; an unrecognized identifier maps to passthrough, never an
//! error.

use crate::audio::pitch;
use crate::config::PipelineConfig;
use serde::Serialize;

/// Catalog entry describing one built-in effect
#[derive(Debug, Clone, Serialize)]
pub struct EffectInfo {
    pub id: &'static str,
    pub name: &'static str,
}

/// Static catalog of available effects, exposed via `GET /api/effects`
pub const EFFECT_CATALOG: [EffectInfo; 4] = [
    EffectInfo {
        id: "deep",
        name: "Deep Voice",
    },
    EffectInfo {
        id: "chipmunk",
        name: "Chipmunk",
    },
    EffectInfo {
        id: "echo",
        name: "Echo",
    },
    EffectInfo {
        id: "reverse",
        name: "Reverse",
    },
];

/// A voice effect, parsed from its request identifier.
///
/// `Unknown` preserves the unmatched identifier and always applies as
/// identity, so new/misspelled effect names degrade to passthrough.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Pitch down, duration preserved
    Deep,
    /// Pitch up, duration preserved
    Chipmunk,
    /// Single-tap delay mixed back at reduced level
    Echo,
    /// Sample-order reversal
    Reverse,
    /// Passthrough for any unrecognized identifier
    Unknown(String),
}

impl Effect {
    /// Parse an effect identifier. Never fails; unmatched strings become
    /// [`Effect::Unknown`].
    pub fn from_id(id: &str) -> Self {
        match id {
            "deep" => Effect::Deep,
            "chipmunk" => Effect::Chipmunk,
            "echo" => Effect::Echo,
            "reverse" => Effect::Reverse,
            other => Effect::Unknown(other.to_string()),
        }
    }

    /// Apply the effect to a sample buffer.
    ///
    /// Every effect preserves buffer length; an empty buffer is returned
    /// unchanged. Echo output may exceed [-1, 1] and is clamped by the
    /// encoder.
    pub fn apply(&self, samples: Vec<f32>, config: &PipelineConfig) -> Vec<f32> {
        if samples.is_empty() {
            return samples;
        }

        match self {
            Effect::Deep => pitch::pitch_shift(&samples, config.sample_rate, config.deep_semitones),
            Effect::Chipmunk => {
                pitch::pitch_shift(&samples, config.sample_rate, config.chipmunk_semitones)
            }
            Effect::Echo => echo(samples, config),
            Effect::Reverse => reverse(samples),
            Effect::Unknown(_) => samples,
        }
    }
}

/// Single-tap delay line.
///
/// `output[i] = input[i] + level * input[i - delay]` for `i >= delay`.
/// The buffer is not extended: the echo tail past the original length is
/// dropped. A delay of zero or beyond the buffer contributes nothing.
fn echo(samples: Vec<f32>, config: &PipelineConfig) -> Vec<f32> {
    let delay = (config.echo_delay_secs * config.sample_rate as f32) as usize;
    if delay == 0 || delay >= samples.len() {
        return samples;
    }

    let mut output = samples.clone();
    for i in delay..samples.len() {
        output[i] = samples[i] + config.echo_level * samples[i - delay];
    }
    output
}

/// Reverse sample order in place.
fn reverse(mut samples: Vec<f32>) -> Vec<f32> {
    samples.reverse();
    samples
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> PipelineConfig {
        PipelineConfig::default()
    }

    fn ramp(len: usize) -> Vec<f32> {
        (0..len).map(|i| (i as f32 / len as f32) - 0.5).collect()
    }

    #[test]
    fn test_from_id() {
        assert_eq!(Effect::from_id("deep"), Effect::Deep);
        assert_eq!(Effect::from_id("chipmunk"), Effect::Chipmunk);
        assert_eq!(Effect::from_id("echo"), Effect::Echo);
        assert_eq!(Effect::from_id("reverse"), Effect::Reverse);
        assert_eq!(
            Effect::from_id("robot"),
            Effect::Unknown("robot".to_string())
        );
    }

    #[test]
    fn test_catalog_ids_round_trip() {
        for info in &EFFECT_CATALOG {
            assert!(!matches!(Effect::from_id(info.id), Effect::Unknown(_)));
        }
    }

    #[test]
    fn test_unknown_is_passthrough() {
        let input = ramp(1000);
        let output = Effect::from_id("not-an-effect").apply(input.clone(), &config());
        assert_eq!(output, input);
    }

    #[test]
    fn test_reverse_round_trip() {
        let input = ramp(1000);
        let once = Effect::Reverse.apply(input.clone(), &config());
        assert_ne!(once, input);
        let twice = Effect::Reverse.apply(once, &config());
        assert_eq!(twice, input);
    }

    #[test]
    fn test_length_invariance_all_effects() {
        let input = ramp(10000);
        for id in ["deep", "chipmunk", "echo", "reverse", "bogus"] {
            let output = Effect::from_id(id).apply(input.clone(), &config());
            assert_eq!(output.len(), input.len(), "length changed for '{}'", id);
        }
    }

    #[test]
    fn test_empty_input_all_effects() {
        for id in ["deep", "chipmunk", "echo", "reverse", "bogus"] {
            let output = Effect::from_id(id).apply(Vec::new(), &config());
            assert!(output.is_empty(), "non-empty output for '{}'", id);
        }
    }

    #[test]
    fn test_echo_concrete_mix() {
        // 0.3s at 22050 Hz = 6615 samples of delay
        let input = vec![0.4f32; 10000];
        let output = Effect::Echo.apply(input, &config());

        assert_eq!(output.len(), 10000);
        for (i, &s) in output.iter().enumerate() {
            if i < 6615 {
                assert!((s - 0.4).abs() < 1e-6, "sample {} was {}", i, s);
            } else {
                assert!((s - 0.6).abs() < 1e-6, "sample {} was {}", i, s);
            }
        }
    }

    #[test]
    fn test_echo_delay_longer_than_buffer() {
        // Shorter than the 6615-sample delay, so the tap never lands
        let input = ramp(5000);
        let output = Effect::Echo.apply(input.clone(), &config());
        assert_eq!(output, input);
    }

    #[test]
    fn test_echo_can_exceed_unit_range() {
        let input = vec![0.9f32; 10000];
        let output = Effect::Echo.apply(input, &config());
        let peak = output.iter().fold(0.0f32, |m, s| m.max(s.abs()));
        assert!(peak > 1.0);
    }
}
