//! Phase-vocoder pitch shifting
//!
//! Shifts pitch by a semitone count while preserving duration. The analysis
//! side runs a short-time FFT with 4x overlap, estimates the true frequency
//! of each bin from the phase advance between hops, scales magnitudes and
//! frequencies by the pitch ratio, and resynthesizes with phase accumulation
//! and windowed overlap-add.
//!
//! Output length always equals input length: the algorithm's inherent
//! latency (analysis window minus hop) is compensated by zero-padding the
//! input and discarding the leading silence.

use rustfft::{num_complex::Complex, Fft, FftPlanner};
use std::f32::consts::PI;
use std::sync::Arc;

const TWO_PI: f32 = 2.0 * PI;

/// Analysis window length in samples
const FFT_SIZE: usize = 1024;

/// Overlap factor (hop = FFT_SIZE / OVERSAMPLE)
const OVERSAMPLE: usize = 4;

/// Shift pitch by `semitones` (positive = up), preserving duration.
///
/// Returns a buffer of exactly `input.len()` samples. Empty input returns
/// an empty buffer; a zero shift returns a copy.
pub fn pitch_shift(input: &[f32], sample_rate: u32, semitones: f32) -> Vec<f32> {
    if input.is_empty() || semitones == 0.0 {
        return input.to_vec();
    }

    let pitch_ratio = 2.0f32.powf(semitones / 12.0);

    let mut vocoder = PhaseVocoder::new();
    let latency = vocoder.latency();

    // Pad with trailing zeros so the final input samples clear the latency
    let mut padded = Vec::with_capacity(input.len() + latency);
    padded.extend_from_slice(input);
    padded.resize(input.len() + latency, 0.0);

    let mut output = vec![0.0f32; padded.len()];
    vocoder.run(&padded, &mut output, pitch_ratio, sample_rate as f32);

    // Discard the leading latency; what remains aligns with the input
    output.drain(..latency);
    output.truncate(input.len());
    output
}

/// Streaming phase-vocoder state (single channel).
struct PhaseVocoder {
    fft_size: usize,
    oversample: usize,
    step: usize,
    rover: usize,
    in_fifo: Vec<f32>,
    out_fifo: Vec<f32>,
    output_accum: Vec<f32>,
    fft_buffer: Vec<Complex<f32>>,
    window: Vec<f32>,
    last_phase: Vec<f32>,
    sum_phase: Vec<f32>,
    ana_magn: Vec<f32>,
    ana_freq: Vec<f32>,
    syn_magn: Vec<f32>,
    syn_freq: Vec<f32>,
    syn_weight: Vec<f32>,
    fft_forward: Arc<dyn Fft<f32>>,
    fft_inverse: Arc<dyn Fft<f32>>,
}

impl PhaseVocoder {
    fn new() -> Self {
        let fft_size = FFT_SIZE;
        let oversample = OVERSAMPLE;
        let step = fft_size / oversample;
        let half = fft_size / 2;

        let mut planner = FftPlanner::new();
        let fft_forward = planner.plan_fft_forward(fft_size);
        let fft_inverse = planner.plan_fft_inverse(fft_size);

        // Hann window
        let window: Vec<f32> = (0..fft_size)
            .map(|i| {
                let phase = TWO_PI * i as f32 / fft_size as f32;
                0.5 * (1.0 - phase.cos())
            })
            .collect();

        Self {
            fft_size,
            oversample,
            step,
            rover: fft_size - step,
            in_fifo: vec![0.0; fft_size],
            out_fifo: vec![0.0; fft_size],
            output_accum: vec![0.0; fft_size],
            fft_buffer: vec![Complex::new(0.0, 0.0); fft_size],
            window,
            last_phase: vec![0.0; half + 1],
            sum_phase: vec![0.0; half + 1],
            ana_magn: vec![0.0; half + 1],
            ana_freq: vec![0.0; half + 1],
            syn_magn: vec![0.0; half + 1],
            syn_freq: vec![0.0; half + 1],
            syn_weight: vec![0.0; half + 1],
            fft_forward,
            fft_inverse,
        }
    }

    /// Processing delay in samples between input and output
    fn latency(&self) -> usize {
        self.fft_size - self.step
    }

    /// Process `input` into `output` (same length) at the given pitch ratio.
    fn run(&mut self, input: &[f32], output: &mut [f32], pitch_ratio: f32, sample_rate: f32) {
        debug_assert_eq!(input.len(), output.len());

        let fft_size = self.fft_size;
        let in_fifo_latency = self.latency();
        let freq_per_bin = sample_rate / fft_size as f32;
        let expected_phase = TWO_PI * self.step as f32 / fft_size as f32;

        for (i, &sample) in input.iter().enumerate() {
            self.in_fifo[self.rover] = sample;
            output[i] = self.out_fifo[self.rover - in_fifo_latency];
            self.rover += 1;

            if self.rover >= fft_size {
                self.process_frame(pitch_ratio, freq_per_bin, expected_phase);
                self.rover = in_fifo_latency;
            }
        }
    }

    /// Analyze, shift, and resynthesize one windowed frame.
    fn process_frame(&mut self, pitch_ratio: f32, freq_per_bin: f32, expected_phase: f32) {
        let fft_size = self.fft_size;
        let half = fft_size / 2;
        let step = self.step;
        let oversample = self.oversample as f32;

        // Analysis: windowed forward FFT
        for k in 0..fft_size {
            self.fft_buffer[k] = Complex::new(self.in_fifo[k] * self.window[k], 0.0);
        }
        self.fft_forward.process(&mut self.fft_buffer);

        // True frequency estimation from phase advance per hop
        for k in 0..=half {
            let bin = self.fft_buffer[k];
            let magn = 2.0 * bin.norm();
            let phase = bin.im.atan2(bin.re);

            let mut delta_phase = phase - self.last_phase[k];
            self.last_phase[k] = phase;

            // Subtract expected advance and wrap into [-PI, PI]
            delta_phase -= k as f32 * expected_phase;
            let mut qpd = (delta_phase / PI).round() as i32;
            if qpd >= 0 {
                qpd += qpd & 1;
            } else {
                qpd -= qpd & 1;
            }
            delta_phase -= PI * qpd as f32;

            let deviation = oversample * delta_phase / TWO_PI;

            self.ana_magn[k] = magn;
            self.ana_freq[k] = (k as f32 + deviation) * freq_per_bin;
        }

        // Shift: move each bin to round(k * ratio), scale its frequency
        self.syn_magn.fill(0.0);
        self.syn_freq.fill(0.0);
        self.syn_weight.fill(0.0);

        for k in 0..=half {
            let index = (k as f32 * pitch_ratio).round() as usize;
            if index <= half {
                self.syn_magn[index] += self.ana_magn[k];
                self.syn_freq[index] += self.ana_freq[k] * pitch_ratio;
                self.syn_weight[index] += 1.0;
            }
        }

        for k in 0..=half {
            if self.syn_weight[k] > 0.0 {
                self.syn_freq[k] /= self.syn_weight[k];
            } else {
                self.syn_freq[k] = k as f32 * freq_per_bin;
            }
        }

        // Synthesis: accumulate phase from target frequencies
        for k in 0..=half {
            let magn = self.syn_magn[k];
            let deviation = self.syn_freq[k] / freq_per_bin - k as f32;
            let delta = k as f32 * expected_phase + TWO_PI * deviation / oversample;
            self.sum_phase[k] += delta;

            let phase = self.sum_phase[k];
            let re = magn * phase.cos();
            let im = magn * phase.sin();

            if k == 0 || k == half {
                self.fft_buffer[k] = Complex::new(re, 0.0);
            } else {
                self.fft_buffer[k] = Complex::new(re, im);
                self.fft_buffer[fft_size - k] = Complex::new(re, -im);
            }
        }

        self.fft_inverse.process(&mut self.fft_buffer);

        // Windowed overlap-add. rustfft's inverse is unnormalized, so the
        // combined gain works out to 1/(2 * fft_size) for a hann window at
        // 4x overlap: magnitudes carry a factor 2, the inverse a factor
        // fft_size, and the overlapped window sum a factor oversample / 2.
        let scale = 1.0 / (2.0 * fft_size as f32);
        for k in 0..fft_size {
            self.output_accum[k] += self.fft_buffer[k].re * self.window[k] * scale;
        }

        for k in 0..step {
            self.out_fifo[k] = self.output_accum[k];
        }

        // Slide buffers by one hop
        self.output_accum.copy_within(step..fft_size, 0);
        self.output_accum[fft_size - step..].fill(0.0);

        self.in_fifo.copy_within(step..fft_size, 0);
        self.in_fifo[fft_size - step..].fill(0.0);
    }
}
