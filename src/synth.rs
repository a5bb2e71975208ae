//! Synthetic frame data for tests, benches, and demos.
//!
//! Stands in for the simulation: composite EEG-like waveforms, seeded noise,
//! and deterministic firing patterns.

use crate::frame::NeuronReading;

/// Scrolling composite waveform in [-1, 1].
///
/// Three detuned sines normalized by their summed amplitude; `time` scrolls
/// the pattern at two phase units per second.
pub fn generate_eeg(count: usize, time: f32) -> Vec<f32> {
    let offset = time * 2.0;
    (0..count)
        .map(|i| {
            let angle = i as f32 / 60.0 + offset;
            let wave1 = angle.sin() * 0.5;
            let wave2 = (angle * 2.718).sin() * 0.25;
            let wave3 = (angle * 7.389).sin() * 0.125;
            (wave1 + wave2 + wave3) / 0.875
        })
        .collect()
}

/// Seeded white noise in `[-amplitude, amplitude]`.
///
/// Uses a linear congruential generator so runs are reproducible.
pub fn generate_white_noise(count: usize, amplitude: f32, seed: u64) -> Vec<f32> {
    let mut state = seed;
    let a: u64 = 6364136223846793005;
    let c: u64 = 1442695040888963407;

    (0..count)
        .map(|_| {
            state = state.wrapping_mul(a).wrapping_add(c);
            let normalized = (state as f32 / u64::MAX as f32) * 2.0 - 1.0;
            amplitude * normalized
        })
        .collect()
}

/// EEG waveform with additive noise, clamped to [-1, 1].
pub fn generate_noisy_eeg(count: usize, time: f32, noise: f32, seed: u64) -> Vec<f32> {
    generate_eeg(count, time)
        .into_iter()
        .zip(generate_white_noise(count, noise, seed))
        .map(|(s, n)| (s + n).clamp(-1.0, 1.0))
        .collect()
}

/// Readings for `count` neurons at simulation step `tick`.
///
/// Neuron `i` fires when `(i * 7 + tick) % 11 == 0`; the others carry a
/// slowly cycling sub-threshold potential.
pub fn generate_firing_pattern(count: usize, tick: u64) -> Vec<NeuronReading> {
    (0..count)
        .map(|i| {
            let phase = (i as u64 * 7 + tick) % 11;
            NeuronReading {
                firing: phase == 0,
                potential: phase as f32 / 22.0,
            }
        })
        .collect()
}
