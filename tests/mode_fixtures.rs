//! Shared fixtures for render mode tests.
#![allow(dead_code)]

use neuro_render::frame::{Unit, UnitField, RING_RADIUS};
use neuro_render::modes::FrameInputs;
use neuro_render::{FrameState, FrameUniforms, ModeParam, RendererConfig};

pub const WIDTH: u32 = 96;
pub const HEIGHT: u32 = 64;

/// Small config for pixel tests.
pub fn test_config() -> RendererConfig {
    RendererConfig {
        width: WIDTH,
        height: HEIGHT,
        background: [0.05, 0.05, 0.1],
        ..Default::default()
    }
}

/// Flat waveform of `n` zeros.
pub fn flat_samples(n: usize) -> Vec<f32> {
    vec![0.0; n]
}

/// One full sine period across `n` samples, peak `amplitude`.
pub fn sine_samples(n: usize, amplitude: f32) -> Vec<f32> {
    (0..n)
        .map(|i| amplitude * (i as f32 / n as f32 * std::f32::consts::TAU).sin())
        .collect()
}

/// Ring of units with every activation set to `activation`.
pub fn ring_units(count: usize, activation: f32) -> Vec<Unit> {
    let mut field = UnitField::ring(count, RING_RADIUS);
    for i in 0..count {
        field.set_activation(i, activation);
    }
    field.units().to_vec()
}

/// Inputs for a bare uniform block with no buffers.
pub fn empty_inputs(width: u32, height: u32, param: ModeParam) -> FrameInputs<'static> {
    let uniforms = FrameUniforms::new(0.0, width, height, param).unwrap();
    FrameInputs::new(uniforms, &[], &[])
}

/// Standard frame at the fixture size.
pub fn frame<'a>(samples: &'a [f32], units: &'a [Unit]) -> FrameState<'a> {
    FrameState::new(WIDTH, HEIGHT)
        .with_time(1.25)
        .with_awareness(0.4)
        .with_samples(samples)
        .with_units(units)
}

/// RGBA8 pixel at `(x, y)`.
pub fn pixel_at(pixels: &[u8], width: u32, x: u32, y: u32) -> [u8; 4] {
    let i = ((y * width + x) * 4) as usize;
    [pixels[i], pixels[i + 1], pixels[i + 2], pixels[i + 3]]
}

/// Largest per-channel difference and the fraction of channels differing by more than `tolerance`.
pub fn pixel_diff(a: &[u8], b: &[u8], tolerance: u8) -> (u8, f32) {
    assert_eq!(a.len(), b.len(), "pixel buffers differ in length");
    let mut max = 0u8;
    let mut over = 0usize;
    for (x, y) in a.iter().zip(b) {
        let d = x.abs_diff(*y);
        max = max.max(d);
        if d > tolerance {
            over += 1;
        }
    }
    (max, over as f32 / a.len() as f32)
}

/// Background color encoded the way the renderers quantize it.
pub fn background_rgba8(config: &RendererConfig) -> [u8; 4] {
    let q = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
    [q(config.background[0]), q(config.background[1]), q(config.background[2]), 255]
}
