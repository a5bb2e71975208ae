//! Waveform drawn as a literal line strip built in the vertex stage.
//!
//! `O(N)` vertices per frame and no glow shaping.

use super::{FrameInputs, ModeProgram, RenderMode, WaveformStrategy};
use crate::config::Palette;

/// Position given to vertices with no backing sample; outside clip space on both axes.
pub const OFFSCREEN: [f32; 2] = [2.0, 2.0];

/// Vertical scale from sample value to clip space.
pub const AMPLITUDE: f32 = 0.5;

/// Clip-space position of sample `index` out of the live `samples`.
#[inline]
pub fn strip_vertex(index: u32, samples: &[f32]) -> [f32; 2] {
    let n = samples.len();
    let i = index as usize;
    if i >= n || n < 2 {
        return OFFSCREEN;
    }
    let x = -1.0 + 2.0 * i as f32 / (n - 1) as f32;
    [x, samples[i] * AMPLITUDE]
}

pub struct WaveformDirectProgram {
    color: [f32; 3],
}

impl WaveformDirectProgram {
    pub fn new(palette: &Palette) -> Self {
        Self {
            color: palette.strip_color,
        }
    }
}

impl ModeProgram for WaveformDirectProgram {
    fn mode(&self) -> RenderMode {
        RenderMode::Waveform(WaveformStrategy::LineStrip)
    }

    /// One vertex per live sample; fewer than two samples draw nothing.
    fn vertex_count(&self, inputs: &FrameInputs<'_>) -> u32 {
        match inputs.samples.len() {
            0 | 1 => 0,
            n => n as u32,
        }
    }

    fn vertex(&self, index: u32, inputs: &FrameInputs<'_>) -> [f32; 2] {
        strip_vertex(index, inputs.samples)
    }

    fn fragment(&self, _frag_coord: [f32; 2], _inputs: &FrameInputs<'_>) -> [f32; 4] {
        let [r, g, b] = self.color;
        [r, g, b, 1.0]
    }
}
