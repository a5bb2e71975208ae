//! Waveform drawn as a glowing line via per-pixel segment distance.
//!
//! Every fragment scans all `N - 1` segments, so cost is
//! `O(width * height * N)` per frame. There is no acceleration structure.

use super::fullscreen::{fullscreen_vertex, FULLSCREEN_VERTEX_COUNT};
use super::math::{scale3, smoothstep, Vec3};
use super::waveform::{sample_point, segment_distance};
use super::{FrameInputs, ModeProgram, RenderMode, WaveformStrategy};
use crate::config::Palette;

/// Distance in pixels at which the glow fades out.
pub const GLOW_RADIUS: f32 = 10.0;
/// Solid core width in pixels.
pub const LINE_WIDTH: f32 = 1.5;
/// Stand-in distance when there are no segments.
pub const NO_SEGMENT_DISTANCE: f32 = 1.0e9;

/// Distance from `px` (y-up pixels) to the nearest segment of the polyline.
pub fn nearest_segment_distance(px: [f32; 2], samples: &[f32], resolution: [f32; 2]) -> f32 {
    let n = samples.len();
    if n < 2 {
        return NO_SEGMENT_DISTANCE;
    }
    samples
        .windows(2)
        .enumerate()
        .map(|(k, pair)| {
            let a = sample_point(k, n, pair[0], resolution);
            let b = sample_point(k + 1, n, pair[1], resolution);
            segment_distance(px, a, b).distance
        })
        .fold(NO_SEGMENT_DISTANCE, f32::min)
}

/// Glow and core weights for a distance.
#[inline]
pub fn glow_profile(distance: f32) -> (f32, f32) {
    let glow = smoothstep(GLOW_RADIUS, 0.0, distance);
    let core = smoothstep(LINE_WIDTH, 0.0, distance);
    (glow, core)
}

pub struct WaveformSdfProgram {
    line_hue: Vec3,
}

impl WaveformSdfProgram {
    pub fn new(palette: &Palette) -> Self {
        Self {
            line_hue: palette.line_hue,
        }
    }
}

impl ModeProgram for WaveformSdfProgram {
    fn mode(&self) -> RenderMode {
        RenderMode::Waveform(WaveformStrategy::Sdf)
    }

    fn vertex_count(&self, _inputs: &FrameInputs<'_>) -> u32 {
        FULLSCREEN_VERTEX_COUNT
    }

    fn vertex(&self, index: u32, _inputs: &FrameInputs<'_>) -> [f32; 2] {
        fullscreen_vertex(index)
    }

    fn fragment(&self, frag_coord: [f32; 2], inputs: &FrameInputs<'_>) -> [f32; 4] {
        let px = inputs.y_up(frag_coord);
        let d = nearest_segment_distance(px, inputs.samples, inputs.resolution());
        let (glow, core) = glow_profile(d);
        let [r, g, b] = scale3(self.line_hue, 0.5 * glow + 0.5 * core);
        [r, g, b, glow]
    }
}
