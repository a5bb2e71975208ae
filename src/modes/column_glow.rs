//! Additive circular glow for every activation-bearing unit.

use super::fullscreen::{fullscreen_vertex, FULLSCREEN_VERTEX_COUNT};
use super::math::{add3, distance2, scale3, smoothstep, Vec3};
use super::{FrameInputs, ModeProgram, RenderMode};
use crate::config::Palette;
use crate::frame::Unit;

/// Glow radius in height-normalized units.
pub const UNIT_RADIUS: f32 = 0.03;
/// Inner edge of the soft rim, as a fraction of the radius.
pub const UNIT_BLUR: f32 = 0.9;
/// Brightness multiplier per unit.
pub const GLOW_GAIN: f32 = 1.5;
/// Activation at which intensity saturates.
pub const ACTIVATION_KNEE: f32 = 0.8;
/// Contributions below this are skipped.
pub const MIN_CONTRIBUTION: f32 = 0.01;

/// Soft-thresholded intensity for an activation level.
#[inline]
pub fn unit_intensity(activation: f32) -> f32 {
    smoothstep(0.0, ACTIVATION_KNEE, activation)
}

/// Disc coverage at distance `d` from a unit center.
#[inline]
pub fn unit_coverage(d: f32) -> f32 {
    smoothstep(UNIT_RADIUS, UNIT_RADIUS * UNIT_BLUR, d)
}

/// Centered, aspect-corrected coordinate of a y-up pixel: the viewport center
/// is the origin and the vertical extent is [-0.5, 0.5].
#[inline]
pub fn centered_uv(px: [f32; 2], resolution: [f32; 2]) -> [f32; 2] {
    [
        (px[0] - 0.5 * resolution[0]) / resolution[1],
        (px[1] - 0.5 * resolution[1]) / resolution[1],
    ]
}

pub struct ColumnGlowProgram {
    hue: Vec3,
    background: Vec3,
}

impl ColumnGlowProgram {
    pub fn new(palette: &Palette) -> Self {
        Self {
            hue: palette.column_hue,
            background: palette.column_background,
        }
    }

    /// Accumulated color at `uv`, unclamped.
    pub fn accumulate(&self, uv: [f32; 2], units: &[Unit]) -> Vec3 {
        units.iter().fold(self.background, |color, unit| {
            let weight = unit_coverage(distance2(uv, unit.position)) * unit_intensity(unit.activation);
            if weight < MIN_CONTRIBUTION {
                return color;
            }
            add3(color, scale3(self.hue, weight * GLOW_GAIN))
        })
    }
}

impl ModeProgram for ColumnGlowProgram {
    fn mode(&self) -> RenderMode {
        RenderMode::ColumnGlow
    }

    fn vertex_count(&self, _inputs: &FrameInputs<'_>) -> u32 {
        FULLSCREEN_VERTEX_COUNT
    }

    fn vertex(&self, index: u32, _inputs: &FrameInputs<'_>) -> [f32; 2] {
        fullscreen_vertex(index)
    }

    fn fragment(&self, frag_coord: [f32; 2], inputs: &FrameInputs<'_>) -> [f32; 4] {
        let uv = centered_uv(inputs.y_up(frag_coord), inputs.resolution());
        // The slot count is trusted only up to the live buffer length.
        let count = (inputs.uniforms.unit_count() as usize).min(inputs.units.len());
        let [r, g, b] = self.accumulate(uv, &inputs.units[..count]);
        [r, g, b, 1.0]
    }
}
