//! Animated organic background parameterized by the awareness level.
//!
//! Low awareness is fast, zoomed-in and heavily warped; full awareness is
//! slow, wide and calm, fading toward the bright hue.

use super::fullscreen::{fullscreen_vertex, FULLSCREEN_VERTEX_COUNT};
use super::math::{mix, mix3, scale2, smoothstep, Vec2, Vec3};
use super::noise::simplex2;
use super::{FrameInputs, ModeProgram, RenderMode};
use crate::config::Palette;

/// Octave weights; each octave doubles the spatial frequency.
pub const OCTAVE_WEIGHTS: [f32; 4] = [0.5, 0.25, 0.125, 0.0625];

/// Fixed offsets that decorrelate the two warp components.
const WARP_OFFSET_X: Vec2 = [17.0, 92.0];
const WARP_OFFSET_Y: Vec2 = [83.0, 28.0];
const WARP_DRIFT: f32 = 0.15;

/// Animation parameters derived from an awareness level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NoiseRegime {
    pub speed: f32,
    pub zoom: f32,
    pub distortion: f32,
    /// Blend weight of the bright hue (`awareness²`).
    pub bright_weight: f32,
}

impl NoiseRegime {
    pub fn from_awareness(awareness: f32) -> Self {
        Self {
            speed: mix(2.0, 0.1, awareness),
            zoom: mix(5.0, 2.0, awareness),
            distortion: mix(0.8, 0.0, awareness),
            bright_weight: awareness * awareness,
        }
    }
}

/// Four-octave fractal sum at `p`, time already scaled by speed.
pub fn fractal_noise(p: Vec2, t: f32) -> f32 {
    let mut freq = 1.0;
    let mut f = 0.0;
    for weight in OCTAVE_WEIGHTS {
        let q = [p[0] * freq + t * freq, p[1] * freq + 0.5 * t * freq];
        f += weight * simplex2(q);
        freq *= 2.0;
    }
    f
}

/// Two-component warp signal sampled at coordinates offset by `f * distortion`.
pub fn warp_signal(p: Vec2, f: f32, distortion: f32, t: f32) -> Vec2 {
    let shift = f * distortion;
    let drift = WARP_DRIFT * t;
    let rx = simplex2([
        p[0] + shift + WARP_OFFSET_X[0] + drift,
        p[1] + shift + WARP_OFFSET_X[1] + drift,
    ]);
    let ry = simplex2([
        p[0] + shift + WARP_OFFSET_Y[0] - drift,
        p[1] + shift + WARP_OFFSET_Y[1] - drift,
    ]);
    [rx, ry]
}

pub struct OrganicNoiseProgram {
    dark: Vec3,
    mid: Vec3,
    bright: Vec3,
}

impl OrganicNoiseProgram {
    pub fn new(palette: &Palette) -> Self {
        Self {
            dark: palette.noise_dark,
            mid: palette.noise_mid,
            bright: palette.noise_bright,
        }
    }

    /// Color at normalized coordinate `uv`.
    pub fn shade(&self, uv: Vec2, time: f32, awareness: f32) -> Vec3 {
        let regime = NoiseRegime::from_awareness(awareness);
        let p = scale2(uv, regime.zoom);
        let t = time * regime.speed;

        let f = fractal_noise(p, t);
        let r = warp_signal(p, f, regime.distortion, t);

        let c = mix3(self.dark, self.mid, smoothstep(-0.1, 0.4, r[0]));
        mix3(c, self.bright, regime.bright_weight)
    }
}

impl ModeProgram for OrganicNoiseProgram {
    fn mode(&self) -> RenderMode {
        RenderMode::OrganicNoise
    }

    fn vertex_count(&self, _inputs: &FrameInputs<'_>) -> u32 {
        FULLSCREEN_VERTEX_COUNT
    }

    fn vertex(&self, index: u32, _inputs: &FrameInputs<'_>) -> [f32; 2] {
        fullscreen_vertex(index)
    }

    fn fragment(&self, frag_coord: [f32; 2], inputs: &FrameInputs<'_>) -> [f32; 4] {
        let px = inputs.y_up(frag_coord);
        let uv = scale2(px, 1.0 / inputs.uniforms.resolution_y);
        let [r, g, b] = self.shade(uv, inputs.uniforms.time, inputs.uniforms.awareness());
        [r, g, b, 1.0]
    }
}
