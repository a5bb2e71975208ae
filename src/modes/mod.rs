//! Render modes.
//!
//! Each mode is a vertex + fragment program pair. The GPU runs the WGSL
//! versions under `gpu/shaders`; the types here are the same programs written
//! against plain Rust values, used by the software renderer and in tests.
//!
//! - Waveform (SDF): glowing line via nearest-segment distance per pixel
//! - Waveform (line strip): literal line strip built in the vertex stage
//! - ColumnGlow: additive circular glow around every active unit
//! - OrganicNoise: awareness-driven domain-warped noise background

pub mod column_glow;
pub mod fullscreen;
pub mod math;
pub mod noise;
pub mod organic_noise;
pub mod waveform;
pub mod waveform_direct;
pub mod waveform_sdf;

pub use column_glow::ColumnGlowProgram;
pub use fullscreen::fullscreen_vertex;
pub use organic_noise::{NoiseRegime, OrganicNoiseProgram};
pub use waveform::{sample_point, segment_distance, waveform_program, SegmentProjection};
pub use waveform_direct::WaveformDirectProgram;
pub use waveform_sdf::WaveformSdfProgram;

use crate::config::Palette;
use crate::frame::{FrameError, FrameState, FrameUniforms, ModeParamKind, Unit};

/// How the waveform mode turns samples into pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WaveformStrategy {
    /// Per-pixel distance to the nearest segment, shaped into glow.
    Sdf,
    /// One vertex per sample, rasterized as a connected line.
    LineStrip,
}

/// Available render modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RenderMode {
    Waveform(WaveformStrategy),
    ColumnGlow,
    OrganicNoise,
}

impl RenderMode {
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "eeg" | "waveform" | "waveform-sdf" | "sdf" => {
                Some(Self::Waveform(WaveformStrategy::Sdf))
            }
            "waveform-line" | "waveform-direct" | "line" | "strip" => {
                Some(Self::Waveform(WaveformStrategy::LineStrip))
            }
            "columns" | "column-glow" | "boot" => Some(Self::ColumnGlow),
            "noise" | "organic-noise" | "organic" => Some(Self::OrganicNoise),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Waveform(WaveformStrategy::Sdf) => "waveform-sdf",
            Self::Waveform(WaveformStrategy::LineStrip) => "waveform-line",
            Self::ColumnGlow => "column-glow",
            Self::OrganicNoise => "organic-noise",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Waveform(WaveformStrategy::Sdf) => "Glowing EEG line, per-pixel segment distance",
            Self::Waveform(WaveformStrategy::LineStrip) => "EEG as a plain line strip",
            Self::ColumnGlow => "Additive glow for every active column",
            Self::OrganicNoise => "Awareness-driven organic noise background",
        }
    }

    pub fn all() -> &'static [Self] {
        &[
            Self::Waveform(WaveformStrategy::Sdf),
            Self::Waveform(WaveformStrategy::LineStrip),
            Self::ColumnGlow,
            Self::OrganicNoise,
        ]
    }

    /// Meaning this mode gives to the uniform slot.
    pub fn param_kind(&self) -> ModeParamKind {
        match self {
            Self::Waveform(_) => ModeParamKind::Unused,
            Self::ColumnGlow => ModeParamKind::UnitCount,
            Self::OrganicNoise => ModeParamKind::Awareness,
        }
    }

    pub fn primitive(&self) -> Primitive {
        match self {
            Self::Waveform(WaveformStrategy::LineStrip) => Primitive::LineStrip,
            _ => Primitive::FullScreenTriangle,
        }
    }
}

/// Primitive a program's vertices are assembled into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Primitive {
    /// Three synthetic vertices covering the viewport.
    FullScreenTriangle,
    LineStrip,
}

/// Read-only view of one frame as seen by a program.
#[derive(Debug, Clone, Copy)]
pub struct FrameInputs<'a> {
    pub uniforms: FrameUniforms,
    pub samples: &'a [f32],
    pub units: &'a [Unit],
}

impl<'a> FrameInputs<'a> {
    pub fn new(uniforms: FrameUniforms, samples: &'a [f32], units: &'a [Unit]) -> Self {
        Self {
            uniforms,
            samples,
            units,
        }
    }

    /// Derive the uniforms for `mode` and borrow the state's buffers.
    pub fn for_mode(mode: RenderMode, state: &FrameState<'a>) -> Result<Self, FrameError> {
        Ok(Self::new(
            FrameUniforms::for_mode(mode, state)?,
            state.samples,
            state.units,
        ))
    }

    pub fn resolution(&self) -> [f32; 2] {
        self.uniforms.resolution()
    }

    /// Convert a fragment coordinate (origin top-left) to y-up pixel space.
    #[inline]
    pub fn y_up(&self, frag_coord: [f32; 2]) -> [f32; 2] {
        [frag_coord[0], self.uniforms.resolution_y - frag_coord[1]]
    }
}

/// A render mode's vertex and fragment stages.
pub trait ModeProgram: Send + Sync {
    fn mode(&self) -> RenderMode;

    fn primitive(&self) -> Primitive {
        self.mode().primitive()
    }

    /// Number of vertices to issue for this frame.
    fn vertex_count(&self, inputs: &FrameInputs<'_>) -> u32;

    /// Clip-space position of vertex `index`.
    fn vertex(&self, index: u32, inputs: &FrameInputs<'_>) -> [f32; 2];

    /// Color and alpha at a pixel-center fragment coordinate.
    fn fragment(&self, frag_coord: [f32; 2], inputs: &FrameInputs<'_>) -> [f32; 4];
}

/// Create the program for a mode.
pub fn create_program(mode: RenderMode, palette: &Palette) -> Box<dyn ModeProgram> {
    match mode {
        RenderMode::Waveform(strategy) => waveform_program(strategy, palette),
        RenderMode::ColumnGlow => Box::new(ColumnGlowProgram::new(palette)),
        RenderMode::OrganicNoise => Box::new(OrganicNoiseProgram::new(palette)),
    }
}
