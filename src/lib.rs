//! Neuro Render Core
//!
//! Render modes for a live readout of a simulated neural state, on the GPU
//! via wgpu or on the CPU as a fallback.
//!
//! # Modes
//!
//! - Waveform: scrolling EEG as a glowing SDF line or a plain line strip
//! - Column glow: additive glow around each activation-bearing unit
//! - Organic noise: domain-warped background driven by an awareness level
//!
//! The host publishes one [`FrameState`] per frame and asks a
//! [`FrameRenderer`] for pixels.

pub mod config;
pub mod frame;
pub mod gpu;
pub mod modes;
pub mod render;
pub mod software;
pub mod synth;

pub use config::{parse_hex_color, ConfigError, Palette, RendererConfig};
pub use frame::{
    FrameClock, FrameError, FrameState, FrameUniforms, ModeParam, ModeParamKind, NeuronReading,
    SampleFeed, Unit, UnitField, WakeupSequence, WaveformSamples,
};
pub use gpu::{GpuContext, GpuError, NeuroRenderer};
pub use modes::{create_program, ModeProgram, RenderMode, WaveformStrategy};
pub use render::{save_rgba, DynamicRenderer, FrameRenderer, RenderError};
pub use software::SoftwareRenderer;
