//! GPU rendering using wgpu.
//!
//! Headless: frames are drawn into an offscreen texture and read back, or
//! recorded into a caller-owned view via [`NeuroRenderer::encode`].

pub mod buffers;
pub mod context;
pub mod layouts;
pub mod pipelines;
pub mod programs;
pub mod renderer;
pub mod textures;

pub use buffers::FrameBuffers;
pub use context::{GpuContext, GpuError};
pub use programs::{shader_source, CompiledMode, ModePrograms};
pub use renderer::{NeuroRenderer, TARGET_FORMAT};
