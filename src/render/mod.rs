//! Renderer-agnostic frame interface.
//!
//! [`FrameRenderer`] is implemented by the GPU and software renderers;
//! [`DynamicRenderer`] picks the GPU when an adapter exists and falls back to
//! the CPU otherwise.

use std::path::Path;

use crate::config::RendererConfig;
use crate::frame::{FrameError, FrameState};
use crate::gpu::{GpuError, NeuroRenderer};
use crate::modes::RenderMode;
use crate::software::SoftwareRenderer;

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("GPU error: {0}")]
    Gpu(#[from] GpuError),
    #[error("Invalid frame: {0}")]
    Frame(#[from] FrameError),
    #[error("Failed to map readback buffer: {0}")]
    BufferMap(#[from] wgpu::BufferAsyncError),
    #[error("Device poll failed: {0}")]
    Poll(#[from] wgpu::PollError),
    #[error("Readback channel closed before the buffer was mapped")]
    ReadbackChannel,
    #[error("Pixel buffer does not match {width}x{height}")]
    PixelBufferSize { width: u32, height: u32 },
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}

/// Anything that turns a frame snapshot into RGBA8 pixels.
pub trait FrameRenderer {
    /// Render `state` with `mode`; rows are tightly packed, top row first.
    fn render_frame(
        &mut self,
        state: &FrameState<'_>,
        mode: RenderMode,
    ) -> Result<Vec<u8>, RenderError>;

    fn size(&self) -> (u32, u32);

    /// Change the output size. Zero sizes are ignored.
    fn resize(&mut self, width: u32, height: u32);
}

/// GPU renderer with a CPU fallback.
pub enum DynamicRenderer {
    Gpu(Box<NeuroRenderer>),
    Software(SoftwareRenderer),
}

impl DynamicRenderer {
    /// Try the GPU first; fall back to the software renderer when no device is available.
    pub async fn gpu_with_fallback(config: RendererConfig) -> Self {
        match NeuroRenderer::new(config.clone()).await {
            Ok(renderer) => {
                log::info!("Rendering on GPU: {}", renderer.adapter_info().name);
                Self::Gpu(Box::new(renderer))
            }
            Err(e) => {
                log::warn!("GPU renderer unavailable ({e}), falling back to software");
                Self::Software(SoftwareRenderer::new(config))
            }
        }
    }

    pub fn software(config: RendererConfig) -> Self {
        Self::Software(SoftwareRenderer::new(config))
    }

    pub fn is_gpu(&self) -> bool {
        matches!(self, Self::Gpu(_))
    }

    pub fn backend_name(&self) -> &'static str {
        match self {
            Self::Gpu(_) => "gpu",
            Self::Software(_) => "software",
        }
    }
}

impl FrameRenderer for DynamicRenderer {
    fn render_frame(
        &mut self,
        state: &FrameState<'_>,
        mode: RenderMode,
    ) -> Result<Vec<u8>, RenderError> {
        match self {
            Self::Gpu(renderer) => renderer.render_frame(state, mode),
            Self::Software(renderer) => FrameRenderer::render_frame(renderer, state, mode),
        }
    }

    fn size(&self) -> (u32, u32) {
        match self {
            Self::Gpu(renderer) => renderer.size(),
            Self::Software(renderer) => FrameRenderer::size(renderer),
        }
    }

    fn resize(&mut self, width: u32, height: u32) {
        match self {
            Self::Gpu(renderer) => renderer.resize(width, height),
            Self::Software(renderer) => FrameRenderer::resize(renderer, width, height),
        }
    }
}

/// Write RGBA8 pixels to an image file; the format follows the extension.
pub fn save_rgba<P: AsRef<Path>>(
    path: P,
    width: u32,
    height: u32,
    pixels: Vec<u8>,
) -> Result<(), RenderError> {
    let image = image::RgbaImage::from_raw(width, height, pixels)
        .ok_or(RenderError::PixelBufferSize { width, height })?;
    image.save(path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_software_backend() {
        let renderer = DynamicRenderer::software(RendererConfig::default());
        assert!(!renderer.is_gpu());
        assert_eq!(renderer.backend_name(), "software");
        assert_eq!(renderer.size(), (1280, 720));
    }

    #[tokio::test]
    async fn test_fallback_always_renders() {
        let config = RendererConfig {
            width: 32,
            height: 16,
            ..Default::default()
        };
        let mut renderer = DynamicRenderer::gpu_with_fallback(config).await;
        let state = FrameState::new(32, 16).with_awareness(1.0);
        let pixels = renderer.render_frame(&state, RenderMode::OrganicNoise).unwrap();
        assert_eq!(pixels.len(), 32 * 16 * 4);
    }

    #[test]
    fn test_save_rgba_rejects_short_buffer() {
        let dir = tempfile::tempdir().unwrap();
        let err = save_rgba(dir.path().join("short.png"), 4, 4, vec![0; 10]).unwrap_err();
        assert!(matches!(err, RenderError::PixelBufferSize { .. }));
    }

    #[test]
    fn test_save_rgba_writes_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("frame.png");
        save_rgba(&path, 2, 2, vec![255; 16]).unwrap();
        assert!(path.exists());
    }
}
