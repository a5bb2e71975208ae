//! Headless renderer driving the mode pipelines.

use wgpu::{CommandEncoder, TextureView};

use super::buffers::FrameBuffers;
use super::context::{GpuContext, GpuError};
use super::programs::ModePrograms;
use super::textures::{ReadbackBuffer, RenderTarget};
use crate::config::RendererConfig;
use crate::frame::{FrameState, FrameUniforms};
use crate::modes::{FrameInputs, RenderMode};
use crate::render::{FrameRenderer, RenderError};

/// Format of the offscreen target and of pipelines built by this renderer.
pub const TARGET_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8Unorm;

/// Renders one mode per frame into an offscreen texture and reads it back.
///
/// All GPU state the modes need lives here and is passed explicitly.
pub struct NeuroRenderer {
    ctx: GpuContext,
    programs: ModePrograms,
    buffers: FrameBuffers,
    target: RenderTarget,
    readback: ReadbackBuffer,
    config: RendererConfig,
}

impl NeuroRenderer {
    pub async fn new(config: RendererConfig) -> Result<Self, GpuError> {
        let ctx = GpuContext::new().await?;
        Self::with_context(ctx, config)
    }

    /// Build on an existing context, e.g. one shared with a window surface.
    pub fn with_context(ctx: GpuContext, config: RendererConfig) -> Result<Self, GpuError> {
        let programs = ModePrograms::new(&ctx.device, TARGET_FORMAT, &config.palette)?;
        let buffers = FrameBuffers::new(
            &ctx.device,
            config.sample_capacity,
            config.unit_capacity,
            ctx.max_storage_binding(),
        );
        let width = config.width.max(1);
        let height = config.height.max(1);
        let target = RenderTarget::for_output(&ctx.device, "render_target", width, height, TARGET_FORMAT);
        let readback = ReadbackBuffer::new(&ctx.device, width, height);

        Ok(Self {
            ctx,
            programs,
            buffers,
            target,
            readback,
            config,
        })
    }

    /// Publish `state` and record the mode's draw into `view`.
    ///
    /// `view` must use [`TARGET_FORMAT`]. The caller submits the encoder.
    pub fn encode(
        &mut self,
        encoder: &mut CommandEncoder,
        view: &TextureView,
        state: &FrameState<'_>,
        mode: RenderMode,
    ) -> Result<FrameUniforms, RenderError> {
        record_frame(
            &self.ctx,
            &self.programs,
            &mut self.buffers,
            &self.config,
            encoder,
            view,
            state,
            mode,
        )
    }

    /// Render one frame and return tightly packed RGBA8 rows, top row first.
    pub fn render_frame(
        &mut self,
        state: &FrameState<'_>,
        mode: RenderMode,
    ) -> Result<Vec<u8>, RenderError> {
        if (state.width, state.height) != self.target.size() {
            // Validate before reallocating anything.
            FrameUniforms::for_mode(mode, state)?;
            self.resize(state.width, state.height);
        }

        let mut encoder = self
            .ctx
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("render_encoder"),
            });

        record_frame(
            &self.ctx,
            &self.programs,
            &mut self.buffers,
            &self.config,
            &mut encoder,
            self.target.view(),
            state,
            mode,
        )?;
        self.readback.copy_from(&mut encoder, &self.target);

        self.ctx.queue.submit(std::iter::once(encoder.finish()));

        self.readback.read_pixels(&self.ctx.device)
    }

    /// Reallocate the target for a new size. Zero sizes are ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            log::debug!("Ignoring resize to {width}x{height}");
            return;
        }
        if (width, height) == self.target.size() {
            return;
        }
        log::info!("Resizing render target to {width}x{height}");
        self.target =
            RenderTarget::for_output(&self.ctx.device, "render_target", width, height, TARGET_FORMAT);
        self.readback = ReadbackBuffer::new(&self.ctx.device, width, height);
        self.config.width = width;
        self.config.height = height;
    }

    pub fn size(&self) -> (u32, u32) {
        self.target.size()
    }

    pub fn config(&self) -> &RendererConfig {
        &self.config
    }

    pub fn context(&self) -> &GpuContext {
        &self.ctx
    }

    pub fn adapter_info(&self) -> wgpu::AdapterInfo {
        self.ctx.adapter_info()
    }
}

#[allow(clippy::too_many_arguments)]
fn record_frame(
    ctx: &GpuContext,
    programs: &ModePrograms,
    buffers: &mut FrameBuffers,
    config: &RendererConfig,
    encoder: &mut CommandEncoder,
    view: &TextureView,
    state: &FrameState<'_>,
    mode: RenderMode,
) -> Result<FrameUniforms, RenderError> {
    let compiled = programs.get(mode)?;

    // Publish first: queued writes land before this encoder's commands run.
    let uniforms = buffers.publish(&ctx.device, &ctx.queue, mode, state)?;
    let bind_group = buffers.bind_group(&ctx.device, programs.bind_group_layout(), mode);

    let inputs = FrameInputs::new(uniforms, state.samples, state.units);
    let vertex_count = compiled.program.vertex_count(&inputs);

    let background = config.background;
    let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
        label: Some("mode_pass"),
        color_attachments: &[Some(wgpu::RenderPassColorAttachment {
            view,
            resolve_target: None,
            depth_slice: None,
            ops: wgpu::Operations {
                load: wgpu::LoadOp::Clear(wgpu::Color {
                    r: background[0] as f64,
                    g: background[1] as f64,
                    b: background[2] as f64,
                    a: 1.0,
                }),
                store: wgpu::StoreOp::Store,
            },
        })],
        depth_stencil_attachment: None,
        timestamp_writes: None,
        occlusion_query_set: None,
        multiview_mask: None,
    });

    if vertex_count > 0 {
        render_pass.set_pipeline(&compiled.pipeline);
        render_pass.set_bind_group(0, &bind_group, &[]);
        render_pass.draw(0..vertex_count, 0..1);
    }

    Ok(uniforms)
}

impl FrameRenderer for NeuroRenderer {
    fn render_frame(
        &mut self,
        state: &FrameState<'_>,
        mode: RenderMode,
    ) -> Result<Vec<u8>, RenderError> {
        NeuroRenderer::render_frame(self, state, mode)
    }

    fn size(&self) -> (u32, u32) {
        NeuroRenderer::size(self)
    }

    fn resize(&mut self, width: u32, height: u32) {
        NeuroRenderer::resize(self, width, height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::Unit;
    use crate::modes::WaveformStrategy;

    fn small_config() -> RendererConfig {
        RendererConfig {
            width: 64,
            height: 48,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_renderer_creation() {
        if let Ok(renderer) = NeuroRenderer::new(small_config()).await {
            assert!(!renderer.adapter_info().name.is_empty());
            assert_eq!(renderer.size(), (64, 48));
        }
    }

    #[tokio::test]
    async fn test_render_frame_every_mode() {
        let mut renderer = match NeuroRenderer::new(small_config()).await {
            Ok(r) => r,
            Err(_) => return,
        };

        let samples: Vec<f32> = (0..32).map(|i| (i as f32 * 0.4).sin()).collect();
        let units = [Unit::new([0.0, 0.0], 1.0)];
        let state = FrameState::new(64, 48)
            .with_samples(&samples)
            .with_units(&units)
            .with_awareness(0.5);

        for &mode in RenderMode::all() {
            let pixels = renderer.render_frame(&state, mode).unwrap();
            assert_eq!(pixels.len(), 64 * 48 * 4, "{}", mode.name());
        }
    }

    #[tokio::test]
    async fn test_resize_ignores_zero() {
        let mut renderer = match NeuroRenderer::new(small_config()).await {
            Ok(r) => r,
            Err(_) => return,
        };

        renderer.resize(0, 100);
        assert_eq!(renderer.size(), (64, 48));
        renderer.resize(32, 16);
        assert_eq!(renderer.size(), (32, 16));
    }

    #[tokio::test]
    async fn test_render_frame_follows_state_size() {
        let mut renderer = match NeuroRenderer::new(small_config()).await {
            Ok(r) => r,
            Err(_) => return,
        };

        let state = FrameState::new(40, 20);
        let pixels = renderer
            .render_frame(&state, RenderMode::Waveform(WaveformStrategy::Sdf))
            .unwrap();
        assert_eq!(pixels.len(), 40 * 20 * 4);
        assert!(renderer
            .render_frame(&FrameState::new(0, 20), RenderMode::OrganicNoise)
            .is_err());
    }
}
