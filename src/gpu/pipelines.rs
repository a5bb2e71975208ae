//! Render pipeline builders.

use wgpu::{
    BindGroupLayout, ColorTargetState, Device, PipelineLayout, PrimitiveTopology, RenderPipeline,
    ShaderModule, TextureFormat,
};

use super::context::GpuError;
use crate::modes::Primitive;

/// Topology a program's primitive is drawn with.
pub fn topology_for(primitive: Primitive) -> PrimitiveTopology {
    match primitive {
        Primitive::FullScreenTriangle => PrimitiveTopology::TriangleList,
        Primitive::LineStrip => PrimitiveTopology::LineStrip,
    }
}

/// Builder for vertex-buffer-free render pipelines.
pub struct RenderPipelineBuilder<'a> {
    label: Option<&'static str>,
    layout: Option<&'a PipelineLayout>,
    shader: Option<&'a ShaderModule>,
    vertex_entry: &'static str,
    fragment_entry: &'static str,
    topology: PrimitiveTopology,
    format: TextureFormat,
    blend: Option<wgpu::BlendState>,
}

impl<'a> RenderPipelineBuilder<'a> {
    pub fn new(label: &'static str) -> Self {
        Self {
            label: Some(label),
            layout: None,
            shader: None,
            vertex_entry: "vs_main",
            fragment_entry: "fs_main",
            topology: PrimitiveTopology::TriangleList,
            format: TextureFormat::Rgba8Unorm,
            blend: Some(wgpu::BlendState::REPLACE),
        }
    }

    pub fn layout(mut self, layout: &'a PipelineLayout) -> Self {
        self.layout = Some(layout);
        self
    }

    pub fn shader(mut self, shader: &'a ShaderModule) -> Self {
        self.shader = Some(shader);
        self
    }

    pub fn entry_points(mut self, vertex: &'static str, fragment: &'static str) -> Self {
        self.vertex_entry = vertex;
        self.fragment_entry = fragment;
        self
    }

    pub fn topology(mut self, topology: PrimitiveTopology) -> Self {
        self.topology = topology;
        self
    }

    pub fn format(mut self, format: TextureFormat) -> Self {
        self.format = format;
        self
    }

    pub fn blend(mut self, blend: wgpu::BlendState) -> Self {
        self.blend = Some(blend);
        self
    }

    /// Build the pipeline. Fails if no shader module was set.
    pub fn build(self, device: &Device) -> Result<RenderPipeline, GpuError> {
        let shader = self
            .shader
            .ok_or(GpuError::MissingShader(self.label.unwrap_or("unlabeled")))?;

        Ok(device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: self.label,
            layout: self.layout,
            vertex: wgpu::VertexState {
                module: shader,
                entry_point: Some(self.vertex_entry),
                buffers: &[],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: shader,
                entry_point: Some(self.fragment_entry),
                targets: &[Some(ColorTargetState {
                    format: self.format,
                    blend: self.blend,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: self.topology,
                ..Default::default()
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        }))
    }
}

pub fn create_pipeline_layout(
    device: &Device,
    label: &'static str,
    layouts: &[&BindGroupLayout],
) -> PipelineLayout {
    device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some(label),
        bind_group_layouts: layouts,
        immediate_size: 0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gpu::layouts::create_frame_layout;
    use crate::gpu::GpuContext;

    #[test]
    fn test_topology_mapping() {
        assert_eq!(
            topology_for(Primitive::FullScreenTriangle),
            PrimitiveTopology::TriangleList
        );
        assert_eq!(topology_for(Primitive::LineStrip), PrimitiveTopology::LineStrip);
    }

    #[tokio::test]
    async fn test_pipeline_layout_creation() {
        let ctx = match GpuContext::new().await {
            Ok(ctx) => ctx,
            Err(_) => return,
        };

        let frame_layout = create_frame_layout(&ctx.device);
        let _layout = create_pipeline_layout(&ctx.device, "test_layout", &[&frame_layout]);
    }

    #[tokio::test]
    async fn test_build_without_shader_fails() {
        let ctx = match GpuContext::new().await {
            Ok(ctx) => ctx,
            Err(_) => return,
        };

        let result = RenderPipelineBuilder::new("empty").build(&ctx.device);
        assert!(matches!(result, Err(GpuError::MissingShader("empty"))));
    }
}
