//! Bind group layouts for the frame contract.

use wgpu::{BindGroupLayout, BindGroupLayoutEntry, Device, ShaderStages};

/// Binding of the uniform block in every mode's program.
pub const UNIFORM_BINDING: u32 = 0;
/// Binding of the mode's storage array (samples or units).
pub const STORAGE_BINDING: u32 = 1;

pub struct BindGroupLayoutBuilder {
    label: Option<&'static str>,
    entries: Vec<BindGroupLayoutEntry>,
}

impl BindGroupLayoutBuilder {
    pub fn new(label: &'static str) -> Self {
        Self {
            label: Some(label),
            entries: Vec::new(),
        }
    }

    /// Add a uniform buffer entry.
    pub fn uniform(mut self, binding: u32, visibility: ShaderStages) -> Self {
        self.entries.push(BindGroupLayoutEntry {
            binding,
            visibility,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        });
        self
    }

    /// Add a read-only storage buffer entry. Bound size may vary per bind group.
    pub fn storage_read_only(mut self, binding: u32, visibility: ShaderStages) -> Self {
        self.entries.push(BindGroupLayoutEntry {
            binding,
            visibility,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Storage { read_only: true },
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        });
        self
    }

    pub fn build(self, device: &Device) -> BindGroupLayout {
        device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: self.label,
            entries: &self.entries,
        })
    }
}

/// Layout shared by all modes: uniforms at 0, one storage array at 1.
///
/// Both are visible to the vertex stage because the line strip reads samples
/// there.
pub fn create_frame_layout(device: &Device) -> BindGroupLayout {
    let stages = ShaderStages::VERTEX | ShaderStages::FRAGMENT;
    BindGroupLayoutBuilder::new("frame_bind_group_layout")
        .uniform(UNIFORM_BINDING, stages)
        .storage_read_only(STORAGE_BINDING, stages)
        .build(device)
}
