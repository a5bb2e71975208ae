//! WGSL programs for every render mode and their compiled pipelines.
//!
//! Each module is assembled from the shared frame contract, a block of
//! palette constants, and the mode's own stages.

use std::collections::HashMap;

use wgpu::{BindGroupLayout, Device, RenderPipeline, TextureFormat};

use super::context::GpuError;
use super::layouts::create_frame_layout;
use super::pipelines::{create_pipeline_layout, topology_for, RenderPipelineBuilder};
use crate::config::Palette;
use crate::modes::{create_program, ModeProgram, RenderMode, WaveformStrategy};

const FRAME_WGSL: &str = include_str!("shaders/frame.wgsl");
const FULLSCREEN_WGSL: &str = include_str!("shaders/fullscreen.wgsl");
const WAVEFORM_SDF_WGSL: &str = include_str!("shaders/waveform_sdf.wgsl");
const WAVEFORM_DIRECT_WGSL: &str = include_str!("shaders/waveform_direct.wgsl");
const COLUMN_GLOW_WGSL: &str = include_str!("shaders/column_glow.wgsl");
const ORGANIC_NOISE_WGSL: &str = include_str!("shaders/organic_noise.wgsl");

fn vec3_literal(rgb: [f32; 3]) -> String {
    // `{:?}` always prints a decimal point, which WGSL needs for f32 literals.
    format!("vec3<f32>({:?}, {:?}, {:?})", rgb[0], rgb[1], rgb[2])
}

/// `const` declarations for every palette color.
pub fn palette_constants(palette: &Palette) -> String {
    let colors = [
        ("LINE_HUE", palette.line_hue),
        ("STRIP_COLOR", palette.strip_color),
        ("COLUMN_HUE", palette.column_hue),
        ("COLUMN_BACKGROUND", palette.column_background),
        ("NOISE_DARK", palette.noise_dark),
        ("NOISE_MID", palette.noise_mid),
        ("NOISE_BRIGHT", palette.noise_bright),
    ];
    colors
        .iter()
        .map(|(name, rgb)| format!("const {name}: vec3<f32> = {};\n", vec3_literal(*rgb)))
        .collect()
}

/// Vertex and fragment entry points of a mode's module.
pub fn entry_points(mode: RenderMode) -> (&'static str, &'static str) {
    match mode {
        RenderMode::Waveform(WaveformStrategy::LineStrip) => ("vs_main", "fs_main"),
        _ => ("vs_fullscreen", "fs_main"),
    }
}

/// Complete WGSL source for `mode`.
pub fn shader_source(mode: RenderMode, palette: &Palette) -> String {
    let stages: &[&str] = match mode {
        RenderMode::Waveform(WaveformStrategy::Sdf) => &[FULLSCREEN_WGSL, WAVEFORM_SDF_WGSL],
        RenderMode::Waveform(WaveformStrategy::LineStrip) => &[WAVEFORM_DIRECT_WGSL],
        RenderMode::ColumnGlow => &[FULLSCREEN_WGSL, COLUMN_GLOW_WGSL],
        RenderMode::OrganicNoise => &[FULLSCREEN_WGSL, ORGANIC_NOISE_WGSL],
    };

    let mut source = String::from(FRAME_WGSL);
    source.push('\n');
    source.push_str(&palette_constants(palette));
    for stage in stages {
        source.push('\n');
        source.push_str(stage);
    }
    source
}

fn pipeline_label(mode: RenderMode) -> &'static str {
    match mode {
        RenderMode::Waveform(WaveformStrategy::Sdf) => "waveform_sdf_pipeline",
        RenderMode::Waveform(WaveformStrategy::LineStrip) => "waveform_direct_pipeline",
        RenderMode::ColumnGlow => "column_glow_pipeline",
        RenderMode::OrganicNoise => "organic_noise_pipeline",
    }
}

/// A mode's compiled pipeline next to its host-side program.
///
/// The program answers per-frame questions such as the vertex count.
pub struct CompiledMode {
    pub pipeline: RenderPipeline,
    pub program: Box<dyn ModeProgram>,
}

/// One compiled pipeline per render mode, all sharing the frame layout.
pub struct ModePrograms {
    layout: BindGroupLayout,
    modes: HashMap<RenderMode, CompiledMode>,
}

impl ModePrograms {
    pub fn new(device: &Device, format: TextureFormat, palette: &Palette) -> Result<Self, GpuError> {
        let layout = create_frame_layout(device);
        let pipeline_layout = create_pipeline_layout(device, "frame_pipeline_layout", &[&layout]);

        let mut modes = HashMap::new();
        for &mode in RenderMode::all() {
            let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
                label: Some(mode.name()),
                source: wgpu::ShaderSource::Wgsl(shader_source(mode, palette).into()),
            });
            let (vertex, fragment) = entry_points(mode);

            let pipeline = RenderPipelineBuilder::new(pipeline_label(mode))
                .layout(&pipeline_layout)
                .shader(&shader)
                .entry_points(vertex, fragment)
                .topology(topology_for(mode.primitive()))
                .format(format)
                .blend(wgpu::BlendState::ALPHA_BLENDING)
                .build(device)?;

            let program = create_program(mode, palette);
            modes.insert(mode, CompiledMode { pipeline, program });
        }
        log::debug!("Compiled {} mode pipelines", modes.len());

        Ok(Self { layout, modes })
    }

    pub fn get(&self, mode: RenderMode) -> Result<&CompiledMode, GpuError> {
        self.modes
            .get(&mode)
            .ok_or(GpuError::MissingPipeline(mode.name()))
    }

    pub fn bind_group_layout(&self) -> &BindGroupLayout {
        &self.layout
    }
}
