//! CPU renderer running the mode programs pixel by pixel.
//!
//! Used when no GPU adapter is present, and as the reference the GPU output
//! is compared against.

mod raster;

pub use raster::{clip_segment, clip_to_pixel, quantize, walk_segment, Canvas};

use std::collections::HashMap;

use crate::config::RendererConfig;
use crate::frame::{FrameError, FrameState};
use crate::modes::{create_program, FrameInputs, ModeProgram, Primitive, RenderMode};
use crate::render::{FrameRenderer, RenderError};

pub struct SoftwareRenderer {
    config: RendererConfig,
    programs: HashMap<RenderMode, Box<dyn ModeProgram>>,
}

impl SoftwareRenderer {
    pub fn new(config: RendererConfig) -> Self {
        let programs = RenderMode::all()
            .iter()
            .map(|&mode| (mode, create_program(mode, &config.palette)))
            .collect();
        Self { config, programs }
    }

    pub fn config(&self) -> &RendererConfig {
        &self.config
    }

    /// Rasterize one frame into a float canvas.
    pub fn render_canvas(&self, state: &FrameState<'_>, mode: RenderMode) -> Result<Canvas, FrameError> {
        let inputs = FrameInputs::for_mode(mode, state)?;
        let mut canvas = Canvas::new(state.width, state.height, self.config.background);

        let program = match self.programs.get(&mode) {
            Some(program) => program.as_ref(),
            None => return Ok(canvas),
        };

        match program.primitive() {
            Primitive::FullScreenTriangle => shade_viewport(program, &inputs, &mut canvas),
            Primitive::LineStrip => draw_line_strip(program, &inputs, &mut canvas),
        }

        Ok(canvas)
    }

    /// Render one frame to RGBA8.
    pub fn render_pixels(&self, state: &FrameState<'_>, mode: RenderMode) -> Result<Vec<u8>, FrameError> {
        Ok(self.render_canvas(state, mode)?.to_rgba8())
    }
}

/// The covering triangle reaches every pixel, so every center is shaded once.
fn shade_viewport(program: &dyn ModeProgram, inputs: &FrameInputs<'_>, canvas: &mut Canvas) {
    for y in 0..canvas.height() {
        for x in 0..canvas.width() {
            let color = program.fragment([x as f32 + 0.5, y as f32 + 0.5], inputs);
            canvas.blend(x as i64, y as i64, color);
        }
    }
}

fn draw_line_strip(program: &dyn ModeProgram, inputs: &FrameInputs<'_>, canvas: &mut Canvas) {
    let (width, height) = (canvas.width(), canvas.height());
    let vertices: Vec<[f32; 2]> = (0..program.vertex_count(inputs))
        .map(|i| clip_to_pixel(program.vertex(i, inputs), width, height))
        .collect();

    for segment in vertices.windows(2) {
        walk_segment(segment[0], segment[1], width, height, |x, y| {
            let color = program.fragment([x as f32 + 0.5, y as f32 + 0.5], inputs);
            canvas.blend(x, y, color);
        });
    }
}

impl FrameRenderer for SoftwareRenderer {
    fn render_frame(
        &mut self,
        state: &FrameState<'_>,
        mode: RenderMode,
    ) -> Result<Vec<u8>, RenderError> {
        let pixels = self.render_pixels(state, mode)?;
        self.config.width = state.width;
        self.config.height = state.height;
        Ok(pixels)
    }

    fn size(&self) -> (u32, u32) {
        (self.config.width, self.config.height)
    }

    fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            log::debug!("Ignoring resize to {width}x{height}");
            return;
        }
        self.config.width = width;
        self.config.height = height;
    }
}
