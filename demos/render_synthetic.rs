//! Demo: render every mode from synthetic data to PNG.
//!
//! Walks a short wake-up sequence, ticks a ring of units with a synthetic
//! firing pattern, and writes one frame per mode per step.
//!
//! Run with:
//!     cargo run --example render_synthetic -- [output_dir] [config.json]

use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::Context;
use neuro_render::frame::RING_RADIUS;
use neuro_render::synth::{generate_firing_pattern, generate_noisy_eeg};
use neuro_render::{
    save_rgba, DynamicRenderer, FrameClock, FrameRenderer, FrameState, RenderMode,
    RendererConfig, SampleFeed, UnitField, WakeupSequence,
};

const STAGES: u32 = 5;
const FRAME_TIME: f32 = 1.0 / 30.0;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let output_dir = PathBuf::from(args.next().unwrap_or_else(|| "frames".to_string()));
    let config = match args.next() {
        Some(path) => RendererConfig::from_json_file(&path)
            .with_context(|| format!("loading renderer config from {path}"))?,
        None => RendererConfig {
            width: 640,
            height: 360,
            ..Default::default()
        },
    };
    std::fs::create_dir_all(&output_dir)
        .with_context(|| format!("creating {}", output_dir.display()))?;

    let mut renderer = DynamicRenderer::gpu_with_fallback(config.clone()).await;
    log::info!(
        "Rendering {}x{} on the {} backend",
        config.width,
        config.height,
        renderer.backend_name()
    );

    let feed = SampleFeed::new(config.sample_capacity);
    let mut field = UnitField::ring(config.unit_capacity, RING_RADIUS);
    let mut wakeup = WakeupSequence::with_interval(STAGES, Duration::from_millis(200));
    let start = Instant::now();
    let clock = FrameClock::start();

    for step in 0..=STAGES {
        let time = step as f32 * 6.0 * FRAME_TIME;
        feed.extend(&generate_noisy_eeg(64, time, 0.05, step as u64));
        field.update(&generate_firing_pattern(field.len(), step as u64));

        let samples = feed.snapshot();
        let state = FrameState::new(config.width, config.height)
            .with_time(time)
            .with_awareness(wakeup.level())
            .with_samples(&samples)
            .with_units(field.units());

        for &mode in RenderMode::all() {
            let pixels = renderer
                .render_frame(&state, mode)
                .with_context(|| format!("rendering {}", mode.name()))?;
            let path = output_dir.join(format!("{}_{step:02}.png", mode.name()));
            save_rgba(&path, config.width, config.height, pixels)?;
        }
        log::info!(
            "Step {step}: {} samples, awareness {:.2}",
            samples.len(),
            wakeup.level()
        );

        wakeup.tick(start + Duration::from_millis(200 * (step as u64 + 1)));
    }

    log::info!(
        "Wrote frames to {} in {:.2}s",
        output_dir.display(),
        clock.elapsed_secs()
    );
    Ok(())
}
