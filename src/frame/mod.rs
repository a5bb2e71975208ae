//! Per-frame data contract shared by the host and every render mode.
//!
//! The host fills one [`FrameState`] snapshot per frame, derives the
//! [`FrameUniforms`] block for the active mode, and only then issues a draw.
//! Programs read the snapshot and never write to it.

mod awareness;
mod samples;
mod units;

pub use awareness::WakeupSequence;
pub use samples::{SampleFeed, WaveformSamples, DEFAULT_SAMPLE_CAPACITY};
pub use units::{NeuronReading, UnitField, RING_RADIUS};

use std::time::Instant;

use crate::modes::RenderMode;

/// Errors raised while building frame data.
#[derive(Debug, thiserror::Error)]
pub enum FrameError {
    #[error("Resolution must be non-zero, got {width}x{height}")]
    ZeroResolution { width: u32, height: u32 },
}

/// Which meaning a mode gives to the uniform block's last slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeParamKind {
    Unused,
    UnitCount,
    Awareness,
}

/// Tagged value for the shared 4-byte uniform slot.
///
/// The GPU only ever sees raw bits; on the host the meaning travels with the
/// value so a unit count can never be read back as an awareness level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ModeParam {
    Unused,
    UnitCount(u32),
    Awareness(f32),
}

impl ModeParam {
    pub fn kind(&self) -> ModeParamKind {
        match self {
            Self::Unused => ModeParamKind::Unused,
            Self::UnitCount(_) => ModeParamKind::UnitCount,
            Self::Awareness(_) => ModeParamKind::Awareness,
        }
    }

    /// Raw bits written into the uniform slot.
    pub fn encode(&self) -> u32 {
        match *self {
            Self::Unused => 0,
            Self::UnitCount(count) => count,
            Self::Awareness(level) => level.to_bits(),
        }
    }

    /// Reinterpret raw slot bits under the given meaning.
    pub fn decode(kind: ModeParamKind, bits: u32) -> Self {
        match kind {
            ModeParamKind::Unused => Self::Unused,
            ModeParamKind::UnitCount => Self::UnitCount(bits),
            ModeParamKind::Awareness => Self::Awareness(f32::from_bits(bits)),
        }
    }
}

/// Uniform block consumed by every mode's program.
///
/// WGSL: `struct FrameUniforms { time: f32, resolution_x: f32, resolution_y: f32, mode_slot: u32 }`
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct FrameUniforms {
    pub time: f32,
    pub resolution_x: f32,
    pub resolution_y: f32,
    pub mode_slot: u32,
}

impl FrameUniforms {
    /// Build a uniform block, rejecting a zero-sized viewport.
    pub fn new(time: f32, width: u32, height: u32, param: ModeParam) -> Result<Self, FrameError> {
        if width == 0 || height == 0 {
            return Err(FrameError::ZeroResolution { width, height });
        }
        Ok(Self {
            time,
            resolution_x: width as f32,
            resolution_y: height as f32,
            mode_slot: param.encode(),
        })
    }

    /// Derive the uniforms for `mode` from a frame snapshot.
    ///
    /// The slot tag comes from the mode itself: Column-Glow gets the live unit
    /// count, Organic-Noise gets the awareness level, waveforms get nothing.
    pub fn for_mode(mode: RenderMode, state: &FrameState<'_>) -> Result<Self, FrameError> {
        let param = match mode.param_kind() {
            ModeParamKind::Unused => ModeParam::Unused,
            ModeParamKind::UnitCount => ModeParam::UnitCount(state.units.len() as u32),
            ModeParamKind::Awareness => ModeParam::Awareness(state.awareness),
        };
        Self::new(state.time, state.width, state.height, param)
    }

    pub fn resolution(&self) -> [f32; 2] {
        [self.resolution_x, self.resolution_y]
    }

    pub fn decode(&self, kind: ModeParamKind) -> ModeParam {
        ModeParam::decode(kind, self.mode_slot)
    }

    /// Slot read as an unsigned unit count.
    pub fn unit_count(&self) -> u32 {
        self.mode_slot
    }

    /// Slot read as an awareness level.
    pub fn awareness(&self) -> f32 {
        f32::from_bits(self.mode_slot)
    }
}

/// One activation-bearing point.
///
/// WGSL: `struct Unit { position: vec2<f32>, activation: f32, _pad: f32 }` (stride 16).
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Unit {
    pub position: [f32; 2],
    pub activation: f32,
    pub _padding: f32,
}

impl Unit {
    pub fn new(position: [f32; 2], activation: f32) -> Self {
        Self {
            position,
            activation,
            _padding: 0.0,
        }
    }
}

/// Immutable snapshot of everything a frame is rendered from.
#[derive(Debug, Clone, Copy)]
pub struct FrameState<'a> {
    /// Seconds since start.
    pub time: f32,
    pub width: u32,
    pub height: u32,
    /// Awareness level in [0, 1].
    pub awareness: f32,
    /// Live waveform samples; the slice length is this frame's `N`.
    pub samples: &'a [f32],
    pub units: &'a [Unit],
}

impl<'a> FrameState<'a> {
    /// Empty frame of the given size at time zero.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            time: 0.0,
            width,
            height,
            awareness: 0.0,
            samples: &[],
            units: &[],
        }
    }

    pub fn with_time(self, time: f32) -> Self {
        Self { time, ..self }
    }

    pub fn with_awareness(self, awareness: f32) -> Self {
        Self { awareness, ..self }
    }

    pub fn with_samples(self, samples: &'a [f32]) -> Self {
        Self { samples, ..self }
    }

    pub fn with_units(self, units: &'a [Unit]) -> Self {
        Self { units, ..self }
    }
}

/// Monotonic frame clock, the source of `FrameUniforms::time`.
#[derive(Debug, Clone, Copy)]
pub struct FrameClock {
    start: Instant,
}

impl FrameClock {
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    pub fn elapsed_secs(&self) -> f32 {
        self.start.elapsed().as_secs_f32()
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::start()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modes::WaveformStrategy;

    #[test]
    fn test_uniform_layout_is_sixteen_bytes() {
        assert_eq!(std::mem::size_of::<FrameUniforms>(), 16);
        assert_eq!(std::mem::size_of::<Unit>(), 16);
    }

    #[test]
    fn test_zero_resolution_rejected() {
        assert!(FrameUniforms::new(0.0, 0, 600, ModeParam::Unused).is_err());
        assert!(FrameUniforms::new(0.0, 800, 0, ModeParam::Unused).is_err());
        assert!(FrameUniforms::new(0.0, 800, 600, ModeParam::Unused).is_ok());
    }

    #[test]
    fn test_mode_param_encoding() {
        assert_eq!(ModeParam::UnitCount(42).encode(), 42);
        assert_eq!(ModeParam::Awareness(1.0).encode(), 1.0f32.to_bits());
        assert_eq!(ModeParam::Unused.encode(), 0);

        let bits = ModeParam::Awareness(0.25).encode();
        assert_eq!(
            ModeParam::decode(ModeParamKind::Awareness, bits),
            ModeParam::Awareness(0.25)
        );
    }

    #[test]
    fn test_for_mode_tags_slot_per_mode() {
        let units = [Unit::default(); 7];
        let state = FrameState::new(800, 600)
            .with_awareness(0.5)
            .with_units(&units);

        let glow = FrameUniforms::for_mode(RenderMode::ColumnGlow, &state).unwrap();
        assert_eq!(glow.decode(ModeParamKind::UnitCount), ModeParam::UnitCount(7));

        let noise = FrameUniforms::for_mode(RenderMode::OrganicNoise, &state).unwrap();
        assert_eq!(noise.awareness(), 0.5);

        let wave =
            FrameUniforms::for_mode(RenderMode::Waveform(WaveformStrategy::Sdf), &state).unwrap();
        assert_eq!(wave.mode_slot, 0);
    }

    #[test]
    fn test_uniform_bytes_in_declared_order() {
        let uniforms = FrameUniforms::new(1.5, 800, 600, ModeParam::UnitCount(3)).unwrap();
        let bytes = bytemuck::bytes_of(&uniforms);
        assert_eq!(&bytes[0..4], &1.5f32.to_ne_bytes());
        assert_eq!(&bytes[4..8], &800.0f32.to_ne_bytes());
        assert_eq!(&bytes[8..12], &600.0f32.to_ne_bytes());
        assert_eq!(&bytes[12..16], &3u32.to_ne_bytes());
    }
}
