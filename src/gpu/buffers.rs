//! GPU-side copies of one frame's uniforms and storage arrays.

use wgpu::{BindGroup, BindGroupLayout, Buffer, Device, Queue};

use super::context::GpuError;
use super::layouts::{STORAGE_BINDING, UNIFORM_BINDING};
use crate::frame::{FrameState, FrameUniforms, Unit};
use crate::modes::RenderMode;
use crate::render::RenderError;

/// Size of one waveform sample on the GPU.
pub const SAMPLE_STRIDE: u64 = std::mem::size_of::<f32>() as u64;
/// Size of one `Unit` record on the GPU.
pub const UNIT_STRIDE: u64 = std::mem::size_of::<Unit>() as u64;

/// Which storage array a mode binds at `STORAGE_BINDING`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageSource {
    Samples,
    Units,
}

impl StorageSource {
    pub fn for_mode(mode: RenderMode) -> Self {
        match mode {
            RenderMode::ColumnGlow => Self::Units,
            // Organic noise reads no array; it binds the samples to satisfy the layout.
            RenderMode::Waveform(_) | RenderMode::OrganicNoise => Self::Samples,
        }
    }

    pub fn stride(&self) -> u64 {
        match self {
            Self::Samples => SAMPLE_STRIDE,
            Self::Units => UNIT_STRIDE,
        }
    }
}

/// Reject a binding of `bytes` when it exceeds the device's storage binding limit.
pub fn check_binding_size(label: &'static str, bytes: u64, limit: u64) -> Result<(), GpuError> {
    if bytes > limit {
        return Err(GpuError::StorageTooLarge { label, bytes, limit });
    }
    Ok(())
}

/// Storage buffer that only ever grows, to the next power of two capped at the binding limit.
struct GrowableStorage {
    label: &'static str,
    buffer: Buffer,
    capacity: u64,
    live: u64,
    stride: u64,
    limit: u64,
}

impl GrowableStorage {
    fn new(device: &Device, label: &'static str, stride: u64, elements: u64, limit: u64) -> Self {
        let capacity = (elements.max(1) * stride).min(limit.max(stride));
        Self {
            label,
            buffer: Self::allocate(device, label, capacity),
            capacity,
            live: 0,
            stride,
            limit,
        }
    }

    fn allocate(device: &Device, label: &'static str, size: u64) -> Buffer {
        device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(label),
            size,
            usage: wgpu::BufferUsages::STORAGE | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        })
    }

    /// Queue `bytes` as the live contents, reallocating first if they don't fit.
    fn write(&mut self, device: &Device, queue: &Queue, bytes: &[u8]) -> Result<(), GpuError> {
        let needed = bytes.len() as u64;
        check_binding_size(self.label, needed, self.limit)?;
        if needed > self.capacity {
            let grown = needed.next_power_of_two().min(self.limit);
            log::debug!(
                "Growing {} from {} to {} bytes",
                self.label,
                self.capacity,
                grown
            );
            self.buffer = Self::allocate(device, self.label, grown);
            self.capacity = grown;
        }
        if !bytes.is_empty() {
            queue.write_buffer(&self.buffer, 0, bytes);
        }
        self.live = needed;
        Ok(())
    }

    /// Binding covering exactly the live elements, or one element when empty.
    fn binding(&self) -> wgpu::BufferBinding<'_> {
        let size = self.live.max(self.stride);
        wgpu::BufferBinding {
            buffer: &self.buffer,
            offset: 0,
            size: wgpu::BufferSize::new(size),
        }
    }

    fn live_elements(&self) -> u64 {
        self.live / self.stride
    }
}

/// Uniform buffer plus the two storage arrays of the frame contract.
pub struct FrameBuffers {
    uniform: Buffer,
    samples: GrowableStorage,
    units: GrowableStorage,
}

impl FrameBuffers {
    /// `max_binding` is the largest storage binding the device accepts, see
    /// [`GpuContext::max_storage_binding`](super::GpuContext::max_storage_binding).
    pub fn new(device: &Device, sample_capacity: usize, unit_capacity: usize, max_binding: u64) -> Self {
        let uniform = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("frame_uniforms"),
            size: std::mem::size_of::<FrameUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        Self {
            uniform,
            samples: GrowableStorage::new(
                device,
                "waveform_samples",
                SAMPLE_STRIDE,
                sample_capacity as u64,
                max_binding,
            ),
            units: GrowableStorage::new(
                device,
                "units",
                UNIT_STRIDE,
                unit_capacity as u64,
                max_binding,
            ),
        }
    }

    /// Write this frame's uniforms and live arrays.
    ///
    /// Every write goes through the queue, so it lands before any command
    /// buffer submitted afterwards. An array larger than the device's binding
    /// limit is rejected before anything is written.
    pub fn publish(
        &mut self,
        device: &Device,
        queue: &Queue,
        mode: RenderMode,
        state: &FrameState<'_>,
    ) -> Result<FrameUniforms, RenderError> {
        let uniforms = FrameUniforms::for_mode(mode, state)?;

        match StorageSource::for_mode(mode) {
            StorageSource::Samples => {
                self.samples
                    .write(device, queue, bytemuck::cast_slice(state.samples))?
            }
            StorageSource::Units => {
                self.units
                    .write(device, queue, bytemuck::cast_slice(state.units))?
            }
        }
        queue.write_buffer(&self.uniform, 0, bytemuck::bytes_of(&uniforms));

        Ok(uniforms)
    }

    /// Bind group for `mode` against the most recently published data.
    pub fn bind_group(&self, device: &Device, layout: &BindGroupLayout, mode: RenderMode) -> BindGroup {
        let storage = match StorageSource::for_mode(mode) {
            StorageSource::Samples => &self.samples,
            StorageSource::Units => &self.units,
        };

        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("frame_bind_group"),
            layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: UNIFORM_BINDING,
                    resource: self.uniform.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: STORAGE_BINDING,
                    resource: wgpu::BindingResource::Buffer(storage.binding()),
                },
            ],
        })
    }

    /// Number of samples published last.
    pub fn live_samples(&self) -> u64 {
        self.samples.live_elements()
    }

    /// Number of units published last.
    pub fn live_units(&self) -> u64 {
        self.units.live_elements()
    }

    pub fn sample_capacity_bytes(&self) -> u64 {
        self.samples.capacity
    }

    pub fn unit_capacity_bytes(&self) -> u64 {
        self.units.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gpu::GpuContext;
    use crate::modes::WaveformStrategy;

    #[test]
    fn test_storage_source_per_mode() {
        assert_eq!(
            StorageSource::for_mode(RenderMode::Waveform(WaveformStrategy::Sdf)),
            StorageSource::Samples
        );
        assert_eq!(
            StorageSource::for_mode(RenderMode::Waveform(WaveformStrategy::LineStrip)),
            StorageSource::Samples
        );
        assert_eq!(StorageSource::for_mode(RenderMode::ColumnGlow), StorageSource::Units);
        assert_eq!(UNIT_STRIDE, 16);
        assert_eq!(SAMPLE_STRIDE, 4);
    }

    #[test]
    fn test_binding_size_limit() {
        assert!(check_binding_size("samples", 64, 64).is_ok());
        assert!(matches!(
            check_binding_size("samples", 65, 64),
            Err(GpuError::StorageTooLarge {
                bytes: 65,
                limit: 64,
                ..
            })
        ));
    }

    #[tokio::test]
    async fn test_publish_tracks_live_length_and_grows() {
        let ctx = match GpuContext::new().await {
            Ok(ctx) => ctx,
            Err(_) => return,
        };

        let mut buffers = FrameBuffers::new(&ctx.device, 4, 2, ctx.max_storage_binding());
        let mode = RenderMode::Waveform(WaveformStrategy::Sdf);

        let short = [0.1f32; 3];
        let state = FrameState::new(64, 64).with_samples(&short);
        buffers.publish(&ctx.device, &ctx.queue, mode, &state).unwrap();
        assert_eq!(buffers.live_samples(), 3);
        assert_eq!(buffers.sample_capacity_bytes(), 16);

        let long = [0.2f32; 9];
        let state = FrameState::new(64, 64).with_samples(&long);
        buffers.publish(&ctx.device, &ctx.queue, mode, &state).unwrap();
        assert_eq!(buffers.live_samples(), 9);
        assert_eq!(buffers.sample_capacity_bytes(), 64);

        // Shrinking keeps the allocation.
        let state = FrameState::new(64, 64);
        buffers.publish(&ctx.device, &ctx.queue, mode, &state).unwrap();
        assert_eq!(buffers.live_samples(), 0);
        assert_eq!(buffers.sample_capacity_bytes(), 64);
    }

    #[tokio::test]
    async fn test_publish_rejects_zero_resolution() {
        let ctx = match GpuContext::new().await {
            Ok(ctx) => ctx,
            Err(_) => return,
        };

        let mut buffers = FrameBuffers::new(&ctx.device, 4, 4, ctx.max_storage_binding());
        let state = FrameState::new(0, 10);
        assert!(buffers
            .publish(&ctx.device, &ctx.queue, RenderMode::OrganicNoise, &state)
            .is_err());
    }

    #[tokio::test]
    async fn test_publish_rejects_array_over_binding_limit() {
        let ctx = match GpuContext::new().await {
            Ok(ctx) => ctx,
            Err(_) => return,
        };

        let mut buffers = FrameBuffers::new(&ctx.device, 4, 4, 32);
        let mode = RenderMode::Waveform(WaveformStrategy::Sdf);

        let fits = [0.5f32; 8];
        let state = FrameState::new(64, 64).with_samples(&fits);
        buffers.publish(&ctx.device, &ctx.queue, mode, &state).unwrap();

        let too_long = [0.5f32; 9];
        let state = FrameState::new(64, 64).with_samples(&too_long);
        let result = buffers.publish(&ctx.device, &ctx.queue, mode, &state);
        assert!(matches!(
            result,
            Err(RenderError::Gpu(GpuError::StorageTooLarge { bytes: 36, .. }))
        ));
        // The last accepted frame stays bound.
        assert_eq!(buffers.live_samples(), 8);
    }
}
