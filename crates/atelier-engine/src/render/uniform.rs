use std::marker::PhantomData;
use std::num::NonZeroU64;

use bytemuck::Pod;

use super::RenderCtx;

/// Rounds `size` up to the next multiple of `align` (a power of two).
#[inline]
pub fn aligned_stride(size: u64, align: u64) -> u64 {
    let align = align.max(1);
    size.div_ceil(align) * align
}

/// One uniform buffer holding a record per draw, bound at binding 0 with a
/// dynamic offset.
///
/// Scenes collect every draw's uniforms for the frame, `write` them in one
/// upload, then bind the same group per draw with that draw's offset. The
/// buffer grows to the next power of two (at least 64 records) and the bind
/// group is rebuilt whenever it does.
pub struct DynamicUniforms<T: Pod> {
    label: String,
    stride: u64,
    layout: wgpu::BindGroupLayout,

    buffer: Option<wgpu::Buffer>,
    bind_group: Option<wgpu::BindGroup>,
    capacity: usize,

    staging: Vec<u8>,
    _record: PhantomData<T>,
}

impl<T: Pod> DynamicUniforms<T> {
    pub fn new(device: &wgpu::Device, label: &str, visibility: wgpu::ShaderStages) -> Self {
        let align = device.limits().min_uniform_buffer_offset_alignment as u64;
        let stride = aligned_stride(std::mem::size_of::<T>() as u64, align);

        let layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some(&format!("{label} uniforms bgl")),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: true,
                    min_binding_size: NonZeroU64::new(std::mem::size_of::<T>() as u64),
                },
                count: None,
            }],
        });

        Self {
            label: label.to_string(),
            stride,
            layout,
            buffer: None,
            bind_group: None,
            capacity: 0,
            staging: Vec::new(),
            _record: PhantomData,
        }
    }

    pub fn layout(&self) -> &wgpu::BindGroupLayout {
        &self.layout
    }

    pub fn bind_group(&self) -> Option<&wgpu::BindGroup> {
        self.bind_group.as_ref()
    }

    /// Uploads `records` and returns each record's dynamic offset.
    pub fn write(&mut self, ctx: &RenderCtx<'_>, records: &[T]) -> Vec<u32> {
        if records.is_empty() {
            return Vec::new();
        }
        self.ensure_capacity(ctx.device, records.len());

        let stride = self.stride as usize;
        let record_size = std::mem::size_of::<T>();
        self.staging.clear();
        self.staging.resize(stride * records.len(), 0);
        for (i, rec) in records.iter().enumerate() {
            let at = i * stride;
            self.staging[at..at + record_size].copy_from_slice(bytemuck::bytes_of(rec));
        }

        if let Some(buffer) = self.buffer.as_ref() {
            ctx.queue.write_buffer(buffer, 0, &self.staging);
        }

        (0..records.len()).map(|i| (i as u64 * self.stride) as u32).collect()
    }

    fn ensure_capacity(&mut self, device: &wgpu::Device, required: usize) {
        if required <= self.capacity && self.buffer.is_some() {
            return;
        }
        let new_cap = required.next_power_of_two().max(64);

        let buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(&format!("{} uniforms", self.label)),
            size: new_cap as u64 * self.stride,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(&format!("{} uniforms bind group", self.label)),
            layout: &self.layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                    buffer: &buffer,
                    offset: 0,
                    size: NonZeroU64::new(std::mem::size_of::<T>() as u64),
                }),
            }],
        });

        log::debug!("{} uniforms grown to {new_cap} records", self.label);

        self.buffer = Some(buffer);
        self.bind_group = Some(bind_group);
        self.capacity = new_cap;
    }
}
