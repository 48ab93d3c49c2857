//! Fixed-capacity instanced drawing shared by the demo shape renderers.
//!
//! Each shape renderer is a thin wrapper around [`InstancedShapes`]: it names
//! its WGSL program and instance layout, and (for textures) supplies an extra
//! bind group at `@group(1)`.

use std::marker::PhantomData;

use bytemuck::Pod;
use wgpu::util::DeviceExt;

use crate::render::{RenderCtx, RenderTarget};

use super::common::{
    bind_region, create_pipeline, create_projection_ubo, projection_layout_entry,
    write_projection, PipelineDesc,
};

// ── instance buffer ───────────────────────────────────────────────────────

/// GPU vertex buffer holding up to `capacity` instances of `T`.
///
/// The buffer never grows: writes beyond capacity are truncated.
pub(super) struct InstanceBuffer<T> {
    buffer: wgpu::Buffer,
    capacity: usize,
    len: usize,
    _marker: PhantomData<T>,
}

impl<T: Pod> InstanceBuffer<T> {
    pub(super) fn new(device: &wgpu::Device, label: &str, capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(label),
            size: byte_len::<T>(capacity),
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        Self { buffer, capacity, len: 0, _marker: PhantomData }
    }

    /// Uploads `instances`, truncated to capacity. Returns the count written.
    pub(super) fn write(&mut self, queue: &wgpu::Queue, instances: &[T]) -> usize {
        let n = instances.len().min(self.capacity);
        if n < instances.len() {
            log::debug!(
                "instance buffer full: drawing {n} of {} instances",
                instances.len()
            );
        }
        if n > 0 {
            queue.write_buffer(&self.buffer, 0, bytemuck::cast_slice(&instances[..n]));
        }
        self.len = n;
        n
    }

    #[inline]
    pub(super) fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub(super) fn capacity(&self) -> usize {
        self.capacity
    }

    /// Slice covering the instances written by the last [`write`](Self::write).
    pub(super) fn slice(&self) -> wgpu::BufferSlice<'_> {
        self.buffer.slice(..byte_len::<T>(self.len))
    }
}

#[inline]
fn byte_len<T>(count: usize) -> u64 {
    (count * std::mem::size_of::<T>()) as u64
}

// ── program description ───────────────────────────────────────────────────

/// Static description of one instanced shape program.
pub(super) struct ShapeProgram {
    pub label: &'static str,
    pub shader_src: &'static str,
    /// Per-vertex buffer contents and layout; `None` when the shader builds
    /// corners from `vertex_index`.
    pub vertices: Option<(&'static [u8], wgpu::VertexBufferLayout<'static>)>,
    pub instance_layout: wgpu::VertexBufferLayout<'static>,
    /// Layout entries of an optional `@group(1)` the wrapper binds at draw time.
    pub extra_group: Vec<wgpu::BindGroupLayoutEntry>,
}

// ── instanced shapes ──────────────────────────────────────────────────────

pub(super) struct InstancedShapes<I> {
    program: ShapeProgram,
    capacity: usize,

    pipeline_format: Option<wgpu::TextureFormat>,
    pipeline: Option<wgpu::RenderPipeline>,
    group0_layout: Option<wgpu::BindGroupLayout>,
    extra_layout: Option<wgpu::BindGroupLayout>,
    layout_generation: u64,

    bind_group: Option<wgpu::BindGroup>,
    projection_ubo: Option<wgpu::Buffer>,

    vertex_vbo: Option<wgpu::Buffer>,
    instances: Option<InstanceBuffer<I>>,
}

impl<I: Pod> InstancedShapes<I> {
    pub(super) fn new(program: ShapeProgram, capacity: usize) -> Self {
        Self {
            program,
            capacity: capacity.max(1),
            pipeline_format: None,
            pipeline: None,
            group0_layout: None,
            extra_layout: None,
            layout_generation: 0,
            bind_group: None,
            projection_ubo: None,
            vertex_vbo: None,
            instances: None,
        }
    }

    #[inline]
    pub(super) fn capacity(&self) -> usize {
        self.capacity
    }

    /// Creates pipeline, uniform, static and instance buffers if missing.
    pub(super) fn prepare(&mut self, ctx: &RenderCtx<'_>) {
        self.ensure_pipeline(ctx);
        self.ensure_bindings(ctx);
        self.ensure_buffers(ctx);
    }

    /// Layout for the wrapper's `@group(1)`; available after [`prepare`](Self::prepare).
    pub(super) fn extra_layout(&self) -> Option<&wgpu::BindGroupLayout> {
        self.extra_layout.as_ref()
    }

    /// Bumped whenever the pipeline (and with it [`extra_layout`](Self::extra_layout))
    /// is rebuilt; bind groups made from an older layout must be recreated.
    #[inline]
    pub(super) fn layout_generation(&self) -> u64 {
        self.layout_generation
    }

    /// Uploads `instances` and issues a single instanced draw into the ctx region.
    ///
    /// Skips the pass when there is nothing to draw.
    pub(super) fn draw(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        instances: &[I],
        extra: Option<&wgpu::BindGroup>,
    ) {
        if instances.is_empty() || ctx.region.is_empty() {
            return;
        }
        if !self.program.extra_group.is_empty() && extra.is_none() {
            return;
        }

        self.prepare(ctx);

        let Some(ubo) = self.projection_ubo.as_ref() else { return };
        write_projection(ctx, ubo);

        let Some(instance_buf) = self.instances.as_mut() else { return };
        let count = instance_buf.write(ctx.queue, instances) as u32;

        let Some(pipeline) = self.pipeline.as_ref() else { return };
        let Some(bind_group) = self.bind_group.as_ref() else { return };
        let Some(instance_buf) = self.instances.as_ref() else { return };

        let mut rpass = target.begin_load_pass(self.program.label);
        if !bind_region(&mut rpass, ctx) {
            return;
        }

        rpass.set_pipeline(pipeline);
        rpass.set_bind_group(0, bind_group, &[]);
        if let Some(extra) = extra {
            rpass.set_bind_group(1, extra, &[]);
        }

        let mut slot = 0;
        if let Some(vbo) = self.vertex_vbo.as_ref() {
            rpass.set_vertex_buffer(slot, vbo.slice(..));
            slot += 1;
        }
        rpass.set_vertex_buffer(slot, instance_buf.slice());
        rpass.draw(0..4, 0..count);

        log::trace!(
            "{}: {count}/{} instances",
            self.program.label,
            instance_buf.capacity()
        );
        debug_assert_eq!(count as usize, instance_buf.len());
    }

    fn ensure_pipeline(&mut self, ctx: &RenderCtx<'_>) {
        if self.pipeline_format == Some(ctx.surface_format) && self.pipeline.is_some() {
            return;
        }

        let group0 = ctx.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some(self.program.label),
            entries: &[projection_layout_entry()],
        });
        let extra_layout = (!self.program.extra_group.is_empty()).then(|| {
            ctx.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some(self.program.label),
                entries: &self.program.extra_group,
            })
        });

        let mut layouts = vec![&group0];
        if let Some(extra) = extra_layout.as_ref() {
            layouts.push(extra);
        }

        let mut buffers = Vec::with_capacity(2);
        if let Some((_, layout)) = self.program.vertices.as_ref() {
            buffers.push(layout.clone());
        }
        buffers.push(self.program.instance_layout.clone());

        let pipeline = create_pipeline(
            ctx,
            &PipelineDesc {
                label: self.program.label,
                shader_src: self.program.shader_src,
                bind_group_layouts: &layouts,
                buffers: &buffers,
                topology: wgpu::PrimitiveTopology::TriangleStrip,
            },
        );
        log::debug!("{}: pipeline created for {:?}", self.program.label, ctx.surface_format);

        self.pipeline_format = Some(ctx.surface_format);
        self.pipeline = Some(pipeline);
        self.extra_layout = extra_layout;
        self.layout_generation += 1;

        // Group 0 must be recreated against the new layout.
        self.group0_layout = Some(group0);
        self.bind_group = None;
        self.projection_ubo = None;
    }

    fn ensure_bindings(&mut self, ctx: &RenderCtx<'_>) {
        if self.bind_group.is_some() && self.projection_ubo.is_some() {
            return;
        }
        let Some(layout) = self.group0_layout.as_ref() else { return };

        let ubo = create_projection_ubo(ctx, self.program.label);
        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(self.program.label),
            layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: ubo.as_entire_binding(),
            }],
        });

        self.projection_ubo = Some(ubo);
        self.bind_group = Some(bind_group);
    }

    fn ensure_buffers(&mut self, ctx: &RenderCtx<'_>) {
        if self.vertex_vbo.is_none() {
            if let Some((contents, _)) = self.program.vertices.as_ref() {
                self.vertex_vbo = Some(ctx.device.create_buffer_init(
                    &wgpu::util::BufferInitDescriptor {
                        label: Some(self.program.label),
                        contents: *contents,
                        usage: wgpu::BufferUsages::VERTEX,
                    },
                ));
            }
        }
        if self.instances.is_none() {
            self.instances = Some(InstanceBuffer::new(ctx.device, self.program.label, self.capacity));
            log::debug!("{}: instance buffer for {} shapes", self.program.label, self.capacity);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn byte_len_uses_struct_size() {
        assert_eq!(byte_len::<[f32; 12]>(64), 64 * 48);
        assert_eq!(byte_len::<[f32; 8]>(0), 0);
    }
}
