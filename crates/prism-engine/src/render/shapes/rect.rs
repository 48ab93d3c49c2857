use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use crate::coords::Rect;
use crate::render::{RenderCtx, RenderTarget};
use crate::scene::{DrawCmd, DrawList};

use super::common::{
    bind_region, create_pipeline, create_projection_ubo, projection_layout_entry, region_scissor,
    write_projection, PipelineDesc, QuadVertex, QUAD_INDICES, QUAD_VERTICES,
};

/// Solid rectangles recorded in a [`DrawList`].
///
/// Items sharing a clip rect are drawn with one instanced call; a new clip
/// starts a new call with its own scissor.
#[derive(Default)]
pub struct RectRenderer {
    pipeline_format: Option<wgpu::TextureFormat>,
    pipeline: Option<wgpu::RenderPipeline>,

    bind_group_layout: Option<wgpu::BindGroupLayout>,
    bind_group: Option<wgpu::BindGroup>,
    projection_ubo: Option<wgpu::Buffer>,

    quad_vbo: Option<wgpu::Buffer>,
    quad_ibo: Option<wgpu::Buffer>,

    instance_vbo: Option<wgpu::Buffer>,
    instance_capacity: usize,

    // reused across frames
    batch: Vec<(RectInstance, Option<Rect>)>,
    raw: Vec<RectInstance>,
}

impl RectRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        draw_list: &mut DrawList,
    ) {
        self.batch.clear();
        for item in draw_list.iter_in_paint_order() {
            let DrawCmd::Rect(cmd) = &item.cmd else { continue };
            let r = cmd.rect.normalized();
            if r.is_empty() {
                continue;
            }
            self.batch.push((
                RectInstance {
                    origin: r.origin.to_array(),
                    size: r.size.to_array(),
                    color: cmd.color.to_array(),
                },
                item.clip_rect,
            ));
        }

        if self.batch.is_empty() || ctx.region.is_empty() {
            return;
        }

        self.ensure_pipeline(ctx);
        self.ensure_static_buffers(ctx);
        self.ensure_bindings(ctx);
        self.ensure_instance_capacity(ctx, self.batch.len());

        self.raw.clear();
        self.raw.extend(self.batch.iter().map(|(inst, _)| *inst));

        let Some(ubo) = self.projection_ubo.as_ref() else { return };
        let Some(instance_vbo) = self.instance_vbo.as_ref() else { return };
        write_projection(ctx, ubo);
        ctx.queue.write_buffer(instance_vbo, 0, bytemuck::cast_slice(&self.raw));

        let Some(pipeline) = self.pipeline.as_ref() else { return };
        let Some(bind_group) = self.bind_group.as_ref() else { return };
        let Some(quad_vbo) = self.quad_vbo.as_ref() else { return };
        let Some(quad_ibo) = self.quad_ibo.as_ref() else { return };

        let mut rpass = target.begin_load_pass("prism rect pass");
        if !bind_region(&mut rpass, ctx) {
            return;
        }
        rpass.set_pipeline(pipeline);
        rpass.set_bind_group(0, bind_group, &[]);
        rpass.set_vertex_buffer(0, quad_vbo.slice(..));
        rpass.set_vertex_buffer(1, instance_vbo.slice(..));
        rpass.set_index_buffer(quad_ibo.slice(..), wgpu::IndexFormat::Uint16);

        for (range, clip) in clip_runs(&self.batch) {
            if let Some(s) = region_scissor(clip, ctx) {
                rpass.set_scissor_rect(s.x, s.y, s.w, s.h);
                rpass.draw_indexed(0..6, 0, range.start as u32..range.end as u32);
            }
        }
    }

    fn ensure_pipeline(&mut self, ctx: &RenderCtx<'_>) {
        if self.pipeline_format == Some(ctx.surface_format) && self.pipeline.is_some() {
            return;
        }

        let bind_group_layout =
            ctx.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("prism rect bgl"),
                entries: &[projection_layout_entry()],
            });

        let pipeline = create_pipeline(
            ctx,
            &PipelineDesc {
                label: "prism rect pipeline",
                shader_src: include_str!("shaders/rect.wgsl"),
                bind_group_layouts: &[&bind_group_layout],
                buffers: &[QuadVertex::layout(), RectInstance::layout()],
                topology: wgpu::PrimitiveTopology::TriangleList,
            },
        );

        self.pipeline_format = Some(ctx.surface_format);
        self.pipeline = Some(pipeline);
        self.bind_group_layout = Some(bind_group_layout);
        self.bind_group = None;
        self.projection_ubo = None;
    }

    fn ensure_bindings(&mut self, ctx: &RenderCtx<'_>) {
        if self.bind_group.is_some() && self.projection_ubo.is_some() {
            return;
        }
        let Some(bgl) = self.bind_group_layout.as_ref() else { return };

        let ubo = create_projection_ubo(ctx, "prism rect projection ubo");
        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("prism rect bind group"),
            layout: bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: ubo.as_entire_binding(),
            }],
        });

        self.projection_ubo = Some(ubo);
        self.bind_group = Some(bind_group);
    }

    fn ensure_static_buffers(&mut self, ctx: &RenderCtx<'_>) {
        if self.quad_vbo.is_some() && self.quad_ibo.is_some() {
            return;
        }

        self.quad_vbo = Some(ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("prism rect quad vbo"),
            contents: bytemuck::cast_slice(&QUAD_VERTICES),
            usage: wgpu::BufferUsages::VERTEX,
        }));
        self.quad_ibo = Some(ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("prism rect quad ibo"),
            contents: bytemuck::cast_slice(&QUAD_INDICES),
            usage: wgpu::BufferUsages::INDEX,
        }));
    }

    fn ensure_instance_capacity(&mut self, ctx: &RenderCtx<'_>, required: usize) {
        if required <= self.instance_capacity && self.instance_vbo.is_some() {
            return;
        }

        let new_cap = required.next_power_of_two().max(64);
        self.instance_vbo = Some(ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("prism rect instance vbo"),
            size: (new_cap * std::mem::size_of::<RectInstance>()) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        }));
        self.instance_capacity = new_cap;
    }
}

/// Splits a paint-ordered batch into runs of consecutive items sharing a clip.
pub(super) fn clip_runs<T>(batch: &[(T, Option<Rect>)]) -> Vec<(std::ops::Range<usize>, Option<Rect>)> {
    let mut runs = Vec::new();
    let mut start = 0;
    while start < batch.len() {
        let clip = batch[start].1;
        let end = batch[start..]
            .iter()
            .position(|(_, c)| *c != clip)
            .map_or(batch.len(), |n| start + n);
        runs.push((start..end, clip));
        start = end;
    }
    runs
}

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct RectInstance {
    origin: [f32; 2],
    size: [f32; 2],
    color: [f32; 4],
}

impl RectInstance {
    const ATTRS: [wgpu::VertexAttribute; 3] = wgpu::vertex_attr_array![
        1 => Float32x2, // origin
        2 => Float32x2, // size
        3 => Float32x4  // color
    ];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<RectInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clip_runs_group_consecutive_items() {
        let a = Some(Rect::new(0.0, 0.0, 10.0, 10.0));
        let batch = [((), None), ((), None), ((), a), ((), None)];
        let runs = clip_runs(&batch);
        assert_eq!(runs, vec![(0..2, None), (2..3, a), (3..4, None)]);
    }

    #[test]
    fn clip_runs_of_empty_batch() {
        let batch: [((), Option<Rect>); 0] = [];
        assert!(clip_runs(&batch).is_empty());
    }
}
