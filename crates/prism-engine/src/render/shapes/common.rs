//! Shared GPU types and utilities used by all shape renderers.

use bytemuck::{Pod, Zeroable};

use crate::coords::{Mat4, Rect, Viewport};
use crate::render::RenderCtx;

// ── blend ─────────────────────────────────────────────────────────────────

pub(super) fn premul_alpha_blend() -> wgpu::BlendState {
    let premul = wgpu::BlendComponent {
        src_factor: wgpu::BlendFactor::One,
        dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
        operation: wgpu::BlendOperation::Add,
    };
    wgpu::BlendState { color: premul, alpha: premul }
}

// ── projection uniform ────────────────────────────────────────────────────

/// Uniform block at `@group(0) @binding(0)` in every shape shader.
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub(super) struct ProjectionUniform {
    pub projection: Mat4,
}

impl ProjectionUniform {
    pub(super) fn for_ctx(ctx: &RenderCtx<'_>) -> Self {
        Self { projection: ctx.projection() }
    }
}

pub(super) fn projection_layout_entry() -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding: 0,
        visibility: wgpu::ShaderStages::VERTEX,
        ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Uniform,
            has_dynamic_offset: false,
            min_binding_size: wgpu::BufferSize::new(
                std::mem::size_of::<ProjectionUniform>() as u64,
            ),
        },
        count: None,
    }
}

pub(super) fn create_projection_ubo(ctx: &RenderCtx<'_>, label: &str) -> wgpu::Buffer {
    ctx.device.create_buffer(&wgpu::BufferDescriptor {
        label: Some(label),
        size: std::mem::size_of::<ProjectionUniform>() as u64,
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

pub(super) fn write_projection(ctx: &RenderCtx<'_>, ubo: &wgpu::Buffer) {
    ctx.queue
        .write_buffer(ubo, 0, bytemuck::bytes_of(&ProjectionUniform::for_ctx(ctx)));
}

// ── texture + sampler bindings ────────────────────────────────────────────

/// Entries for a filterable 2D texture at `binding` and its sampler at `binding + 1`.
pub(super) fn texture_layout_entries(binding: u32) -> [wgpu::BindGroupLayoutEntry; 2] {
    [
        wgpu::BindGroupLayoutEntry {
            binding,
            visibility: wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Texture {
                sample_type: wgpu::TextureSampleType::Float { filterable: true },
                view_dimension: wgpu::TextureViewDimension::D2,
                multisampled: false,
            },
            count: None,
        },
        wgpu::BindGroupLayoutEntry {
            binding: binding + 1,
            visibility: wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
            count: None,
        },
    ]
}

pub(super) fn create_linear_sampler(ctx: &RenderCtx<'_>, label: &str) -> wgpu::Sampler {
    ctx.device.create_sampler(&wgpu::SamplerDescriptor {
        label: Some(label),
        address_mode_u: wgpu::AddressMode::ClampToEdge,
        address_mode_v: wgpu::AddressMode::ClampToEdge,
        address_mode_w: wgpu::AddressMode::ClampToEdge,
        mag_filter: wgpu::FilterMode::Linear,
        min_filter: wgpu::FilterMode::Linear,
        mipmap_filter: wgpu::MipmapFilterMode::Nearest,
        ..Default::default()
    })
}

// ── quad vertex (indexed, 0..1) ───────────────────────────────────────────

/// Unit-square vertex used by the draw-list renderers (rect, text).
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub(super) struct QuadVertex {
    pub pos: [f32; 2], // 0..1
}

impl QuadVertex {
    const ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x2];

    pub(super) fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<QuadVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

pub(super) const QUAD_VERTICES: [QuadVertex; 4] = [
    QuadVertex { pos: [0.0, 0.0] },
    QuadVertex { pos: [1.0, 0.0] },
    QuadVertex { pos: [1.0, 1.0] },
    QuadVertex { pos: [0.0, 1.0] },
];

pub(super) const QUAD_INDICES: [u16; 6] = [0, 1, 2, 0, 2, 3];

// ── corner vertex (triangle strip, -1..1) ─────────────────────────────────

/// Corner of the centered unit quad; `center + corner * half_extent` is the
/// vertex position in region-local pixels.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct CornerVertex {
    pub corner: [f32; 2],
}

impl CornerVertex {
    const ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x2];

    pub(super) fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<CornerVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

/// Four corners in triangle-strip order.
pub static STRIP_CORNERS: [CornerVertex; 4] = [
    CornerVertex { corner: [-1.0, -1.0] },
    CornerVertex { corner: [-1.0, 1.0] },
    CornerVertex { corner: [1.0, -1.0] },
    CornerVertex { corner: [1.0, 1.0] },
];

/// Corner plus its texture-style coordinate (`uv = (corner + 1) / 2`, top-left is `(0, 0)`).
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct CornerUvVertex {
    pub corner: [f32; 2],
    pub uv: [f32; 2],
}

impl CornerUvVertex {
    const ATTRS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![
        0 => Float32x2, // corner
        1 => Float32x2  // uv
    ];

    pub(super) fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<CornerUvVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

pub static STRIP_CORNERS_UV: [CornerUvVertex; 4] = [
    CornerUvVertex { corner: [-1.0, -1.0], uv: [0.0, 0.0] },
    CornerUvVertex { corner: [-1.0, 1.0], uv: [0.0, 1.0] },
    CornerUvVertex { corner: [1.0, -1.0], uv: [1.0, 0.0] },
    CornerUvVertex { corner: [1.0, 1.0], uv: [1.0, 1.0] },
];

// ── region → physical pixels ──────────────────────────────────────────────

/// Rectangle in physical (framebuffer) pixels.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub(super) struct PhysicalRect {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

/// Converts a logical rect (surface space) to physical pixels, clamped to the surface.
///
/// Returns `None` for zero-area results.
pub(super) fn logical_to_physical(
    rect: Rect,
    viewport: Viewport,
    scale: f32,
) -> Option<PhysicalRect> {
    let phys_vw = (viewport.width * scale).max(1.0) as u32;
    let phys_vh = (viewport.height * scale).max(1.0) as u32;

    let r = rect.normalized();
    let x = ((r.origin.x * scale).max(0.0) as u32).min(phys_vw);
    let y = ((r.origin.y * scale).max(0.0) as u32).min(phys_vh);
    let x2 = (((r.origin.x + r.size.x) * scale).max(0.0) as u32).min(phys_vw);
    let y2 = (((r.origin.y + r.size.y) * scale).max(0.0) as u32).min(phys_vh);

    let (w, h) = (x2.saturating_sub(x), y2.saturating_sub(y));
    if w == 0 || h == 0 { None } else { Some(PhysicalRect { x, y, w, h }) }
}

/// Scissor for a region-local clip rect, or the whole region for `None`.
pub(super) fn region_scissor(clip: Option<Rect>, ctx: &RenderCtx<'_>) -> Option<PhysicalRect> {
    let surface_clip = match clip {
        None => ctx.region,
        Some(c) => {
            let c = c.normalized();
            Rect::from_origin_size(c.origin + ctx.region.origin, c.size).intersect(ctx.region)?
        }
    };
    logical_to_physical(surface_clip, ctx.viewport, ctx.scale_factor)
}

/// Restricts `rpass` to the ctx region: the viewport maps clip space onto the
/// region and the scissor keeps fragments inside it.
///
/// Returns `false` when the region is empty and nothing should be drawn.
pub(super) fn bind_region(rpass: &mut wgpu::RenderPass<'_>, ctx: &RenderCtx<'_>) -> bool {
    let Some(phys) = logical_to_physical(ctx.region, ctx.viewport, ctx.scale_factor) else {
        return false;
    };
    rpass.set_viewport(phys.x as f32, phys.y as f32, phys.w as f32, phys.h as f32, 0.0, 1.0);
    rpass.set_scissor_rect(phys.x, phys.y, phys.w, phys.h);
    true
}

// ── pipeline ──────────────────────────────────────────────────────────────

/// Everything that differs between the shape pipelines.
pub(super) struct PipelineDesc<'a> {
    pub label: &'a str,
    pub shader_src: &'a str,
    pub bind_group_layouts: &'a [&'a wgpu::BindGroupLayout],
    pub buffers: &'a [wgpu::VertexBufferLayout<'a>],
    pub topology: wgpu::PrimitiveTopology,
}

pub(super) fn create_pipeline(ctx: &RenderCtx<'_>, desc: &PipelineDesc<'_>) -> wgpu::RenderPipeline {
    let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(desc.label),
        source: wgpu::ShaderSource::Wgsl(desc.shader_src.into()),
    });

    let pipeline_layout = ctx.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some(desc.label),
        bind_group_layouts: desc.bind_group_layouts,
        immediate_size: 0,
    });

    ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(desc.label),
        layout: Some(&pipeline_layout),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_main"),
            compilation_options: Default::default(),
            buffers: desc.buffers,
        },
        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: Some("fs_main"),
            compilation_options: Default::default(),
            targets: &[Some(wgpu::ColorTargetState {
                format: ctx.surface_format,
                blend: Some(premul_alpha_blend()),
                write_mask: wgpu::ColorWrites::ALL,
            })],
        }),
        primitive: wgpu::PrimitiveState {
            topology: desc.topology,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode: None,
            polygon_mode: wgpu::PolygonMode::Fill,
            unclipped_depth: false,
            conservative: false,
        },
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        multiview_mask: None,
        cache: None,
    })
}
