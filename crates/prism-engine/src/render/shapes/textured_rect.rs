use bytemuck::{Pod, Zeroable};

use crate::coords::Rect;
use crate::render::{ImageData, RenderCtx, RenderTarget};

use super::common::{create_linear_sampler, texture_layout_entries, CornerVertex, STRIP_CORNERS};
use super::instanced::{InstancedShapes, ShapeProgram};

/// Per-instance data of `textured_rect.wgsl`.
///
/// Layout (32 bytes):
///
///  offset  0  center          [f32; 2]  loc 1
///  offset  8  half_extent     [f32; 2]  loc 2
///  offset 16  uv_center       [f32; 2]  loc 3
///  offset 24  uv_half_extent  [f32; 2]  loc 4
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Pod, Zeroable)]
pub struct TexturedRectInstance {
    pub center: [f32; 2],
    pub half_extent: [f32; 2],
    pub uv_center: [f32; 2],
    pub uv_half_extent: [f32; 2],
}

impl TexturedRectInstance {
    /// `texture_bounds` is in normalized UV space (`(0, 0, 1, 1)` is the whole image).
    pub fn new(bounds: Rect, texture_bounds: Rect) -> Self {
        Self {
            center: bounds.center().to_array(),
            half_extent: bounds.half_extent().to_array(),
            uv_center: texture_bounds.center().to_array(),
            uv_half_extent: texture_bounds.half_extent().to_array(),
        }
    }

    const ATTRS: [wgpu::VertexAttribute; 4] = wgpu::vertex_attr_array![
        1 => Float32x2, // center
        2 => Float32x2, // half_extent
        3 => Float32x2, // uv_center
        4 => Float32x2  // uv_half_extent
    ];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<TexturedRectInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRS,
        }
    }
}

/// Rectangles sampling sub-regions of a single premultiplied RGBA texture.
///
/// The image is handed over with [`set_image`](Self::set_image) and uploaded
/// on the next [`render`](Self::render). Nothing is drawn until an image exists.
pub struct TexturedRectRenderer {
    shapes: InstancedShapes<TexturedRectInstance>,

    pending: Option<ImageData>,
    texture: Option<wgpu::Texture>,
    texture_view: Option<wgpu::TextureView>,
    sampler: Option<wgpu::Sampler>,

    bind_group: Option<wgpu::BindGroup>,
    bind_group_generation: u64,
}

impl TexturedRectRenderer {
    pub fn new(capacity: usize) -> Self {
        Self {
            shapes: InstancedShapes::new(
                ShapeProgram {
                    label: "prism textured rect",
                    shader_src: include_str!("shaders/textured_rect.wgsl"),
                    vertices: Some((bytemuck::cast_slice(&STRIP_CORNERS), CornerVertex::layout())),
                    instance_layout: TexturedRectInstance::layout(),
                    extra_group: texture_layout_entries(0).to_vec(),
                },
                capacity,
            ),
            pending: None,
            texture: None,
            texture_view: None,
            sampler: None,
            bind_group: None,
            bind_group_generation: u64::MAX,
        }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.shapes.capacity()
    }

    /// Replaces the sampled image. Takes effect on the next render.
    pub fn set_image(&mut self, image: ImageData) {
        self.pending = Some(image);
    }

    /// True once an image was set (uploaded or pending).
    pub fn has_image(&self) -> bool {
        self.pending.is_some() || self.texture.is_some()
    }

    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        instances: &[TexturedRectInstance],
    ) {
        if instances.is_empty() || ctx.region.is_empty() {
            return;
        }

        self.shapes.prepare(ctx);
        self.upload_pending(ctx);
        self.ensure_bind_group(ctx);

        self.shapes.draw(ctx, target, instances, self.bind_group.as_ref());
    }

    fn upload_pending(&mut self, ctx: &RenderCtx<'_>) {
        let Some(image) = self.pending.take() else { return };

        let max = ctx.max_texture_dimension();
        if image.is_empty() || image.width > max || image.height > max {
            log::warn!(
                "textured rect: image {}x{} outside the supported 1..={max} range, ignored",
                image.width,
                image.height
            );
            return;
        }

        let size = wgpu::Extent3d {
            width: image.width,
            height: image.height,
            depth_or_array_layers: 1,
        };
        let texture = ctx.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("prism textured rect image"),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8Unorm,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        ctx.queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            &image.pixels,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(image.bytes_per_row()),
                rows_per_image: Some(image.height),
            },
            size,
        );
        log::debug!("textured rect: uploaded {}x{} image", image.width, image.height);

        self.texture_view = Some(texture.create_view(&wgpu::TextureViewDescriptor::default()));
        self.texture = Some(texture);
        self.bind_group = None;
    }

    fn ensure_bind_group(&mut self, ctx: &RenderCtx<'_>) {
        if self.bind_group.is_some() && self.bind_group_generation == self.shapes.layout_generation() {
            return;
        }
        let Some(view) = self.texture_view.as_ref() else { return };
        let Some(layout) = self.shapes.extra_layout() else { return };

        let sampler = self
            .sampler
            .get_or_insert_with(|| create_linear_sampler(ctx, "prism textured rect sampler"));

        self.bind_group = Some(ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("prism textured rect image bind group"),
            layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(sampler),
                },
            ],
        }));
        self.bind_group_generation = self.shapes.layout_generation();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::mem::{offset_of, size_of};

    #[test]
    fn instance_layout_matches_shader() {
        assert_eq!(size_of::<TexturedRectInstance>(), 32);
        assert_eq!(offset_of!(TexturedRectInstance, uv_center), 16);
        assert_eq!(offset_of!(TexturedRectInstance, uv_half_extent), 24);
    }

    #[test]
    fn packs_uv_sub_rect() {
        let third = 1.0 / 3.0;
        let inst = TexturedRectInstance::new(
            Rect::new(360.0, 50.0, 280.0, 280.0),
            Rect::new(third, 0.0, third, third),
        );
        assert_eq!(inst.center, [500.0, 190.0]);
        assert_eq!(inst.half_extent, [140.0, 140.0]);
        assert!((inst.uv_center[0] - 0.5).abs() < 1e-6);
        assert!((inst.uv_center[1] - third * 0.5).abs() < 1e-6);
        assert!((inst.uv_half_extent[0] - third * 0.5).abs() < 1e-6);
    }

    #[test]
    fn renderer_waits_for_an_image() {
        let mut r = TexturedRectRenderer::new(64);
        assert!(!r.has_image());
        r.set_image(ImageData::from_premultiplied(1, 1, vec![255; 4]).unwrap_or_default());
        assert!(r.has_image());
        assert_eq!(r.capacity(), 64);
    }
}
