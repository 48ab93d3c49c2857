use crate::coords::{Mat4, Rect, Viewport};

/// Renderer-facing context (device/queue + surface format + viewport + target region).
///
/// `region` is the part of the surface a renderer draws into, in logical pixels.
/// Instance coordinates are local to it: `(0, 0)` is the region's top-left corner.
#[derive(Copy, Clone)]
pub struct RenderCtx<'a> {
    pub device: &'a wgpu::Device,
    pub queue: &'a wgpu::Queue,
    pub surface_format: wgpu::TextureFormat,
    pub viewport: Viewport, // logical px, whole surface
    pub scale_factor: f32,
    pub region: Rect, // logical px, inside `viewport`
}

impl<'a> RenderCtx<'a> {
    #[inline]
    pub fn new(
        device: &'a wgpu::Device,
        queue: &'a wgpu::Queue,
        surface_format: wgpu::TextureFormat,
        viewport: Viewport,
        scale_factor: f32,
    ) -> Self {
        Self {
            device,
            queue,
            surface_format,
            viewport,
            scale_factor: scale_factor.max(0.01),
            region: viewport.bounds(),
        }
    }

    /// Returns a copy of this context restricted to `region` (clamped to the viewport).
    ///
    /// A region that does not overlap the viewport yields an empty region;
    /// renderers skip their pass in that case.
    #[must_use]
    pub fn with_region(&self, region: Rect) -> Self {
        let region = region
            .intersect(self.viewport.bounds())
            .unwrap_or(Rect::new(0.0, 0.0, 0.0, 0.0));
        Self { region, ..*self }
    }

    /// Region size as a viewport (the coordinate basis for region-local geometry).
    #[inline]
    pub fn region_viewport(&self) -> Viewport {
        Viewport::new(self.region.size.x, self.region.size.y)
    }

    /// Orthographic projection over the region: `(0, 0, width, height, -1, 1)`.
    #[inline]
    pub fn projection(&self) -> Mat4 {
        self.region_viewport().projection()
    }

    /// Largest texture side the device accepts.
    #[inline]
    pub fn max_texture_dimension(&self) -> u32 {
        self.device.limits().max_texture_dimension_2d
    }
}

/// Target for drawing (encoder + color view).
pub struct RenderTarget<'a> {
    pub encoder: &'a mut wgpu::CommandEncoder,
    pub color_view: &'a wgpu::TextureView,
}

impl<'a> RenderTarget<'a> {
    #[inline]
    pub fn new(encoder: &'a mut wgpu::CommandEncoder, color_view: &'a wgpu::TextureView) -> Self {
        Self { encoder, color_view }
    }

    /// Starts a pass that loads (keeps) the existing contents of the color view.
    pub fn begin_load_pass(&mut self, label: &str) -> wgpu::RenderPass<'_> {
        self.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some(label),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: self.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        })
    }
}
