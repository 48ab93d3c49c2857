use bytemuck::{Pod, Zeroable};

use crate::coords::Rect;
use crate::paint::Gradient;
use crate::render::{RenderCtx, RenderTarget};

use super::common::{CornerUvVertex, STRIP_CORNERS_UV};
use super::instanced::{InstancedShapes, ShapeProgram};

/// Per-instance data of `gradient_rect.wgsl`.
///
/// Layout (64 bytes):
///
///  offset  0  center       [f32; 2]  loc 2
///  offset  8  half_extent  [f32; 2]  loc 3
///  offset 16  start_color  [f32; 4]  loc 4
///  offset 32  end_color    [f32; 4]  loc 5
///  offset 48  style        u32       loc 6
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Pod, Zeroable)]
pub struct GradientRectInstance {
    pub center: [f32; 2],
    pub half_extent: [f32; 2],
    pub start_color: [f32; 4],
    pub end_color: [f32; 4],
    pub style: u32,
    pub _pad: [u32; 3],
}

impl GradientRectInstance {
    pub fn new(bounds: Rect, gradient: Gradient) -> Self {
        Self {
            center: bounds.center().to_array(),
            half_extent: bounds.half_extent().to_array(),
            start_color: gradient.start.to_array(),
            end_color: gradient.end.to_array(),
            style: gradient.style.as_u32(),
            _pad: [0; 3],
        }
    }

    const ATTRS: [wgpu::VertexAttribute; 5] = wgpu::vertex_attr_array![
        2 => Float32x2, // center
        3 => Float32x2, // half_extent
        4 => Float32x4, // start_color
        5 => Float32x4, // end_color
        6 => Uint32     // style
    ];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<GradientRectInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRS,
        }
    }
}

/// Two-color linear, radial or angular gradients filling rectangles.
pub struct GradientRectRenderer {
    shapes: InstancedShapes<GradientRectInstance>,
}

impl GradientRectRenderer {
    pub fn new(capacity: usize) -> Self {
        Self {
            shapes: InstancedShapes::new(
                ShapeProgram {
                    label: "prism gradient rect",
                    shader_src: include_str!("shaders/gradient_rect.wgsl"),
                    vertices: Some((
                        bytemuck::cast_slice(&STRIP_CORNERS_UV),
                        CornerUvVertex::layout(),
                    )),
                    instance_layout: GradientRectInstance::layout(),
                    extra_group: Vec::new(),
                },
                capacity,
            ),
        }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.shapes.capacity()
    }

    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        instances: &[GradientRectInstance],
    ) {
        self.shapes.draw(ctx, target, instances, None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paint::{Color, GradientStyle};
    use std::mem::{offset_of, size_of};

    #[test]
    fn instance_layout_matches_shader() {
        assert_eq!(size_of::<GradientRectInstance>(), 64);
        assert_eq!(offset_of!(GradientRectInstance, start_color), 16);
        assert_eq!(offset_of!(GradientRectInstance, end_color), 32);
        assert_eq!(offset_of!(GradientRectInstance, style), 48);

        let offsets: Vec<u64> = GradientRectInstance::ATTRS.iter().map(|a| a.offset).collect();
        assert_eq!(offsets, vec![0, 8, 16, 32, 48]);
        assert_eq!(GradientRectInstance::ATTRS[4].format, wgpu::VertexFormat::Uint32);
    }

    #[test]
    fn packs_style_discriminant() {
        let g = Gradient::new(Color::WHITE, Color::transparent(), GradientStyle::Angular);
        let inst = GradientRectInstance::new(Rect::new(50.0, 50.0, 900.0, 200.0), g);
        assert_eq!(inst.style, 2);
        assert_eq!(inst.center, [500.0, 150.0]);
        assert_eq!(inst.half_extent, [450.0, 100.0]);
        assert_eq!(inst.end_color, [0.0; 4]);
    }
}
