use bytemuck::{Pod, Zeroable};

use crate::coords::Rect;
use crate::paint::Color;
use crate::render::{RenderCtx, RenderTarget};

use super::common::{CornerVertex, STRIP_CORNERS};
use super::instanced::{InstancedShapes, ShapeProgram};

/// Per-instance data of `colored_rect.wgsl`.
///
/// Layout (48 bytes):
///
///  offset  0  center         [f32; 2]  loc 1
///  offset  8  half_extent    [f32; 2]  loc 2
///  offset 16  color          [f32; 4]  loc 3
///  offset 32  corner_radius  f32       loc 4
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Pod, Zeroable)]
pub struct ColoredRectInstance {
    pub center: [f32; 2],
    pub half_extent: [f32; 2],
    pub color: [f32; 4],
    pub corner_radius: f32,
    pub _pad: [f32; 3],
}

impl ColoredRectInstance {
    /// Packs `bounds` (any drag direction) with a premultiplied color.
    pub fn new(bounds: Rect, color: Color, corner_radius: f32) -> Self {
        Self {
            center: bounds.center().to_array(),
            half_extent: bounds.half_extent().to_array(),
            color: color.to_array(),
            corner_radius: corner_radius.max(0.0),
            _pad: [0.0; 3],
        }
    }

    const ATTRS: [wgpu::VertexAttribute; 4] = wgpu::vertex_attr_array![
        1 => Float32x2, // center
        2 => Float32x2, // half_extent
        3 => Float32x4, // color
        4 => Float32    // corner_radius
    ];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<ColoredRectInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRS,
        }
    }
}

/// Solid, optionally rounded rectangles drawn with one instanced call.
///
/// Corners are anti-aliased in the fragment shader from a rounded-box distance.
pub struct ColoredRectRenderer {
    shapes: InstancedShapes<ColoredRectInstance>,
}

impl ColoredRectRenderer {
    pub fn new(capacity: usize) -> Self {
        Self {
            shapes: InstancedShapes::new(
                ShapeProgram {
                    label: "prism colored rect",
                    shader_src: include_str!("shaders/colored_rect.wgsl"),
                    vertices: Some((bytemuck::cast_slice(&STRIP_CORNERS), CornerVertex::layout())),
                    instance_layout: ColoredRectInstance::layout(),
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
        instances: &[ColoredRectInstance],
    ) {
        self.shapes.draw(ctx, target, instances, None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::mem::{offset_of, size_of};

    #[test]
    fn instance_layout_matches_shader() {
        assert_eq!(size_of::<ColoredRectInstance>(), 48);
        assert_eq!(offset_of!(ColoredRectInstance, center), 0);
        assert_eq!(offset_of!(ColoredRectInstance, half_extent), 8);
        assert_eq!(offset_of!(ColoredRectInstance, color), 16);
        assert_eq!(offset_of!(ColoredRectInstance, corner_radius), 32);

        let offsets: Vec<u64> = ColoredRectInstance::ATTRS.iter().map(|a| a.offset).collect();
        assert_eq!(offsets, vec![0, 8, 16, 32]);
    }

    #[test]
    fn packs_normalized_bounds() {
        let inst = ColoredRectInstance::new(
            Rect::new(110.0, 70.0, -100.0, -50.0),
            Color::from_premul(1.0, 0.0, 0.0, 1.0),
            12.0,
        );
        assert_eq!(inst.center, [60.0, 45.0]);
        assert_eq!(inst.half_extent, [50.0, 25.0]);
        assert_eq!(inst.color, [1.0, 0.0, 0.0, 1.0]);
        assert_eq!(inst.corner_radius, 12.0);
    }

    #[test]
    fn negative_radius_is_square() {
        let inst = ColoredRectInstance::new(Rect::new(0.0, 0.0, 1.0, 1.0), Color::WHITE, -3.0);
        assert_eq!(inst.corner_radius, 0.0);
    }
}
