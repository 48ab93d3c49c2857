use bytemuck::{Pod, Zeroable};

use crate::coords::Vec2;
use crate::paint::Color;
use crate::render::{RenderCtx, RenderTarget};

use super::instanced::{InstancedShapes, ShapeProgram};

/// Per-instance data of `line.wgsl`.
///
/// There is no per-vertex buffer: the shader expands each segment into a quad
/// from `vertex_index`, so the instance attributes start at location 0.
///
/// Layout (48 bytes):
///
///  offset  0  start  [f32; 2]  loc 0
///  offset  8  end    [f32; 2]  loc 1
///  offset 16  color  [f32; 4]  loc 2
///  offset 32  width  f32       loc 3
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Pod, Zeroable)]
pub struct LineInstance {
    pub start: [f32; 2],
    pub end: [f32; 2],
    pub color: [f32; 4],
    pub width: f32,
    pub _pad: [f32; 3],
}

impl LineInstance {
    pub fn new(start: Vec2, end: Vec2, color: Color, width: f32) -> Self {
        Self {
            start: start.to_array(),
            end: end.to_array(),
            color: color.to_array(),
            width: width.max(0.0),
            _pad: [0.0; 3],
        }
    }

    const ATTRS: [wgpu::VertexAttribute; 4] = wgpu::vertex_attr_array![
        0 => Float32x2, // start
        1 => Float32x2, // end
        2 => Float32x4, // color
        3 => Float32    // width
    ];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<LineInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRS,
        }
    }
}

/// Thick line segments with round caps. A zero-length segment draws a dot.
pub struct LineRenderer {
    shapes: InstancedShapes<LineInstance>,
}

impl LineRenderer {
    pub fn new(capacity: usize) -> Self {
        Self {
            shapes: InstancedShapes::new(
                ShapeProgram {
                    label: "prism line",
                    shader_src: include_str!("shaders/line.wgsl"),
                    vertices: None,
                    instance_layout: LineInstance::layout(),
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
        instances: &[LineInstance],
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
        assert_eq!(size_of::<LineInstance>(), 48);
        assert_eq!(offset_of!(LineInstance, end), 8);
        assert_eq!(offset_of!(LineInstance, color), 16);
        assert_eq!(offset_of!(LineInstance, width), 32);

        let locations: Vec<u32> = LineInstance::ATTRS.iter().map(|a| a.shader_location).collect();
        assert_eq!(locations, vec![0, 1, 2, 3]);
    }

    #[test]
    fn packs_endpoints() {
        let inst = LineInstance::new(Vec2::new(1.0, 2.0), Vec2::new(3.0, 4.0), Color::WHITE, 15.0);
        assert_eq!(inst.start, [1.0, 2.0]);
        assert_eq!(inst.end, [3.0, 4.0]);
        assert_eq!(inst.width, 15.0);
    }
}
