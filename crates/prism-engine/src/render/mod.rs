//! GPU rendering subsystem.
//!
//! Each renderer owns its GPU resources (pipelines, buffers, textures) and
//! creates them lazily on first use.
//!
//! Convention:
//! - CPU geometry is in logical pixels, local to `RenderCtx::region`
//!   (top-left origin, +Y down).
//! - Vertex shaders apply the region's orthographic projection.
//! - Colors are premultiplied; blending is `One, OneMinusSrcAlpha`.

mod ctx;
mod image;
pub mod shapes;

pub use ctx::{RenderCtx, RenderTarget};
pub use image::{premultiply_rgba8, ImageData};
