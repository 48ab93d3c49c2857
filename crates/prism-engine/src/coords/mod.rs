//! Coordinate and geometry types shared across engine renderers and the gallery.
//!
//! Canonical CPU space:
//! - Logical pixels (DPI-aware)
//! - Origin top-left of the region being drawn
//! - +X right, +Y down
//!
//! Renderers convert to clip space in shaders using an orthographic projection uniform.

mod projection;
mod rect;
mod vec2;
mod viewport;

pub use projection::{ortho_projection, Mat4};
pub use rect::Rect;
pub use vec2::Vec2;
pub use viewport::Viewport;
