//! Shape renderers.
//!
//! Draw-list renderers (`rect`, `text`) replay a `scene::DrawList`; the
//! instanced renderers (`colored_rect`, `gradient_rect`, `textured_rect`,
//! `line`) draw a caller-owned slice of packed instances with one call.

mod common;
mod instanced;

pub mod colored_rect;
pub mod gradient_rect;
pub mod line;
pub mod rect;
pub mod text;
pub mod textured_rect;

pub use colored_rect::{ColoredRectInstance, ColoredRectRenderer};
pub use gradient_rect::{GradientRectInstance, GradientRectRenderer};
pub use line::{LineInstance, LineRenderer};
pub use rect::RectRenderer;
pub use text::TextRenderer;
pub use textured_rect::{TexturedRectInstance, TexturedRectRenderer};
