//! The five gallery screens.

mod gradients;
mod images;
mod lines;
mod rectangles;
mod text;

pub use gradients::{GradientRectangle, GradientsDemo};
pub use images::{ImagesDemo, TexturedRectangle};
pub use lines::{CurveSegment, LinesDemo};
pub use rectangles::{RectanglesDemo, Rectangle};
pub use text::TextDemo;
