//! Paint model shared between the gallery and renderers.
//!
//! Scope:
//! - color representation (premultiplied alpha)
//! - two-color gradients
//! - the hue cycle used to color user-drawn shapes
//!
//! Geometry types remain in `coords`.

pub mod color;
pub mod gradient;
pub mod hue;

pub use color::Color;
pub use gradient::{Gradient, GradientStyle};
pub use hue::HueCycle;
