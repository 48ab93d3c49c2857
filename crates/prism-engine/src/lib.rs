//! Prism engine crate.
//!
//! Platform and GPU runtime used by the gallery: window loop, device and
//! surface, input, frame timing, and the instanced shape renderers.

pub mod device;
pub mod window;
pub mod input;
pub mod time;
pub mod core;

pub mod logging;
pub mod coords;
pub mod render;
pub mod paint;
pub mod scene;
pub mod text;
