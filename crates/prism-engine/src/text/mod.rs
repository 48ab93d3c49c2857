//! Fonts and CPU text rasterization (fontdue).

mod font_system;
mod raster;

pub use font_system::{FontId, FontLoadError, FontSystem};
pub use raster::{rasterize_text, TextBitmap, MAX_TEXT_DIMENSION};

/// Parsed font face, as handed out by [`FontSystem::font`].
pub use fontdue::Font;
