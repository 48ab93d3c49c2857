use std::fmt;

use fontdue::layout::{CoordinateSystem, Layout, LayoutSettings, TextStyle};

use crate::coords::Vec2;

/// Font bytes could not be parsed.
#[derive(Debug, Clone)]
pub struct FontLoadError(pub String);

impl fmt::Display for FontLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to parse font: {}", self.0)
    }
}

impl std::error::Error for FontLoadError {}

/// Handle to a font owned by a [`FontSystem`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct FontId(pub(crate) usize);

/// Fonts loaded for the lifetime of the app.
///
/// Passed by reference to `TextRenderer::render` so glyphs can be rasterized
/// on first use.
#[derive(Default)]
pub struct FontSystem {
    fonts: Vec<fontdue::Font>,
}

impl FontSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a TrueType/OpenType font.
    pub fn load_font(&mut self, bytes: &[u8]) -> Result<FontId, FontLoadError> {
        let font = fontdue::Font::from_bytes(bytes, fontdue::FontSettings::default())
            .map_err(|e| FontLoadError(e.to_string()))?;
        self.fonts.push(font);
        Ok(FontId(self.fonts.len() - 1))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.fonts.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty()
    }

    /// The parsed font behind `id`.
    pub fn font(&self, id: FontId) -> Option<&fontdue::Font> {
        self.fonts.get(id.0)
    }

    /// Extent of `text` laid out without wrapping, in logical pixels.
    ///
    /// Width follows pen advances (not ink bounds); height is the number of
    /// lines times the font's line height.
    #[must_use]
    pub fn measure_text(&self, text: &str, id: FontId, size: f32) -> Vec2 {
        let Some(font) = self.font(id) else {
            return Vec2::new(0.0, size * 1.2);
        };

        let mut layout: Layout<()> = Layout::new(CoordinateSystem::PositiveYDown);
        layout.reset(&LayoutSettings::default());
        layout.append(&[font], &TextStyle::new(text, size, 0));

        let width = layout
            .glyphs()
            .iter()
            .map(|g| {
                let m = font.metrics_indexed(g.key.glyph_index, size);
                g.x - m.xmin as f32 + m.advance_width
            })
            .fold(0.0f32, f32::max);
        Vec2::new(width, layout.height())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEJAVU_SANS: &[u8] = include_bytes!(concat!(env!("CARGO_MANIFEST_DIR"), "/../prism-studio/assets/fonts/DejaVuSans.ttf"));

    fn bundled_fonts() -> (FontSystem, FontId) {
        let mut fonts = FontSystem::new();
        let id = fonts.load_font(DEJAVU_SANS).unwrap();
        (fonts, id)
    }

    #[test]
    fn garbage_is_rejected() {
        let mut fonts = FontSystem::new();
        assert!(fonts.load_font(b"definitely not a font").is_err());
        assert!(fonts.is_empty());
    }

    #[test]
    fn unknown_id_measures_as_one_empty_line() {
        let fonts = FontSystem::new();
        let size = fonts.measure_text("abc", FontId(3), 10.0);
        assert_eq!(size.x, 0.0);
        assert!((size.y - 12.0).abs() < 1e-4);
    }

    #[test]
    fn longer_text_is_wider() {
        let (fonts, id) = bundled_fonts();
        let short = fonts.measure_text("Text", id, 16.0);
        let long = fonts.measure_text("Rectangles", id, 16.0);
        assert!(long.x > short.x);
        assert_eq!(long.y, short.y);

        let two_lines = fonts.measure_text("Text\nLines", id, 16.0);
        assert!(two_lines.y > short.y);
    }
}
