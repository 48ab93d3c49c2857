use fontdue::layout::{CoordinateSystem, Layout, LayoutSettings, TextStyle};

use crate::coords::Vec2;
use crate::paint::Color;
use crate::render::ImageData;

/// Largest bitmap side produced by [`rasterize_text`] unless the caller asks
/// for less. Every GPU wgpu targets supports 2D textures of at least this size.
pub const MAX_TEXT_DIMENSION: u32 = 4096;

/// Text rendered into a premultiplied RGBA8 image.
#[derive(Debug, Clone, PartialEq)]
pub struct TextBitmap {
    /// Physical-pixel image, at most `max_dimension` per side.
    pub image: ImageData,
    /// Size to draw the image at, in logical pixels (`image size / scale`).
    pub logical_size: Vec2,
    /// True when the laid-out text was larger than the bitmap and got cut off.
    pub clipped: bool,
}

/// Lays out `text` (explicit newlines only, no wrapping) and draws it in
/// `color` at `size * scale` physical pixels into a fresh bitmap.
///
/// The extent is measured at the logical `size`, so the logical size is the
/// same at every scale. The bitmap is that extent times `scale`, cropped to
/// `max_dimension` pixels per side (at least 1). Empty or whitespace-only
/// text yields a 1×1 transparent bitmap.
pub fn rasterize_text(
    font: &fontdue::Font,
    text: &str,
    size: f32,
    scale: f32,
    color: Color,
    max_dimension: u32,
) -> TextBitmap {
    let scale = scale.max(0.01);
    let size = size.max(1.0);
    let px = size * scale;

    let mut layout: Layout<()> = Layout::new(CoordinateSystem::PositiveYDown);
    let (ink_w, ink_h) = layout_extent(&mut layout, font, text, size);
    let logical = Vec2::new(ink_w.ceil().max(1.0), ink_h.ceil().max(1.0));

    let (full_w, full_h) = (
        (logical.x * scale).ceil().max(1.0) as u32,
        (logical.y * scale).ceil().max(1.0) as u32,
    );
    let limit = max_dimension.max(1);
    let (w, h) = (full_w.min(limit), full_h.min(limit));
    let clipped = w < full_w || h < full_h;
    if clipped {
        log::warn!("text bitmap {full_w}x{full_h} cropped to {w}x{h}");
    }
    let logical_size = Vec2::new(
        if w < full_w { w as f32 / scale } else { logical.x },
        if h < full_h { h as f32 / scale } else { logical.y },
    );

    let mut pixels = vec![0u8; (w as usize) * (h as usize) * 4];
    let rgba = premul_bytes(color);

    layout_extent(&mut layout, font, text, px);
    for g in layout.glyphs() {
        if !g.char_data.rasterize() || g.width == 0 || g.height == 0 {
            continue;
        }
        let (metrics, coverage) = font.rasterize_config(g.key);
        composite_coverage(
            &mut pixels,
            w,
            h,
            g.x.round() as i32,
            g.y.round() as i32,
            metrics.width as u32,
            metrics.height as u32,
            &coverage,
            rgba,
        );
    }

    TextBitmap {
        image: ImageData { width: w, height: h, pixels },
        logical_size,
        clipped,
    }
}

/// Lays `text` out at `px` into `layout` and returns the extent of pen
/// advances and glyph boxes.
fn layout_extent(layout: &mut Layout<()>, font: &fontdue::Font, text: &str, px: f32) -> (f32, f32) {
    layout.reset(&LayoutSettings::default());
    layout.append(&[font], &TextStyle::new(text, px, 0));

    let glyphs = layout.glyphs();
    let w = glyphs
        .iter()
        .map(|g| {
            let advance = font.metrics_indexed(g.key.glyph_index, px).advance_width;
            (g.x + g.width as f32).max(g.x + advance)
        })
        .fold(0.0f32, f32::max);
    let h = glyphs
        .iter()
        .map(|g| g.y + g.height as f32)
        .fold(layout.height(), f32::max);
    (w, h)
}

fn premul_bytes(color: Color) -> [u8; 4] {
    color
        .to_array()
        .map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8)
}

/// Draws an 8-bit coverage mask tinted with `rgba` (premultiplied) into `dst`
/// at `(x, y)`, clipping to the destination. Overlapping glyph pixels keep the
/// stronger coverage.
#[allow(clippy::too_many_arguments)]
fn composite_coverage(
    dst: &mut [u8],
    dst_w: u32,
    dst_h: u32,
    x: i32,
    y: i32,
    w: u32,
    h: u32,
    coverage: &[u8],
    rgba: [u8; 4],
) {
    for row in 0..h as i32 {
        let dy = y + row;
        if dy < 0 || dy >= dst_h as i32 {
            continue;
        }
        for col in 0..w as i32 {
            let dx = x + col;
            if dx < 0 || dx >= dst_w as i32 {
                continue;
            }
            let Some(&c) = coverage.get((row as usize) * (w as usize) + col as usize) else {
                continue;
            };
            let i = ((dy as usize) * (dst_w as usize) + dx as usize) * 4;
            if c as u16 * rgba[3] as u16 / 255 <= dst[i + 3] as u16 {
                continue;
            }
            for k in 0..4 {
                dst[i + k] = ((rgba[k] as u16 * c as u16 + 127) / 255) as u8;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: [u8; 4] = [255, 255, 255, 255];

    fn pixel(buf: &[u8], w: u32, x: u32, y: u32) -> [u8; 4] {
        let i = ((y * w + x) * 4) as usize;
        [buf[i], buf[i + 1], buf[i + 2], buf[i + 3]]
    }

    // ── compositing ───────────────────────────────────────────────────────

    #[test]
    fn coverage_tints_premultiplied() {
        let mut buf = vec![0u8; 2 * 2 * 4];
        composite_coverage(&mut buf, 2, 2, 0, 0, 2, 1, &[255, 128], [255, 0, 0, 255]);
        assert_eq!(pixel(&buf, 2, 0, 0), [255, 0, 0, 255]);
        assert_eq!(pixel(&buf, 2, 1, 0), [128, 0, 0, 128]);
        assert_eq!(pixel(&buf, 2, 0, 1), [0, 0, 0, 0]);
    }

    #[test]
    fn glyphs_outside_the_bitmap_are_clipped() {
        let mut buf = vec![0u8; 2 * 2 * 4];
        composite_coverage(&mut buf, 2, 2, -1, 1, 2, 2, &[255; 4], WHITE);
        assert_eq!(pixel(&buf, 2, 0, 1), WHITE);
        assert_eq!(pixel(&buf, 2, 0, 0), [0; 4]);
        assert_eq!(pixel(&buf, 2, 1, 1), [0; 4]);
    }

    #[test]
    fn overlap_keeps_stronger_coverage() {
        let mut buf = vec![0u8; 4];
        composite_coverage(&mut buf, 1, 1, 0, 0, 1, 1, &[200], WHITE);
        composite_coverage(&mut buf, 1, 1, 0, 0, 1, 1, &[50], WHITE);
        assert_eq!(buf[3], 200);
    }

    #[test]
    fn color_bytes_are_premultiplied() {
        assert_eq!(premul_bytes(Color::from_straight(1.0, 0.5, 0.0, 0.5)), [128, 64, 0, 128]);
    }

    // ── layout ────────────────────────────────────────────────────────────

    fn dejavu_sans() -> fontdue::Font {
        let bytes: &[u8] = include_bytes!(concat!(env!("CARGO_MANIFEST_DIR"), "/../prism-studio/assets/fonts/DejaVuSans.ttf"));
        fontdue::Font::from_bytes(bytes, fontdue::FontSettings::default()).unwrap()
    }

    #[test]
    fn multiline_text_is_taller_than_one_line() {
        let font = dejavu_sans();
        let one = rasterize_text(&font, "Scene 1", 20.0, 1.0, Color::WHITE, MAX_TEXT_DIMENSION);
        let two = rasterize_text(&font, "Scene 1\nScene 2", 20.0, 1.0, Color::WHITE, MAX_TEXT_DIMENSION);
        assert!(two.image.height > one.image.height);
        assert!(!one.clipped);
        assert!(one.image.pixels.iter().any(|&b| b > 0));
    }

    #[test]
    fn bitmap_is_clamped_and_logical_size_scaled() {
        let font = dejavu_sans();
        let long = "W".repeat(200);
        let bmp = rasterize_text(&font, &long, 40.0, 2.0, Color::WHITE, 512);
        assert_eq!(bmp.image.width, 512);
        assert!(bmp.clipped);
        assert_eq!(bmp.logical_size.x, 256.0);
        assert_eq!(bmp.image.pixels.len(), (bmp.image.width * bmp.image.height * 4) as usize);
    }

    #[test]
    fn logical_size_does_not_depend_on_scale() {
        let font = dejavu_sans();
        let text = "INT. BRIDGE - NIGHT\nThe captain waits.";
        let at_1x = rasterize_text(&font, text, 18.0, 1.0, Color::WHITE, MAX_TEXT_DIMENSION);
        let at_2x = rasterize_text(&font, text, 18.0, 2.0, Color::WHITE, MAX_TEXT_DIMENSION);
        assert_eq!(at_1x.logical_size, at_2x.logical_size);
        assert_eq!(at_2x.image.width, at_1x.image.width * 2);
        assert_eq!(at_2x.image.height, at_1x.image.height * 2);
    }

    #[test]
    fn empty_text_gives_a_transparent_pixel_bitmap() {
        let font = dejavu_sans();
        let bmp = rasterize_text(&font, "", 20.0, 1.0, Color::WHITE, MAX_TEXT_DIMENSION);
        assert!(bmp.image.pixels.iter().all(|&b| b == 0));
        assert!(bmp.image.width >= 1 && bmp.image.height >= 1);
    }
}
