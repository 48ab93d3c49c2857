/// CPU-side RGBA8 image with premultiplied alpha, ready for upload.
///
/// Rows are tightly packed: `pixels.len() == width * height * 4`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageData {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl ImageData {
    /// Wraps already-premultiplied pixels.
    ///
    /// Returns `None` if the buffer length does not match the dimensions.
    pub fn from_premultiplied(width: u32, height: u32, pixels: Vec<u8>) -> Option<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)?
            .checked_mul(4)?;
        (pixels.len() == expected).then_some(Self { width, height, pixels })
    }

    /// Premultiplies straight-alpha RGBA8 pixels in place and wraps them.
    pub fn from_straight(width: u32, height: u32, mut pixels: Vec<u8>) -> Option<Self> {
        premultiply_rgba8(&mut pixels);
        Self::from_premultiplied(width, height, pixels)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    #[inline]
    pub fn bytes_per_row(&self) -> u32 {
        self.width * 4
    }
}

/// Multiplies RGB by alpha for every RGBA8 pixel, rounding to nearest.
pub fn premultiply_rgba8(pixels: &mut [u8]) {
    for px in pixels.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 255 {
            continue;
        }
        for c in &mut px[..3] {
            *c = ((*c as u16 * a + 127) / 255) as u8;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opaque_pixels_are_unchanged() {
        let mut px = vec![10, 20, 30, 255];
        premultiply_rgba8(&mut px);
        assert_eq!(px, vec![10, 20, 30, 255]);
    }

    #[test]
    fn translucent_pixels_scale_by_alpha() {
        let mut px = vec![255, 128, 0, 128, 200, 200, 200, 0];
        premultiply_rgba8(&mut px);
        assert_eq!(px, vec![128, 64, 0, 128, 0, 0, 0, 0]);
    }

    #[test]
    fn length_must_match_dimensions() {
        assert!(ImageData::from_premultiplied(2, 2, vec![0; 16]).is_some());
        assert!(ImageData::from_premultiplied(2, 2, vec![0; 15]).is_none());
        assert!(ImageData::from_straight(1, 1, vec![0; 8]).is_none());
    }
}
