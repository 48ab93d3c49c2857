/// Premultiplied RGBA color.
///
/// Invariant:
/// - `rgb` components are multiplied by `a`.
///
/// Components are passed to the surface unchanged; the gallery configures a
/// non-sRGB surface, so values behave like the 8-bit colors they came from.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Color {
    pub r: f32, // premultiplied
    pub g: f32, // premultiplied
    pub b: f32, // premultiplied
    pub a: f32,
}

impl Color {
    /// Background used behind every demo.
    pub const DARK_BACKGROUND: Color = Color::from_premul(0.192, 0.212, 0.239, 1.0);

    /// Alternative light background.
    pub const LIGHT_BACKGROUND: Color = Color::from_premul(0.682, 0.710, 0.741, 1.0);

    pub const WHITE: Color = Color::from_premul(1.0, 1.0, 1.0, 1.0);

    #[inline]
    pub const fn transparent() -> Self {
        Self { r: 0.0, g: 0.0, b: 0.0, a: 0.0 }
    }

    /// Creates a color from straight RGBA bytes (`0`–`255`).
    #[inline]
    pub fn from_srgb_u8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::from_straight(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, a as f32 / 255.0)
    }

    /// Creates a color from premultiplied components.
    #[inline]
    pub const fn from_premul(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Creates a premultiplied color from straight alpha components.
    #[inline]
    pub fn from_straight(r: f32, g: f32, b: f32, a: f32) -> Self {
        let a = a.clamp(0.0, 1.0);
        Self {
            r: r.clamp(0.0, 1.0) * a,
            g: g.clamp(0.0, 1.0) * a,
            b: b.clamp(0.0, 1.0) * a,
            a,
        }
    }

    /// Creates an opaque color from hue, saturation and brightness in `[0, 1]`.
    ///
    /// Hue wraps, so `1.0` is the same red as `0.0`.
    pub fn from_hsb(hue: f32, saturation: f32, brightness: f32) -> Self {
        let h = hue.rem_euclid(1.0) * 6.0;
        let s = saturation.clamp(0.0, 1.0);
        let v = brightness.clamp(0.0, 1.0);

        let sector = h.floor();
        let f = h - sector;
        let p = v * (1.0 - s);
        let q = v * (1.0 - s * f);
        let t = v * (1.0 - s * (1.0 - f));

        let (r, g, b) = match sector as u32 {
            0 => (v, t, p),
            1 => (q, v, p),
            2 => (p, v, t),
            3 => (p, q, v),
            4 => (t, p, v),
            _ => (v, p, q),
        };
        Self::from_straight(r, g, b, 1.0)
    }

    /// Returns a straight-alpha representation.
    ///
    /// For `a == 0`, RGB is returned as 0.
    #[inline]
    pub fn to_straight(self) -> (f32, f32, f32, f32) {
        if self.a <= 0.0 {
            (0.0, 0.0, 0.0, 0.0)
        } else {
            let inv = 1.0 / self.a;
            (self.r * inv, self.g * inv, self.b * inv, self.a)
        }
    }

    /// Layout used by GPU instance structs (`vec4<f32>`).
    #[inline]
    pub const fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    #[inline]
    pub fn to_wgpu(self) -> wgpu::Color {
        wgpu::Color {
            r: self.r as f64,
            g: self.g as f64,
            b: self.b as f64,
            a: self.a as f64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn straight_alpha_is_premultiplied() {
        let c = Color::from_straight(1.0, 0.5, 0.25, 0.5);
        assert_eq!(c.to_array(), [0.5, 0.25, 0.125, 0.5]);
        let (r, g, b, a) = c.to_straight();
        assert!(approx(r, 1.0) && approx(g, 0.5) && approx(b, 0.25) && approx(a, 0.5));
    }

    #[test]
    fn bytes_map_to_unit_range() {
        let c = Color::from_srgb_u8(255, 0, 51, 255);
        assert!(approx(c.r, 1.0));
        assert!(approx(c.g, 0.0));
        assert!(approx(c.b, 0.2));
    }

    #[test]
    fn hsb_primaries() {
        let red = Color::from_hsb(0.0, 1.0, 1.0);
        let green = Color::from_hsb(1.0 / 3.0, 1.0, 1.0);
        let blue = Color::from_hsb(2.0 / 3.0, 1.0, 1.0);
        assert!(approx(red.r, 1.0) && approx(red.g, 0.0) && approx(red.b, 0.0));
        assert!(approx(green.g, 1.0) && approx(green.r, 0.0) && approx(green.b, 0.0));
        assert!(approx(blue.b, 1.0) && approx(blue.r, 0.0) && approx(blue.g, 0.0));
    }

    #[test]
    fn hsb_hue_wraps() {
        assert_eq!(Color::from_hsb(1.0, 1.0, 1.0), Color::from_hsb(0.0, 1.0, 1.0));
        assert_eq!(Color::from_hsb(1.25, 1.0, 1.0), Color::from_hsb(0.25, 1.0, 1.0));
    }

    #[test]
    fn hsb_zero_saturation_is_gray() {
        let c = Color::from_hsb(0.6, 0.0, 0.5);
        assert!(approx(c.r, 0.5) && approx(c.g, 0.5) && approx(c.b, 0.5));
        assert_eq!(c.a, 1.0);
    }
}
