use super::Color;

/// How a two-color gradient is parameterized across its rectangle.
///
/// The discriminants are the values the gradient shader switches on and must
/// stay in sync with `gradient_rect.wgsl`.
#[repr(u32)]
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub enum GradientStyle {
    /// Left edge to right edge.
    #[default]
    Linear = 0,
    /// Center outwards.
    Radial = 1,
    /// Sweep around the center.
    Angular = 2,
}

impl GradientStyle {
    #[inline]
    pub const fn as_u32(self) -> u32 {
        self as u32
    }
}

/// Start/end color pair evaluated according to a [`GradientStyle`].
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Gradient {
    pub start: Color,
    pub end: Color,
    pub style: GradientStyle,
}

impl Gradient {
    #[inline]
    pub const fn new(start: Color, end: Color, style: GradientStyle) -> Self {
        Self { start, end, style }
    }

    /// CPU reference of the shader's color at parameter `t` (clamped to `[0, 1]`).
    pub fn sample(&self, t: f32) -> Color {
        let t = t.clamp(0.0, 1.0);
        let lerp = |a: f32, b: f32| a + (b - a) * t;
        Color::from_premul(
            lerp(self.start.r, self.end.r),
            lerp(self.start.g, self.end.g),
            lerp(self.start.b, self.end.b),
            lerp(self.start.a, self.end.a),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shader_constants() {
        assert_eq!(GradientStyle::Linear.as_u32(), 0);
        assert_eq!(GradientStyle::Radial.as_u32(), 1);
        assert_eq!(GradientStyle::Angular.as_u32(), 2);
    }

    #[test]
    fn sample_endpoints_and_midpoint() {
        let g = Gradient::new(
            Color::from_premul(0.0, 0.0, 0.0, 1.0),
            Color::from_premul(1.0, 0.5, 0.0, 1.0),
            GradientStyle::Linear,
        );
        assert_eq!(g.sample(0.0), g.start);
        assert_eq!(g.sample(1.0), g.end);
        assert_eq!(g.sample(0.5), Color::from_premul(0.5, 0.25, 0.0, 1.0));
        assert_eq!(g.sample(7.0), g.end);
    }
}
