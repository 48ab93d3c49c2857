use super::{ortho_projection, Mat4, Rect};

/// Viewport size in logical pixels.
///
/// Renderers treat this as the coordinate basis when building their projection.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn is_valid(self) -> bool {
        self.width > 0.0 && self.height > 0.0 && self.width.is_finite() && self.height.is_finite()
    }

    /// The full viewport as a rect at the origin.
    #[inline]
    pub fn bounds(self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }

    /// Top-left-origin projection covering this viewport, with depth range `(-1, 1)`.
    pub fn projection(self) -> Mat4 {
        ortho_projection(0.0, 0.0, self.width.max(1.0), self.height.max(1.0), -1.0, 1.0)
    }
}
