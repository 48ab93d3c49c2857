use super::Vec2;

/// Axis-aligned rectangle in logical pixels (top-left origin).
///
/// `size` may be negative while a shape is being dragged out; use [`normalized`]
/// before packing it for the GPU.
///
/// [`normalized`]: Rect::normalized
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Rect {
    pub origin: Vec2,
    pub size: Vec2,
}

impl Rect {
    #[inline]
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            origin: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    #[inline]
    pub const fn from_origin_size(origin: Vec2, size: Vec2) -> Self {
        Self { origin, size }
    }

    /// Rectangle spanned by two corner points, in any order.
    #[inline]
    pub fn from_corners(a: Vec2, b: Vec2) -> Self {
        Rect::from_origin_size(a, b - a).normalized()
    }

    #[inline]
    pub fn min(self) -> Vec2 {
        self.origin
    }

    #[inline]
    pub fn max(self) -> Vec2 {
        Vec2::new(self.origin.x + self.size.x, self.origin.y + self.size.y)
    }

    /// Midpoint of the normalized rectangle.
    #[inline]
    pub fn center(self) -> Vec2 {
        let r = self.normalized();
        Vec2::new(r.origin.x + r.size.x * 0.5, r.origin.y + r.size.y * 0.5)
    }

    /// Half of the normalized width/height.
    #[inline]
    pub fn half_extent(self) -> Vec2 {
        let r = self.normalized();
        r.size * 0.5
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.size.x <= 0.0 || self.size.y <= 0.0
    }

    /// Normalizes the rectangle so width/height are non-negative.
    #[inline]
    pub fn normalized(self) -> Self {
        let (x, w) = if self.size.x < 0.0 {
            (self.origin.x + self.size.x, -self.size.x)
        } else {
            (self.origin.x, self.size.x)
        };
        let (y, h) = if self.size.y < 0.0 {
            (self.origin.y + self.size.y, -self.size.y)
        } else {
            (self.origin.y, self.size.y)
        };
        Rect::new(x, y, w, h)
    }

    /// Half-open containment: [min, max).
    #[inline]
    pub fn contains(self, p: Vec2) -> bool {
        let r = self.normalized();
        p.x >= r.origin.x
            && p.y >= r.origin.y
            && p.x < (r.origin.x + r.size.x)
            && p.y < (r.origin.y + r.size.y)
    }

    #[inline]
    pub fn intersect(self, other: Rect) -> Option<Rect> {
        let a = self.normalized();
        let b = other.normalized();

        let x0 = a.origin.x.max(b.origin.x);
        let y0 = a.origin.y.max(b.origin.y);
        let x1 = (a.origin.x + a.size.x).min(b.origin.x + b.size.x);
        let y1 = (a.origin.y + a.size.y).min(b.origin.y + b.size.y);

        let w = x1 - x0;
        let h = y1 - y0;

        if w <= 0.0 || h <= 0.0 {
            None
        } else {
            Some(Rect::new(x0, y0, w, h))
        }
    }

    /// Splits off a column of `width` on the left. The column is clamped to the
    /// rectangle, so the right part may be empty.
    pub fn split_left(self, width: f32) -> (Rect, Rect) {
        let r = self.normalized();
        let w = width.clamp(0.0, r.size.x);
        let left = Rect::new(r.origin.x, r.origin.y, w, r.size.y);
        let right = Rect::new(r.origin.x + w, r.origin.y, r.size.x - w, r.size.y);
        (left, right)
    }

    /// Converts `p` from the coordinate space containing this rect into the rect's
    /// local space (origin at the rect's top-left corner).
    #[inline]
    pub fn to_local(self, p: Vec2) -> Vec2 {
        p - self.normalized().origin
    }
}
