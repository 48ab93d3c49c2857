use super::Color;

/// Produces a sequence of fully saturated colors by stepping around the hue wheel.
///
/// Every demo that lets the user draw keeps its own cycle, so each new shape
/// gets a visibly different color from the previous one.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct HueCycle {
    hue: f32,
    step: f32,
}

impl HueCycle {
    pub const DEFAULT_STEP: f32 = 0.11;

    pub fn new() -> Self {
        Self::with_step(Self::DEFAULT_STEP)
    }

    pub fn with_step(step: f32) -> Self {
        Self { hue: 0.0, step }
    }

    /// Hue the next call to [`next`](Self::next) will use.
    #[inline]
    pub fn hue(&self) -> f32 {
        self.hue
    }

    /// Returns the color at the current hue and advances `hue = (hue + step) mod 1`.
    pub fn next(&mut self) -> Color {
        let color = Color::from_hsb(self.hue, 1.0, 1.0);
        self.hue = (self.hue + self.step).rem_euclid(1.0);
        color
    }
}

impl Default for HueCycle {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_color_is_red() {
        let c = HueCycle::new().next();
        assert_eq!(c.to_array(), [1.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn hue_advances_by_step() {
        let mut cycle = HueCycle::new();
        cycle.next();
        cycle.next();
        assert!((cycle.hue() - 0.22).abs() < 1e-6);
    }

    #[test]
    fn hue_wraps_below_one() {
        let mut cycle = HueCycle::new();
        for _ in 0..10 {
            cycle.next();
        }
        // 10 * 0.11 = 1.1 -> 0.1
        assert!((cycle.hue() - 0.1).abs() < 1e-5);
        assert!(cycle.hue() < 1.0);
    }

    #[test]
    fn consecutive_colors_differ() {
        let mut cycle = HueCycle::new();
        let a = cycle.next();
        let b = cycle.next();
        assert_ne!(a, b);
    }
}
