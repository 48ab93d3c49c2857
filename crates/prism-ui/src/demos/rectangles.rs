use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use prism_engine::coords::{Rect, Vec2};
use prism_engine::paint::{Color, HueCycle};
use prism_engine::render::shapes::{ColoredRectInstance, ColoredRectRenderer};
use prism_engine::render::{RenderCtx, RenderTarget};

use crate::demo::Demo;

pub const CAPACITY: usize = 64;
const SAMPLE_COUNT: usize = 10;

/// Solid rectangle with rounded corners.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Rectangle {
    pub bounds: Rect,
    pub color: Color,
    pub corner_radius: f32,
}

/// Random rounded rectangles; press and drag to draw more.
pub struct RectanglesDemo {
    rects: Vec<Rectangle>,
    hues: HueCycle,
    rng: StdRng,
    renderer: ColoredRectRenderer,
    instances: Vec<ColoredRectInstance>,
}

impl RectanglesDemo {
    pub fn new(seed: u64) -> Self {
        let mut demo = Self {
            rects: Vec::with_capacity(CAPACITY),
            hues: HueCycle::new(),
            rng: StdRng::seed_from_u64(seed),
            renderer: ColoredRectRenderer::new(CAPACITY),
            instances: Vec::with_capacity(CAPACITY),
        };
        demo.add_sample_data();
        demo
    }

    fn add_sample_data(&mut self) {
        for _ in 0..SAMPLE_COUNT {
            let bounds = Rect::new(
                self.rng.gen_range(0.0..=600.0),
                self.rng.gen_range(0.0..=800.0),
                self.rng.gen_range(100.0..=400.0),
                self.rng.gen_range(100.0..=400.0),
            );
            let color = self.hues.next();
            let corner_radius = self.random_radius();
            self.rects.push(Rectangle { bounds, color, corner_radius });
        }
    }

    fn random_radius(&mut self) -> f32 {
        self.rng.gen_range(10.0..=50.0)
    }

    pub fn rectangles(&self) -> &[Rectangle] {
        &self.rects
    }
}

impl Demo for RectanglesDemo {
    fn title(&self) -> &'static str {
        "Rectangles"
    }

    fn mouse_down(&mut self, p: Vec2) {
        if self.rects.len() >= CAPACITY {
            log::debug!("rectangles: capacity {CAPACITY} reached, press ignored");
            return;
        }
        let color = self.hues.next();
        let corner_radius = self.random_radius();
        self.rects.push(Rectangle {
            bounds: Rect::from_origin_size(p, Vec2::zero()),
            color,
            corner_radius,
        });
    }

    fn mouse_dragged(&mut self, p: Vec2) {
        if let Some(last) = self.rects.last_mut() {
            last.bounds.size = p - last.bounds.origin;
        }
    }

    fn render(&mut self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>) {
        self.instances.clear();
        self.instances.extend(
            self.rects
                .iter()
                .map(|r| ColoredRectInstance::new(r.bounds, r.color, r.corner_radius)),
        );
        self.renderer.render(ctx, target, &self.instances);
    }

    fn shape_count(&self) -> usize {
        self.rects.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── sample data ───────────────────────────────────────────────────────

    #[test]
    fn sample_data_is_in_range() {
        let demo = RectanglesDemo::new(7);
        assert_eq!(demo.shape_count(), SAMPLE_COUNT);
        for r in demo.rectangles() {
            assert!((0.0..=600.0).contains(&r.bounds.origin.x));
            assert!((0.0..=800.0).contains(&r.bounds.origin.y));
            assert!((100.0..=400.0).contains(&r.bounds.size.x));
            assert!((100.0..=400.0).contains(&r.bounds.size.y));
            assert!((10.0..=50.0).contains(&r.corner_radius));
        }
    }

    #[test]
    fn sample_colors_follow_the_hue_cycle() {
        let demo = RectanglesDemo::new(1);
        let mut hues = HueCycle::new();
        for r in demo.rectangles() {
            assert_eq!(r.color, hues.next());
        }
    }

    #[test]
    fn same_seed_same_sample_data() {
        assert_eq!(RectanglesDemo::new(42).rectangles(), RectanglesDemo::new(42).rectangles());
    }

    // ── mouse ─────────────────────────────────────────────────────────────

    #[test]
    fn press_then_drag_spans_a_rectangle() {
        let mut demo = RectanglesDemo::new(3);
        demo.mouse_down(Vec2::new(100.0, 100.0));
        demo.mouse_dragged(Vec2::new(250.0, 180.0));

        assert_eq!(demo.shape_count(), SAMPLE_COUNT + 1);
        let last = demo.rectangles().last().unwrap();
        assert_eq!(last.bounds, Rect::new(100.0, 100.0, 150.0, 80.0));
        assert!((10.0..=50.0).contains(&last.corner_radius));
    }

    #[test]
    fn dragging_up_left_normalizes_when_packed() {
        let mut demo = RectanglesDemo::new(3);
        demo.mouse_down(Vec2::new(300.0, 300.0));
        demo.mouse_dragged(Vec2::new(200.0, 250.0));

        let last = *demo.rectangles().last().unwrap();
        assert_eq!(last.bounds.size, Vec2::new(-100.0, -50.0));
        let inst = ColoredRectInstance::new(last.bounds, last.color, last.corner_radius);
        assert_eq!(inst.center, [250.0, 275.0]);
        assert_eq!(inst.half_extent, [50.0, 25.0]);
    }

    #[test]
    fn presses_beyond_capacity_are_ignored() {
        let mut demo = RectanglesDemo::new(3);
        for i in 0..100 {
            demo.mouse_down(Vec2::new(i as f32, 0.0));
        }
        assert_eq!(demo.shape_count(), CAPACITY);
    }

    #[test]
    fn new_rectangle_takes_the_next_hue() {
        let mut demo = RectanglesDemo::new(3);
        let mut hues = HueCycle::new();
        for _ in 0..SAMPLE_COUNT {
            hues.next();
        }
        demo.mouse_down(Vec2::new(1.0, 1.0));
        assert_eq!(demo.rectangles().last().unwrap().color, hues.next());
    }
}
