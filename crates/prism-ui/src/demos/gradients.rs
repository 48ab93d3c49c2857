use prism_engine::coords::Rect;
use prism_engine::paint::{Color, Gradient, GradientStyle};
use prism_engine::render::shapes::{GradientRectInstance, GradientRectRenderer};
use prism_engine::render::{RenderCtx, RenderTarget};

use crate::demo::Demo;

pub const CAPACITY: usize = 64;

/// Rectangle filled with a two-color gradient.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct GradientRectangle {
    pub bounds: Rect,
    pub start_color: Color,
    pub end_color: Color,
    pub style: GradientStyle,
}

impl GradientRectangle {
    fn gradient(&self) -> Gradient {
        Gradient::new(self.start_color, self.end_color, self.style)
    }
}

fn hex(rgb: u32) -> Color {
    Color::from_srgb_u8((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8, 255)
}

/// Four fixed gradient bands, one per style plus a second linear one.
pub struct GradientsDemo {
    rects: Vec<GradientRectangle>,
    renderer: GradientRectRenderer,
    instances: Vec<GradientRectInstance>,
}

impl GradientsDemo {
    pub fn new() -> Self {
        let samples = [
            (0x330D69, 0x30C9CD, GradientStyle::Linear),
            (0x12D6DF, 0xF70FFF, GradientStyle::Radial),
            (0xD70A84, 0x51127F, GradientStyle::Angular),
            (0xFACC22, 0xF83600, GradientStyle::Linear),
        ];
        let rects = samples
            .iter()
            .enumerate()
            .map(|(i, &(start, end, style))| GradientRectangle {
                bounds: Rect::new(50.0, 50.0 + i as f32 * 250.0, 900.0, 200.0),
                start_color: hex(start),
                end_color: hex(end),
                style,
            })
            .collect();

        Self {
            rects,
            renderer: GradientRectRenderer::new(CAPACITY),
            instances: Vec::with_capacity(CAPACITY),
        }
    }

    pub fn rectangles(&self) -> &[GradientRectangle] {
        &self.rects
    }
}

impl Default for GradientsDemo {
    fn default() -> Self {
        Self::new()
    }
}

impl Demo for GradientsDemo {
    fn title(&self) -> &'static str {
        "Gradients"
    }

    fn render(&mut self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>) {
        self.instances.clear();
        self.instances
            .extend(self.rects.iter().map(|r| GradientRectInstance::new(r.bounds, r.gradient())));
        self.renderer.render(ctx, target, &self.instances);
    }

    fn shape_count(&self) -> usize {
        self.rects.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prism_engine::coords::Vec2;

    #[test]
    fn four_stacked_bands() {
        let demo = GradientsDemo::new();
        let tops: Vec<f32> = demo.rectangles().iter().map(|r| r.bounds.origin.y).collect();
        assert_eq!(tops, [50.0, 300.0, 550.0, 800.0]);
        for r in demo.rectangles() {
            assert_eq!(r.bounds.origin.x, 50.0);
            assert_eq!(r.bounds.size, Vec2::new(900.0, 200.0));
        }
    }

    #[test]
    fn styles_and_colors() {
        let demo = GradientsDemo::new();
        let styles: Vec<_> = demo.rectangles().iter().map(|r| r.style).collect();
        assert_eq!(
            styles,
            [GradientStyle::Linear, GradientStyle::Radial, GradientStyle::Angular, GradientStyle::Linear]
        );
        let first = demo.rectangles()[0];
        assert_eq!(first.start_color, Color::from_srgb_u8(0x33, 0x0D, 0x69, 255));
        assert_eq!(first.end_color, Color::from_srgb_u8(0x30, 0xC9, 0xCD, 255));
    }

    #[test]
    fn mouse_input_changes_nothing() {
        let mut demo = GradientsDemo::new();
        demo.mouse_down(Vec2::new(10.0, 10.0));
        demo.mouse_dragged(Vec2::new(90.0, 90.0));
        demo.mouse_up(Vec2::new(90.0, 90.0));
        assert_eq!(demo.shape_count(), 4);
    }

    #[test]
    fn packs_style_discriminant() {
        let demo = GradientsDemo::new();
        let inst = GradientRectInstance::new(demo.rectangles()[2].bounds, demo.rectangles()[2].gradient());
        assert_eq!(inst.style, 2);
        assert_eq!(inst.center, [500.0, 650.0]);
    }
}
