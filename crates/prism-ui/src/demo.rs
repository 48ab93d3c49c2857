use prism_engine::coords::Vec2;
use prism_engine::render::{RenderCtx, RenderTarget};
use prism_engine::text::Font;

use crate::assets::{AssetError, Assets};
use crate::demos::{GradientsDemo, ImagesDemo, LinesDemo, RectanglesDemo, TextDemo};

/// One gallery screen.
///
/// Points are in detail-region coordinates (origin at its top-left corner).
pub trait Demo {
    fn title(&self) -> &'static str;

    fn mouse_down(&mut self, p: Vec2) {
        let _ = p;
    }

    fn mouse_dragged(&mut self, p: Vec2) {
        let _ = p;
    }

    fn mouse_up(&mut self, p: Vec2) {
        let _ = p;
    }

    /// Draws into `ctx.region` with one instanced draw call.
    fn render(&mut self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>);

    /// Shapes currently held.
    fn shape_count(&self) -> usize;
}

/// What a demo may need while being created.
pub struct DemoEnv<'a> {
    pub assets: &'a Assets,
    pub font: &'a Font,
    /// Seed for randomized sample data.
    pub seed: u64,
}

/// The gallery's screens, in sidebar order.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum DemoKind {
    Rectangles,
    Gradients,
    Images,
    Text,
    Lines,
}

impl DemoKind {
    pub const ALL: [DemoKind; 5] = [
        DemoKind::Rectangles,
        DemoKind::Gradients,
        DemoKind::Images,
        DemoKind::Text,
        DemoKind::Lines,
    ];

    pub const fn title(self) -> &'static str {
        match self {
            DemoKind::Rectangles => "Rectangles",
            DemoKind::Gradients => "Gradients",
            DemoKind::Images => "Images",
            DemoKind::Text => "Text",
            DemoKind::Lines => "Lines",
        }
    }

    pub fn create(self, env: &DemoEnv<'_>) -> Result<Box<dyn Demo>, AssetError> {
        let demo: Box<dyn Demo> = match self {
            DemoKind::Rectangles => Box::new(RectanglesDemo::new(env.seed)),
            DemoKind::Gradients => Box::new(GradientsDemo::new()),
            DemoKind::Images => Box::new(ImagesDemo::load(env.assets)?),
            DemoKind::Text => Box::new(TextDemo::load(env.assets, env.font.clone())?),
            DemoKind::Lines => Box::new(LinesDemo::new()),
        };
        log::info!("created {} demo", demo.title());
        Ok(demo)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_order_and_titles() {
        let titles: Vec<_> = DemoKind::ALL.iter().map(|k| k.title()).collect();
        assert_eq!(titles, ["Rectangles", "Gradients", "Images", "Text", "Lines"]);
    }
}
