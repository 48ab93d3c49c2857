use prism_engine::coords::{Rect, Vec2};
use prism_engine::paint::Color;
use prism_engine::render::shapes::{TexturedRectInstance, TexturedRectRenderer};
use prism_engine::render::{RenderCtx, RenderTarget};
use prism_engine::text::{rasterize_text, Font, MAX_TEXT_DIMENSION};

use crate::assets::{AssetError, Assets, SCRIPT_TEXT};
use crate::demo::Demo;

const ORIGIN: Vec2 = Vec2::new(50.0, 50.0);
const FONT_SIZE: f32 = 18.0;
const FULL_UV: Rect = Rect::new(0.0, 0.0, 1.0, 1.0);

/// The bundled script, rasterized once per scale factor and shown as a
/// single textured rectangle.
pub struct TextDemo {
    script: String,
    font: Font,
    renderer: TexturedRectRenderer,
    /// `(scale, max_dimension)` the current image was made for.
    rasterized_for: Option<(f32, u32)>,
    logical_size: Vec2,
}

impl TextDemo {
    pub fn load(assets: &Assets, font: Font) -> Result<Self, AssetError> {
        Ok(Self::new(assets.load_text(SCRIPT_TEXT)?, font))
    }

    pub fn new(script: String, font: Font) -> Self {
        Self {
            script,
            font,
            renderer: TexturedRectRenderer::new(1),
            rasterized_for: None,
            logical_size: Vec2::zero(),
        }
    }

    /// Re-rasterizes when the scale or texture limit changed. Returns whether
    /// a new image was produced.
    fn ensure_bitmap(&mut self, scale: f32, max_dimension: u32) -> bool {
        let key = (scale, max_dimension.min(MAX_TEXT_DIMENSION));
        if self.rasterized_for == Some(key) {
            return false;
        }

        let bitmap = rasterize_text(&self.font, &self.script, FONT_SIZE, key.0, Color::WHITE, key.1);
        log::debug!(
            "text demo: rasterized {}x{} at scale {}",
            bitmap.image.width,
            bitmap.image.height,
            key.0
        );
        self.logical_size = bitmap.logical_size;
        self.renderer.set_image(bitmap.image);
        self.rasterized_for = Some(key);
        true
    }

    /// Where the text quad is drawn, in detail-region coordinates.
    pub fn bounds(&self) -> Rect {
        Rect::from_origin_size(ORIGIN, self.logical_size)
    }
}

impl Demo for TextDemo {
    fn title(&self) -> &'static str {
        "Text"
    }

    fn render(&mut self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>) {
        self.ensure_bitmap(ctx.scale_factor, ctx.max_texture_dimension());
        let instance = TexturedRectInstance::new(self.bounds(), FULL_UV);
        self.renderer.render(ctx, target, &[instance]);
    }

    fn shape_count(&self) -> usize {
        1
    }
}
