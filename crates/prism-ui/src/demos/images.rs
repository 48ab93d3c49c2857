use prism_engine::coords::Rect;
use prism_engine::render::shapes::{TexturedRectInstance, TexturedRectRenderer};
use prism_engine::render::{ImageData, RenderCtx, RenderTarget};

use crate::assets::{AssetError, Assets, SUNSETS_IMAGE};
use crate::demo::Demo;

pub const CAPACITY: usize = 64;

const GRID: usize = 3;
const ORIGIN: f32 = 50.0;
const TILE: f32 = 280.0;
const STRIDE: f32 = 310.0;

/// Rectangle showing part of a texture; `texture_bounds` is in UV space.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TexturedRectangle {
    pub bounds: Rect,
    pub texture_bounds: Rect,
    pub texture_index: usize,
}

/// The sunsets photo cut into a 3×3 grid of tiles.
pub struct ImagesDemo {
    tiles: Vec<TexturedRectangle>,
    renderer: TexturedRectRenderer,
    instances: Vec<TexturedRectInstance>,
}

impl ImagesDemo {
    pub fn load(assets: &Assets) -> Result<Self, AssetError> {
        Ok(Self::with_image(assets.load_image(SUNSETS_IMAGE)?))
    }

    pub fn with_image(image: ImageData) -> Self {
        let mut renderer = TexturedRectRenderer::new(CAPACITY);
        renderer.set_image(image);

        let cell = 1.0 / GRID as f32;
        let tiles = (0..GRID)
            .flat_map(|row| (0..GRID).map(move |col| (row, col)))
            .map(|(row, col)| TexturedRectangle {
                bounds: Rect::new(
                    ORIGIN + col as f32 * STRIDE,
                    ORIGIN + row as f32 * STRIDE,
                    TILE,
                    TILE,
                ),
                texture_bounds: Rect::new(col as f32 * cell, row as f32 * cell, cell, cell),
                texture_index: 0,
            })
            .collect();

        Self {
            tiles,
            renderer,
            instances: Vec::with_capacity(CAPACITY),
        }
    }

    pub fn tiles(&self) -> &[TexturedRectangle] {
        &self.tiles
    }
}

impl Demo for ImagesDemo {
    fn title(&self) -> &'static str {
        "Images"
    }

    fn render(&mut self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>) {
        self.instances.clear();
        self.instances.extend(
            self.tiles
                .iter()
                .map(|t| TexturedRectInstance::new(t.bounds, t.texture_bounds)),
        );
        self.renderer.render(ctx, target, &self.instances);
    }

    fn shape_count(&self) -> usize {
        self.tiles.len()
    }
}
