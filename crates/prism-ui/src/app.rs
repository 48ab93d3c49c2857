use std::path::PathBuf;

use anyhow::{Context, Result};
use winit::dpi::LogicalSize;

use prism_engine::core::{App as EngineApp, AppControl, FrameCtx};
use prism_engine::coords::Vec2;
use prism_engine::device::GpuInit;
use prism_engine::input::{InputEvent, KeyState, MouseButton, MouseButtonState};
use prism_engine::paint::Color;
use prism_engine::render::shapes::{RectRenderer, TextRenderer};
use prism_engine::scene::DrawList;
use prism_engine::text::{FontId, FontSystem};
use prism_engine::window::{RedrawMode, Runtime, RuntimeConfig};

use crate::assets::Assets;
use crate::config::GalleryConfig;
use crate::demo::{DemoEnv, DemoKind};
use crate::layout::GalleryLayout;
use crate::master::Master;
use crate::sidebar::Sidebar;

// ── Application ───────────────────────────────────────────────────────────

/// Builder for the gallery window.
///
/// ```rust,ignore
/// Application::new()
///     .title("Prism Gallery")
///     .asset_dir("crates/prism-studio/assets")
///     .run()?;
/// ```
pub struct Application {
    config: GalleryConfig,
}

impl Application {
    pub fn new() -> Self {
        Self { config: GalleryConfig::default() }
    }

    pub fn from_config(config: GalleryConfig) -> Self {
        Self { config }
    }

    pub fn title(mut self, t: impl Into<String>) -> Self {
        self.config.title = t.into();
        self
    }

    /// Initial window size in logical pixels.
    pub fn size(mut self, width: f64, height: f64) -> Self {
        self.config.initial_size = (width, height);
        self
    }

    pub fn asset_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.asset_dir = dir.into();
        self
    }

    /// Font file used instead of the bundled/system search.
    pub fn font_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.font_path = Some(path.into());
        self
    }

    pub fn redraw_mode(mut self, mode: RedrawMode) -> Self {
        self.config.redraw_mode = mode;
        self
    }

    pub fn sidebar_width(mut self, width: f32) -> Self {
        self.config.sidebar_width = width;
        self
    }

    pub fn clear_color(mut self, color: Color) -> Self {
        self.config.clear_color = color;
        self
    }

    /// Fixed seed for the random sample data.
    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    /// Applies `PRISM_ASSET_DIR` / `PRISM_FONT`.
    pub fn env_overrides(mut self) -> Self {
        self.config = self.config.with_env_overrides();
        self
    }

    pub fn config(&self) -> &GalleryConfig {
        &self.config
    }

    /// Loads the font, creates the first demo, and runs the window until it
    /// closes. Any asset, GPU or window failure is returned.
    pub fn run(self) -> Result<()> {
        let runtime_config = RuntimeConfig {
            title: self.config.title.clone(),
            initial_size: LogicalSize::new(self.config.initial_size.0, self.config.initial_size.1),
            redraw_mode: self.config.redraw_mode,
        };
        let gpu_init = GpuInit {
            prefer_srgb: false,
            ..GpuInit::default()
        };

        let gallery = Gallery::new(self.config)?;
        let gallery = Runtime::run(runtime_config, gpu_init, gallery)?;
        log::info!("gallery closed with {} demo(s) created", gallery.master.created());
        Ok(())
    }
}

impl Default for Application {
    fn default() -> Self {
        Self::new()
    }
}

// ── Gallery ───────────────────────────────────────────────────────────────

/// Sidebar plus the selected demo. Implements the engine's `App`.
struct Gallery {
    config: GalleryConfig,
    assets: Assets,
    seed: u64,

    fonts: FontSystem,
    font: FontId,

    sidebar: Sidebar,
    master: Master,

    draw_list: DrawList,
    rect_renderer: RectRenderer,
    text_renderer: TextRenderer,
}

impl Gallery {
    fn new(config: GalleryConfig) -> Result<Self> {
        let assets = Assets::new(&config.asset_dir);
        log::info!("assets from {}", assets.dir().display());

        let font_file = assets
            .load_font(config.font_path.as_deref())
            .context("failed to find a font")?;
        let mut fonts = FontSystem::new();
        let font = fonts
            .load_font(&font_file.bytes)
            .with_context(|| format!("failed to load font {}", font_file.path.display()))?;

        let seed = config.seed.unwrap_or_else(rand::random);
        log::debug!("sample data seed {seed}");

        let kinds = DemoKind::ALL.to_vec();
        let sidebar = Sidebar::new(kinds.iter().map(|k| k.title()).collect());

        let mut gallery = Self {
            config,
            assets,
            seed,
            fonts,
            font,
            sidebar,
            master: Master::new(kinds),
            draw_list: DrawList::new(),
            rect_renderer: RectRenderer::new(),
            text_renderer: TextRenderer::new(),
        };
        gallery.select(0)?;
        Ok(gallery)
    }

    fn select(&mut self, index: usize) -> Result<()> {
        let font = self
            .fonts
            .font(self.font)
            .context("gallery font was not loaded")?;
        let env = DemoEnv {
            assets: &self.assets,
            font,
            seed: self.seed,
        };
        self.master
            .select(index, |kind| {
                kind.create(&env)
                    .with_context(|| format!("failed to create the {} demo", kind.title()))
            })?;
        Ok(())
    }

    fn handle_input(&mut self, events: &[InputEvent], layout: GalleryLayout, pointer: Option<Vec2>) -> Result<()> {
        for ev in events {
            let selected = self.master.selected().unwrap_or(0);
            let dragging = self.master.is_dragging();
            let Some(action) = route_event(ev, layout, &self.sidebar, selected, dragging, pointer) else {
                continue;
            };
            match action {
                GalleryAction::Select(row) => self.select(row)?,
                GalleryAction::MouseDown(p) => self.master.mouse_down(p),
                GalleryAction::MouseDragged(p) => self.master.mouse_dragged(p),
                GalleryAction::MouseUp(p) => self.master.mouse_up(p),
            }
        }
        Ok(())
    }
}

/// What one input event asks of the gallery. Points are detail-local.
#[derive(Debug, Copy, Clone, PartialEq)]
enum GalleryAction {
    Select(usize),
    MouseDown(Vec2),
    MouseDragged(Vec2),
    MouseUp(Vec2),
}

/// Routes `ev` to the sidebar or the detail region.
///
/// Presses go to whichever region is under the pointer. Moves and releases
/// always reach the detail region so a drag can continue past its edges and
/// outside the window; losing focus ends it at the last known pointer.
fn route_event(
    ev: &InputEvent,
    layout: GalleryLayout,
    sidebar: &Sidebar,
    selected: usize,
    dragging: bool,
    pointer: Option<Vec2>,
) -> Option<GalleryAction> {
    let local = |p: Vec2| layout.detail.to_local(p);
    match ev {
        InputEvent::PointerButton(b) if b.button == MouseButton::Left => match b.state {
            MouseButtonState::Pressed if layout.detail.contains(b.position) => {
                Some(GalleryAction::MouseDown(local(b.position)))
            }
            MouseButtonState::Pressed => sidebar
                .row_at(layout.sidebar, b.position)
                .filter(|&row| row != selected)
                .map(GalleryAction::Select),
            MouseButtonState::Released => Some(GalleryAction::MouseUp(local(b.position))),
        },
        InputEvent::PointerMoved(p) => Some(GalleryAction::MouseDragged(local(*p))),
        InputEvent::Key { key, state: KeyState::Pressed, .. } => {
            sidebar.navigate(selected, *key).map(GalleryAction::Select)
        }
        InputEvent::Focused(false) if dragging => {
            Some(GalleryAction::MouseUp(local(pointer.unwrap_or_default())))
        }
        _ => None,
    }
}

impl EngineApp for Gallery {
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> Result<AppControl> {
        let layout = GalleryLayout::split(ctx.window.logical_size(), self.config.sidebar_width);

        self.handle_input(&ctx.input_frame.events, layout, ctx.input.pointer_pos)?;

        let selected = self.master.selected().unwrap_or(0);
        self.draw_list.clear();
        self.sidebar
            .paint(&mut self.draw_list, layout.sidebar.size, selected, self.font);

        let dl = &mut self.draw_list;
        let fonts = &self.fonts;
        let rect_renderer = &mut self.rect_renderer;
        let text_renderer = &mut self.text_renderer;
        let master = &mut self.master;

        ctx.render(self.config.clear_color, |rctx, target| {
            let sidebar_ctx = rctx.with_region(layout.sidebar);
            rect_renderer.render(&sidebar_ctx, target, dl);
            text_renderer.render(&sidebar_ctx, target, dl, fonts);

            master.render(&rctx.with_region(layout.detail), target);
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prism_engine::coords::Viewport;
    use prism_engine::input::{Key, Modifiers, PointerButtonEvent};

    fn layout() -> GalleryLayout {
        GalleryLayout::split(Viewport::new(1440.0, 960.0), 220.0)
    }

    fn sidebar() -> Sidebar {
        Sidebar::new(DemoKind::ALL.iter().map(|k| k.title()).collect())
    }

    fn left(state: MouseButtonState, x: f32, y: f32) -> InputEvent {
        InputEvent::PointerButton(PointerButtonEvent {
            button: MouseButton::Left,
            state,
            position: Vec2::new(x, y),
            modifiers: Modifiers::default(),
        })
    }

    fn route(ev: InputEvent, selected: usize, dragging: bool) -> Option<GalleryAction> {
        route_event(&ev, layout(), &sidebar(), selected, dragging, Some(Vec2::new(1500.0, 40.0)))
    }

    // ── pointer ───────────────────────────────────────────────────────────

    #[test]
    fn sidebar_press_selects_the_row() {
        let row_2 = sidebar().row_rect(layout().sidebar, 2).center();
        let ev = left(MouseButtonState::Pressed, row_2.x, row_2.y);
        assert_eq!(route(ev.clone(), 0, false), Some(GalleryAction::Select(2)));
        assert_eq!(route(ev, 2, false), None);
    }

    #[test]
    fn sidebar_press_below_the_rows_does_nothing() {
        assert_eq!(route(left(MouseButtonState::Pressed, 100.0, 900.0), 0, false), None);
    }

    #[test]
    fn detail_press_is_local_to_the_detail_region() {
        let ev = left(MouseButtonState::Pressed, 320.0, 75.0);
        assert_eq!(route(ev, 0, false), Some(GalleryAction::MouseDown(Vec2::new(100.0, 75.0))));
    }

    #[test]
    fn release_outside_the_detail_still_ends_the_drag() {
        let ev = left(MouseButtonState::Released, 40.0, 10.0);
        assert_eq!(route(ev, 0, true), Some(GalleryAction::MouseUp(Vec2::new(-180.0, 10.0))));
    }

    #[test]
    fn moves_reach_the_detail_outside_its_bounds() {
        let ev = InputEvent::PointerMoved(Vec2::new(1600.0, -20.0));
        assert_eq!(route(ev, 0, true), Some(GalleryAction::MouseDragged(Vec2::new(1380.0, -20.0))));
    }

    #[test]
    fn other_buttons_are_ignored() {
        let ev = InputEvent::PointerButton(PointerButtonEvent {
            button: MouseButton::Right,
            state: MouseButtonState::Pressed,
            position: Vec2::new(320.0, 75.0),
            modifiers: Modifiers::default(),
        });
        assert_eq!(route(ev, 0, false), None);
    }

    // ── focus ─────────────────────────────────────────────────────────────

    #[test]
    fn leaving_the_window_keeps_the_drag() {
        assert_eq!(route(InputEvent::PointerLeft, 0, true), None);
    }

    #[test]
    fn focus_loss_ends_a_drag_at_the_last_pointer() {
        assert_eq!(
            route(InputEvent::Focused(false), 0, true),
            Some(GalleryAction::MouseUp(Vec2::new(1280.0, 40.0)))
        );
        assert_eq!(route(InputEvent::Focused(false), 0, false), None);
    }

    // ── keyboard ──────────────────────────────────────────────────────────

    #[test]
    fn keys_navigate_the_sidebar() {
        let key = |key| InputEvent::Key {
            key,
            state: KeyState::Pressed,
            modifiers: Modifiers::default(),
            repeat: false,
        };
        assert_eq!(route(key(Key::ArrowDown), 1, false), Some(GalleryAction::Select(2)));
        assert_eq!(route(key(Key::Digit(5)), 1, false), Some(GalleryAction::Select(4)));
        assert_eq!(route(key(Key::Escape), 1, false), None);
    }
}
