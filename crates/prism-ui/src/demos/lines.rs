use prism_engine::coords::Vec2;
use prism_engine::paint::{Color, HueCycle};
use prism_engine::render::shapes::{LineInstance, LineRenderer};
use prism_engine::render::{RenderCtx, RenderTarget};

use crate::demo::Demo;

pub const CAPACITY: usize = 16 * 1024;
pub const LINE_WIDTH: f32 = 15.0;

/// Straight stroke with round caps.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CurveSegment {
    pub start: Vec2,
    pub end: Vec2,
    pub color: Color,
    pub line_width: f32,
}

/// Empty canvas; press and drag to draw segments.
pub struct LinesDemo {
    segments: Vec<CurveSegment>,
    hues: HueCycle,
    renderer: LineRenderer,
    instances: Vec<LineInstance>,
}

impl LinesDemo {
    pub fn new() -> Self {
        Self {
            segments: Vec::new(),
            hues: HueCycle::new(),
            renderer: LineRenderer::new(CAPACITY),
            instances: Vec::new(),
        }
    }

    pub fn segments(&self) -> &[CurveSegment] {
        &self.segments
    }
}

impl Default for LinesDemo {
    fn default() -> Self {
        Self::new()
    }
}

impl Demo for LinesDemo {
    fn title(&self) -> &'static str {
        "Lines"
    }

    fn mouse_down(&mut self, p: Vec2) {
        if self.segments.len() >= CAPACITY {
            log::debug!("lines: capacity {CAPACITY} reached, press ignored");
            return;
        }
        let color = self.hues.next();
        self.segments.push(CurveSegment {
            start: p,
            end: p,
            color,
            line_width: LINE_WIDTH,
        });
    }

    fn mouse_dragged(&mut self, p: Vec2) {
        if let Some(last) = self.segments.last_mut() {
            last.end = p;
        }
    }

    fn render(&mut self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>) {
        self.instances.clear();
        self.instances.extend(
            self.segments
                .iter()
                .map(|s| LineInstance::new(s.start, s.end, s.color, s.line_width)),
        );
        self.renderer.render(ctx, target, &self.instances);
    }

    fn shape_count(&self) -> usize {
        self.segments.len()
    }
}
