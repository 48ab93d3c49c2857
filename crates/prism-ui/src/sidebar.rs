//! Source list drawn down the left edge of the window.

use prism_engine::coords::{Rect, Vec2};
use prism_engine::input::Key;
use prism_engine::paint::Color;
use prism_engine::scene::{DrawList, ZIndex};
use prism_engine::text::FontId;

pub const ROW_HEIGHT: f32 = 32.0;
const TOP_PADDING: f32 = 12.0;
const TEXT_INSET: f32 = 16.0;
const TEXT_SIZE: f32 = 15.0;

const BACKGROUND: Color = Color::from_premul(0.145, 0.161, 0.180, 1.0);
const SELECTION: Color = Color::from_premul(0.227, 0.420, 0.812, 1.0);
const SEPARATOR: Color = Color::from_premul(0.098, 0.110, 0.125, 1.0);
const LABEL: Color = Color::from_premul(0.882, 0.898, 0.918, 1.0);

/// Flat list of row titles. Rows are not expandable.
#[derive(Debug, Clone)]
pub struct Sidebar {
    titles: Vec<&'static str>,
}

impl Sidebar {
    pub fn new(titles: Vec<&'static str>) -> Self {
        Self { titles }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.titles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }

    pub fn title(&self, row: usize) -> Option<&'static str> {
        self.titles.get(row).copied()
    }

    /// Bounds of `row` inside a sidebar placed at `bounds`.
    pub fn row_rect(&self, bounds: Rect, row: usize) -> Rect {
        Rect::new(
            bounds.origin.x,
            bounds.origin.y + TOP_PADDING + row as f32 * ROW_HEIGHT,
            bounds.size.x,
            ROW_HEIGHT,
        )
    }

    /// Row under `p` (window coordinates), if any.
    pub fn row_at(&self, bounds: Rect, p: Vec2) -> Option<usize> {
        if !bounds.contains(p) {
            return None;
        }
        let y = p.y - bounds.origin.y - TOP_PADDING;
        if y < 0.0 {
            return None;
        }
        let row = (y / ROW_HEIGHT) as usize;
        (row < self.titles.len()).then_some(row)
    }

    /// Selection after pressing `key` with `selected` current.
    ///
    /// Up/Down step and stop at the ends, Home/End jump, and digit `n`
    /// selects row `n - 1`. Returns `None` when the key does not change the
    /// selection.
    pub fn navigate(&self, selected: usize, key: Key) -> Option<usize> {
        let last = self.titles.len().checked_sub(1)?;
        let target = match key {
            Key::ArrowUp => selected.saturating_sub(1),
            Key::ArrowDown => (selected + 1).min(last),
            Key::Home => 0,
            Key::End => last,
            Key::Digit(d) if d >= 1 && (d as usize) <= self.titles.len() => d as usize - 1,
            _ => return None,
        };
        (target != selected).then_some(target)
    }

    /// Adds the sidebar to `draw_list` in sidebar-local coordinates.
    pub fn paint(&self, draw_list: &mut DrawList, size: Vec2, selected: usize, font: FontId) {
        let bounds = Rect::from_origin_size(Vec2::zero(), size);

        draw_list.push_rect(ZIndex::BACKGROUND, bounds, BACKGROUND);
        draw_list.push_rect(
            ZIndex::BACKGROUND,
            Rect::new(size.x - 1.0, 0.0, 1.0, size.y),
            SEPARATOR,
        );

        draw_list.push_clip(bounds);
        for (row, title) in self.titles.iter().enumerate() {
            let rect = self.row_rect(bounds, row);
            if row == selected {
                draw_list.push_rect(ZIndex::CONTENT, rect, SELECTION);
            }
            let baseline_offset = (ROW_HEIGHT - TEXT_SIZE * 1.2) * 0.5;
            draw_list.push_text(
                ZIndex::OVERLAY,
                *title,
                font,
                TEXT_SIZE,
                LABEL,
                Vec2::new(rect.origin.x + TEXT_INSET, rect.origin.y + baseline_offset),
            );
        }
        draw_list.pop_clip();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sidebar() -> Sidebar {
        Sidebar::new(vec!["Rectangles", "Gradients", "Images", "Text", "Lines"])
    }

    const BOUNDS: Rect = Rect::new(0.0, 0.0, 220.0, 960.0);

    // ── hit-testing ───────────────────────────────────────────────────────

    #[test]
    fn rows_are_hit_by_their_band() {
        let s = sidebar();
        assert_eq!(s.row_at(BOUNDS, Vec2::new(10.0, TOP_PADDING + 1.0)), Some(0));
        assert_eq!(s.row_at(BOUNDS, Vec2::new(10.0, TOP_PADDING + ROW_HEIGHT * 2.5)), Some(2));
        assert_eq!(s.row_at(BOUNDS, Vec2::new(10.0, TOP_PADDING + ROW_HEIGHT * 4.99)), Some(4));
    }

    #[test]
    fn misses_outside_rows() {
        let s = sidebar();
        assert_eq!(s.row_at(BOUNDS, Vec2::new(10.0, 2.0)), None);
        assert_eq!(s.row_at(BOUNDS, Vec2::new(10.0, TOP_PADDING + ROW_HEIGHT * 5.0)), None);
        assert_eq!(s.row_at(BOUNDS, Vec2::new(220.0, TOP_PADDING + 1.0)), None);
    }

    #[test]
    fn row_rect_matches_hit_test() {
        let s = sidebar();
        let r = s.row_rect(BOUNDS, 3);
        assert_eq!(s.row_at(BOUNDS, r.center()), Some(3));
    }

    // ── keyboard ──────────────────────────────────────────────────────────

    #[test]
    fn arrows_step_and_stop_at_the_ends() {
        let s = sidebar();
        assert_eq!(s.navigate(0, Key::ArrowDown), Some(1));
        assert_eq!(s.navigate(2, Key::ArrowUp), Some(1));
        assert_eq!(s.navigate(0, Key::ArrowUp), None);
        assert_eq!(s.navigate(4, Key::ArrowDown), None);
    }

    #[test]
    fn home_end_and_digits_jump() {
        let s = sidebar();
        assert_eq!(s.navigate(3, Key::Home), Some(0));
        assert_eq!(s.navigate(0, Key::End), Some(4));
        assert_eq!(s.navigate(0, Key::Digit(3)), Some(2));
        assert_eq!(s.navigate(0, Key::Digit(1)), None);
        assert_eq!(s.navigate(0, Key::Digit(0)), None);
        assert_eq!(s.navigate(0, Key::Digit(6)), None);
        assert_eq!(s.navigate(0, Key::Escape), None);
    }

    #[test]
    fn empty_sidebar_never_navigates() {
        assert_eq!(Sidebar::new(vec![]).navigate(0, Key::End), None);
    }

    // ── painting ──────────────────────────────────────────────────────────

    fn bundled_font() -> FontId {
        let bytes: &[u8] = include_bytes!(concat!(env!("CARGO_MANIFEST_DIR"), "/../prism-studio/assets/fonts/DejaVuSans.ttf"));
        prism_engine::text::FontSystem::new().load_font(bytes).unwrap()
    }

    #[test]
    fn paints_one_label_per_row_and_a_selection() {
        let font = bundled_font();
        let s = sidebar();
        let mut dl = DrawList::new();
        s.paint(&mut dl, Vec2::new(220.0, 960.0), 1, font);

        let texts = dl
            .items()
            .iter()
            .filter(|i| matches!(i.cmd, prism_engine::scene::DrawCmd::Text(_)))
            .count();
        assert_eq!(texts, 5);
        // background, separator, selection
        assert_eq!(dl.len(), 5 + 3);
    }
}
