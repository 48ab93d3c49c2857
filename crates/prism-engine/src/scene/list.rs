use crate::coords::Rect;

use super::{DrawCmd, SortKey, ZIndex};

/// Recorded command with its paint-order key and inherited clip.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawItem {
    pub key: SortKey,
    pub cmd: DrawCmd,
    /// Clip in region-local logical pixels. `None` draws everywhere in the region.
    pub clip_rect: Option<Rect>,
}

/// Per-frame draw stream.
///
/// `clear` keeps the allocations, so a list owned by the app and refilled every
/// frame stops allocating after the first few frames.
#[derive(Debug, Default)]
pub struct DrawList {
    items: Vec<DrawItem>,
    next_order: u32,

    paint_order: Vec<usize>,
    paint_order_dirty: bool,

    // Top is the effective clip, already intersected with its parents.
    clips: Vec<Rect>,
}

impl DrawList {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.next_order = 0;
        self.paint_order.clear();
        self.paint_order_dirty = true;
        self.clips.clear();
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Items in insertion order.
    #[inline]
    pub fn items(&self) -> &[DrawItem] {
        &self.items
    }

    pub fn push(&mut self, z: ZIndex, cmd: DrawCmd) {
        let key = SortKey::new(z, self.next_order);
        self.next_order = self.next_order.wrapping_add(1);
        self.items.push(DrawItem {
            key,
            cmd,
            clip_rect: self.clips.last().copied(),
        });
        self.paint_order_dirty = true;
    }

    /// Clips everything pushed until the matching [`pop_clip`](Self::pop_clip) to `rect`.
    ///
    /// Nested clips intersect; a clip that misses its parent becomes empty and
    /// its items are skipped by the renderers.
    pub fn push_clip(&mut self, rect: Rect) {
        let effective = match self.clips.last() {
            None => rect.normalized(),
            Some(parent) => parent.intersect(rect).unwrap_or_default(),
        };
        self.clips.push(effective);
    }

    pub fn pop_clip(&mut self) {
        debug_assert!(!self.clips.is_empty(), "pop_clip without push_clip");
        self.clips.pop();
    }

    /// Items back-to-front.
    pub fn iter_in_paint_order(&mut self) -> impl Iterator<Item = &DrawItem> {
        if self.paint_order_dirty {
            self.paint_order.clear();
            self.paint_order.extend(0..self.items.len());
            let items = &self.items;
            self.paint_order.sort_by_key(|&i| items[i].key);
            self.paint_order_dirty = false;
        }
        self.paint_order.iter().map(|&i| &self.items[i])
    }
}
