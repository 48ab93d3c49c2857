use prism_engine::coords::{Rect, Viewport};

/// Window split into the sidebar column and the detail region.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct GalleryLayout {
    pub sidebar: Rect,
    pub detail: Rect,
}

impl GalleryLayout {
    /// Sidebar of `sidebar_width` on the left; the detail region fills the rest.
    /// On a window narrower than the sidebar the detail region is empty.
    pub fn split(window: Viewport, sidebar_width: f32) -> Self {
        let (sidebar, detail) = window.bounds().split_left(sidebar_width.max(0.0));
        Self { sidebar, detail }
    }
}
