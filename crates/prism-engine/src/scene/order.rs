/// Layer a draw item belongs to. Higher layers paint over lower ones.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct ZIndex(pub i32);

impl ZIndex {
    pub const BACKGROUND: ZIndex = ZIndex(0);
    pub const CONTENT: ZIndex = ZIndex(1);
    pub const OVERLAY: ZIndex = ZIndex(2);

    #[inline]
    pub const fn new(v: i32) -> Self {
        Self(v)
    }
}

/// Paint-order key: layer first, then insertion order within the layer.
///
/// Field order matters, the derived `Ord` compares `z` before `order`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct SortKey {
    pub z: ZIndex,
    pub order: u32,
}

impl SortKey {
    #[inline]
    pub const fn new(z: ZIndex, order: u32) -> Self {
        Self { z, order }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layer_dominates_insertion_order() {
        let late_background = SortKey::new(ZIndex::BACKGROUND, 10);
        let early_overlay = SortKey::new(ZIndex::OVERLAY, 0);
        assert!(late_background < early_overlay);
    }

    #[test]
    fn insertion_order_breaks_ties() {
        assert!(SortKey::new(ZIndex(3), 1) < SortKey::new(ZIndex(3), 2));
    }
}
