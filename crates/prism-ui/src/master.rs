//! Master/detail controller: which demo is shown and which already exist.

use prism_engine::coords::Vec2;
use prism_engine::render::{RenderCtx, RenderTarget};

use crate::demo::{Demo, DemoKind};

/// Keeps one lazily created demo per registry entry.
///
/// A demo is created the first time its row is selected and then kept, so
/// switching back shows it with the shapes drawn earlier.
pub struct Master {
    kinds: Vec<DemoKind>,
    demos: Vec<Option<Box<dyn Demo>>>,
    selected: Option<usize>,
    dragging: bool,
}

impl Master {
    pub fn new(kinds: Vec<DemoKind>) -> Self {
        let demos = kinds.iter().map(|_| None).collect();
        Self {
            kinds,
            demos,
            selected: None,
            dragging: false,
        }
    }

    pub fn kinds(&self) -> &[DemoKind] {
        &self.kinds
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Number of demos created so far.
    pub fn created(&self) -> usize {
        self.demos.iter().filter(|d| d.is_some()).count()
    }

    /// Shows demo `index`, creating it with `create` on first selection.
    ///
    /// Out-of-range indices are ignored (`Ok(false)`). A failed creation
    /// leaves the previous selection in place.
    pub fn select<E>(
        &mut self,
        index: usize,
        create: impl FnOnce(DemoKind) -> Result<Box<dyn Demo>, E>,
    ) -> Result<bool, E> {
        let Some(&kind) = self.kinds.get(index) else {
            log::debug!("selection {index} out of range");
            return Ok(false);
        };

        if self.demos[index].is_none() {
            self.demos[index] = Some(create(kind)?);
        }
        if self.selected != Some(index) {
            log::info!("showing {}", kind.title());
        }
        self.selected = Some(index);
        self.dragging = false;
        Ok(true)
    }

    pub fn current(&self) -> Option<&dyn Demo> {
        let index = self.selected?;
        self.demos[index].as_deref()
    }

    pub fn current_mut(&mut self) -> Option<&mut (dyn Demo + 'static)> {
        let index = self.selected?;
        self.demos[index].as_deref_mut()
    }

    /// Press inside the detail region; starts a drag.
    pub fn mouse_down(&mut self, p: Vec2) {
        if let Some(demo) = self.current_mut() {
            demo.mouse_down(p);
            self.dragging = true;
        }
    }

    /// Pointer motion with the button held. Ignored unless the press
    /// started inside the detail region.
    pub fn mouse_dragged(&mut self, p: Vec2) {
        if !self.dragging {
            return;
        }
        if let Some(demo) = self.current_mut() {
            demo.mouse_dragged(p);
        }
    }

    pub fn mouse_up(&mut self, p: Vec2) {
        if !std::mem::take(&mut self.dragging) {
            return;
        }
        if let Some(demo) = self.current_mut() {
            demo.mouse_up(p);
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn render(&mut self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>) {
        if let Some(demo) = self.current_mut() {
            demo.render(ctx, target);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Records the points it receives.
    struct Recorder {
        kind: DemoKind,
        log: Rc<RefCell<Vec<(&'static str, Vec2)>>>,
    }

    impl Demo for Recorder {
        fn title(&self) -> &'static str {
            self.kind.title()
        }
        fn mouse_down(&mut self, p: Vec2) {
            self.log.borrow_mut().push(("down", p));
        }
        fn mouse_dragged(&mut self, p: Vec2) {
            self.log.borrow_mut().push(("drag", p));
        }
        fn mouse_up(&mut self, p: Vec2) {
            self.log.borrow_mut().push(("up", p));
        }
        fn render(&mut self, _: &RenderCtx<'_>, _: &mut RenderTarget<'_>) {}
        fn shape_count(&self) -> usize {
            self.log.borrow().len()
        }
    }

    type Log = Rc<RefCell<Vec<(&'static str, Vec2)>>>;

    fn recording(log: &Log) -> impl FnOnce(DemoKind) -> Result<Box<dyn Demo>, ()> + '_ {
        move |kind| Ok(Box::new(Recorder { kind, log: log.clone() }) as Box<dyn Demo>)
    }

    fn master() -> Master {
        Master::new(DemoKind::ALL.to_vec())
    }

    // ── selection ─────────────────────────────────────────────────────────

    #[test]
    fn nothing_selected_initially() {
        let m = master();
        assert_eq!(m.selected(), None);
        assert!(m.current().is_none());
        assert_eq!(m.created(), 0);
    }

    #[test]
    fn demos_are_created_once_per_index() {
        let mut m = master();
        let log = Log::default();
        let mut calls = 0;
        for index in [0, 2, 0, 2, 2] {
            m.select(index, |kind| {
                calls += 1;
                recording(&log)(kind)
            })
            .unwrap();
        }
        assert_eq!(calls, 2);
        assert_eq!(m.created(), 2);
        assert_eq!(m.current().unwrap().title(), "Images");
    }

    #[test]
    fn out_of_range_selection_is_ignored() {
        let mut m = master();
        let log = Log::default();
        m.select(1, recording(&log)).unwrap();
        assert_eq!(m.select(5, recording(&log)), Ok(false));
        assert_eq!(m.selected(), Some(1));
    }

    #[test]
    fn failed_creation_keeps_previous_selection() {
        let mut m = master();
        let log = Log::default();
        m.select(0, recording(&log)).unwrap();
        let err = m.select(3, |_| Err::<Box<dyn Demo>, _>("no font"));
        assert_eq!(err.err(), Some("no font"));
        assert_eq!(m.selected(), Some(0));
        assert_eq!(m.created(), 1);
    }

    #[test]
    fn demo_state_survives_switching() {
        let mut m = master();
        let log = Log::default();
        m.select(4, recording(&log)).unwrap();
        m.mouse_down(Vec2::new(1.0, 2.0));
        m.mouse_up(Vec2::new(1.0, 2.0));
        m.select(0, recording(&log)).unwrap();
        m.select(4, |_| -> Result<Box<dyn Demo>, ()> { panic!("recreated") }).unwrap();
        assert_eq!(m.current().unwrap().shape_count(), 2);
    }

    // ── pointer routing ───────────────────────────────────────────────────

    #[test]
    fn drags_reach_the_demo_only_after_a_press() {
        let mut m = master();
        let log = Log::default();
        m.select(0, recording(&log)).unwrap();

        m.mouse_dragged(Vec2::new(9.0, 9.0));
        m.mouse_up(Vec2::new(9.0, 9.0));
        assert!(log.borrow().is_empty());

        m.mouse_down(Vec2::new(1.0, 1.0));
        m.mouse_dragged(Vec2::new(5.0, 5.0));
        m.mouse_up(Vec2::new(6.0, 6.0));
        m.mouse_dragged(Vec2::new(7.0, 7.0));

        let kinds: Vec<_> = log.borrow().iter().map(|(k, _)| *k).collect();
        assert_eq!(kinds, ["down", "drag", "up"]);
        assert!(!m.is_dragging());
    }

    #[test]
    fn selecting_cancels_a_drag() {
        let mut m = master();
        let log = Log::default();
        m.select(0, recording(&log)).unwrap();
        m.mouse_down(Vec2::zero());
        m.select(1, recording(&log)).unwrap();
        assert!(!m.is_dragging());
    }
}
