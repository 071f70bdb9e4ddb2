//! Headless test harness.
//!
//! `UiTestRule` drives a composition the way a platform loop would, minus the
//! window: compose a frame, advance a deterministic clock, query the
//! flattened semantics, and deliver clicks or keyboard focus. Tests assert on
//! settled states rather than on interpolated mid-animation values.

use std::rc::Rc;

use perch_core::*;
use web_time::Duration;

use crate::{LayoutError, layout_and_paint};

pub struct UiTestRule {
    scheduler: Scheduler,
    root: Box<dyn FnMut() -> View>,
    clock: TestClock,
    last: Option<Frame>,
}

impl UiTestRule {
    /// Fresh composer and a hand-driven clock for this thread.
    pub fn new(root: impl FnMut() -> View + 'static) -> Self {
        reset_composer();
        let clock = TestClock::start_now();
        set_clock(Rc::new(clock.clone()));
        Self {
            scheduler: Scheduler::new(),
            root: Box::new(root),
            clock,
            last: None,
        }
    }

    /// Compose and lay out one frame at the current clock time.
    pub fn frame(&mut self) -> Result<&Frame, LayoutError> {
        let this = &mut *self;
        let root = &mut this.root;
        let focused = this.scheduler.focused;
        let frame = this.scheduler.compose(
            |_s| root(),
            |view, size| layout_and_paint(view, size, focused),
        )?;
        this.last = Some(frame);
        Ok(this.last.as_ref().unwrap())
    }

    pub fn advance(&mut self, by: Duration) {
        self.clock.advance(by);
    }

    /// Advance past `spec`'s full runtime and compose the settled frame.
    pub fn settle(&mut self, spec: AnimationSpec) -> Result<(), LayoutError> {
        self.advance(spec.delay + spec.duration + Duration::from_millis(16));
        self.frame()?;
        Ok(())
    }

    pub fn last_frame(&self) -> &Frame {
        self.last.as_ref().expect("no frame composed yet")
    }

    pub fn nodes_labeled(&self, label: &str) -> Vec<&SemNode> {
        self.last_frame()
            .semantics_nodes
            .iter()
            .filter(|n| n.label.as_deref() == Some(label))
            .collect()
    }

    pub fn count_labeled(&self, label: &str) -> usize {
        self.nodes_labeled(label).len()
    }

    /// Click the topmost hit region under `p`. Returns whether anything
    /// actionable was hit.
    pub fn click_at(&self, p: Vec2) -> bool {
        let frame = self.last_frame();
        let mut best: Option<&HitRegion> = None;
        for h in &frame.hit_regions {
            if h.rect.contains(p) && best.is_none_or(|b| h.z_index >= b.z_index) {
                best = Some(h);
            }
        }
        match best.and_then(|h| h.on_click.clone()) {
            Some(cb) => {
                cb();
                true
            }
            None => false,
        }
    }

    /// Click the center of the node announced as `label`.
    pub fn click_labeled(&self, label: &str) -> bool {
        match self.nodes_labeled(label).first() {
            Some(n) => self.click_at(n.rect.center()),
            None => false,
        }
    }

    /// Move keyboard focus to the next focusable node, wrapping around.
    /// Takes effect in the next composed frame.
    pub fn focus_next(&mut self) {
        let chain = self.last_frame().focus_chain.clone();
        if chain.is_empty() {
            self.scheduler.focused = None;
            return;
        }
        let next = match self.scheduler.focused {
            Some(cur) => chain
                .iter()
                .position(|&id| id == cur)
                .map(|i| chain[(i + 1) % chain.len()])
                .unwrap_or(chain[0]),
            None => chain[0],
        };
        self.scheduler.focused = Some(next);
    }

    pub fn focused(&self) -> Option<u64> {
        self.scheduler.focused
    }

    /// Activate the focused node, as Enter/Space would.
    pub fn activate_focused(&self) -> bool {
        let Some(id) = self.scheduler.focused else {
            return false;
        };
        let hit = self
            .last_frame()
            .hit_regions
            .iter()
            .find(|h| h.id == id)
            .and_then(|h| h.on_click.clone());
        match hit {
            Some(cb) => {
                cb();
                true
            }
            None => false,
        }
    }
}
