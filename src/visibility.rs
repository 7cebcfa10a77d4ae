use crate::geometry::{is_in_view, Rect, Viewport, ViewportMargin};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VisibilityMode {
    /// Follows the element in and out of view.
    Reentrant,
    /// Becomes true once and stays true.
    Latched,
}

/// In-view state for one element, recomputed on every scroll, resize or
/// layout measurement.
#[derive(Clone, Debug, PartialEq)]
pub struct VisibilityTracker {
    mode: VisibilityMode,
    margin: ViewportMargin,
    in_view: bool,
}

impl VisibilityTracker {
    pub fn new(mode: VisibilityMode, margin: ViewportMargin) -> Self {
        Self {
            mode,
            margin,
            in_view: false,
        }
    }

    pub fn reentrant(margin: ViewportMargin) -> Self {
        Self::new(VisibilityMode::Reentrant, margin)
    }

    pub fn latched(margin: ViewportMargin) -> Self {
        Self::new(VisibilityMode::Latched, margin)
    }

    pub fn mode(&self) -> VisibilityMode {
        self.mode
    }

    pub fn in_view(&self) -> bool {
        self.in_view
    }

    /// Records a fresh measurement. Returns the new value when it changed.
    pub fn observe(&mut self, element: Rect, viewport: Viewport) -> Option<bool> {
        if self.mode == VisibilityMode::Latched && self.in_view {
            return None;
        }

        let next = is_in_view(element, viewport, &self.margin);
        if next == self.in_view {
            return None;
        }

        self.in_view = next;
        Some(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT: Viewport = Viewport {
        width: 1024.0,
        height: 768.0,
    };

    fn section_at(scroll_y: f64) -> Rect {
        Rect::from_document_span(1000.0, 1800.0, VIEWPORT.width, scroll_y)
    }

    fn margin(value: &str) -> ViewportMargin {
        ViewportMargin::parse(value).expect("valid margin")
    }

    #[test]
    fn reentrant_tracker_matches_geometry_at_every_scroll_offset() {
        let margin = margin("0px 0px -50% 0px");
        let mut tracker = VisibilityTracker::reentrant(margin);

        for scroll_y in (0..3000).step_by(37) {
            let scroll_y = f64::from(scroll_y);
            tracker.observe(section_at(scroll_y), VIEWPORT);
            assert_eq!(
                tracker.in_view(),
                is_in_view(section_at(scroll_y), VIEWPORT, &margin),
                "scroll_y = {scroll_y}"
            );
        }
    }

    #[test]
    fn repeated_evaluation_without_change_is_idempotent() {
        let mut tracker = VisibilityTracker::reentrant(margin("-100px"));

        assert_eq!(tracker.observe(section_at(600.0), VIEWPORT), Some(true));
        assert_eq!(tracker.observe(section_at(600.0), VIEWPORT), None);
        assert_eq!(tracker.observe(section_at(600.0), VIEWPORT), None);
        assert!(tracker.in_view());
    }

    #[test]
    fn reentrant_tracker_flips_back_when_element_leaves() {
        let mut tracker = VisibilityTracker::reentrant(margin("-100px"));

        assert_eq!(tracker.observe(section_at(600.0), VIEWPORT), Some(true));
        assert_eq!(tracker.observe(section_at(0.0), VIEWPORT), Some(false));
        assert_eq!(tracker.observe(section_at(700.0), VIEWPORT), Some(true));
    }

    #[test]
    fn latched_tracker_never_reverts_after_becoming_visible() {
        let mut tracker = VisibilityTracker::latched(margin("-150px"));

        assert_eq!(tracker.observe(section_at(0.0), VIEWPORT), None);
        assert!(!tracker.in_view());

        assert_eq!(tracker.observe(section_at(900.0), VIEWPORT), Some(true));

        for scroll_y in [0.0, 5000.0, 10.0, 900.0] {
            assert_eq!(tracker.observe(section_at(scroll_y), VIEWPORT), None);
            assert!(tracker.in_view());
        }
    }

    #[test]
    fn layout_shift_without_scrolling_is_seen_on_the_next_publish() {
        use crate::scroll::{ScrollHub, ScrollSnapshot};
        use std::cell::{Cell, RefCell};
        use std::rc::Rc;

        let hub = ScrollHub::new();
        let doc_top = Rc::new(Cell::new(400.0));
        let transitions = Rc::new(RefCell::new(Vec::new()));

        let _subscription = {
            let doc_top = Rc::clone(&doc_top);
            let transitions = Rc::clone(&transitions);
            let tracker = RefCell::new(VisibilityTracker::reentrant(margin("-100px")));
            hub.subscribe(move |snapshot: ScrollSnapshot| {
                let top = doc_top.get();
                let rect = Rect::from_document_span(top, top + 300.0, VIEWPORT.width, snapshot.scroll_y);
                if let Some(next) = tracker.borrow_mut().observe(rect, snapshot.viewport) {
                    transitions.borrow_mut().push(next);
                }
            })
        };

        let still = ScrollSnapshot {
            scroll_y: 0.0,
            viewport: VIEWPORT,
        };
        hub.publish(still);
        assert_eq!(*transitions.borrow(), vec![true]);

        // An expanded card above pushes the element below the fold.
        doc_top.set(1400.0);
        hub.publish(still);
        assert_eq!(*transitions.borrow(), vec![true, false]);
    }
}
