use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use crate::geometry::Viewport;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollSnapshot {
    pub scroll_y: f64,
    pub viewport: Viewport,
}

type Listener = Rc<dyn Fn(ScrollSnapshot)>;

/// Fan-out point for scroll/resize observations. Section-aware components
/// subscribe at mount and hold the returned guard; dropping it detaches.
#[derive(Default)]
pub struct ScrollHub {
    listeners: RefCell<Vec<(u64, Listener)>>,
    next_id: Cell<u64>,
    last: Cell<Option<ScrollSnapshot>>,
}

impl ScrollHub {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn subscribe(self: &Rc<Self>, listener: impl Fn(ScrollSnapshot) + 'static) -> ScrollSubscription {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.listeners.borrow_mut().push((id, Rc::new(listener)));

        ScrollSubscription {
            hub: Rc::downgrade(self),
            id,
        }
    }

    /// Delivers a snapshot to every listener attached when publishing began.
    pub fn publish(&self, snapshot: ScrollSnapshot) {
        self.last.set(Some(snapshot));

        let listeners: Vec<Listener> = self
            .listeners
            .borrow()
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect();

        for listener in listeners {
            listener(snapshot);
        }
    }

    pub fn last_snapshot(&self) -> Option<ScrollSnapshot> {
        self.last.get()
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    fn detach(&self, id: u64) {
        self.listeners.borrow_mut().retain(|(entry, _)| *entry != id);
    }
}

#[must_use = "dropping the subscription detaches the listener"]
pub struct ScrollSubscription {
    hub: Weak<ScrollHub>,
    id: u64,
}

impl Drop for ScrollSubscription {
    fn drop(&mut self) {
        if let Some(hub) = self.hub.upgrade() {
            hub.detach(self.id);
        }
    }
}

/// Coalesces bursts of scroll events into one pending animation frame.
#[derive(Debug, Default)]
pub struct FrameGate {
    pending: Cell<bool>,
}

impl FrameGate {
    /// Returns true when the caller should schedule a frame.
    pub fn request(&self) -> bool {
        !self.pending.replace(true)
    }

    pub fn release(&self) {
        self.pending.set(false);
    }

    pub fn is_pending(&self) -> bool {
        self.pending.get()
    }
}
