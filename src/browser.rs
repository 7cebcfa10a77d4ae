use std::cell::{Cell, RefCell};
use std::rc::Rc;

use folio::contact::{MailRelay, RelayError, RelayRequest, RelaySettings};
use folio::geometry::{Rect, Viewport};
use folio::media::{MediaElement, PlaybackError};
use folio::scroll::{FrameGate, ScrollHub, ScrollSnapshot};
use folio::session::SessionStore;
use folio::telemetry::Logger;
use gloo::events::{EventListener, EventListenerOptions, EventListenerPhase};
use gloo::render::{request_animation_frame, AnimationFrame};
use gloo_net::http::Request;
use serde_json::json;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{
    window, Element, HtmlMediaElement, ResizeObserver, ScrollBehavior, ScrollIntoViewOptions, Storage,
};
use yew::NodeRef;

const FALLBACK_VIEWPORT: (f64, f64) = (1280.0, 720.0);

fn session_storage() -> Option<Storage> {
    window()?.session_storage().ok().flatten()
}

/// `sessionStorage`, silently absent when the browser denies access.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserSessionStore;

impl SessionStore for BrowserSessionStore {
    fn get_item(&self, key: &str) -> Option<String> {
        session_storage()?.get_item(key).ok().flatten()
    }

    fn set_item(&self, key: &str, value: &str) {
        if let Some(storage) = session_storage() {
            let _ = storage.set_item(key, value);
        }
    }
}

/// Milliseconds from the page's monotonic clock.
pub fn now_ms() -> f64 {
    window()
        .and_then(|w| w.performance())
        .map(|performance| performance.now())
        .unwrap_or_else(js_sys::Date::now)
}

pub fn current_year() -> u32 {
    js_sys::Date::new_0().get_full_year()
}

pub fn viewport() -> Viewport {
    let Some(win) = window() else {
        return Viewport::new(FALLBACK_VIEWPORT.0, FALLBACK_VIEWPORT.1);
    };

    let width = win
        .inner_width()
        .ok()
        .and_then(|value| value.as_f64())
        .unwrap_or(FALLBACK_VIEWPORT.0);
    let height = win
        .inner_height()
        .ok()
        .and_then(|value| value.as_f64())
        .unwrap_or(FALLBACK_VIEWPORT.1);

    Viewport::new(width, height)
}

pub fn snapshot() -> Option<ScrollSnapshot> {
    let scroll_y = window()?.scroll_y().ok()?;
    Some(ScrollSnapshot {
        scroll_y,
        viewport: viewport(),
    })
}

fn element_rect(element: &Element) -> Rect {
    let rect = element.get_bounding_client_rect();
    Rect::new(rect.top(), rect.right(), rect.bottom(), rect.left())
}

pub fn measure_element(id: &str) -> Option<Rect> {
    let element = window()?.document()?.get_element_by_id(id)?;
    Some(element_rect(&element))
}

pub fn node_rect(node: &NodeRef) -> Option<Rect> {
    node.cast::<Element>().map(|element| element_rect(&element))
}

/// Smooth-scrolls to the element with `id`. A missing target does nothing.
pub fn scroll_to_section(id: &str, logger: &Logger) {
    let Some(element) = window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(id))
    else {
        logger.debug("nav.target_missing", json!({ "section": id }));
        return;
    };

    let options = ScrollIntoViewOptions::new();
    options.set_behavior(ScrollBehavior::Smooth);
    element.scroll_into_view_with_scroll_into_view_options(&options);
    logger.debug("nav.scroll", json!({ "section": id }));
}

struct FrameSlot {
    hub: Rc<ScrollHub>,
    gate: FrameGate,
    frame: RefCell<Option<AnimationFrame>>,
}

fn schedule_publish(slot: &Rc<FrameSlot>) {
    if !slot.gate.request() {
        return;
    }

    let pending = Rc::downgrade(slot);
    let frame = request_animation_frame(move |_| {
        let Some(pending) = pending.upgrade() else {
            return;
        };
        pending.gate.release();
        if let Some(snapshot) = snapshot() {
            pending.hub.publish(snapshot);
        }
    });
    *slot.frame.borrow_mut() = Some(frame);
}

/// Republishes when the document body changes size without a scroll, such as
/// a card expanding or media finishing loading.
struct LayoutWatch {
    observer: ResizeObserver,
    _callback: Closure<dyn FnMut(js_sys::Array, ResizeObserver)>,
}

impl LayoutWatch {
    fn observe_body(slot: &Rc<FrameSlot>) -> Option<Self> {
        let body = window()?.document()?.body()?;
        let slot = Rc::clone(slot);
        let callback = Closure::<dyn FnMut(js_sys::Array, ResizeObserver)>::new(
            move |_entries: js_sys::Array, _observer: ResizeObserver| schedule_publish(&slot),
        );
        let observer = ResizeObserver::new(callback.as_ref().unchecked_ref()).ok()?;
        observer.observe(&body);

        Some(Self {
            observer,
            _callback: callback,
        })
    }
}

impl Drop for LayoutWatch {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

/// Window `scroll`/`resize` listeners and a body layout observer feeding a
/// [`ScrollHub`] at most once per animation frame. Dropping the binding
/// removes all of them.
pub struct ScrollBinding {
    _scroll: EventListener,
    _resize: EventListener,
    _layout: Option<LayoutWatch>,
    _slot: Rc<FrameSlot>,
}

impl ScrollBinding {
    pub fn attach(hub: Rc<ScrollHub>) -> Option<Self> {
        let win = window()?;
        let slot = Rc::new(FrameSlot {
            hub,
            gate: FrameGate::default(),
            frame: RefCell::new(None),
        });
        let options = EventListenerOptions {
            phase: EventListenerPhase::Bubble,
            passive: true,
        };

        let on_scroll = {
            let slot = Rc::clone(&slot);
            move |_: &web_sys::Event| schedule_publish(&slot)
        };
        let on_resize = {
            let slot = Rc::clone(&slot);
            move |_: &web_sys::Event| schedule_publish(&slot)
        };

        let scroll = EventListener::new_with_options(&win, "scroll", options, on_scroll);
        let resize = EventListener::new_with_options(&win, "resize", options, on_resize);
        let layout = LayoutWatch::observe_body(&slot);

        schedule_publish(&slot);

        Some(Self {
            _scroll: scroll,
            _resize: resize,
            _layout: layout,
            _slot: slot,
        })
    }
}

struct LoopState {
    running: Cell<bool>,
    frame: RefCell<Option<AnimationFrame>>,
    on_frame: RefCell<Box<dyn FnMut(f64) -> bool>>,
}

fn schedule_frame(state: &Rc<LoopState>) {
    let weak = Rc::downgrade(state);
    let frame = request_animation_frame(move |_| {
        let Some(state) = weak.upgrade() else {
            return;
        };
        if !state.running.get() {
            return;
        }

        let keep_going = {
            let mut on_frame = state.on_frame.borrow_mut();
            (*on_frame)(now_ms())
        };
        if !keep_going {
            state.running.set(false);
            return;
        }

        // Rescheduled after this callback returns so the executing frame
        // handle is never replaced from inside itself.
        spawn_local(async move {
            if state.running.get() {
                schedule_frame(&state);
            }
        });
    });
    *state.frame.borrow_mut() = Some(frame);
}

/// Calls `on_frame` once per animation frame until it returns false or the
/// loop is dropped.
pub struct AnimationLoop {
    state: Rc<LoopState>,
}

impl AnimationLoop {
    pub fn start(on_frame: impl FnMut(f64) -> bool + 'static) -> Self {
        let state = Rc::new(LoopState {
            running: Cell::new(true),
            frame: RefCell::new(None),
            on_frame: RefCell::new(Box::new(on_frame)),
        });
        schedule_frame(&state);
        Self { state }
    }
}

impl Drop for AnimationLoop {
    fn drop(&mut self) {
        self.state.running.set(false);
    }
}

/// A `<video>`/`<audio>` element behind a [`NodeRef`].
#[derive(Clone)]
pub struct NodeMedia {
    node: NodeRef,
    logger: Logger,
}

impl NodeMedia {
    pub fn new(node: NodeRef, logger: Logger) -> Self {
        Self { node, logger }
    }

    fn element(&self) -> Option<HtmlMediaElement> {
        self.node.cast::<HtmlMediaElement>()
    }
}

impl MediaElement for NodeMedia {
    fn rewind(&self) {
        if let Some(media) = self.element() {
            media.set_current_time(0.0);
        }
    }

    fn play(&self) -> Result<(), PlaybackError> {
        let media = self
            .element()
            .ok_or_else(|| PlaybackError::Rejected("media element not mounted".to_string()))?;
        let promise = media
            .play()
            .map_err(|error| PlaybackError::Rejected(format!("{error:?}")))?;

        // Autoplay policy rejections arrive asynchronously and are only logged.
        let logger = self.logger;
        spawn_local(async move {
            if let Err(error) = JsFuture::from(promise).await {
                logger.debug("media.play_rejected", json!({ "reason": format!("{error:?}") }));
            }
        });
        Ok(())
    }

    fn pause(&self) {
        if let Some(media) = self.element() {
            let _ = media.pause();
        }
    }
}

/// EmailJS-compatible relay over `fetch`.
pub struct EmailJsRelay<'a> {
    settings: &'a RelaySettings,
}

impl<'a> EmailJsRelay<'a> {
    pub fn new(settings: &'a RelaySettings) -> Self {
        Self { settings }
    }
}

impl MailRelay for EmailJsRelay<'_> {
    async fn deliver(&self, request: &RelayRequest) -> Result<(), RelayError> {
        let response = Request::post(self.settings.endpoint.as_str())
            .json(request)
            .map_err(|error| RelayError::Encode(error.to_string()))?
            .send()
            .await
            .map_err(|error| RelayError::Transport(error.to_string()))?;

        if response.ok() {
            Ok(())
        } else {
            Err(RelayError::Status(response.status()))
        }
    }
}
