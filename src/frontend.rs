use std::cell::RefCell;
use std::rc::Rc;

use folio::config::SiteConfig;
use folio::geometry::ViewportMargin;
use folio::intro::{IntroFrame, IntroPhase, IntroSequencer, IntroTarget};
use folio::navigation::{NavState, HOME_SECTION, NAV_ITEMS};
use folio::scroll::{ScrollHub, ScrollSnapshot};
use folio::telemetry::Logger;
use folio::timeline::TargetState;
use folio::visibility::{VisibilityMode, VisibilityTracker};
use serde_json::json;
use wasm_bindgen_futures::spawn_local;
use web_sys::window;
use yew::prelude::*;

use crate::browser::{self, AnimationLoop, BrowserSessionStore, ScrollBinding};
use crate::sections::{
    AboutSection, CertificationsSection, ContactSection, ExperienceSection, Footer, HeroSection,
    SkillsSection,
};

/// Shared per-page services handed down through a context provider.
#[derive(Clone)]
pub struct SiteContext {
    pub hub: Rc<ScrollHub>,
    pub config: Rc<SiteConfig>,
    pub logger: Logger,
}

impl PartialEq for SiteContext {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.hub, &other.hub)
            && Rc::ptr_eq(&self.config, &other.config)
            && self.logger == other.logger
    }
}

impl SiteContext {
    fn new(config: SiteConfig) -> Self {
        let logger = Logger::new(config.log_level);
        Self {
            hub: ScrollHub::new(),
            config: Rc::new(config),
            logger,
        }
    }
}

#[hook]
pub fn use_site() -> SiteContext {
    let fallback = use_memo((), |_| SiteContext::new(SiteConfig::default()));
    use_context::<SiteContext>().unwrap_or_else(|| (*fallback).clone())
}

/// Tracks whether `node` is inside the viewport shrunk or grown by `margin`.
#[hook]
pub fn use_in_view(node: NodeRef, mode: VisibilityMode, margin: &'static str) -> bool {
    let site = use_site();
    let in_view = use_state_eq(|| false);

    {
        let in_view = in_view.clone();
        let hub = Rc::clone(&site.hub);
        let logger = site.logger;
        use_effect_with(node, move |node| {
            let margin = ViewportMargin::parse(margin).unwrap_or_else(|error| {
                logger.warn(
                    "visibility.margin_invalid",
                    json!({ "margin": margin, "error": error.to_string() }),
                );
                ViewportMargin::default()
            });
            let tracker = RefCell::new(VisibilityTracker::new(mode, margin));
            let node = node.clone();

            let observe = move |snapshot: ScrollSnapshot| {
                let Some(rect) = browser::node_rect(&node) else {
                    return;
                };
                if let Some(next) = tracker.borrow_mut().observe(rect, snapshot.viewport) {
                    in_view.set(next);
                }
            };

            if let Some(snapshot) = browser::snapshot() {
                observe(snapshot);
            }
            let subscription = hub.subscribe(observe);

            move || drop(subscription)
        });
    }

    *in_view
}

fn target_style(state: &TargetState) -> String {
    format!(
        "opacity: {:.3}; transform: scale({:.3}) scaleY({:.3});",
        state.opacity, state.scale, state.scale_y
    )
}

fn phase_name(phase: IntroPhase) -> &'static str {
    match phase {
        IntroPhase::NotStarted => "not_started",
        IntroPhase::Running => "running",
        IntroPhase::Completing => "completing",
        IntroPhase::Done => "done",
        IntroPhase::Skipped => "skipped",
    }
}

#[derive(Properties, PartialEq)]
struct IntroAnimationProps {
    on_complete: Callback<()>,
}

#[function_component(IntroAnimation)]
fn intro_animation(props: &IntroAnimationProps) -> Html {
    let site = use_site();
    let frame = use_state(|| None::<IntroFrame>);

    {
        let frame = frame.clone();
        let on_complete = props.on_complete.clone();
        let logger = site.logger;
        use_effect_with((), move |_| {
            // Deferred so the parent re-renders outside the frame callback.
            let on_finished = move || spawn_local(async move { on_complete.emit(()) });
            let mut sequencer = IntroSequencer::new(BrowserSessionStore, on_finished);
            sequencer.mount(browser::now_ms());

            let mut logged = 0;
            let mut log_phases = move |sequencer: &IntroSequencer<BrowserSessionStore>| {
                for phase in &sequencer.history()[logged..] {
                    logger.info("intro.phase", json!({ "phase": phase_name(*phase) }));
                }
                logged = sequencer.history().len();
            };
            log_phases(&sequencer);

            let animation = if sequencer.is_finished() {
                frame.set(None);
                None
            } else {
                frame.set(Some(sequencer.frame().clone()));
                Some(AnimationLoop::start(move |now| {
                    sequencer.tick(now);
                    log_phases(&sequencer);
                    frame.set(Some(sequencer.frame().clone()));
                    !sequencer.is_finished()
                }))
            };

            move || drop(animation)
        });
    }

    let Some(frame) = (*frame).as_ref().filter(|frame| frame.visible) else {
        return html! {};
    };

    let container = frame.target(IntroTarget::Container);
    let title = frame.target(IntroTarget::Title);
    let bio = frame.target(IntroTarget::Bio);
    let splatters = [
        ("splatter splatter-one", IntroTarget::SplatterOne),
        ("splatter splatter-two", IntroTarget::SplatterTwo),
        ("splatter splatter-three", IntroTarget::SplatterThree),
    ];

    html! {
        <div class="intro-overlay" aria-hidden="true">
            <div class="intro-parchment" style={target_style(&container)}>
                { for splatters.iter().map(|(class, target)| html! {
                    <span class={*class} style={target_style(&frame.target(*target))}></span>
                }) }
                <h1 class="intro-title">{ title.text.unwrap_or_default() }</h1>
                <p class="intro-bio">{ bio.text.unwrap_or_default() }</p>
            </div>
        </div>
    }
}

#[function_component(Navigation)]
fn navigation() -> Html {
    let site = use_site();
    let rerender = use_force_update();
    let nav = {
        let config = Rc::clone(&site.config);
        use_mut_ref(move || {
            NavState::new(NAV_ITEMS, config.reference_line, config.scrolled_threshold)
        })
    };

    {
        let nav = nav.clone();
        let rerender = rerender.clone();
        let hub = Rc::clone(&site.hub);
        let logger = site.logger;
        use_effect_with((), move |_| {
            let on_scroll = move |snapshot: ScrollSnapshot| {
                let changed = {
                    let mut nav = nav.borrow_mut();
                    let Some(nav) = nav.as_mut() else {
                        return;
                    };
                    let before = nav.active().to_string();
                    let changed = nav.on_scroll(snapshot.scroll_y, browser::measure_element);
                    if nav.active() != before {
                        logger.debug("nav.active", json!({ "section": nav.active() }));
                    }
                    changed
                };
                if changed {
                    rerender.force_update();
                }
            };

            if let Some(snapshot) = browser::snapshot() {
                on_scroll(snapshot);
            }
            let subscription = hub.subscribe(on_scroll);

            move || drop(subscription)
        });
    }

    let select = {
        let nav = nav.clone();
        let rerender = rerender.clone();
        let logger = site.logger;
        Callback::from(move |section: &'static str| {
            let target = match nav.borrow_mut().as_mut() {
                Some(nav) => nav.select(section),
                None => section,
            };
            browser::scroll_to_section(target, &logger);
            rerender.force_update();
        })
    };

    let on_toggle = {
        let nav = nav.clone();
        let rerender = rerender.clone();
        Callback::from(move |_: MouseEvent| {
            if let Some(nav) = nav.borrow_mut().as_mut() {
                nav.toggle_menu();
            }
            rerender.force_update();
        })
    };

    let on_overlay = {
        let nav = nav.clone();
        let rerender = rerender.clone();
        Callback::from(move |_: MouseEvent| {
            if let Some(nav) = nav.borrow_mut().as_mut() {
                nav.close_menu();
            }
            rerender.force_update();
        })
    };

    let state = nav.borrow();
    let Some(state) = state.as_ref() else {
        return html! {};
    };

    let item_button = |class: &'static str, label: &'static str, section: &'static str| {
        let select = select.clone();
        html! {
            <button
                type="button"
                class={classes!(class, state.is_active(section).then_some("is-active"))}
                aria-current={state.is_active(section).then_some("true")}
                onclick={move |_| select.emit(section)}
            >
                {label}
            </button>
        }
    };

    let on_logo = {
        let select = select.clone();
        move |_: MouseEvent| select.emit(HOME_SECTION)
    };

    html! {
        <>
            <nav class={classes!("site-nav", state.scrolled().then_some("is-scrolled"))}>
                <button type="button" class="nav-logo" onclick={on_logo}>{"Keerthi's Portfolio"}</button>
                <div class="nav-links">
                    { for NAV_ITEMS.iter().map(|item| item_button("nav-link", item.label, item.section)) }
                </div>
                <button
                    type="button"
                    class="nav-toggle"
                    aria-label="Toggle menu"
                    aria-expanded={state.menu_open().to_string()}
                    onclick={on_toggle}
                >
                    { if state.menu_open() { "✕" } else { "☰" } }
                </button>
            </nav>
            if state.menu_open() {
                <>
                    <div class="mobile-menu">
                        { for NAV_ITEMS.iter().map(|item| item_button("mobile-link", item.label, item.section)) }
                    </div>
                    <div class="mobile-overlay" onclick={on_overlay}></div>
                </>
            }
        </>
    }
}

#[function_component(App)]
fn app() -> Html {
    let site = use_memo((), |_| SiteContext::new(SiteConfig::from_build_env()));
    let intro_done = use_state(|| false);

    {
        let hub = Rc::clone(&site.hub);
        let logger = site.logger;
        use_effect_with((), move |_| {
            let binding = ScrollBinding::attach(hub);
            if binding.is_none() {
                logger.warn("scroll.binding_unavailable", json!({}));
            }
            move || drop(binding)
        });
    }

    let on_intro_complete = {
        let intro_done = intro_done.clone();
        let logger = site.logger;
        Callback::from(move |_: ()| {
            logger.info("page.revealed", json!({}));
            intro_done.set(true);
        })
    };

    html! {
        <ContextProvider<SiteContext> context={(*site).clone()}>
            <IntroAnimation on_complete={on_intro_complete} />
            if *intro_done {
                <div class="page">
                    <Navigation />
                    <main>
                        <HeroSection />
                        <div class="parchment">
                            <AboutSection />
                            <ExperienceSection />
                            <SkillsSection />
                            <CertificationsSection />
                            <ContactSection />
                            <Footer />
                        </div>
                    </main>
                </div>
            }
        </ContextProvider<SiteContext>>
    }
}

pub fn run() {
    yew::Renderer::<App>::with_root(
        window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id("app"))
            .expect("missing #app mount point"),
    )
    .render();
}
