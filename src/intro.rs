//! One-time, session-gated intro overlay.

use std::collections::BTreeMap;

use crate::easing::Easing;
use crate::session::{IntroPlayedFlag, SessionStore};
use crate::timeline::{Channel, Playback, PlaybackTick, TargetState, Timeline, TimelineStep, Tween};

pub const INTRO_TITLE: &str = "The Alchemist's Folio";
pub const INTRO_BIO: &str =
    "Where digital code is transmuted into golden experiences. Penned by Keerthi.";
pub const FADE_OUT_SECONDS: f64 = 2.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum IntroTarget {
    Container,
    Title,
    Bio,
    SplatterOne,
    SplatterTwo,
    SplatterThree,
}

fn splatter(target: IntroTarget, scale: f64, opacity: f64, duration: f64) -> TimelineStep<IntroTarget> {
    TimelineStep::tween(
        target,
        vec![
            Tween::new(Channel::Scale, 0.0, scale),
            Tween::new(Channel::Opacity, 0.0, opacity),
        ],
        duration,
        Easing::BackOut(1.7),
    )
}

/// Container reveal, title, ink splatters, subtitle, more splatters, hold.
pub fn intro_script() -> Timeline<IntroTarget> {
    Timeline::new()
        .then(TimelineStep::tween(
            IntroTarget::Container,
            vec![Tween::new(Channel::ScaleY, 0.0, 1.0)],
            1.5,
            Easing::Power3Out,
        ))
        .then(TimelineStep::type_text(IntroTarget::Title, INTRO_TITLE, 3.0).at(-0.5))
        .then(splatter(IntroTarget::SplatterOne, 1.0, 0.7, 0.6).at(-2.5))
        .then(TimelineStep::type_text(IntroTarget::Bio, INTRO_BIO, 5.0).at(0.5))
        .then(splatter(IntroTarget::SplatterTwo, 1.2, 0.6, 0.5).at(-4.0))
        .then(splatter(IntroTarget::SplatterThree, 0.9, 0.5, 0.5).at(-2.0))
        .then(TimelineStep::hold(2.5))
}

pub fn fade_out_script() -> Timeline<IntroTarget> {
    Timeline::new().then(TimelineStep::tween(
        IntroTarget::Container,
        vec![Tween::new(Channel::Opacity, 1.0, 0.0)],
        FADE_OUT_SECONDS,
        Easing::Power2InOut,
    ))
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IntroPhase {
    NotStarted,
    Running,
    Completing,
    Done,
    Skipped,
}

#[derive(Clone, Debug, PartialEq)]
pub struct IntroFrame {
    pub visible: bool,
    targets: BTreeMap<IntroTarget, TargetState>,
}

impl IntroFrame {
    pub fn target(&self, target: IntroTarget) -> TargetState {
        self.targets.get(&target).cloned().unwrap_or_default()
    }

    fn hidden() -> Self {
        Self {
            visible: false,
            targets: BTreeMap::new(),
        }
    }
}

/// Drives the intro through `NotStarted → Running → Completing → Done`, or
/// straight to `Skipped` when the session already saw it. Clock values are
/// milliseconds from a monotonic source.
pub struct IntroSequencer<S> {
    flag: IntroPlayedFlag<S>,
    script: Timeline<IntroTarget>,
    fade: Timeline<IntroTarget>,
    phase: IntroPhase,
    history: Vec<IntroPhase>,
    main_clock: Playback,
    fade_clock: Playback,
    frame: IntroFrame,
    on_finished: Option<Box<dyn FnOnce()>>,
}

impl<S: SessionStore> IntroSequencer<S> {
    pub fn new(store: S, on_finished: impl FnOnce() + 'static) -> Self {
        Self::with_scripts(store, intro_script(), fade_out_script(), on_finished)
    }

    pub fn with_scripts(
        store: S,
        script: Timeline<IntroTarget>,
        fade: Timeline<IntroTarget>,
        on_finished: impl FnOnce() + 'static,
    ) -> Self {
        let frame = IntroFrame {
            visible: true,
            targets: script.render(0.0),
        };

        Self {
            flag: IntroPlayedFlag::new(store),
            script,
            fade,
            phase: IntroPhase::NotStarted,
            history: vec![IntroPhase::NotStarted],
            main_clock: Playback::default(),
            fade_clock: Playback::default(),
            frame,
            on_finished: Some(Box::new(on_finished)),
        }
    }

    pub fn phase(&self) -> IntroPhase {
        self.phase
    }

    pub fn history(&self) -> &[IntroPhase] {
        &self.history
    }

    pub fn frame(&self) -> &IntroFrame {
        &self.frame
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.phase, IntroPhase::Done | IntroPhase::Skipped)
    }

    /// Checks the session flag once and either skips or starts the script.
    pub fn mount(&mut self, now_ms: f64) {
        if self.phase != IntroPhase::NotStarted {
            return;
        }

        if self.flag.is_set() {
            self.frame = IntroFrame::hidden();
            self.enter(IntroPhase::Skipped);
            self.finish();
            self.enter(IntroPhase::Done);
            return;
        }

        self.main_clock.start(now_ms / 1000.0);
        self.enter(IntroPhase::Running);
    }

    /// Advances to `now_ms`. A single late tick may cross several phases; the
    /// fade is anchored to the scripted end rather than to the tick.
    pub fn tick(&mut self, now_ms: f64) {
        let now = now_ms / 1000.0;

        loop {
            match self.phase {
                IntroPhase::Running => match self.main_clock.tick(now, self.script.duration()) {
                    PlaybackTick::Running { elapsed } => {
                        self.frame.targets = self.script.render(elapsed);
                        return;
                    }
                    PlaybackTick::Completed { .. } => {
                        self.frame.targets = self.script.render(self.script.duration());
                        self.flag.set();
                        let fade_start = self.main_clock.started_at().unwrap_or(now)
                            + self.script.duration();
                        self.fade_clock.start(fade_start);
                        self.enter(IntroPhase::Completing);
                    }
                    PlaybackTick::Idle | PlaybackTick::Finished => return,
                },
                IntroPhase::Completing => match self.fade_clock.tick(now, self.fade.duration()) {
                    PlaybackTick::Running { elapsed } => {
                        self.apply_fade(elapsed);
                        return;
                    }
                    PlaybackTick::Completed { .. } => {
                        self.apply_fade(self.fade.duration());
                        self.frame.visible = false;
                        self.enter(IntroPhase::Done);
                        self.finish();
                        return;
                    }
                    PlaybackTick::Idle | PlaybackTick::Finished => return,
                },
                IntroPhase::NotStarted
                | IntroPhase::Done
                | IntroPhase::Skipped => return,
            }
        }
    }

    fn apply_fade(&mut self, elapsed: f64) {
        for (target, faded) in self.fade.render(elapsed) {
            self.frame.targets.entry(target).or_default().opacity = faded.opacity;
        }
    }

    fn enter(&mut self, phase: IntroPhase) {
        self.phase = phase;
        self.history.push(phase);
    }

    fn finish(&mut self) {
        if let Some(on_finished) = self.on_finished.take() {
            on_finished();
        }
    }
}
