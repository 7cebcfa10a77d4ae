//! Declarative animation steps and an interpreter that samples them against
//! a monotonic clock.

use std::collections::BTreeMap;

use crate::easing::Easing;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Channel {
    Opacity,
    Scale,
    ScaleY,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tween {
    pub channel: Channel,
    pub from: f64,
    pub to: f64,
}

impl Tween {
    pub fn new(channel: Channel, from: f64, to: f64) -> Self {
        Self { channel, from, to }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    Tweens(Vec<Tween>),
    /// Reveals the text one character at a time.
    TypeText(String),
    /// Occupies time without touching any target.
    Hold,
}

/// Where a step starts, measured from the end of the timeline built so far.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Position {
    End,
    /// Negative values overlap earlier steps, positive values leave a gap.
    Relative(f64),
}

#[derive(Clone, Debug, PartialEq)]
pub struct TimelineStep<T> {
    pub target: Option<T>,
    pub effect: Effect,
    pub duration: f64,
    pub easing: Easing,
    pub position: Position,
}

impl<T> TimelineStep<T> {
    pub fn tween(target: T, tweens: Vec<Tween>, duration: f64, easing: Easing) -> Self {
        Self {
            target: Some(target),
            effect: Effect::Tweens(tweens),
            duration,
            easing,
            position: Position::End,
        }
    }

    pub fn type_text(target: T, text: impl Into<String>, duration: f64) -> Self {
        Self {
            target: Some(target),
            effect: Effect::TypeText(text.into()),
            duration,
            easing: Easing::Linear,
            position: Position::End,
        }
    }

    pub fn hold(duration: f64) -> Self {
        Self {
            target: None,
            effect: Effect::Hold,
            duration,
            easing: Easing::Linear,
            position: Position::End,
        }
    }

    pub fn at(mut self, offset: f64) -> Self {
        self.position = Position::Relative(offset);
        self
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ScheduledStep<T> {
    pub step: TimelineStep<T>,
    pub start: f64,
}

impl<T> ScheduledStep<T> {
    pub fn end(&self) -> f64 {
        self.start + self.step.duration
    }

    /// Eased progress at `time`, or `None` before the step starts.
    fn progress(&self, time: f64) -> Option<f64> {
        if time < self.start {
            return None;
        }
        if self.step.duration <= 0.0 {
            return Some(1.0);
        }
        let linear = ((time - self.start) / self.step.duration).min(1.0);
        Some(self.step.easing.apply(linear))
    }
}

/// Rendered state of one animation target.
#[derive(Clone, Debug, PartialEq)]
pub struct TargetState {
    pub opacity: f64,
    pub scale: f64,
    pub scale_y: f64,
    pub text: Option<String>,
}

impl Default for TargetState {
    fn default() -> Self {
        Self {
            opacity: 1.0,
            scale: 1.0,
            scale_y: 1.0,
            text: None,
        }
    }
}

impl TargetState {
    fn set(&mut self, channel: Channel, value: f64) {
        match channel {
            Channel::Opacity => self.opacity = value,
            Channel::Scale => self.scale = value,
            Channel::ScaleY => self.scale_y = value,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Timeline<T> {
    steps: Vec<ScheduledStep<T>>,
    duration: f64,
}

impl<T> Default for Timeline<T> {
    fn default() -> Self {
        Self {
            steps: Vec::new(),
            duration: 0.0,
        }
    }
}

impl<T: Copy + Ord> Timeline<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a step in declaration order, resolving its start time.
    pub fn then(mut self, step: TimelineStep<T>) -> Self {
        let start = match step.position {
            Position::End => self.duration,
            Position::Relative(offset) => (self.duration + offset).max(0.0),
        };
        let scheduled = ScheduledStep { step, start };
        self.duration = self.duration.max(scheduled.end());
        self.steps.push(scheduled);
        self
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn steps(&self) -> &[ScheduledStep<T>] {
        &self.steps
    }

    /// Samples every target at `time` seconds from the start. Steps that
    /// have not started yet hold their targets at the "from" values.
    pub fn render(&self, time: f64) -> BTreeMap<T, TargetState> {
        let mut states: BTreeMap<T, TargetState> = BTreeMap::new();

        for scheduled in &self.steps {
            let Some(target) = scheduled.step.target else {
                continue;
            };
            let state = states.entry(target).or_default();
            let progress = scheduled.progress(time);

            match &scheduled.step.effect {
                Effect::Tweens(tweens) => {
                    for tween in tweens {
                        let value = match progress {
                            Some(p) => tween.from + (tween.to - tween.from) * p,
                            None => tween.from,
                        };
                        state.set(tween.channel, value);
                    }
                }
                Effect::TypeText(text) => {
                    let total = text.chars().count();
                    let shown = progress
                        .map(|p| ((p * total as f64).round() as usize).min(total))
                        .unwrap_or(0);
                    state.text = Some(text.chars().take(shown).collect());
                }
                Effect::Hold => {}
            }
        }

        states
    }
}

/// Single-use playback clock. Reports completion exactly once.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Playback {
    started_at: Option<f64>,
    completed: bool,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PlaybackTick {
    Idle,
    Running { elapsed: f64 },
    Completed { overshoot: f64 },
    Finished,
}

impl Playback {
    pub fn start(&mut self, now: f64) {
        self.started_at = Some(now);
        self.completed = false;
    }

    pub fn started_at(&self) -> Option<f64> {
        self.started_at
    }

    /// `now` and `duration` share a unit (seconds).
    pub fn tick(&mut self, now: f64, duration: f64) -> PlaybackTick {
        let Some(started_at) = self.started_at else {
            return PlaybackTick::Idle;
        };
        if self.completed {
            return PlaybackTick::Finished;
        }

        let elapsed = (now - started_at).max(0.0);
        if elapsed >= duration {
            self.completed = true;
            PlaybackTick::Completed {
                overshoot: elapsed - duration,
            }
        } else {
            PlaybackTick::Running { elapsed }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
    enum Target {
        Box,
        Label,
        Dot,
    }

    fn choreography() -> Timeline<Target> {
        Timeline::new()
            .then(TimelineStep::tween(
                Target::Box,
                vec![Tween::new(Channel::ScaleY, 0.0, 1.0)],
                1.5,
                Easing::Linear,
            ))
            .then(TimelineStep::type_text(Target::Label, "abcd", 3.0).at(-0.5))
            .then(
                TimelineStep::tween(
                    Target::Dot,
                    vec![Tween::new(Channel::Opacity, 0.0, 0.7)],
                    0.6,
                    Easing::Linear,
                )
                .at(-2.5),
            )
            .then(TimelineStep::hold(2.0))
    }

    #[test]
    fn offsets_are_relative_to_timeline_end() {
        let timeline = choreography();
        let starts: Vec<f64> = timeline.steps().iter().map(|step| step.start).collect();

        assert_eq!(starts, vec![0.0, 1.0, 1.5, 4.0]);
        assert_eq!(timeline.duration(), 6.0);
    }

    #[test]
    fn negative_offset_cannot_start_before_zero() {
        let timeline = Timeline::<Target>::new().then(TimelineStep::hold(1.0).at(-5.0));
        assert_eq!(timeline.steps()[0].start, 0.0);
        assert_eq!(timeline.duration(), 1.0);
    }

    #[test]
    fn pending_steps_hold_from_values() {
        let states = choreography().render(0.0);

        assert_eq!(states[&Target::Box].scale_y, 0.0);
        assert_eq!(states[&Target::Dot].opacity, 0.0);
        assert_eq!(states[&Target::Label].text.as_deref(), Some(""));
    }

    #[test]
    fn overlapping_steps_progress_together() {
        let states = choreography().render(1.4);

        assert!((states[&Target::Box].scale_y - 1.4 / 1.5).abs() < 1e-9);
        assert!(states[&Target::Label].text.as_deref().is_some_and(|text| !text.is_empty()));
        assert_eq!(states[&Target::Dot].opacity, 0.0);
    }

    #[test]
    fn finished_steps_rest_at_final_values() {
        let states = choreography().render(10.0);

        assert_eq!(states[&Target::Box].scale_y, 1.0);
        assert_eq!(states[&Target::Dot].opacity, 0.7);
        assert_eq!(states[&Target::Label].text.as_deref(), Some("abcd"));
    }

    #[test]
    fn typed_text_reveals_whole_characters() {
        let timeline = Timeline::new().then(TimelineStep::type_text(Target::Label, "héllo", 5.0));

        assert_eq!(timeline.render(2.0)[&Target::Label].text.as_deref(), Some("hé"));
        assert_eq!(timeline.render(5.0)[&Target::Label].text.as_deref(), Some("héllo"));
    }

    #[test]
    fn playback_completes_exactly_once() {
        let mut playback = Playback::default();
        assert_eq!(playback.tick(1.0, 2.0), PlaybackTick::Idle);

        playback.start(10.0);
        assert_eq!(playback.tick(11.0, 2.0), PlaybackTick::Running { elapsed: 1.0 });
        assert_eq!(playback.tick(12.5, 2.0), PlaybackTick::Completed { overshoot: 0.5 });
        assert_eq!(playback.tick(13.0, 2.0), PlaybackTick::Finished);
        assert_eq!(playback.tick(99.0, 2.0), PlaybackTick::Finished);
    }
}
