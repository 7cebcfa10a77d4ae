//! Entrance choreography rendered as inline CSS transitions.

use crate::easing::Easing;
use crate::geometry::{Rect, Viewport};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pose {
    pub opacity: f64,
    pub x: f64,
    pub y: f64,
    pub scale: f64,
    pub rotate: f64,
    pub blur: f64,
}

impl Pose {
    pub const REST: Pose = Pose {
        opacity: 1.0,
        x: 0.0,
        y: 0.0,
        scale: 1.0,
        rotate: 0.0,
        blur: 0.0,
    };

    pub const fn hidden() -> Self {
        Self {
            opacity: 0.0,
            ..Self::REST
        }
    }

    pub const fn offset(mut self, x: f64, y: f64) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    pub const fn scaled(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    pub const fn rotated(mut self, degrees: f64) -> Self {
        self.rotate = degrees;
        self
    }

    pub const fn blurred(mut self, px: f64) -> Self {
        self.blur = px;
        self
    }

    fn declarations(&self) -> String {
        format!(
            "opacity: {}; transform: translate({}px, {}px) scale({}) rotate({}deg); filter: blur({}px);",
            self.opacity, self.x, self.y, self.scale, self.rotate, self.blur
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Entrance {
    pub hidden: Pose,
    pub delay: f64,
    pub duration: f64,
    pub easing: Easing,
}

impl Entrance {
    pub const fn new(hidden: Pose, duration: f64, easing: Easing) -> Self {
        Self {
            hidden,
            delay: 0.0,
            duration,
            easing,
        }
    }

    pub const fn delayed(mut self, delay: f64) -> Self {
        self.delay = delay;
        self
    }

    pub fn pose(&self, visible: bool) -> Pose {
        if visible {
            Pose::REST
        } else {
            self.hidden
        }
    }

    /// Inline style for the current state. Returning to hidden happens
    /// without delay so re-entrant sections reset promptly.
    pub fn style(&self, visible: bool) -> String {
        let delay = if visible { self.delay } else { 0.0 };
        let timing = format!("{}s {} {}s", self.duration, self.easing.css(), delay);
        format!(
            "{} transition: opacity {timing}, transform {timing}, filter {timing};",
            self.pose(visible).declarations()
        )
    }
}

/// `base + index * step`, for staggering list items.
pub fn stagger(base: f64, step: f64, index: usize) -> f64 {
    base + step * index as f64
}

/// Skill cards fly in from the four corners in turn.
pub fn corner_offset(index: usize) -> (f64, f64) {
    const CORNERS: [(f64, f64); 4] = [(-200.0, -200.0), (200.0, -200.0), (-200.0, 200.0), (200.0, 200.0)];
    CORNERS[index % CORNERS.len()]
}

/// Progress of an element through the viewport: 0 when its top meets the
/// viewport bottom, 1 when its bottom meets the viewport top.
pub fn scroll_progress(element: Rect, viewport: Viewport) -> f64 {
    let travel = viewport.height + element.height();
    if travel <= 0.0 {
        return 0.0;
    }
    ((viewport.height - element.top) / travel).clamp(0.0, 1.0)
}

/// Piecewise-linear mapping from progress stops to values.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Keyframes<const N: usize> {
    pub stops: [f64; N],
    pub values: [f64; N],
}

impl<const N: usize> Keyframes<N> {
    pub const fn new(stops: [f64; N], values: [f64; N]) -> Self {
        Self { stops, values }
    }

    pub fn sample(&self, progress: f64) -> f64 {
        if N == 0 {
            return 0.0;
        }
        if progress <= self.stops[0] {
            return self.values[0];
        }
        if progress >= self.stops[N - 1] {
            return self.values[N - 1];
        }

        for index in 1..N {
            let (start, end) = (self.stops[index - 1], self.stops[index]);
            if progress <= end {
                let span = end - start;
                if span <= 0.0 {
                    return self.values[index];
                }
                let t = (progress - start) / span;
                return self.values[index - 1] + (self.values[index] - self.values[index - 1]) * t;
            }
        }

        self.values[N - 1]
    }
}

pub const ABOUT_OPACITY: Keyframes<4> = Keyframes::new([0.0, 0.3, 0.7, 1.0], [0.0, 1.0, 1.0, 0.0]);
pub const ABOUT_SCALE: Keyframes<4> = Keyframes::new([0.0, 0.3, 0.7, 1.0], [0.8, 1.0, 1.0, 0.95]);
