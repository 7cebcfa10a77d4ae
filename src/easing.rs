/// Easing curves shared by the intro timeline and the CSS transitions.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Easing {
    Linear,
    Power2InOut,
    Power3Out,
    /// Overshoots by the given amount before settling.
    BackOut(f64),
    EaseOut,
    CubicBezier(f64, f64, f64, f64),
}

/// The site's signature curve for entrances and disclosures.
pub const SOFT_OUT: Easing = Easing::CubicBezier(0.22, 1.0, 0.36, 1.0);
pub const INK_DROP: Easing = Easing::CubicBezier(0.6, 0.05, 0.01, 0.9);
pub const GLIDE_OUT: Easing = Easing::CubicBezier(0.16, 1.0, 0.3, 1.0);

impl Easing {
    /// Maps linear progress in `[0, 1]` onto eased progress.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::Power2InOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
            Self::Power3Out => 1.0 - (1.0 - t).powi(3),
            Self::BackOut(overshoot) => {
                let u = t - 1.0;
                1.0 + (overshoot + 1.0) * u.powi(3) + overshoot * u.powi(2)
            }
            Self::EaseOut => cubic_bezier(0.0, 0.0, 0.58, 1.0, t),
            Self::CubicBezier(x1, y1, x2, y2) => cubic_bezier(x1, y1, x2, y2, t),
        }
    }

    /// CSS `transition-timing-function` value.
    pub fn css(self) -> String {
        match self {
            Self::Linear => "linear".to_string(),
            Self::Power2InOut => "cubic-bezier(0.45, 0, 0.55, 1)".to_string(),
            Self::Power3Out => "cubic-bezier(0.33, 1, 0.68, 1)".to_string(),
            Self::BackOut(_) => "cubic-bezier(0.34, 1.56, 0.64, 1)".to_string(),
            Self::EaseOut => "ease-out".to_string(),
            Self::CubicBezier(x1, y1, x2, y2) => format!("cubic-bezier({x1}, {y1}, {x2}, {y2})"),
        }
    }
}

fn bezier_axis(p1: f64, p2: f64, s: f64) -> f64 {
    let inv = 1.0 - s;
    3.0 * inv * inv * s * p1 + 3.0 * inv * s * s * p2 + s * s * s
}

fn bezier_axis_slope(p1: f64, p2: f64, s: f64) -> f64 {
    let inv = 1.0 - s;
    3.0 * inv * inv * p1 + 6.0 * inv * s * (p2 - p1) + 3.0 * s * s * (1.0 - p2)
}

fn cubic_bezier(x1: f64, y1: f64, x2: f64, y2: f64, x: f64) -> f64 {
    if x <= 0.0 || x >= 1.0 {
        return x;
    }

    // Newton iterations on the x curve, falling back to bisection.
    let mut s = x;
    for _ in 0..8 {
        let error = bezier_axis(x1, x2, s) - x;
        if error.abs() < 1e-7 {
            return bezier_axis(y1, y2, s);
        }
        let slope = bezier_axis_slope(x1, x2, s);
        if slope.abs() < 1e-6 {
            break;
        }
        s -= error / slope;
    }

    let (mut low, mut high) = (0.0, 1.0);
    s = x;
    for _ in 0..40 {
        let value = bezier_axis(x1, x2, s);
        if (value - x).abs() < 1e-7 {
            break;
        }
        if value < x {
            low = s;
        } else {
            high = s;
        }
        s = (low + high) / 2.0;
    }

    bezier_axis(y1, y2, s)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Easing; 8] = [
        Easing::Linear,
        Easing::Power2InOut,
        Easing::Power3Out,
        Easing::BackOut(1.7),
        Easing::EaseOut,
        SOFT_OUT,
        INK_DROP,
        GLIDE_OUT,
    ];

    #[test]
    fn every_curve_starts_at_zero_and_ends_at_one() {
        for easing in ALL {
            assert!(easing.apply(0.0).abs() < 1e-9, "{easing:?}");
            assert!((easing.apply(1.0) - 1.0).abs() < 1e-9, "{easing:?}");
        }
    }

    #[test]
    fn progress_outside_unit_range_is_clamped() {
        assert_eq!(Easing::Linear.apply(-3.0), 0.0);
        assert_eq!(Easing::Power3Out.apply(7.0), 1.0);
    }

    #[test]
    fn power2_in_out_is_symmetric_around_midpoint() {
        let easing = Easing::Power2InOut;
        assert!((easing.apply(0.5) - 0.5).abs() < 1e-9);
        assert!((easing.apply(0.25) + easing.apply(0.75) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn back_out_overshoots_before_settling() {
        let easing = Easing::BackOut(1.7);
        let peak = (1..100)
            .map(|step| easing.apply(f64::from(step) / 100.0))
            .fold(f64::MIN, f64::max);
        assert!(peak > 1.0);
    }

    #[test]
    fn cubic_bezier_is_monotonic_for_soft_out() {
        let mut previous = 0.0;
        for step in 1..=50 {
            let value = SOFT_OUT.apply(f64::from(step) / 50.0);
            assert!(value + 1e-9 >= previous);
            previous = value;
        }
        assert!(SOFT_OUT.apply(0.3) > 0.6);
    }

    #[test]
    fn css_forms_are_valid_timing_functions() {
        assert_eq!(SOFT_OUT.css(), "cubic-bezier(0.22, 1, 0.36, 1)");
        assert_eq!(Easing::Linear.css(), "linear");
        assert_eq!(Easing::EaseOut.css(), "ease-out");
    }
}
