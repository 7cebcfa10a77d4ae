use crate::easing::{Easing, SOFT_OUT};

/// Upper bound standing in for the content's natural height, since CSS
/// cannot transition to `auto`.
pub const EXPANDED_MAX_HEIGHT: f64 = 480.0;

/// Per-card hover state. Each card owns one; nothing is shared or persisted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Disclosure {
    expanded: bool,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DisclosureStyle {
    pub opacity: f64,
    pub max_height: f64,
    pub duration: f64,
    pub easing: Easing,
}

impl DisclosureStyle {
    pub fn css(&self) -> String {
        let timing = format!("{}s {}", self.duration, self.easing.css());
        format!(
            "opacity: {}; max-height: {}px; overflow: hidden; transition: opacity {timing}, max-height {timing};",
            self.opacity, self.max_height
        )
    }
}

impl Disclosure {
    pub fn expanded(&self) -> bool {
        self.expanded
    }

    pub fn pointer_enter(&mut self) {
        self.expanded = true;
    }

    pub fn pointer_leave(&mut self) {
        self.expanded = false;
    }

    pub fn style(&self) -> DisclosureStyle {
        if self.expanded {
            DisclosureStyle {
                opacity: 1.0,
                max_height: EXPANDED_MAX_HEIGHT,
                duration: 0.5,
                easing: SOFT_OUT,
            }
        } else {
            DisclosureStyle {
                opacity: 0.0,
                max_height: 0.0,
                duration: 0.4,
                easing: SOFT_OUT,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pointer_enter_and_leave_toggle_expansion() {
        let mut card = Disclosure::default();
        assert!(!card.expanded());

        card.pointer_enter();
        assert!(card.expanded());

        card.pointer_leave();
        assert!(!card.expanded());
    }

    #[test]
    fn cards_do_not_share_state() {
        let mut first = Disclosure::default();
        let second = Disclosure::default();

        first.pointer_enter();
        assert!(first.expanded());
        assert!(!second.expanded());
    }

    #[test]
    fn collapsed_and_expanded_styles_differ_in_timing() {
        let mut card = Disclosure::default();
        let collapsed = card.style();
        assert_eq!(collapsed.opacity, 0.0);
        assert_eq!(collapsed.max_height, 0.0);
        assert_eq!(collapsed.duration, 0.4);

        card.pointer_enter();
        let expanded = card.style();
        assert_eq!(expanded.opacity, 1.0);
        assert_eq!(expanded.max_height, EXPANDED_MAX_HEIGHT);
        assert_eq!(expanded.duration, 0.5);
    }

    #[test]
    fn css_includes_transition_curve() {
        let css = Disclosure::default().style().css();
        assert!(css.contains("max-height: 0px"));
        assert!(css.contains("opacity 0.4s cubic-bezier(0.22, 1, 0.36, 1)"));
    }
}
