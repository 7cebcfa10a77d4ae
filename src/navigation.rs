use crate::active_section::ActiveSectionDetector;
use crate::geometry::Rect;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NavItem {
    pub label: &'static str,
    pub section: &'static str,
}

pub const NAV_ITEMS: &[NavItem] = &[
    NavItem {
        label: "Intro",
        section: "hero",
    },
    NavItem {
        label: "Writer",
        section: "about",
    },
    NavItem {
        label: "Chronicle",
        section: "experience",
    },
    NavItem {
        label: "Seals",
        section: "skills",
    },
    NavItem {
        label: "Contact",
        section: "contact",
    },
];

pub const HOME_SECTION: &str = "hero";

/// Header state: active section highlight, mobile menu overlay and the
/// "scrolled" backdrop.
#[derive(Clone, Debug, PartialEq)]
pub struct NavState {
    detector: ActiveSectionDetector,
    scrolled_threshold: f64,
    scrolled: bool,
    menu_open: bool,
}

impl NavState {
    pub fn new(items: &[NavItem], reference_line: f64, scrolled_threshold: f64) -> Option<Self> {
        let detector =
            ActiveSectionDetector::new(items.iter().map(|item| item.section), reference_line)?;

        Some(Self {
            detector,
            scrolled_threshold,
            scrolled: false,
            menu_open: false,
        })
    }

    pub fn active(&self) -> &str {
        self.detector.active()
    }

    pub fn is_active(&self, section: &str) -> bool {
        self.active() == section
    }

    pub fn scrolled(&self) -> bool {
        self.scrolled
    }

    pub fn menu_open(&self) -> bool {
        self.menu_open
    }

    /// Applies one scroll observation. Returns true when anything visible
    /// changed.
    pub fn on_scroll(&mut self, scroll_y: f64, measure: impl FnMut(&str) -> Option<Rect>) -> bool {
        let scrolled = scroll_y > self.scrolled_threshold;
        let scrolled_changed = scrolled != self.scrolled;
        self.scrolled = scrolled;

        let active_changed = self.detector.update(measure);
        scrolled_changed || active_changed
    }

    pub fn toggle_menu(&mut self) {
        self.menu_open = !self.menu_open;
    }

    pub fn close_menu(&mut self) {
        self.menu_open = false;
    }

    /// Handles a click on a navigation label: closes the menu and returns the
    /// section to scroll to.
    pub fn select<'a>(&mut self, section: &'a str) -> &'a str {
        self.menu_open = false;
        section
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> NavState {
        NavState::new(NAV_ITEMS, 100.0, 50.0).expect("nav items present")
    }

    #[test]
    fn starts_on_hero_with_closed_menu() {
        let state = state();
        assert_eq!(state.active(), HOME_SECTION);
        assert!(!state.menu_open());
        assert!(!state.scrolled());
    }

    #[test]
    fn scrolled_flag_flips_past_threshold() {
        let mut state = state();

        assert!(!state.on_scroll(50.0, |_| None));
        assert!(!state.scrolled());

        assert!(state.on_scroll(51.0, |_| None));
        assert!(state.scrolled());

        assert!(state.on_scroll(0.0, |_| None));
        assert!(!state.scrolled());
    }

    #[test]
    fn scroll_updates_active_section() {
        let mut state = state();

        let changed = state.on_scroll(20.0, |id| match id {
            "hero" => Some(Rect::new(-900.0, 1280.0, -100.0, 0.0)),
            "about" => Some(Rect::new(-100.0, 1280.0, 700.0, 0.0)),
            _ => None,
        });

        assert!(changed);
        assert!(state.is_active("about"));
    }

    #[test]
    fn selecting_a_label_closes_the_mobile_menu() {
        let mut state = state();
        state.toggle_menu();
        assert!(state.menu_open());

        assert_eq!(state.select("skills"), "skills");
        assert!(!state.menu_open());
    }

    #[test]
    fn overlay_click_closes_menu() {
        let mut state = state();
        state.toggle_menu();
        state.close_menu();
        assert!(!state.menu_open());
        state.toggle_menu();
        state.toggle_menu();
        assert!(!state.menu_open());
    }
}
