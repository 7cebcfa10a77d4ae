use crate::geometry::Rect;

pub const DEFAULT_REFERENCE_LINE: f64 = 100.0;

/// Picks the navigation section under a fixed horizontal line near the top
/// of the viewport.
#[derive(Clone, Debug, PartialEq)]
pub struct ActiveSectionDetector {
    sections: Vec<String>,
    reference_line: f64,
    active: usize,
}

impl ActiveSectionDetector {
    /// `sections` must be non-empty; the first one is active until a scroll
    /// measurement says otherwise.
    pub fn new<I, S>(sections: I, reference_line: f64) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let sections: Vec<String> = sections.into_iter().map(Into::into).collect();
        if sections.is_empty() {
            return None;
        }

        Some(Self {
            sections,
            reference_line,
            active: 0,
        })
    }

    pub fn active(&self) -> &str {
        &self.sections[self.active]
    }

    pub fn sections(&self) -> &[String] {
        &self.sections
    }

    pub fn reference_line(&self) -> f64 {
        self.reference_line
    }

    /// Re-evaluates against fresh client rects. `measure` returns `None` for
    /// sections missing from the page. Returns true when the active section
    /// changed.
    pub fn update(&mut self, mut measure: impl FnMut(&str) -> Option<Rect>) -> bool {
        let hit = self.sections.iter().position(|section| {
            measure(section).is_some_and(|rect| rect.straddles_line(self.reference_line))
        });

        match hit {
            Some(index) if index != self.active => {
                self.active = index;
                true
            }
            _ => false,
        }
    }
}
