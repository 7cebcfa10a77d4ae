use thiserror::Error;

/// Axis-aligned rectangle in viewport (client) coordinates, as reported by
/// `getBoundingClientRect`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Rect {
    pub fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Builds the client rect of a block laid out at document offsets
    /// `doc_top..doc_bottom` while the page is scrolled to `scroll_y`.
    pub fn from_document_span(doc_top: f64, doc_bottom: f64, width: f64, scroll_y: f64) -> Self {
        Self {
            top: doc_top - scroll_y,
            right: width,
            bottom: doc_bottom - scroll_y,
            left: 0.0,
        }
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    /// Edge-adjacent rectangles count as intersecting.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.top <= other.bottom
            && self.bottom >= other.top
            && self.left <= other.right
            && self.right >= other.left
    }

    pub fn straddles_line(&self, y: f64) -> bool {
        self.top <= y && y <= self.bottom
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(0.0, self.width, self.height, 0.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Length {
    Px(f64),
    Percent(f64),
}

impl Length {
    fn resolve(self, basis: f64) -> f64 {
        match self {
            Self::Px(value) => value,
            Self::Percent(value) => basis * value / 100.0,
        }
    }
}

impl Default for Length {
    fn default() -> Self {
        Self::Px(0.0)
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum MarginParseError {
    #[error("margin is empty")]
    Empty,
    #[error("margin has {0} values, expected 1 to 4")]
    TooManyValues(usize),
    #[error("invalid margin value: {0}")]
    InvalidValue(String),
}

/// Signed inset/outset applied to the viewport before intersection testing.
/// Positive values grow the viewport, negative values shrink it.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ViewportMargin {
    pub top: Length,
    pub right: Length,
    pub bottom: Length,
    pub left: Length,
}

impl ViewportMargin {
    pub fn uniform(length: Length) -> Self {
        Self {
            top: length,
            right: length,
            bottom: length,
            left: length,
        }
    }

    /// Parses the CSS margin shorthand (`"-100px"`, `"0px 0px -50% 0px"`).
    pub fn parse(value: &str) -> Result<Self, MarginParseError> {
        let parts = value
            .split_whitespace()
            .map(parse_length)
            .collect::<Result<Vec<_>, _>>()?;

        match parts.as_slice() {
            [] => Err(MarginParseError::Empty),
            [all] => Ok(Self::uniform(*all)),
            [vertical, horizontal] => Ok(Self {
                top: *vertical,
                right: *horizontal,
                bottom: *vertical,
                left: *horizontal,
            }),
            [top, horizontal, bottom] => Ok(Self {
                top: *top,
                right: *horizontal,
                bottom: *bottom,
                left: *horizontal,
            }),
            [top, right, bottom, left] => Ok(Self {
                top: *top,
                right: *right,
                bottom: *bottom,
                left: *left,
            }),
            more => Err(MarginParseError::TooManyValues(more.len())),
        }
    }

    /// The viewport rectangle after applying this margin.
    pub fn apply(&self, viewport: Viewport) -> Rect {
        Rect {
            top: -self.top.resolve(viewport.height),
            right: viewport.width + self.right.resolve(viewport.width),
            bottom: viewport.height + self.bottom.resolve(viewport.height),
            left: -self.left.resolve(viewport.width),
        }
    }
}

fn parse_length(token: &str) -> Result<Length, MarginParseError> {
    let invalid = || MarginParseError::InvalidValue(token.to_string());
    // `f64::from_str` accepts "NaN" and "inf", which CSS lengths do not.
    let finite = |number: &str| {
        number
            .parse::<f64>()
            .ok()
            .filter(|value| value.is_finite())
            .ok_or_else(invalid)
    };

    if let Some(number) = token.strip_suffix("px") {
        return finite(number).map(Length::Px);
    }

    if let Some(number) = token.strip_suffix('%') {
        return finite(number).map(Length::Percent);
    }

    match token.parse::<f64>() {
        Ok(value) if value == 0.0 => Ok(Length::Px(0.0)),
        _ => Err(invalid()),
    }
}

/// Geometric in-view test: does `element` intersect the viewport adjusted by
/// `margin`?
pub fn is_in_view(element: Rect, viewport: Viewport, margin: &ViewportMargin) -> bool {
    element.intersects(&margin.apply(viewport))
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT: Viewport = Viewport {
        width: 1280.0,
        height: 800.0,
    };

    #[test]
    fn single_value_margin_applies_to_every_side() {
        let margin = ViewportMargin::parse("-100px").expect("valid margin");
        assert_eq!(margin, ViewportMargin::uniform(Length::Px(-100.0)));

        let root = margin.apply(VIEWPORT);
        assert_eq!(root, Rect::new(100.0, 1180.0, 700.0, 100.0));
    }

    #[test]
    fn four_value_margin_shrinks_bottom_by_half() {
        let margin = ViewportMargin::parse("0px 0px -50% 0px").expect("valid margin");
        let root = margin.apply(VIEWPORT);

        assert_eq!(root.top, 0.0);
        assert_eq!(root.bottom, 400.0);
        assert_eq!(root.left, 0.0);
        assert_eq!(root.right, 1280.0);
    }

    #[test]
    fn two_and_three_value_shorthands_mirror_sides() {
        let two = ViewportMargin::parse("10px 5%").expect("valid margin");
        assert_eq!(two.top, Length::Px(10.0));
        assert_eq!(two.bottom, Length::Px(10.0));
        assert_eq!(two.left, Length::Percent(5.0));
        assert_eq!(two.right, Length::Percent(5.0));

        let three = ViewportMargin::parse("1px 2px 3px").expect("valid margin");
        assert_eq!(three.top, Length::Px(1.0));
        assert_eq!(three.right, Length::Px(2.0));
        assert_eq!(three.bottom, Length::Px(3.0));
        assert_eq!(three.left, Length::Px(2.0));
    }

    #[test]
    fn bare_zero_is_accepted_but_unitless_numbers_are_not() {
        assert!(ViewportMargin::parse("0").is_ok());
        assert_eq!(
            ViewportMargin::parse("12"),
            Err(MarginParseError::InvalidValue("12".to_string()))
        );
    }

    #[test]
    fn malformed_margins_are_rejected() {
        assert_eq!(ViewportMargin::parse("   "), Err(MarginParseError::Empty));
        assert_eq!(
            ViewportMargin::parse("1px 1px 1px 1px 1px"),
            Err(MarginParseError::TooManyValues(5))
        );
        assert!(matches!(
            ViewportMargin::parse("tenpx"),
            Err(MarginParseError::InvalidValue(_))
        ));
    }

    #[test]
    fn non_finite_lengths_are_rejected() {
        for margin in ["NaNpx", "infpx", "-inf%", "0px NaN%"] {
            assert!(
                matches!(ViewportMargin::parse(margin), Err(MarginParseError::InvalidValue(_))),
                "{margin} should be rejected"
            );
        }
    }

    #[test]
    fn in_view_matches_shrunken_viewport() {
        let margin = ViewportMargin::parse("-100px").expect("valid margin");

        let inside = Rect::new(650.0, 1280.0, 900.0, 0.0);
        let below = Rect::new(750.0, 1280.0, 900.0, 0.0);

        assert!(is_in_view(inside, VIEWPORT, &margin));
        assert!(!is_in_view(below, VIEWPORT, &margin));
    }

    #[test]
    fn edge_adjacent_element_counts_as_intersecting() {
        let margin = ViewportMargin::default();
        let touching = Rect::new(800.0, 1280.0, 1200.0, 0.0);
        assert!(is_in_view(touching, VIEWPORT, &margin));
    }

    #[test]
    fn document_span_converts_to_client_coordinates() {
        let rect = Rect::from_document_span(800.0, 1600.0, 1280.0, 850.0);
        assert_eq!(rect.top, -50.0);
        assert_eq!(rect.bottom, 750.0);
        assert!(rect.straddles_line(100.0));
        assert_eq!(rect.height(), 800.0);
    }
}
