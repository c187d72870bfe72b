//! Inline CSS declarations and the bar position math.
//!
//! The bar is a full-width element shifted out of view: at progress `n` it
//! is translated by `(n - 1) * 100` percent of its width (mirrored for
//! right-to-left layouts), so `0` hides it entirely and `1` shows it whole.
//!
//! # Examples
//!
//! ```rust
//! use pagebar::config::{Direction, Positioning};
//! use pagebar::style::{bar_position_css, to_bar_perc};
//! use std::time::Duration;
//!
//! assert_eq!(to_bar_perc(1.0, Direction::Ltr), 0.0);
//! assert_eq!(to_bar_perc(0.0, Direction::Rtl), 100.0);
//!
//! let css = bar_position_css(
//!     0.5,
//!     Duration::from_millis(200),
//!     "ease",
//!     Positioning::Margin,
//!     Direction::Ltr,
//! );
//! assert_eq!(css.get("margin-left"), Some("-50%"));
//! assert_eq!(css.get("transition"), Some("all 200ms ease"));
//! ```

use crate::config::{Direction, Positioning};

use std::fmt;
use std::time::Duration;

/// An ordered list of CSS property declarations.
///
/// Setting a property twice keeps its first position and the last value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Style {
    declarations: Vec<(String, String)>,
}

impl Style {
    /// Creates an empty declaration list.
    pub fn new() -> Self {
        Style::default()
    }

    /// Add or replace a declaration.
    pub fn with(mut self, property: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(property, value);
        self
    }

    /// Add or replace a declaration in place.
    pub fn set(&mut self, property: impl Into<String>, value: impl Into<String>) {
        let property = property.into();
        let value = value.into();
        match self.declarations.iter_mut().find(|(p, _)| *p == property) {
            Some((_, v)) => *v = value,
            None => self.declarations.push((property, value)),
        }
    }

    /// Value of a declared property.
    pub fn get(&self, property: &str) -> Option<&str> {
        self.declarations
            .iter()
            .find(|(p, _)| p == property)
            .map(|(_, v)| v.as_str())
    }

    /// Iterate over the declarations in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.declarations
            .iter()
            .map(|(p, v)| (p.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }
}

/// Renders as an inline `style` attribute value.
impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (property, value)) in self.declarations.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}: {};", property, value)?;
        }
        Ok(())
    }
}

/// Translation percentage of the bar for progress `n`.
pub fn to_bar_perc(n: f64, direction: Direction) -> f64 {
    match direction {
        Direction::Ltr => (-1.0 + n) * 100.0,
        Direction::Rtl => (1.0 - n) * 100.0,
    }
}

/// Transition shorthand applied to every animated property.
pub fn transition(speed: Duration, easing: &str) -> String {
    format!("all {}ms {}", speed.as_millis(), easing)
}

/// Declarations placing the bar at `n` with a transition of `speed`.
///
/// `positioning` must already be resolved; [`Positioning::Auto`] is treated
/// as the margin fallback.
pub fn bar_position_css(
    n: f64,
    speed: Duration,
    easing: &str,
    positioning: Positioning,
    direction: Direction,
) -> Style {
    position_css(to_bar_perc(n, direction), positioning).with("transition", transition(speed, easing))
}

pub(crate) fn position_css(perc: f64, positioning: Positioning) -> Style {
    match positioning {
        Positioning::Translate3d => {
            Style::new().with("transform", format!("translate3d({}%,0,0)", perc))
        }
        Positioning::Translate => Style::new().with("transform", format!("translate({}%,0)", perc)),
        Positioning::Margin | Positioning::Auto => Style::new().with("margin-left", format!("{}%", perc)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn style_set_replaces_in_place() {
        let mut style = Style::new().with("opacity", "1").with("transition", "none");
        style.set("opacity", "0.5");

        let declared: Vec<_> = style.iter().collect();
        assert_eq!(declared, vec![("opacity", "0.5"), ("transition", "none")]);
        assert_eq!(style.to_string(), "opacity: 0.5; transition: none;");
    }

    #[test]
    fn position_css_per_strategy() {
        assert_eq!(
            position_css(-50.0, Positioning::Translate3d).get("transform"),
            Some("translate3d(-50%,0,0)")
        );
        assert_eq!(
            position_css(-50.0, Positioning::Translate).get("transform"),
            Some("translate(-50%,0)")
        );
        assert_eq!(position_css(-50.0, Positioning::Auto).get("margin-left"), Some("-50%"));
    }
}
