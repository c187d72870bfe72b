//! Live configuration of a progress controller and its defaults.
//!
//! [`Settings`] holds every option the controller reads while rendering and
//! animating. It starts from sensible defaults and is updated by merging
//! [`Options`](super::Options) into it.
//!
//! # Examples
//!
//! ```rust
//! use pagebar::config::{Direction, Parent, Positioning, Settings};
//! use pagebar::NodeId;
//! use std::time::Duration;
//!
//! let settings: Settings<NodeId> = Settings::default();
//! assert_eq!(settings.minimum, 0.08);
//! assert_eq!(settings.speed, Duration::from_millis(200));
//! assert_eq!(settings.position_using, Positioning::Auto);
//! assert_eq!(settings.direction, Direction::Ltr);
//! assert_eq!(settings.parent, Parent::Selector("body".into()));
//! assert!(settings.validate().is_ok());
//! ```

use super::options::Options;
use crate::error::{Error, Result};

use std::time::Duration;
use tracing::warn;

/// CSS mechanism used to move the bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Positioning {
    /// Probe the host once and cache the best supported strategy.
    #[default]
    Auto,
    /// Hardware accelerated `translate3d` transform.
    Translate3d,
    /// Plain 2D `translate` transform.
    Translate,
    /// `margin-left` offset, supported everywhere.
    Margin,
}

/// Fill direction of the bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    /// The bar grows from the left edge.
    #[default]
    Ltr,
    /// The bar grows from the right edge, for right-to-left layouts.
    Rtl,
}

/// Where the widget is mounted.
///
/// `E` is the element type of the [`Host`](crate::Host) the controller
/// renders into.
#[derive(Debug, Clone, PartialEq)]
pub enum Parent<E> {
    /// First element matching a selector, resolved on every mount.
    Selector(String),
    /// A specific element of the document.
    Element(E),
}

impl<E> Default for Parent<E> {
    fn default() -> Self {
        Parent::Selector("body".into())
    }
}

impl<E> From<&str> for Parent<E> {
    fn from(selector: &str) -> Self {
        Parent::Selector(selector.into())
    }
}

impl<E> From<String> for Parent<E> {
    fn from(selector: String) -> Self {
        Parent::Selector(selector)
    }
}

/// Default markup: a bar with its peg, followed by a spinner.
pub const TEMPLATE: &str = r#"<div class="bar" role="bar"><div class="peg"></div></div><div class="spinner" role="spinner"><div class="spinner-icon"></div></div>"#;

/// Configuration read by the controller.
///
/// `E` is the element type of the host, used by [`Parent::Element`].
#[derive(Debug, Clone, PartialEq)]
pub struct Settings<E> {
    /// Lower clamp bound of the displayed progress.
    pub minimum: f64,
    /// Upper clamp bound. Reaching it completes the bar.
    pub maximum: f64,
    /// Inner markup of the mounted element.
    pub template: String,
    /// CSS easing token of the bar transition.
    pub easing: String,
    /// Duration of every transition phase.
    pub speed: Duration,
    /// Automatically increment the bar in the background after `start`.
    pub trickle: bool,
    /// Delay between two automatic increments.
    pub trickle_speed: Duration,
    /// Keep the spinner sub-element.
    pub show_spinner: bool,
    /// Selector locating the bar inside the template.
    pub bar_selector: String,
    /// Selector locating the spinner inside the template.
    pub spinner_selector: String,
    /// Mount point.
    pub parent: Parent<E>,
    /// Positioning strategy, [`Positioning::Auto`] until probed.
    pub position_using: Positioning,
    /// Fill direction.
    pub direction: Direction,
}

impl<E> Default for Settings<E> {
    fn default() -> Self {
        Self {
            minimum: Self::DEFAULT_MINIMUM,
            maximum: Self::DEFAULT_MAXIMUM,
            template: TEMPLATE.into(),
            easing: "linear".into(),
            speed: Self::DEFAULT_SPEED,
            trickle: true,
            trickle_speed: Self::DEFAULT_TRICKLE_SPEED,
            show_spinner: true,
            bar_selector: r#"[role="bar"]"#.into(),
            spinner_selector: r#"[role="spinner"]"#.into(),
            parent: Parent::default(),
            position_using: Positioning::Auto,
            direction: Direction::Ltr,
        }
    }
}

impl<E> Settings<E> {
    const DEFAULT_MINIMUM: f64 = 0.08;
    const DEFAULT_MAXIMUM: f64 = 1.0;
    const DEFAULT_SPEED: Duration = Duration::from_millis(200);
    const DEFAULT_TRICKLE_SPEED: Duration = Duration::from_millis(200);

    /// Overwrite the fields provided in `options`, leaving the others untouched.
    ///
    /// No validation happens here. Inverted bounds are reported with a
    /// warning and otherwise accepted.
    pub fn merge(&mut self, options: Options<E>) {
        let Options {
            minimum,
            maximum,
            template,
            easing,
            speed,
            trickle,
            trickle_speed,
            show_spinner,
            bar_selector,
            spinner_selector,
            parent,
            position_using,
            direction,
        } = options;

        if let Some(v) = minimum {
            self.minimum = v;
        }
        if let Some(v) = maximum {
            self.maximum = v;
        }
        if let Some(v) = template {
            self.template = v;
        }
        if let Some(v) = easing {
            self.easing = v;
        }
        if let Some(v) = speed {
            self.speed = v;
        }
        if let Some(v) = trickle {
            self.trickle = v;
        }
        if let Some(v) = trickle_speed {
            self.trickle_speed = v;
        }
        if let Some(v) = show_spinner {
            self.show_spinner = v;
        }
        if let Some(v) = bar_selector {
            self.bar_selector = v;
        }
        if let Some(v) = spinner_selector {
            self.spinner_selector = v;
        }
        if let Some(v) = parent {
            self.parent = v;
        }
        if let Some(v) = position_using {
            self.position_using = v;
        }
        if let Some(v) = direction {
            self.direction = v;
        }

        if let Err(e) = self.validate() {
            warn!("accepting configuration with {}", e);
        }
    }

    /// Return a copy of these settings with `options` merged in.
    pub fn merged(mut self, options: Options<E>) -> Self {
        self.merge(options);
        self
    }

    /// Check that `0 <= minimum < maximum <= 1`.
    pub fn validate(&self) -> Result<()> {
        let ordered = 0.0 <= self.minimum && self.minimum < self.maximum && self.maximum <= 1.0;
        if ordered {
            Ok(())
        } else {
            Err(Error::InvalidBounds {
                minimum: self.minimum,
                maximum: self.maximum,
            })
        }
    }
}
