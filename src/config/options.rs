//! Partial configuration merged into the live settings.
//!
//! [`Options`] carries an optional value per setting. Only the fields that
//! were set are written when it is merged, so a controller can be
//! reconfigured piecemeal at any time.
//!
//! # Examples
//!
//! ```rust
//! use pagebar::config::{Direction, Options, Settings};
//! use pagebar::NodeId;
//! use std::time::Duration;
//!
//! let options: Options<NodeId> = Options::new()
//!     .speed(Duration::from_millis(400))
//!     .show_spinner(false)
//!     .direction(Direction::Rtl);
//!
//! let settings = Settings::default().merged(options);
//! assert_eq!(settings.speed, Duration::from_millis(400));
//! assert!(!settings.show_spinner);
//! assert_eq!(settings.minimum, 0.08);
//! ```

use super::settings::{Direction, Parent, Positioning};

use std::time::Duration;

/// A set of settings to overwrite, built fluently.
#[derive(Debug, Clone, PartialEq)]
pub struct Options<E> {
    pub(crate) minimum: Option<f64>,
    pub(crate) maximum: Option<f64>,
    pub(crate) template: Option<String>,
    pub(crate) easing: Option<String>,
    pub(crate) speed: Option<Duration>,
    pub(crate) trickle: Option<bool>,
    pub(crate) trickle_speed: Option<Duration>,
    pub(crate) show_spinner: Option<bool>,
    pub(crate) bar_selector: Option<String>,
    pub(crate) spinner_selector: Option<String>,
    pub(crate) parent: Option<Parent<E>>,
    pub(crate) position_using: Option<Positioning>,
    pub(crate) direction: Option<Direction>,
}

impl<E> Default for Options<E> {
    fn default() -> Self {
        Self {
            minimum: None,
            maximum: None,
            template: None,
            easing: None,
            speed: None,
            trickle: None,
            trickle_speed: None,
            show_spinner: None,
            bar_selector: None,
            spinner_selector: None,
            parent: None,
            position_using: None,
            direction: None,
        }
    }
}

impl<E> Options<E> {
    /// Creates an empty set of options.
    pub fn new() -> Self {
        Options::default()
    }

    /// Return `true` if no option was set.
    pub fn is_empty(&self) -> bool {
        self.minimum.is_none()
            && self.maximum.is_none()
            && self.template.is_none()
            && self.easing.is_none()
            && self.speed.is_none()
            && self.trickle.is_none()
            && self.trickle_speed.is_none()
            && self.show_spinner.is_none()
            && self.bar_selector.is_none()
            && self.spinner_selector.is_none()
            && self.parent.is_none()
            && self.position_using.is_none()
            && self.direction.is_none()
    }

    /// Set the lower clamp bound.
    pub fn minimum(mut self, minimum: f64) -> Self {
        self.minimum = Some(minimum);
        self
    }

    /// Set the upper clamp bound.
    pub fn maximum(mut self, maximum: f64) -> Self {
        self.maximum = Some(maximum);
        self
    }

    /// Set the markup of the mounted element.
    ///
    /// The markup must contain an element matching the bar selector. The
    /// spinner is optional.
    pub fn template(mut self, template: impl Into<String>) -> Self {
        self.template = Some(template.into());
        self
    }

    /// Set the CSS easing token, e.g. `"ease"` or `"cubic-bezier(0,1,0,1)"`.
    pub fn easing(mut self, easing: impl Into<String>) -> Self {
        self.easing = Some(easing.into());
        self
    }

    /// Set the duration of each transition phase.
    pub fn speed(mut self, speed: Duration) -> Self {
        self.speed = Some(speed);
        self
    }

    /// Enable or disable the automatic background increment.
    pub fn trickle(mut self, trickle: bool) -> Self {
        self.trickle = Some(trickle);
        self
    }

    /// Set the delay between two automatic increments.
    pub fn trickle_speed(mut self, trickle_speed: Duration) -> Self {
        self.trickle_speed = Some(trickle_speed);
        self
    }

    /// Keep or remove the spinner.
    pub fn show_spinner(mut self, show_spinner: bool) -> Self {
        self.show_spinner = Some(show_spinner);
        self
    }

    /// Set the selector locating the bar inside the template.
    pub fn bar_selector(mut self, selector: impl Into<String>) -> Self {
        self.bar_selector = Some(selector.into());
        self
    }

    /// Set the selector locating the spinner inside the template.
    pub fn spinner_selector(mut self, selector: impl Into<String>) -> Self {
        self.spinner_selector = Some(selector.into());
        self
    }

    /// Set the mount point, either a selector or an element.
    ///
    /// Selectors are resolved on every mount and fall back to the body when
    /// they match nothing.
    pub fn parent(mut self, parent: impl Into<Parent<E>>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    /// Force a positioning strategy instead of probing the host.
    pub fn position_using(mut self, positioning: Positioning) -> Self {
        self.position_using = Some(positioning);
        self
    }

    /// Set the fill direction.
    pub fn direction(mut self, direction: Direction) -> Self {
        self.direction = Some(direction);
        self
    }
}
