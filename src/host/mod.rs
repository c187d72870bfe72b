//! Host document abstraction.
//!
//! The controller never touches a rendering engine directly. Every mutation
//! it needs goes through the [`Host`] trait: creating the widget element from
//! its template, looking elements up, toggling marker classes and applying
//! inline styles. Browser bindings implement it over the real DOM; the
//! [`MemoryHost`] keeps an in-memory document instead and is what the tests
//! and headless applications use.
//!
//! # Overview
//!
//! - [`Host`] - The document operations the controller relies on
//! - [`Capabilities`] - Style features used to pick the positioning strategy
//! - [`MemoryHost`] - An in-memory document implementing [`Host`]

pub mod memory;

pub use memory::{MemoryHost, NodeId};

use crate::config::Positioning;
use crate::style::Style;

use std::fmt::Debug;

/// Style features supported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    /// 3D transforms (`translate3d`, `perspective`) are available.
    pub transform_3d: bool,
    /// 2D transforms (`translate`) are available.
    pub transform_2d: bool,
}

impl Default for Capabilities {
    fn default() -> Self {
        Self {
            transform_3d: true,
            transform_2d: true,
        }
    }
}

impl Capabilities {
    /// A host without any transform support.
    pub fn none() -> Self {
        Self {
            transform_3d: false,
            transform_2d: false,
        }
    }

    /// Most capable positioning strategy the host supports.
    ///
    /// 3D transforms win over 2D transforms, which win over the margin
    /// fallback.
    pub fn positioning(&self) -> Positioning {
        if self.transform_3d {
            Positioning::Translate3d
        } else if self.transform_2d {
            Positioning::Translate
        } else {
            Positioning::Margin
        }
    }
}

/// Document operations required by the progress controller.
///
/// Lookups return `None` when nothing matches; the controller treats missing
/// elements as optional and skips them.
pub trait Host: Send + Sync + 'static {
    /// Handle to an element of the document.
    type Element: Clone + PartialEq + Debug + Send + Sync + 'static;

    /// The document root (`<html>`).
    fn root(&self) -> Self::Element;

    /// The document body.
    fn body(&self) -> Self::Element;

    /// Find an element attached to the document by its id.
    fn element_by_id(&self, id: &str) -> Option<Self::Element>;

    /// Find the first element attached to the document matching `selector`.
    fn select(&self, selector: &str) -> Option<Self::Element>;

    /// Find the first descendant of `scope` matching `selector`.
    fn query(&self, scope: &Self::Element, selector: &str) -> Option<Self::Element>;

    /// Create a detached element with the given id and inner markup.
    fn create_element(&self, id: &str, inner_html: &str) -> Self::Element;

    /// Append `child` as the last child of `parent`.
    fn append_child(&self, parent: &Self::Element, child: &Self::Element);

    /// Detach an element from its parent.
    fn remove_element(&self, element: &Self::Element);

    fn add_class(&self, element: &Self::Element, class: &str);

    fn remove_class(&self, element: &Self::Element, class: &str);

    /// Apply inline style declarations, keeping the other properties.
    fn apply_style(&self, element: &Self::Element, style: &Style);

    /// Force a layout so the next style change starts a transition.
    fn reflow(&self, _element: &Self::Element) {}

    /// Style features of the host, queried once per controller.
    fn capabilities(&self) -> Capabilities;
}
