//! Progress controller, its animation queue and the trickle timer.
//!
//! This module provides the [`ProgressController`] that maps progress
//! updates onto document mutations and CSS transitions.
//!
//! # Overview
//!
//! - `progress` - The public [`ProgressController`] operations
//! - `queue` - The serialized animation queue and its [`Phase`]
//! - `trickle` - The automatic increment heuristic and its timer
//!
//! # Document contract
//!
//! The controller mounts a single element with id [`ELEMENT_ID`] under the
//! configured parent. While it is mounted the document root carries
//! [`BUSY_CLASS`], and a parent other than the body carries
//! [`CUSTOM_PARENT_CLASS`]. Both classes are removed on unmount.
//!
//! # Examples
//!
//! ```rust
//! use pagebar::controller::{BUSY_CLASS, ELEMENT_ID};
//! use pagebar::host::Host;
//! use pagebar::{MemoryHost, ProgressController};
//!
//! let progress = ProgressController::new(MemoryHost::new());
//! let element = progress.render();
//!
//! let host = progress.host();
//! assert_eq!(host.element_by_id(ELEMENT_ID), Some(element));
//! assert!(host.has_class(host.root(), BUSY_CLASS));
//!
//! progress.remove();
//! assert!(!progress.is_rendered());
//! ```

mod inner;
mod progress;
mod queue;
mod trickle;

pub use progress::ProgressController;
pub use queue::Phase;

/// Id of the mounted widget element.
pub const ELEMENT_ID: &str = "nprogress";

/// Class set on the document root while the widget is mounted.
pub const BUSY_CLASS: &str = "nprogress-busy";

/// Class set on a mount point other than the body.
pub const CUSTOM_PARENT_CLASS: &str = "nprogress-custom-parent";
