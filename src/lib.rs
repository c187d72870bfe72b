//! Pagebar is a crate driving a slim progress bar at the top of a page.
//!
//! The caller decides when work starts, how far along it is and when it
//! finishes; pagebar turns those updates into document mutations and CSS
//! transitions. While nothing reports progress, the bar trickles forward on
//! its own so the page still looks busy.
//!
//! # Quick Start
//!
//! ```rust
//! use pagebar::{MemoryHost, Options, ProgressController};
//! use std::time::Duration;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let progress = ProgressController::new(MemoryHost::new());
//! progress.configure(Options::new().speed(Duration::from_millis(100)));
//!
//! progress.start();
//! assert!(progress.is_started());
//!
//! progress.set(0.5);
//! assert_eq!(progress.status(), Some(0.5));
//!
//! progress.done();
//! assert!(!progress.is_started());
//! # }
//! ```
//!
//! # Module Organization
//!
//! - [`controller`] - The [`ProgressController`], its animation queue and trickle timer
//! - [`config`] - [`Settings`] and the partial [`Options`] merged into them
//! - [`host`] - The [`Host`] document abstraction and the in-memory [`MemoryHost`]
//! - [`style`] - Inline CSS declarations and bar position math
//! - [`promise`] - The [`Settle`] capability used to track asynchronous operations
//! - [`error`] - Centralized error handling with the `Error` enum

pub mod config;
pub mod controller;
pub mod error;
pub mod host;
pub mod promise;
pub mod style;

pub use config::{Direction, Options, Parent, Positioning, Settings};
pub use controller::{Phase, ProgressController};
pub use error::{Error, Result};
pub use host::{Capabilities, Host, MemoryHost, NodeId};
pub use promise::{Settle, SettleCallback};
pub use style::Style;
