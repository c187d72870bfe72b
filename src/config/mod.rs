//! Configuration of the progress controller.
//!
//! The config module is organized into two components:
//!
//! - `settings` - The live [`Settings`] with their defaults and validation
//! - `options` - The partial [`Options`] merged by
//!   [`ProgressController::configure`](crate::ProgressController::configure)
//!
//! # Examples
//!
//! ```rust
//! use pagebar::config::{Options, Positioning};
//! use pagebar::{MemoryHost, ProgressController};
//!
//! let progress = ProgressController::new(MemoryHost::new());
//! progress.configure(Options::new().trickle(false).position_using(Positioning::Margin));
//!
//! assert!(!progress.settings().trickle);
//! assert_eq!(progress.settings().position_using, Positioning::Margin);
//! ```

pub mod options;
pub mod settings;

pub use options::Options;
pub use settings::{Direction, Parent, Positioning, Settings, TEMPLATE};
