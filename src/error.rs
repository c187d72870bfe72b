//! Error handling for the pagebar library.
//!
//! The progress bar is a best-effort widget: out of range values are clamped,
//! missing elements are skipped and missing host capabilities degrade to the
//! margin strategy. The only fallible operation is the explicit validation of
//! a configuration, used by callers that prefer to fail fast.

use thiserror::Error;

/// Errors that can happen when using pagebar.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// The configured bounds do not satisfy `0 <= minimum < maximum <= 1`.
    ///
    /// The controller itself tolerates such a configuration and renders
    /// something visually undefined; this variant is only returned by
    /// [`Settings::validate`](crate::Settings::validate) and the constructors
    /// that call it.
    #[error("Invalid bounds: minimum {minimum} and maximum {maximum} must satisfy 0 <= minimum < maximum <= 1")]
    InvalidBounds {
        /// Configured lower bound.
        minimum: f64,
        /// Configured upper bound.
        maximum: f64,
    },
}

/// Result type alias for operations that can fail with a pagebar error.
pub type Result<T> = std::result::Result<T, Error>;
