//! Core progress controller.
//!
//! # Examples
//!
//! ## Tracking a unit of work
//!
//! ```rust,no_run
//! use pagebar::{MemoryHost, ProgressController};
//!
//! # async fn example() {
//! let progress = ProgressController::new(MemoryHost::new());
//!
//! progress.start();
//! // ... the work advances ...
//! progress.set(0.4).inc();
//! // ... and finishes.
//! progress.done();
//! # }
//! ```
//!
//! ## Failing fast on misconfiguration
//!
//! ```rust
//! use pagebar::config::{Options, Settings};
//! use pagebar::{Error, MemoryHost, ProgressController};
//!
//! let settings = Settings::default().merged(Options::new().minimum(0.9).maximum(0.5));
//! let result = ProgressController::try_with_settings(MemoryHost::new(), settings);
//! assert!(matches!(result, Err(Error::InvalidBounds { .. })));
//! ```

use super::inner::{clamp, Inner};
use super::queue::{self, AnimationStep, Phase};
use super::{trickle, ELEMENT_ID};
use crate::config::{Options, Settings};
use crate::error::Result;
use crate::host::Host;
use crate::promise::Settle;

use rand::Rng;
use std::fmt;
use std::sync::{Arc, MutexGuard};
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tracing::{debug, trace, warn};

use super::inner::State;

/// Drives the progress widget of one page.
///
/// A controller is a cheap handle: clones share the same configuration,
/// status and animation queue. Mutating operations return `&Self` so they
/// can be chained, and take effect on the document through an animation
/// queue processed by a background task.
///
/// Animations and trickling need a Tokio runtime. Outside of one, steps are
/// applied immediately and trickling is skipped.
pub struct ProgressController<H: Host> {
    inner: Arc<Inner<H>>,
}

impl<H: Host> Clone for ProgressController<H> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<H: Host> fmt::Debug for ProgressController<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (status, paused, phase, settings) = {
            let state = self.state();
            (state.status, state.paused, state.phase, state.settings.clone())
        };
        f.debug_struct("ProgressController")
            .field("status", &status)
            .field("paused", &paused)
            .field("phase", &phase)
            .field("settings", &settings)
            .finish()
    }
}

impl<H: Host> ProgressController<H> {
    /// Creates a controller with the default settings.
    pub fn new(host: H) -> Self {
        Self::with_settings(host, Settings::default())
    }

    /// Creates a controller with the given settings, without validating them.
    pub fn with_settings(host: H, settings: Settings<H::Element>) -> Self {
        Self {
            inner: Arc::new(Inner::new(host, settings)),
        }
    }

    /// Creates a controller after checking the bounds of `settings`.
    pub fn try_with_settings(host: H, settings: Settings<H::Element>) -> Result<Self> {
        settings.validate()?;
        Ok(Self::with_settings(host, settings))
    }

    pub(crate) fn from_inner(inner: Arc<Inner<H>>) -> Self {
        Self { inner }
    }

    fn state(&self) -> MutexGuard<'_, State<H::Element>> {
        self.inner.state()
    }

    /// The document this controller renders into.
    pub fn host(&self) -> &H {
        &self.inner.host
    }

    /// Merge `options` into the live settings.
    ///
    /// Subsequent operations observe the new values immediately.
    pub fn configure(&self, options: Options<H::Element>) -> &Self {
        self.state().settings.merge(options);
        debug!("progress reconfigured");
        self
    }

    /// Snapshot of the live settings.
    pub fn settings(&self) -> Settings<H::Element> {
        self.state().settings.clone()
    }

    /// Current progress, `None` when not started or completed.
    pub fn status(&self) -> Option<f64> {
        self.state().status
    }

    pub fn is_started(&self) -> bool {
        self.state().status.is_some()
    }

    pub(crate) fn is_active(&self) -> bool {
        self.state().is_active()
    }

    pub fn is_paused(&self) -> bool {
        self.state().paused
    }

    /// What the animation worker is doing right now.
    pub fn phase(&self) -> Phase {
        self.state().phase
    }

    /// Whether the widget element is mounted in the document.
    pub fn is_rendered(&self) -> bool {
        self.inner.host.element_by_id(ELEMENT_ID).is_some()
    }

    /// Move the bar to `n`.
    ///
    /// `n` is clamped into `[minimum, maximum]`. Reaching `maximum` completes
    /// the bar: the status is cleared and the widget fades out and unmounts
    /// once its transition ends. Ignored while paused.
    pub fn set(&self, n: f64) -> &Self {
        let step = {
            let mut state = self.state();
            if state.paused {
                trace!(n, "paused, ignoring set");
                return self;
            }

            let previous = state.status;
            let (minimum, maximum) = (state.settings.minimum, state.settings.maximum);
            let n = clamp(n, minimum, maximum);
            let completes = n == maximum;
            state.status = if completes { None } else { Some(n) };
            debug!(n, completes, "progress set");

            let progress = self
                .inner
                .render_with(&mut state, previous.is_none(), previous);
            self.inner.host.reflow(&progress);

            AnimationStep {
                target: n,
                completes,
                speed: state.settings.speed,
                easing: state.settings.easing.clone(),
            }
        };

        self.enqueue(step);
        self
    }

    /// Hand a step to the animation worker, spawning it on first use.
    fn enqueue(&self, mut step: AnimationStep) {
        let mut state = self.state();
        if let Some(queue) = &state.queue {
            match queue.send(step) {
                Ok(()) => return,
                Err(mpsc::error::SendError(returned)) => step = returned,
            }
        }

        match Handle::try_current() {
            Ok(handle) => {
                let (sender, receiver) = mpsc::unbounded_channel();
                if sender.send(step).is_ok() {
                    state.queue = Some(sender);
                    handle.spawn(queue::run(Arc::downgrade(&self.inner), receiver));
                    trace!("animation worker spawned");
                }
            }
            Err(_) => {
                state.queue = None;
                drop(state);
                warn!("no async runtime available, applying animation step immediately");
                self.inner.apply_immediately(step);
            }
        }
    }

    /// Show the bar and start trickling if enabled.
    pub fn start(&self) -> &Self {
        if !self.is_active() {
            self.set(0.0);
        }

        let (trickle, paused) = {
            let state = self.state();
            (state.settings.trickle, state.paused)
        };
        if trickle && !paused {
            trickle::spawn(Arc::downgrade(&self.inner));
            debug!("trickle started");
        }
        self
    }

    /// Advance by the heuristic step for the current progress.
    ///
    /// Steps shrink as the bar fills up and increments never go past 0.994.
    /// Starts the bar if it is not running yet.
    pub fn inc(&self) -> &Self {
        self.increment(None)
    }

    /// Advance by `amount`, never past 0.994.
    pub fn inc_by(&self, amount: f64) -> &Self {
        self.increment(Some(amount))
    }

    fn increment(&self, amount: Option<f64>) -> &Self {
        let (paused, status) = {
            let state = self.state();
            (state.paused, state.status)
        };
        if paused {
            return self;
        }

        let n = match status {
            Some(n) if n != 0.0 => n,
            _ => return self.start(),
        };
        if n > 1.0 {
            return self;
        }

        let amount = amount.unwrap_or_else(|| trickle::step_for(n));
        self.set(clamp(n + amount, 0.0, trickle::CEILING))
    }

    /// Same as [`inc`](Self::inc); the operation run by the trickle timer.
    pub fn trickle(&self) -> &Self {
        self.inc()
    }

    /// Jump forward and complete the bar. Does nothing if it is not running.
    pub fn done(&self) -> &Self {
        self.finish(false)
    }

    /// Complete the bar, showing it first if it is not running.
    pub fn force_done(&self) -> &Self {
        self.finish(true)
    }

    fn finish(&self, force: bool) -> &Self {
        if !force && !self.is_active() {
            return self;
        }

        let jump = rand::rng().random_range(0.3..0.8);
        let maximum = self.state().settings.maximum;
        debug!(jump, force, "completing progress");
        self.inc_by(jump).set(maximum)
    }

    /// Ignore `set`, `inc` and `trickle` until resumed.
    ///
    /// Steps already queued keep running.
    pub fn pause(&self) -> &Self {
        self.state().paused = true;
        self
    }

    pub fn resume(&self) -> &Self {
        self.state().paused = false;
        self
    }

    /// Track a single asynchronous operation.
    ///
    /// Starts the bar unless `handle` has already settled, and completes it
    /// when `handle` settles.
    pub fn promise<P: Settle>(&self, handle: P) -> &Self {
        if handle.is_settled() {
            return self;
        }

        self.start();
        let progress = self.clone();
        handle.on_settled(Box::new(move || {
            progress.done();
        }));
        self
    }

    /// Mount the widget if needed and return its element.
    ///
    /// Calling it again while mounted returns the same element.
    pub fn render(&self) -> H::Element {
        let mut state = self.state();
        let status = state.status;
        self.inner.render_with(&mut state, false, status)
    }

    /// Unmount the widget and clear the marker classes.
    ///
    /// Safe to call when nothing is mounted. Queued steps are not cancelled.
    pub fn remove(&self) -> &Self {
        self.inner.remove();
        self
    }
}
