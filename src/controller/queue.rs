//! Serialized animation queue.
//!
//! Every `set` enqueues one [`AnimationStep`]. A single worker task consumes
//! the queue in order and runs each step to completion before taking the
//! next, so transitions never overlap on the bar no matter how fast `set` is
//! called. Steps cannot be cancelled once enqueued.

use super::inner::Inner;
use crate::host::Host;
use crate::style::{bar_position_css, transition, Style};

use std::sync::Weak;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::sleep;
use tracing::trace;

/// What the animation worker is currently doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// No step in flight.
    #[default]
    Idle,
    /// The bar is moving towards its target.
    Transitioning,
    /// The completed widget is fading out.
    Fading,
    /// The widget is being removed from the document.
    Unmounting,
}

/// One queued bar movement.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct AnimationStep {
    /// Clamped progress the bar moves to.
    pub(crate) target: f64,
    /// The target is the configured maximum: fade out and unmount afterwards.
    pub(crate) completes: bool,
    pub(crate) speed: Duration,
    pub(crate) easing: String,
}

/// Worker loop. Ends once every controller handle is dropped.
pub(crate) async fn run<H: Host>(
    inner: Weak<Inner<H>>,
    mut steps: mpsc::UnboundedReceiver<AnimationStep>,
) {
    while let Some(step) = steps.recv().await {
        let Some(inner) = inner.upgrade() else {
            break;
        };
        inner.animate(step).await;
    }
    trace!("animation queue closed");
}

impl<H: Host> Inner<H> {
    /// Move the bar, then hold the queue for the transition time.
    pub(crate) async fn animate(&self, step: AnimationStep) {
        let speed = step.speed;
        let progress = self.begin(&step);

        if !step.completes {
            sleep(speed).await;
            self.set_phase(Phase::Idle);
            return;
        }

        if let Some(progress) = &progress {
            self.host.apply_style(
                progress,
                &Style::new().with("transition", "none").with("opacity", "1"),
            );
            self.host.reflow(progress);
        }
        sleep(speed).await;

        self.set_phase(Phase::Fading);
        if let Some(progress) = &progress {
            self.host.apply_style(
                progress,
                &Style::new()
                    .with("transition", transition(speed, "linear"))
                    .with("opacity", "0.5"),
            );
        }
        sleep(speed).await;

        self.set_phase(Phase::Unmounting);
        self.remove();
        self.set_phase(Phase::Idle);
    }

    /// Run a step without timers, for callers outside an async runtime.
    pub(crate) fn apply_immediately(&self, step: AnimationStep) {
        self.begin(&step);
        if step.completes {
            self.set_phase(Phase::Unmounting);
            self.remove();
        }
        self.set_phase(Phase::Idle);
    }

    /// Apply the bar position of `step`, returning the widget element if
    /// mounted.
    fn begin(&self, step: &AnimationStep) -> Option<H::Element> {
        let (progress, bar, css) = {
            let mut state = self.state();
            state.phase = Phase::Transitioning;
            let positioning = self.resolve_positioning(&mut state);

            let progress = self.host.element_by_id(super::ELEMENT_ID);
            let bar = progress
                .as_ref()
                .and_then(|p| self.host.query(p, &state.settings.bar_selector));
            let css = bar_position_css(
                step.target,
                step.speed,
                &step.easing,
                positioning,
                state.settings.direction,
            );
            (progress, bar, css)
        };

        match bar {
            Some(bar) => {
                trace!(to = step.target, "moving bar");
                self.host.apply_style(&bar, &css);
            }
            None => trace!(to = step.target, "no mounted bar to move"),
        }
        progress
    }
}
