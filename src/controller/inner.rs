//! Shared state behind every controller handle, and the document plumbing
//! used both by the public operations and the animation worker.

use super::queue::{AnimationStep, Phase};
use super::{BUSY_CLASS, CUSTOM_PARENT_CLASS, ELEMENT_ID};
use crate::config::{Parent, Positioning, Settings};
use crate::host::Host;
use crate::style::{position_css, to_bar_perc};

use std::sync::{Mutex, MutexGuard, PoisonError};
use tokio::sync::mpsc;
use tracing::{debug, warn};

#[derive(Debug)]
pub(crate) struct State<E> {
    pub(crate) settings: Settings<E>,
    /// `None` when not started or completed.
    pub(crate) status: Option<f64>,
    pub(crate) paused: bool,
    pub(crate) phase: Phase,
    /// Producer side of the animation queue, created with its worker on
    /// first use.
    pub(crate) queue: Option<mpsc::UnboundedSender<AnimationStep>>,
}

impl<E> State<E> {
    pub(crate) fn new(settings: Settings<E>) -> Self {
        Self {
            settings,
            status: None,
            paused: false,
            phase: Phase::Idle,
            queue: None,
        }
    }

    /// A zero status counts as not started, like an absent one.
    pub(crate) fn is_active(&self) -> bool {
        matches!(self.status, Some(n) if n != 0.0)
    }
}

pub(crate) struct Inner<H: Host> {
    pub(crate) host: H,
    state: Mutex<State<H::Element>>,
}

impl<H: Host> Inner<H> {
    pub(crate) fn new(host: H, settings: Settings<H::Element>) -> Self {
        Self {
            host,
            state: Mutex::new(State::new(settings)),
        }
    }

    /// Lock the state. Never hold the guard across an `.await`.
    pub(crate) fn state(&self) -> MutexGuard<'_, State<H::Element>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn set_phase(&self, phase: Phase) {
        self.state().phase = phase;
    }

    /// Positioning strategy, probing the host the first time it is needed.
    pub(crate) fn resolve_positioning(&self, state: &mut State<H::Element>) -> Positioning {
        if state.settings.position_using == Positioning::Auto {
            let positioning = self.host.capabilities().positioning();
            debug!(?positioning, "resolved positioning strategy");
            state.settings.position_using = positioning;
        }
        state.settings.position_using
    }

    /// Mount point, or the body when the configured selector matches nothing.
    pub(crate) fn parent(&self, settings: &Settings<H::Element>) -> H::Element {
        match &settings.parent {
            Parent::Element(element) => element.clone(),
            Parent::Selector(selector) => self.host.select(selector).unwrap_or_else(|| {
                warn!(%selector, "mount point not found, using the body");
                self.host.body()
            }),
        }
    }

    /// Mount the widget unless it already is, returning its element.
    ///
    /// The bar starts at 0 for a first-start render and at `previous`
    /// otherwise.
    pub(crate) fn render_with(
        &self,
        state: &mut State<H::Element>,
        from_start: bool,
        previous: Option<f64>,
    ) -> H::Element {
        let host = &self.host;
        if let Some(existing) = host.element_by_id(ELEMENT_ID) {
            return existing;
        }

        host.add_class(&host.root(), BUSY_CLASS);
        let progress = host.create_element(ELEMENT_ID, &state.settings.template);

        let positioning = self.resolve_positioning(state);
        let from = if from_start { 0.0 } else { previous.unwrap_or(0.0) };
        let perc = to_bar_perc(from, state.settings.direction);
        match host.query(&progress, &state.settings.bar_selector) {
            Some(bar) => host.apply_style(
                &bar,
                &position_css(perc, positioning).with("transition", "all 0 linear"),
            ),
            None => warn!(selector = %state.settings.bar_selector, "template has no bar element"),
        }

        if !state.settings.show_spinner {
            if let Some(spinner) = host.query(&progress, &state.settings.spinner_selector) {
                host.remove_element(&spinner);
            }
        }

        let parent = self.parent(&state.settings);
        if parent != host.body() {
            host.add_class(&parent, CUSTOM_PARENT_CLASS);
        }
        host.append_child(&parent, &progress);
        debug!(from, "progress element mounted");

        progress
    }

    /// Unmount the widget and clear both marker classes.
    pub(crate) fn remove(&self) {
        let host = &self.host;
        host.remove_class(&host.root(), BUSY_CLASS);

        let parent = self.state().settings.parent.clone();
        let parent = match parent {
            Parent::Element(element) => Some(element),
            Parent::Selector(selector) => host.select(&selector),
        };
        if let Some(parent) = parent {
            host.remove_class(&parent, CUSTOM_PARENT_CLASS);
        }

        if let Some(progress) = host.element_by_id(ELEMENT_ID) {
            host.remove_element(&progress);
            debug!("progress element removed");
        }
    }
}

/// Inclusive clamp that tolerates inverted bounds instead of panicking.
///
/// `NaN` is pinned to the lower bound.
pub(crate) fn clamp(n: f64, min: f64, max: f64) -> f64 {
    if n.is_nan() || n < min {
        min
    } else if n > max {
        max
    } else {
        n
    }
}
