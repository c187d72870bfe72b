//! Automatic background increments.
//!
//! Once started, the bar creeps forward on its own with ever smaller steps so
//! it looks busy without ever reaching the end. Only an explicit completion
//! finishes it.

use super::inner::Inner;
use super::progress::ProgressController;
use crate::host::Host;

use std::sync::Weak;
use tokio::runtime::Handle;
use tokio::time::sleep;
use tracing::{trace, warn};

/// Highest value increments alone can reach.
pub(crate) const CEILING: f64 = 0.994;

/// Heuristic increment for the current progress `n`.
pub(crate) fn step_for(n: f64) -> f64 {
    match n {
        n if (0.0..0.2).contains(&n) => 0.1,
        n if (0.2..0.5).contains(&n) => 0.04,
        n if (0.5..0.8).contains(&n) => 0.02,
        n if (0.8..0.99).contains(&n) => 0.005,
        _ => 0.0,
    }
}

/// Spawn a timer chain calling `trickle` every `trickle_speed` until the
/// controller is paused, completed or dropped.
pub(crate) fn spawn<H: Host>(inner: Weak<Inner<H>>) {
    let Ok(handle) = Handle::try_current() else {
        warn!("no async runtime available, trickle disabled");
        return;
    };

    handle.spawn(async move {
        loop {
            let delay = match inner.upgrade() {
                Some(strong) => {
                    let state = strong.state();
                    if state.paused {
                        break;
                    }
                    state.settings.trickle_speed
                }
                None => break,
            };

            sleep(delay).await;

            let Some(strong) = inner.upgrade() else {
                break;
            };
            let progress = ProgressController::from_inner(strong);
            if !progress.is_active() {
                break;
            }
            progress.trickle();
        }
        trace!("trickle stopped");
    });
}
