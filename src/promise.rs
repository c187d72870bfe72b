//! Adapter for asynchronous operations tracked by the progress bar.
//!
//! [`ProgressController::promise`](crate::ProgressController::promise) only
//! needs two things from an operation: whether it already settled, and a way
//! to be called back once it does. [`Settle`] captures exactly that, so any
//! asynchronous result type can be tracked.
//!
//! # Examples
//!
//! ```rust,no_run
//! use futures::FutureExt;
//! use pagebar::{MemoryHost, ProgressController};
//! use std::time::Duration;
//!
//! # async fn example() {
//! let progress = ProgressController::new(MemoryHost::new());
//!
//! let request = async {
//!     tokio::time::sleep(Duration::from_secs(1)).await;
//!     42
//! }
//! .shared();
//!
//! progress.promise(request.clone());
//! assert_eq!(request.await, 42);
//! # }
//! ```

use futures::future::Shared;
use std::future::Future;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::warn;

/// Callback run once an operation settles.
pub type SettleCallback = Box<dyn FnOnce() + Send + 'static>;

/// An asynchronous operation that eventually settles.
pub trait Settle {
    /// Whether the operation already settled.
    fn is_settled(&self) -> bool;

    /// Run `callback` once the operation settles, whatever its outcome.
    fn on_settled(self, callback: SettleCallback);
}

/// Spawn `wait` followed by `callback` on the current runtime.
fn spawn_after<F>(wait: F, callback: SettleCallback)
where
    F: Future + Send + 'static,
{
    match Handle::try_current() {
        Ok(handle) => {
            handle.spawn(async move {
                let _ = wait.await;
                callback();
            });
        }
        Err(_) => warn!("no async runtime available, settlement will not be observed"),
    }
}

impl<Fut> Settle for Shared<Fut>
where
    Fut: Future + Send + 'static,
    Fut::Output: Clone + Send + Sync,
{
    fn is_settled(&self) -> bool {
        self.peek().is_some()
    }

    fn on_settled(self, callback: SettleCallback) {
        spawn_after(self, callback);
    }
}

impl<T> Settle for JoinHandle<T>
where
    T: Send + 'static,
{
    fn is_settled(&self) -> bool {
        self.is_finished()
    }

    fn on_settled(self, callback: SettleCallback) {
        spawn_after(self, callback);
    }
}
