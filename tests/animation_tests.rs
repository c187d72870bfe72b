//! Tests for the timed behavior of the controller.
//!
//! This file covers the animation queue ordering, the completion fade-out,
//! the trickle timer and the promise adapter. Every test runs on a paused
//! clock so timers fire deterministically.

use std::sync::{Arc, Mutex};
use std::time::Duration;
use futures::FutureExt;
use pagebar::controller::BUSY_CLASS;
use pagebar::host::Host;
use pagebar::{Options, Phase, Settle, SettleCallback};
use tokio::time::sleep;

mod common;
use common::helpers::*;

// === Animation queue ===

#[tokio::test(start_paused = true)]
async fn test_queue_serializes_transitions() {
    let progress = create_test_controller();

    progress.set(0.2).set(0.4);

    sleep(Duration::from_millis(1)).await;
    assert_eq!(bar_transform(&progress), Some(translate3d(0.2)));
    assert_eq!(progress.phase(), Phase::Transitioning);

    // Still inside the first transition
    sleep(Duration::from_millis(150)).await;
    assert_eq!(bar_transform(&progress), Some(translate3d(0.2)));

    sleep(Duration::from_millis(100)).await;
    assert_eq!(bar_transform(&progress), Some(translate3d(0.4)));

    sleep(Duration::from_millis(200)).await;
    assert_eq!(progress.phase(), Phase::Idle);
}

#[tokio::test(start_paused = true)]
async fn test_queue_backlog_drains_in_order() {
    let progress = create_test_controller();
    let targets = [0.1, 0.3, 0.5, 0.7, 0.9];

    for n in targets {
        progress.set(n);
    }

    sleep(Duration::from_millis(1)).await;
    for n in targets {
        assert_eq!(bar_transform(&progress), Some(translate3d(n)));
        sleep(TEST_SPEED).await;
    }
    assert_status_near(&progress, 0.9);
}

#[tokio::test(start_paused = true)]
async fn test_status_updates_before_animation() {
    let progress = create_test_controller();

    progress.set(0.2).set(0.4).set(0.6);

    // Status reflects the last call while the bar is still catching up
    assert_status_near(&progress, 0.6);
    sleep(Duration::from_millis(1)).await;
    assert_eq!(bar_transform(&progress), Some(translate3d(0.2)));
}

#[tokio::test(start_paused = true)]
async fn test_pause_lets_queued_steps_finish() {
    let progress = create_test_controller();

    progress.set(0.2).set(0.4);
    progress.pause();

    sleep(Duration::from_millis(250)).await;
    assert_eq!(bar_transform(&progress), Some(translate3d(0.4)));

    sleep(TEST_SPEED).await;
    assert_eq!(progress.phase(), Phase::Idle);
    assert_status_near(&progress, 0.4);
}

#[tokio::test(start_paused = true)]
async fn test_pause_lets_queued_completion_unmount() {
    let progress = create_test_controller();

    progress.set(0.5).set(1.0);
    progress.pause();
    assert_eq!(progress.status(), None);

    sleep(Duration::from_secs(2)).await;
    assert!(!progress.is_rendered());
    assert!(!progress.host().has_class(progress.host().root(), BUSY_CLASS));
    assert!(progress.is_paused());
}

// === Completion ===

#[tokio::test(start_paused = true)]
async fn test_done_fades_out_and_unmounts() {
    let progress = create_test_controller();
    progress.set(0.5);
    sleep(Duration::from_millis(300)).await;

    // t=300: the jump runs until 500, the completing step starts at 500
    progress.done();
    assert_eq!(progress.status(), None);
    let widget = widget_of(&progress).unwrap();
    let host = progress.host();

    sleep(Duration::from_millis(300)).await;
    // t=600: bar is full, widget is still opaque
    assert_eq!(progress.phase(), Phase::Transitioning);
    assert_eq!(bar_transform(&progress), Some(translate3d(1.0)));
    assert_eq!(host.style_of(widget, "opacity"), Some("1".to_string()));
    assert_eq!(host.style_of(widget, "transition"), Some("none".to_string()));

    sleep(Duration::from_millis(200)).await;
    // t=800: fading out
    assert_eq!(progress.phase(), Phase::Fading);
    assert!(progress.is_rendered());
    assert_eq!(host.style_of(widget, "opacity"), Some("0.5".to_string()));
    assert_eq!(
        host.style_of(widget, "transition"),
        Some("all 200ms linear".to_string())
    );

    sleep(Duration::from_millis(150)).await;
    // t=950: removed
    assert_eq!(progress.phase(), Phase::Idle);
    assert!(!progress.is_rendered());
    assert!(!host.is_attached(widget));
    assert!(!host.has_class(host.root(), BUSY_CLASS));
}

#[tokio::test(start_paused = true)]
async fn test_restart_after_completion() {
    let progress = create_test_controller();
    progress.set(0.5).done();
    sleep(Duration::from_secs(2)).await;
    assert!(!progress.is_rendered());

    progress.start();

    assert_status_near(&progress, 0.08);
    assert_mounted_once(&progress);
}

#[tokio::test(start_paused = true)]
async fn test_scheduled_unmount_is_not_cancelled() {
    let progress = create_test_controller();
    progress.set(0.5).set(1.0);

    // A new run starts while the previous completion is still queued
    progress.set(0.3);
    assert!(progress.is_started());

    sleep(Duration::from_secs(2)).await;
    assert!(!progress.is_rendered());
    assert_status_near(&progress, 0.3);
}

// === Trickle ===

#[tokio::test(start_paused = true)]
async fn test_trickle_advances_status() {
    let progress = create_trickling_controller();
    progress.start();
    assert_status_near(&progress, 0.08);

    sleep(Duration::from_millis(250)).await;
    assert_status_near(&progress, 0.18);

    sleep(Duration::from_millis(200)).await;
    assert_status_near(&progress, 0.28);

    sleep(Duration::from_millis(200)).await;
    assert_status_near(&progress, 0.32);
}

#[tokio::test(start_paused = true)]
async fn test_trickle_never_completes() {
    let progress = create_trickling_controller();
    progress.configure(Options::new().trickle_speed(Duration::from_millis(10)));
    progress.start();

    sleep(Duration::from_secs(60)).await;

    let status = progress.status().expect("Trickling alone should never complete the bar");
    assert!(status <= 0.994);
    assert!(status > 0.9);
    assert!(progress.is_rendered());
}

#[tokio::test(start_paused = true)]
async fn test_trickle_stops_after_done() {
    let progress = create_trickling_controller();
    progress.start();
    sleep(Duration::from_millis(250)).await;

    progress.done();
    sleep(Duration::from_secs(2)).await;

    assert_eq!(progress.status(), None);
    assert!(!progress.is_rendered());
}

#[tokio::test(start_paused = true)]
async fn test_trickle_stops_when_paused() {
    let progress = create_trickling_controller();
    progress.start();
    progress.pause();

    sleep(Duration::from_secs(2)).await;
    assert_status_near(&progress, 0.08);

    // Resuming does not restart the timer chain on its own
    progress.resume();
    sleep(Duration::from_secs(2)).await;
    assert_status_near(&progress, 0.08);
}

#[tokio::test(start_paused = true)]
async fn test_start_while_paused_does_not_trickle() {
    let progress = create_trickling_controller();
    progress.pause().start();

    assert_eq!(progress.status(), None);
    progress.resume();
    sleep(Duration::from_secs(1)).await;
    assert_eq!(progress.status(), None);
}

// === Promise adapter ===

#[tokio::test(start_paused = true)]
async fn test_promise_tracks_shared_future() {
    let progress = create_test_controller();
    let operation = async {
        sleep(Duration::from_millis(500)).await;
    }
    .shared();

    progress.promise(operation.clone());
    assert!(progress.is_started());

    sleep(Duration::from_millis(600)).await;
    assert_eq!(progress.status(), None);

    sleep(Duration::from_secs(2)).await;
    assert!(!progress.is_rendered());
}

#[tokio::test(start_paused = true)]
async fn test_promise_ignores_settled_future() {
    let progress = create_test_controller();
    let operation = async { 7 }.shared();
    assert_eq!(operation.clone().await, 7);

    progress.promise(operation);

    assert!(!progress.is_started());
    assert!(!progress.is_rendered());
}

#[tokio::test(start_paused = true)]
async fn test_promise_tracks_join_handle() {
    let progress = create_test_controller();
    let task = tokio::spawn(async {
        sleep(Duration::from_millis(300)).await;
    });

    progress.promise(task);
    assert!(progress.is_started());

    sleep(Duration::from_millis(400)).await;
    assert_eq!(progress.status(), None);
}

/// A hand-rolled operation settled from the test body.
#[derive(Clone, Default)]
struct ManualOperation {
    settled: Arc<Mutex<bool>>,
    callback: Arc<Mutex<Option<SettleCallback>>>,
}

impl ManualOperation {
    fn settle(&self) {
        *self.settled.lock().unwrap() = true;
        if let Some(callback) = self.callback.lock().unwrap().take() {
            callback();
        }
    }
}

impl Settle for ManualOperation {
    fn is_settled(&self) -> bool {
        *self.settled.lock().unwrap()
    }

    fn on_settled(self, callback: SettleCallback) {
        *self.callback.lock().unwrap() = Some(callback);
    }
}

#[tokio::test(start_paused = true)]
async fn test_promise_with_custom_settle() {
    let progress = create_test_controller();
    let operation = ManualOperation::default();

    progress.promise(operation.clone());
    sleep(Duration::from_secs(1)).await;
    assert!(progress.is_started());

    operation.settle();
    assert_eq!(progress.status(), None);
}
