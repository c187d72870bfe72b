#![allow(dead_code)]

use std::time::Duration;
use pagebar::controller::ELEMENT_ID;
use pagebar::host::Host;
use pagebar::style::to_bar_perc;
use pagebar::{Capabilities, Direction, MemoryHost, NodeId, Options, ProgressController};
use tracing_subscriber::EnvFilter;

// Common test constants
pub const TEST_SPEED: Duration = Duration::from_millis(200);
pub const TEST_TRICKLE_SPEED: Duration = Duration::from_millis(200);
pub const TOLERANCE: f64 = 1e-9;

/// Installs a test subscriber, honoring `RUST_LOG`
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

// === Controller Creation Helpers ===

/// Creates a controller with trickling disabled
pub fn create_test_controller() -> ProgressController<MemoryHost> {
    create_test_controller_with_host(MemoryHost::new())
}

/// Creates a controller with trickling disabled on the given host
pub fn create_test_controller_with_host(host: MemoryHost) -> ProgressController<MemoryHost> {
    init_tracing();
    let progress = ProgressController::new(host);
    progress.configure(
        Options::new()
            .trickle(false)
            .speed(TEST_SPEED)
            .trickle_speed(TEST_TRICKLE_SPEED),
    );
    progress
}

/// Creates a controller with trickling enabled
pub fn create_trickling_controller() -> ProgressController<MemoryHost> {
    let progress = create_test_controller();
    progress.configure(Options::new().trickle(true));
    progress
}

/// Creates a host without transform support
pub fn create_margin_only_host() -> MemoryHost {
    MemoryHost::with_capabilities(Capabilities::none())
}

/// Creates a host with 2D transforms only
pub fn create_2d_only_host() -> MemoryHost {
    MemoryHost::with_capabilities(Capabilities {
        transform_3d: false,
        transform_2d: true,
    })
}

// === Document Inspection Helpers ===

/// The mounted widget element
pub fn widget_of(progress: &ProgressController<MemoryHost>) -> Option<NodeId> {
    progress.host().element_by_id(ELEMENT_ID)
}

/// The bar element of the mounted widget
pub fn bar_of(progress: &ProgressController<MemoryHost>) -> Option<NodeId> {
    let widget = widget_of(progress)?;
    progress.host().query(&widget, r#"[role="bar"]"#)
}

/// Inline transform of the bar
pub fn bar_transform(progress: &ProgressController<MemoryHost>) -> Option<String> {
    let bar = bar_of(progress)?;
    progress.host().style_of(bar, "transform")
}

/// Transform placing a left-to-right bar at `n`
pub fn translate3d(n: f64) -> String {
    format!("translate3d({}%,0,0)", to_bar_perc(n, Direction::Ltr))
}

// === Assertion Helpers ===

/// Asserts that the status is present and close to `expected`
pub fn assert_status_near(progress: &ProgressController<MemoryHost>, expected: f64) {
    let status = progress.status().expect("Progress should be started");
    assert!(
        (status - expected).abs() < TOLERANCE,
        "Status {} should be {}",
        status,
        expected
    );
}

/// Asserts that the status respects the configured bounds
pub fn assert_status_within_bounds(progress: &ProgressController<MemoryHost>) {
    let settings = progress.settings();
    if let Some(status) = progress.status() {
        assert!(
            status >= settings.minimum && status < settings.maximum,
            "Status {} should be within [{}, {})",
            status,
            settings.minimum,
            settings.maximum
        );
    }
}

/// Asserts that the widget is mounted exactly once
pub fn assert_mounted_once(progress: &ProgressController<MemoryHost>) {
    assert!(progress.is_rendered(), "Widget should be mounted");
    assert_eq!(progress.host().count_by_id(ELEMENT_ID), 1);
}
