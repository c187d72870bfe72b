//! Example driving the progress bar against the in-memory document

use color_eyre::Result;
use pagebar::controller::ELEMENT_ID;
use pagebar::host::Host;
use pagebar::{MemoryHost, Options, ProgressController};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("pagebar=debug")))
        .init();

    let progress = ProgressController::new(MemoryHost::new());
    progress.configure(Options::new().speed(Duration::from_millis(150)));

    // Simulate a page load: trickle while "fetching", then finish
    progress.start();
    for _ in 0..10 {
        tokio::time::sleep(Duration::from_millis(200)).await;
        report(&progress);
    }

    progress.done();
    while progress.is_rendered() {
        tokio::time::sleep(Duration::from_millis(100)).await;
        report(&progress);
    }

    println!("\nProgress complete, widget removed.");
    Ok(())
}

fn report(progress: &ProgressController<MemoryHost>) {
    let host = progress.host();
    let transform = host
        .element_by_id(ELEMENT_ID)
        .and_then(|widget| host.query(&widget, r#"[role="bar"]"#))
        .and_then(|bar| host.style_of(bar, "transform"))
        .unwrap_or_else(|| "-".to_string());

    println!(
        "status: {:<8} phase: {:<14} bar: {}",
        progress
            .status()
            .map(|n| format!("{:.3}", n))
            .unwrap_or_else(|| "done".to_string()),
        format!("{:?}", progress.phase()),
        transform
    );
}
