//! Test support: a process-wide tracing subscriber writing through the test harness.
//!
//! `RUST_LOG` picks the level (default `trace`); only `unshell` targets are shown.

use std::sync::Once;

use tracing_subscriber::{filter::filter_fn, fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// Install the test subscriber once; later calls are no-ops.
pub fn init_test_setup() {
    INIT.call_once(|| {
        let level = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("trace"));
        let layer = fmt::layer()
            .with_test_writer()
            .with_target(true)
            .with_filter(filter_fn(|meta| meta.target().starts_with("unshell")))
            .with_filter(level);

        // another test binary helper may already own the global subscriber
        if tracing_subscriber::registry().with(layer).try_init().is_err() {
            eprintln!("test tracing subscriber already installed");
        }
        tracing::debug!("test setup complete");
    });
}
