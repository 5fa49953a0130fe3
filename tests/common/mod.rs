//! Shared helpers for integration tests

use std::sync::Once;

static TRACING: Once = Once::new();

/// Route `tracing` output through the test harness so it shows up only
/// for failing tests
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::TRACE)
            .with_test_writer()
            .try_init();
    });
}
