//! Tracing initialization for tests.
//!
//! Provides centralized tracing setup with environment-based filtering, so
//! `RUST_LOG=hedges_codec=debug` (or `hedges_codec::repair=trace` for a
//! single module) surfaces span/event output from a test run. A library
//! does not install a global subscriber on behalf of its consumers, so
//! there is no binary-facing `init_tracing` here, only the test-only
//! variant.

#[cfg(test)]
use once_cell::sync::Lazy;

/// Initialize tracing for tests with environment-based filtering.
///
/// Call this once at the start of each test that needs tracing output.
/// Multiple calls are safe (uses `once_cell`).
#[cfg(test)]
pub fn init_test_tracing() {
    static TRACING: Lazy<()> = Lazy::new(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("hedges_codec=warn"));

        fmt()
            .with_env_filter(filter)
            .with_target(true)
            .with_thread_ids(false)
            .with_line_number(true)
            .with_test_writer()
            .init();
    });

    Lazy::force(&TRACING);
}
