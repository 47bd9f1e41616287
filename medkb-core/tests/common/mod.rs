//! Shared helpers for integration tests

use std::path::{Path, PathBuf};
use std::sync::Once;

pub use medkb_core::testing::{Reply, ScriptedTransport};

static INIT: Once = Once::new();

/// Initialize logging for tests (only once per test run)
pub fn init_test_logging() {
    INIT.call_once(|| {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let _ = tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .with_test_writer()
                    .with_target(true)
                    .with_level(true),
            )
            .with(tracing_subscriber::filter::EnvFilter::from_default_env())
            .try_init();
    });
}

/// Path of a file under `tests/fixtures`
pub fn fixture(relative: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(relative)
}
