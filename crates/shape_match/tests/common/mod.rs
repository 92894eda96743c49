//! Shared helpers for the integration tests.

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Route evaluation traces to the test writer.
///
/// Only installs a subscriber when `RUST_LOG` is set, e.g.
/// `RUST_LOG=shape_match=trace cargo test -p shape_match`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            let _ = tracing_subscriber::registry()
                .with(fmt::layer().with_test_writer().with_target(true))
                .with(filter)
                .try_init();
        }
    });
}
