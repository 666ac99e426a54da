//! Tracing initialization and configuration.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// Initialize the Rolecall tracing/logging system.
///
/// Reads the `ROLECALL_LOG` environment variable for per-subsystem levels.
/// Format: `ROLECALL_LOG=rolecall_extract=debug,rolecall_storage=warn`
///
/// Falls back to `rolecall=info` if `ROLECALL_LOG` is unset or invalid.
/// Calling it more than once is safe; only the first call installs a
/// subscriber, and an already-installed global subscriber is left alone.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env("ROLECALL_LOG")
            .unwrap_or_else(|_| EnvFilter::new("rolecall=info"));

        let _ = tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_file(true)
                    .with_line_number(true),
            )
            .with(filter)
            .try_init();
    });
}
