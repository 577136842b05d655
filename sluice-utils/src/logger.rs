//! Logging setup.
//!
//! Library code logs through the `log` facade. Hosts call [`init`] once at startup to
//! route those records (and any `tracing` spans) into a `tracing-subscriber` formatter.

use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Installs the global subscriber, reading `RUST_LOG` and falling back to `default_level`.
///
/// Returns false if a subscriber was already installed.
pub fn init(default_level: LevelFilter) -> bool {
    let filter = EnvFilter::builder()
        .with_default_directive(default_level.into())
        .from_env_lossy();

    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .is_ok();

    if installed {
        log::debug!("Logger initialised at {default_level}");
    }
    installed
}

/// Installs a subscriber that writes through the test harness so output is captured per test.
///
/// Safe to call from every test; only the first call installs anything.
pub fn init_for_tests() {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::DEBUG.into())
        .from_env_lossy();

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}
