//! Logging setup for test binaries using terrastack.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Filter used when `RUST_LOG` is not set.
pub const DEFAULT_DIRECTIVE: &str = "terrastack=info";

/// Install a global `fmt` subscriber filtered by `RUST_LOG`.
///
/// Returns `false` when a subscriber was already installed; calling it more
/// than once is harmless.
pub fn init() -> bool {
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(env_filter())
        .try_init()
        .is_ok()
}

/// Like [`init`], but writes through the test harness so output is captured
/// per test.
pub fn init_for_tests() -> bool {
    tracing_subscriber::registry()
        .with(fmt::layer().with_test_writer())
        .with(env_filter())
        .try_init()
        .is_ok()
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_is_repeatable() {
        init_for_tests();
        assert!(!init_for_tests());
        assert!(!init());
    }
}
