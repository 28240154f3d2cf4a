//! Tracing subscriber setup.
//!
//! Diagnostics go to stderr so they never mix with exported samples on
//! stdout. `RUST_LOG` wins over the `--verbose` default when set.

use tracing_subscriber::EnvFilter;

/// Default filter without `--verbose`.
pub const DEFAULT_FILTER: &str = "warn";

/// Default filter with `--verbose`.
pub const VERBOSE_FILTER: &str = "wavtext=debug,wavtext_cli=debug";

/// Builds the filter from `RUST_LOG`, falling back to the verbosity default.
pub fn env_filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if verbose {
            VERBOSE_FILTER
        } else {
            DEFAULT_FILTER
        })
    })
}

/// Installs the global fmt subscriber. Safe to call more than once; later
/// calls are ignored.
pub fn init(verbose: bool) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter(verbose))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_twice_does_not_panic() {
        init(false);
        init(true);
    }
}
