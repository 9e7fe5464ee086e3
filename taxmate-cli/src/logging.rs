use std::io::{self, IsTerminal};

use tracing_subscriber::EnvFilter;

/// Initializes logging. Call once at startup.
///
/// Records go to stderr so they never mix with report output on stdout.
/// Level is INFO by default, or whatever RUST_LOG specifies.
pub fn init_default_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(io::stderr().is_terminal())
        .with_writer(io::stderr)
        .init();
}
