//! Subscriber setup shared by both binaries.
//!
//! The child process owns stdout/stderr, so the launcher stays silent
//! unless `GLAUNCH_LOG` asks for more, and everything it does emit goes
//! to stderr.

use tracing_subscriber::EnvFilter;

pub fn init() {
    let filter =
        EnvFilter::try_from_env("GLAUNCH_LOG").unwrap_or_else(|_| EnvFilter::new("error"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
