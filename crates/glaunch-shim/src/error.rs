//! Error types for resolution and delegation.
//!
//! Probing errors never appear here: every filesystem or subprocess
//! failure during resolution downgrades to "no candidate", and only total
//! exhaustion of the strategy chain surfaces as [`Error::NotFound`].

use std::io;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("unsupported platform: no binary is published for {os}-{arch}")]
    UnsupportedPlatform { os: String, arch: String },

    #[error("binary not found for {key} (package '{package}')")]
    NotFound {
        key: String,
        package: String,
        attempted: Vec<PathBuf>,
    },

    #[error("failed to launch {path}: {source}")]
    Spawn {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to set up integration binary: {source}")]
    Integrate {
        #[source]
        source: io::Error,
    },
}
