//! Binary resolution and delegation for the launcher.
//!
//! # Architecture
//!
//! The launcher is a mechanism, not policy: it maps the current platform
//! to the one binary the distribution shipped for it and executes that
//! binary with the caller's arguments, stdio, and environment.
//!
//! [`CandidateSource`] is the contract for a single install-topology
//! hypothesis. [`Locator`] evaluates the ordered chain after applying the
//! hard priority rule for the user-level integration override, and returns
//! the first candidate that exists on disk.
//!
//! # Example
//!
//! ```no_run
//! use glaunch_platform::PlatformKey;
//! use glaunch_shim::{delegate, Locator, ResolveContext};
//!
//! let cx = ResolveContext::from_environment("glm-plan-usage")?;
//! let locator = Locator::new(PlatformKey::detect().clone());
//! let resolved = locator.resolve(&cx)?;
//! let code = delegate(&resolved.path, std::env::args_os().skip(1))?;
//! std::process::exit(code);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub use error::{Error, Result};
pub use exec::delegate;
pub use locate::{
    CandidateSource, FlatLayout, Locator, ManifestLookup, ResolveContext, ResolvedBinary,
    StoreScan, override_path,
};

mod error;
mod exec;
pub mod integrate;
mod locate;
