//! Platform identification for the launcher.
//!
//! # Architecture
//!
//! Everything here is derived from the execution environment once per
//! process and never persisted. [`os`] and [`arch`] hold the pure name
//! mappings, [`libc`] the best-effort Linux C-runtime probe, and
//! [`PlatformKey`] combines them into the canonical identifiers used to
//! name distribution artifacts and platform packages.

pub use key::PlatformKey;
pub use libc::Libc;

pub mod arch;
pub mod key;
pub mod libc;
pub mod os;
