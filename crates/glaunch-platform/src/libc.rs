//! Linux C runtime family detection.
//!
//! The probe asks the dynamic linker to report its own version and
//! classifies the text. It must never fail or stall the launcher: any
//! probe error, garbage output, or timeout degrades to the glibc default,
//! which is the dominant distribution target.

use once_cell::sync::Lazy;
use regex::Regex;
use std::process::{Command, Stdio};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

/// C runtime family, with the parsed glibc version when the probe
/// reported one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Libc {
    Glibc { version: Option<(u32, u32)> },
    Musl,
}

impl Libc {
    /// Fallback classification when the probe yields nothing usable.
    pub const DEFAULT: Libc = Libc::Glibc { version: None };

    pub fn family(&self) -> &'static str {
        match self {
            Libc::Glibc { .. } => "glibc",
            Libc::Musl => "musl",
        }
    }
}

const PROBE_TIMEOUT: Duration = Duration::from_secs(1);

// "ldd (GNU libc) 2.35" and "ldd (Ubuntu GLIBC 2.35-0ubuntu3) 2.35" both
// carry the version right after the libc marker.
static GLIBC_VERSION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:GNU libc|GLIBC)\D*(\d+)\.(\d+)").expect("glibc version pattern"));

/// Classify dynamic-linker version text. Pure; never fails.
pub fn classify(output: &str) -> Libc {
    if output.contains("musl") {
        return Libc::Musl;
    }
    let Some(caps) = GLIBC_VERSION.captures(output) else {
        return Libc::DEFAULT;
    };
    match (caps[1].parse(), caps[2].parse()) {
        (Ok(major), Ok(minor)) => Libc::Glibc {
            version: Some((major, minor)),
        },
        _ => Libc::DEFAULT,
    }
}

/// Detect the current C runtime family via `ldd --version`.
pub fn detect() -> Libc {
    detect_with(|| probe_command("ldd", &["--version"], PROBE_TIMEOUT))
}

/// Detection with an injectable probe. The probe returns the linker's
/// version text, or `None` for any failure mode.
pub fn detect_with<P>(probe: P) -> Libc
where
    P: FnOnce() -> Option<String>,
{
    match probe() {
        Some(output) => classify(&output),
        None => {
            tracing::debug!("libc probe failed, assuming glibc");
            Libc::DEFAULT
        }
    }
}

/// Run a short-lived diagnostic command, bounded by `timeout`.
///
/// Output collection happens on a helper thread; on timeout the probe is
/// abandoned (the reaper collects the child) and `None` is returned so
/// the caller falls back to the default classification. musl's ldd
/// reports on stderr and exits non-zero, so both streams are captured
/// and the exit status is ignored.
pub(crate) fn probe_command(program: &str, args: &[&str], timeout: Duration) -> Option<String> {
    let child = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .ok()?;

    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let _ = tx.send(child.wait_with_output());
    });

    let output = rx.recv_timeout(timeout).ok()?.ok()?;
    let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
    text.push_str(&String::from_utf8_lossy(&output.stderr));
    Some(text)
}
