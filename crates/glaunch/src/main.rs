//! `glm-plan-usage` launcher.
//!
//! Resolves the platform-specific binary and delegates to it with the
//! original argument vector, inherited stdio, and the unmodified
//! environment. The launcher defines no flags of its own; everything
//! after the program name belongs to the delegated binary.

use glaunch_platform::PlatformKey;
use glaunch_shim::{Error, Locator, ResolveContext, delegate};
use std::env;
use std::ffi::OsString;

mod trace;

const TOOL: &str = "glm-plan-usage";

fn main() {
    trace::init();

    let args: Vec<OsString> = env::args_os().skip(1).collect();
    std::process::exit(run(&args));
}

fn run(args: &[OsString]) -> i32 {
    let cx = match ResolveContext::from_environment(TOOL) {
        Ok(cx) => cx,
        Err(err) => {
            eprintln!("{TOOL}: cannot determine launcher location: {err}");
            return 1;
        }
    };

    let locator = Locator::new(PlatformKey::detect().clone());
    let resolved = match locator.resolve(&cx) {
        Ok(resolved) => resolved,
        Err(err) => {
            report_resolution_failure(&err);
            return 1;
        }
    };

    match delegate(&resolved.path, args) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{TOOL}: {err}");
            1
        }
    }
}

fn report_resolution_failure(err: &Error) {
    eprintln!("{TOOL}: {err}");
    if let Error::NotFound { attempted, .. } = err {
        for path in attempted {
            eprintln!("  looked in: {}", path.display());
        }
        eprintln!("Try reinstalling: npm install -g {TOOL}");
    }
}
