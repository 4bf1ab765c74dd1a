//! `glm-plan-usage-setup`: the postinstall collaborator.
//!
//! Finds the platform package binary and links or copies it into the
//! user-level integration directory so later launches resolve in one
//! existence check. Runs from the package postinstall hook, so nothing
//! here may fail the surrounding npm install: every outcome exits zero.

use anyhow::{Context, Result};
use glaunch_platform::PlatformKey;
use glaunch_shim::{Error, Locator, ResolveContext, integrate};
use std::env;
use std::path::PathBuf;

#[path = "trace.rs"]
mod trace;

const TOOL: &str = "glm-plan-usage";

fn main() {
    trace::init();
    let silent = is_silent();

    if !silent {
        println!("Setting up {TOOL}...");
    }

    match run() {
        Ok(Some(target)) => {
            if !silent {
                println!("{TOOL} is ready at {}", target.display());
            }
        }
        Ok(None) => {
            if !silent {
                println!("binary package not installed, skipping setup");
            }
        }
        Err(err) => {
            if !silent {
                println!("note: could not set up the integration directory: {err:#}");
                println!("{TOOL} will still work through package resolution");
            }
        }
    }
}

fn is_silent() -> bool {
    env::var("npm_config_loglevel").is_ok_and(|v| v == "silent")
        || env::var("GLM_PLAN_USAGE_SKIP_POSTINSTALL").is_ok_and(|v| v == "1")
}

fn run() -> Result<Option<PathBuf>> {
    let cx = ResolveContext::from_environment(TOOL)
        .context("cannot determine launcher location")?;
    let locator = Locator::new(PlatformKey::detect().clone());

    // Package layouts only: resolving through the override here would
    // make the installer copy its own previous output onto itself.
    let resolved = match locator.resolve_package(&cx) {
        Ok(resolved) => resolved,
        Err(Error::NotFound { .. } | Error::UnsupportedPlatform { .. }) => return Ok(None),
        Err(err) => return Err(err.into()),
    };

    let target = integrate::install_override(&cx, &resolved.path)
        .context("install into integration directory failed")?;
    Ok(Some(target))
}
