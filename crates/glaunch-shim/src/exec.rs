//! Process delegation with inherited stdio and mirrored exit status.

use crate::error::{Error, Result};
use std::ffi::OsStr;
use std::path::Path;
use std::process::{Command, ExitStatus};

/// Run `target` with `args`, block until it terminates, and return its
/// exit code. Stdio and the environment are inherited from this process
/// untouched; the child owns the terminal for its whole lifetime.
///
/// A spawn failure is a distinct error from "not found": the path existed
/// when resolution checked it, but could not be executed.
pub fn delegate<I, S>(target: &Path, args: I) -> Result<i32>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    ensure_executable(target);

    let status = Command::new(target)
        .args(args)
        .status()
        .map_err(|source| Error::Spawn {
            path: target.to_path_buf(),
            source,
        })?;

    Ok(exit_code(status))
}

fn exit_code(status: ExitStatus) -> i32 {
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            // Shell convention for signal death.
            return 128 + signal;
        }
    }
    status.code().unwrap_or(1)
}

/// Set the execute bit immediately before spawning if it is absent.
/// A failed chmod must not block the run: the spawn itself will report
/// clearly if permissions are truly insufficient.
#[cfg(unix)]
fn ensure_executable(target: &Path) {
    use std::fs;
    use std::os::unix::fs::PermissionsExt;

    let Ok(meta) = fs::metadata(target) else {
        return;
    };
    let mut perms = meta.permissions();
    if perms.mode() & 0o111 != 0 {
        return;
    }
    perms.set_mode(perms.mode() | 0o755);
    if let Err(err) = fs::set_permissions(target, perms) {
        tracing::warn!(path = %target.display(), %err, "could not set execute permission");
    }
}

#[cfg(not(unix))]
fn ensure_executable(_target: &Path) {}
