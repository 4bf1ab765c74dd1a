//! Integration-directory setup.
//!
//! Places the package-resolved binary at the user-level override path so
//! later runs skip package resolution entirely. Concurrent installers are
//! not synchronized; last writer wins.

use crate::error::{Error, Result};
use crate::locate::{ResolveContext, override_path};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Copy or hard-link `source` to `<home>/.claude/<tool>/<binary>`,
/// creating the directory as needed, and return the installed path.
///
/// Windows always copies. Elsewhere any stale target is removed, a hard
/// link is attempted first (cheap, and npm upgrades replace the source
/// inode rather than rewriting it), and a plain copy is the fallback; the
/// result is made executable.
pub fn install_override(cx: &ResolveContext, source: &Path) -> Result<PathBuf> {
    let target = override_path(cx).ok_or_else(|| Error::Integrate {
        source: io::Error::new(io::ErrorKind::NotFound, "no home directory"),
    })?;

    if let Some(dir) = target.parent() {
        fs::create_dir_all(dir).map_err(|source| Error::Integrate { source })?;
    }
    place(source, &target).map_err(|source| Error::Integrate { source })?;

    tracing::debug!(target = %target.display(), "integration binary installed");
    Ok(target)
}

#[cfg(windows)]
fn place(source: &Path, target: &Path) -> io::Result<()> {
    fs::copy(source, target)?;
    Ok(())
}

#[cfg(not(windows))]
fn place(source: &Path, target: &Path) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;

    if target.exists() {
        fs::remove_file(target)?;
    }
    if fs::hard_link(source, target).is_err() {
        fs::copy(source, target)?;
    }
    fs::set_permissions(target, fs::Permissions::from_mode(0o755))
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::os::unix::fs::PermissionsExt;

    fn context(root: &Path) -> ResolveContext {
        ResolveContext::new(
            root.join("lib"),
            Some(root.join("home")),
            "glm-plan-usage",
        )
    }

    #[test]
    fn test_install_creates_executable_target() {
        let dir = tempfile::tempdir().unwrap();
        let cx = context(dir.path());
        let source = dir.path().join("binary");
        fs::write(&source, "#!/bin/sh\nexit 0\n").unwrap();

        let target = install_override(&cx, &source).unwrap();
        assert_eq!(target, override_path(&cx).unwrap());
        assert!(target.exists());
        let mode = fs::metadata(&target).unwrap().permissions().mode();
        assert_eq!(mode & 0o755, 0o755);
    }

    #[test]
    fn test_install_replaces_stale_target() {
        let dir = tempfile::tempdir().unwrap();
        let cx = context(dir.path());
        let source = dir.path().join("binary");
        fs::write(&source, "new").unwrap();

        let target = override_path(&cx).unwrap();
        fs::create_dir_all(target.parent().unwrap()).unwrap();
        fs::write(&target, "stale").unwrap();

        install_override(&cx, &source).unwrap();
        assert_eq!(fs::read_to_string(&target).unwrap(), "new");
    }

    #[test]
    fn test_install_without_home_fails() {
        let dir = tempfile::tempdir().unwrap();
        let cx = ResolveContext::new(dir.path().to_path_buf(), None, "glm-plan-usage");
        let source = dir.path().join("binary");
        fs::write(&source, "bin").unwrap();

        assert!(matches!(
            install_override(&cx, &source),
            Err(Error::Integrate { .. })
        ));
    }
}
