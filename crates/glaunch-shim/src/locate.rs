//! Candidate path resolution across install topologies.
//!
//! Each package-manager layout is one [`CandidateSource`]; the [`Locator`]
//! owns the priority order. Sources only construct paths, they never
//! fail: a topology that does not apply, or any filesystem error while
//! probing it, yields no candidate and the chain moves on.

use crate::error::{Error, Result};
use glaunch_platform::PlatformKey;
use regex::Regex;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Everything resolution needs from the environment, injectable so tests
/// can point it at fixture trees.
#[derive(Debug, Clone)]
pub struct ResolveContext {
    /// Directory containing the launcher executable.
    pub launcher_dir: PathBuf,
    /// The invoking user's home directory, if one is known.
    pub home: Option<PathBuf>,
    /// Logical tool name, e.g. `glm-plan-usage`.
    pub tool: String,
    /// Platform-suffixed file name of the target executable.
    pub binary_name: String,
}

impl ResolveContext {
    pub fn new(launcher_dir: PathBuf, home: Option<PathBuf>, tool: &str) -> Self {
        let binary_name = if cfg!(windows) {
            format!("{tool}.exe")
        } else {
            tool.to_owned()
        };
        Self {
            launcher_dir,
            home,
            tool: tool.to_owned(),
            binary_name,
        }
    }

    /// Context for the running process: launcher directory from the
    /// current executable, home directory from the environment.
    pub fn from_environment(tool: &str) -> io::Result<Self> {
        let exe = std::env::current_exe()?;
        let launcher_dir = exe
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        Ok(Self::new(launcher_dir, home::home_dir(), tool))
    }
}

/// The single chosen executable for this run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedBinary {
    pub path: PathBuf,
    /// Whether the hit came from the user-level integration path rather
    /// than a package-manager layout.
    pub is_override: bool,
}

/// The user-level integration path: `<home>/.claude/<tool>/<binary>`.
///
/// Populated by the installer, independent of any package manager, and
/// pre-empting every package-resolved candidate when present.
pub fn override_path(cx: &ResolveContext) -> Option<PathBuf> {
    cx.home
        .as_ref()
        .map(|home| home.join(".claude").join(&cx.tool).join(&cx.binary_name))
}

/// One install-topology hypothesis.
pub trait CandidateSource {
    /// Short tag for diagnostics.
    fn describe(&self) -> &'static str;

    /// The path this topology would place the binary at, or `None` when
    /// the topology does not apply here. Existence is the locator's job.
    fn candidate(&self, cx: &ResolveContext, package: &str) -> Option<PathBuf>;
}

/// Flat hoisted layout used by npm and yarn:
/// `<launcher-dir>/../node_modules/<package>/<binary>`.
pub struct FlatLayout;

impl CandidateSource for FlatLayout {
    fn describe(&self) -> &'static str {
        "flat node_modules"
    }

    fn candidate(&self, cx: &ResolveContext, package: &str) -> Option<PathBuf> {
        Some(
            cx.launcher_dir
                .join("..")
                .join("node_modules")
                .join(package)
                .join(&cx.binary_name),
        )
    }
}

/// Module-resolver lookup: walk the launcher directory and its ancestors
/// for `node_modules/<package>/package.json`, the way the host module
/// resolver would, and take the binary from the manifest's directory.
pub struct ManifestLookup;

impl CandidateSource for ManifestLookup {
    fn describe(&self) -> &'static str {
        "manifest lookup"
    }

    fn candidate(&self, cx: &ResolveContext, package: &str) -> Option<PathBuf> {
        for dir in cx.launcher_dir.ancestors() {
            let package_dir = dir.join("node_modules").join(package);
            if package_dir.join("package.json").exists() {
                return Some(package_dir.join(&cx.binary_name));
            }
        }
        None
    }
}

/// pnpm virtual-store layout:
/// `<store>/<package>@<version>/node_modules/<package>/<binary>`, where
/// `<store>` is an ancestor path segment ending in `.pnpm`.
pub struct StoreScan;

impl StoreScan {
    fn store_root(dir: &Path) -> Option<&Path> {
        dir.ancestors().find(|a| {
            a.file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.ends_with(".pnpm"))
        })
    }

    /// Scan the store root for exactly one entry named
    /// `<escaped-package>@<version>`. Zero or multiple matches resolve to
    /// no candidate rather than an arbitrary pick.
    fn unique_entry(root: &Path, package: &str) -> Option<PathBuf> {
        let encoded = package.replace('/', "+");
        let pattern = Regex::new(&format!("^{}@", regex::escape(&encoded))).ok()?;

        let mut matched = None;
        for entry in fs::read_dir(root).ok()?.flatten() {
            let name = entry.file_name();
            let Some(name) = name.to_str() else { continue };
            if pattern.is_match(name) {
                if matched.replace(entry.path()).is_some() {
                    tracing::debug!(%package, "multiple store entries, refusing to guess");
                    return None;
                }
            }
        }
        matched
    }
}

impl CandidateSource for StoreScan {
    fn describe(&self) -> &'static str {
        "pnpm store scan"
    }

    fn candidate(&self, cx: &ResolveContext, package: &str) -> Option<PathBuf> {
        let root = Self::store_root(&cx.launcher_dir)?;
        let entry = Self::unique_entry(root, package)?;
        Some(
            entry
                .join("node_modules")
                .join(package)
                .join(&cx.binary_name),
        )
    }
}

/// Ordered resolution over the install topologies, with the integration
/// override as a hard priority rule in front of the chain.
pub struct Locator {
    key: PlatformKey,
    sources: Vec<Box<dyn CandidateSource>>,
}

impl Locator {
    pub fn new(key: PlatformKey) -> Self {
        Self {
            key,
            sources: vec![
                Box::new(FlatLayout),
                Box::new(ManifestLookup),
                Box::new(StoreScan),
            ],
        }
    }

    /// Resolve the one binary for this run. The override short-circuits
    /// package resolution entirely, even on platforms with no published
    /// package.
    pub fn resolve(&self, cx: &ResolveContext) -> Result<ResolvedBinary> {
        if let Some(path) = override_path(cx) {
            // exists() follows links, so a symlinked or hard-linked
            // integration binary counts.
            if path.exists() {
                return Ok(ResolvedBinary {
                    path,
                    is_override: true,
                });
            }
        }
        self.resolve_package(cx)
    }

    /// Resolve through the package-manager layouts only, ignoring the
    /// integration override. Used by the installer so it never selects
    /// the override as its own copy source.
    pub fn resolve_package(&self, cx: &ResolveContext) -> Result<ResolvedBinary> {
        let package =
            self.key
                .package_name(&cx.tool)
                .ok_or_else(|| Error::UnsupportedPlatform {
                    os: self.key.os_raw().to_owned(),
                    arch: self.key.arch_raw().to_owned(),
                })?;

        let mut attempted = Vec::new();
        for source in &self.sources {
            let Some(path) = source.candidate(cx, &package) else {
                tracing::debug!(source = source.describe(), "topology does not apply");
                continue;
            };
            if path.exists() {
                tracing::debug!(source = source.describe(), path = %path.display(), "resolved");
                return Ok(ResolvedBinary {
                    path,
                    is_override: false,
                });
            }
            attempted.push(path);
        }

        Err(Error::NotFound {
            key: self.key.key(),
            package,
            attempted,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cx(launcher_dir: &Path) -> ResolveContext {
        ResolveContext::new(launcher_dir.to_path_buf(), None, "glm-plan-usage")
    }

    #[test]
    fn test_flat_layout_candidate_shape() {
        let cx = cx(Path::new("/opt/tool/lib"));
        let path = FlatLayout
            .candidate(&cx, "glm-plan-usage-linux-x64")
            .unwrap();
        assert_eq!(
            path,
            Path::new("/opt/tool/lib/../node_modules/glm-plan-usage-linux-x64")
                .join(&cx.binary_name)
        );
    }

    #[test]
    fn test_store_root_detection() {
        assert_eq!(
            StoreScan::store_root(Path::new(
                "/repo/node_modules/.pnpm/pkg@1.0.0/node_modules/pkg"
            )),
            Some(Path::new("/repo/node_modules/.pnpm"))
        );
        assert_eq!(StoreScan::store_root(Path::new("/repo/node_modules/pkg")), None);
    }

    #[test]
    fn test_store_root_takes_deepest_segment() {
        assert_eq!(
            StoreScan::store_root(Path::new("/a/.pnpm/b/.pnpm/c")),
            Some(Path::new("/a/.pnpm/b/.pnpm"))
        );
    }

    #[test]
    fn test_override_path_needs_home() {
        let cx = cx(Path::new("/opt"));
        assert_eq!(override_path(&cx), None);

        let with_home = ResolveContext::new(
            PathBuf::from("/opt"),
            Some(PathBuf::from("/home/u")),
            "glm-plan-usage",
        );
        let path = override_path(&with_home).unwrap();
        assert_eq!(
            path,
            Path::new("/home/u/.claude/glm-plan-usage").join(&with_home.binary_name)
        );
    }
}
