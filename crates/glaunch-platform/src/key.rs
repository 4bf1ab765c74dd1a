//! Canonical platform key.

use crate::libc::{self, Libc};
use crate::{arch, os};
use once_cell::sync::Lazy;

/// Platform/architecture pairs with a published binary package, in
/// npm-name form.
const PACKAGED: &[(&str, &str)] = &[
    ("darwin", "x64"),
    ("darwin", "arm64"),
    ("linux", "x64"),
    ("linux", "arm64"),
    ("win32", "x64"),
];

static CURRENT: Lazy<PlatformKey> = Lazy::new(|| {
    let os = std::env::consts::OS;
    // Advisory today: only glibc builds are published. Kept so a musl
    // branch can be added here without touching any caller.
    let libc = (os == "linux").then(libc::detect);
    let key = PlatformKey::new(os, std::env::consts::ARCH, libc);
    tracing::debug!(key = %key.key(), libc = key.libc().map(|l| l.family()), "platform detected");
    key
});

/// Canonical platform identifier, derived once per process from the
/// execution environment.
///
/// Raw runtime names are stored as given; the canonical forms are derived
/// through the [`os`] and [`arch`] mappings, so unrecognized platforms keep
/// their raw spelling all the way into diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformKey {
    os: String,
    arch: String,
    libc: Option<Libc>,
}

impl PlatformKey {
    pub fn new(os: &str, arch: &str, libc: Option<Libc>) -> Self {
        Self {
            os: os.to_owned(),
            arch: arch.to_owned(),
            libc,
        }
    }

    /// The key for the running process.
    pub fn detect() -> &'static Self {
        &CURRENT
    }

    /// Raw operating system name as reported by the runtime.
    pub fn os_raw(&self) -> &str {
        &self.os
    }

    /// Raw architecture name as reported by the runtime.
    pub fn arch_raw(&self) -> &str {
        &self.arch
    }

    pub fn libc(&self) -> Option<Libc> {
        self.libc
    }

    /// Short `<platform>-<arch>` key used in package names,
    /// e.g. `darwin-arm64`.
    pub fn key(&self) -> String {
        format!("{}-{}", os::npm_name(&self.os), arch::npm_name(&self.arch))
    }

    /// Target-triple style artifact name, e.g. `aarch64-apple-darwin`.
    pub fn target_triple(&self) -> String {
        format!(
            "{}-{}",
            arch::triple_name(&self.arch),
            os::triple_name(&self.os)
        )
    }

    /// Name of the platform package carrying the binary, or `None` when
    /// this platform has no published package.
    pub fn package_name(&self, tool: &str) -> Option<String> {
        let pair = (os::npm_name(&self.os), arch::npm_name(&self.arch));
        PACKAGED
            .contains(&pair)
            .then(|| format!("{tool}-{}", self.key()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_for_supported_pairs() {
        let cases = [
            ("macos", "x86_64", "darwin-x64"),
            ("macos", "aarch64", "darwin-arm64"),
            ("linux", "x86_64", "linux-x64"),
            ("linux", "aarch64", "linux-arm64"),
            ("windows", "x86_64", "win32-x64"),
        ];
        for (os, arch, expected) in cases {
            assert_eq!(PlatformKey::new(os, arch, None).key(), expected);
        }
    }

    #[test]
    fn test_target_triple() {
        assert_eq!(
            PlatformKey::new("macos", "aarch64", None).target_triple(),
            "aarch64-apple-darwin"
        );
        assert_eq!(
            PlatformKey::new("linux", "x86_64", None).target_triple(),
            "x86_64-unknown-linux-gnu"
        );
        assert_eq!(
            PlatformKey::new("windows", "x86_64", None).target_triple(),
            "x86_64-pc-windows-msvc"
        );
    }

    #[test]
    fn test_package_name_for_packaged_pairs() {
        assert_eq!(
            PlatformKey::new("linux", "aarch64", None).package_name("glm-plan-usage"),
            Some("glm-plan-usage-linux-arm64".to_string())
        );
        assert_eq!(
            PlatformKey::new("macos", "x86_64", None).package_name("glm-plan-usage"),
            Some("glm-plan-usage-darwin-x64".to_string())
        );
    }

    #[test]
    fn test_package_name_absent_for_unpackaged_pairs() {
        // Windows on ARM has no published artifact.
        assert_eq!(
            PlatformKey::new("windows", "aarch64", None).package_name("glm-plan-usage"),
            None
        );
        assert_eq!(
            PlatformKey::new("freebsd", "x86_64", None).package_name("glm-plan-usage"),
            None
        );
    }

    #[test]
    fn test_key_is_deterministic() {
        let a = PlatformKey::new("linux", "x86_64", None);
        let b = PlatformKey::new("linux", "x86_64", None);
        assert_eq!(a.key(), b.key());
        assert_eq!(a, b);
    }

    #[test]
    fn test_unrecognized_names_pass_through() {
        let key = PlatformKey::new("haiku", "m68k", None);
        assert_eq!(key.key(), "haiku-m68k");
        assert_eq!(key.os_raw(), "haiku");
        assert_eq!(key.arch_raw(), "m68k");
    }
}
