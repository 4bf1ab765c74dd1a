//! Operating system name mappings.
//!
//! Both mappings are total: names outside the recognized set pass through
//! unchanged, and resolution simply finds no package for them later.

/// npm-style platform name, as used in platform package names
/// (`darwin`, `linux`, `win32`).
pub fn npm_name(os: &str) -> &str {
    match os {
        "macos" => "darwin",
        "windows" => "win32",
        other => other,
    }
}

/// Vendor/OS/ABI fragment of the target triple used to name distribution
/// artifacts.
pub fn triple_name(os: &str) -> &str {
    match os {
        "linux" => "unknown-linux-gnu",
        "macos" => "apple-darwin",
        "windows" => "pc-windows-msvc",
        other => other,
    }
}
