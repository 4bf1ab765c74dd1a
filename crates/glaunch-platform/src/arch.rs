//! CPU architecture name mappings.
//!
//! Total over their input: unrecognized names pass through unchanged.

/// npm-style architecture name, as used in platform package names
/// (`x64`, `arm64`).
pub fn npm_name(arch: &str) -> &str {
    match arch {
        "x86_64" => "x64",
        "aarch64" => "arm64",
        other => other,
    }
}

/// Architecture fragment of the target triple used to name distribution
/// artifacts.
pub fn triple_name(arch: &str) -> &str {
    match arch {
        "x86_64" => "x86_64",
        "aarch64" => "aarch64",
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_npm_name_recognized() {
        assert_eq!(npm_name("x86_64"), "x64");
        assert_eq!(npm_name("aarch64"), "arm64");
    }

    #[test]
    fn test_npm_name_passthrough() {
        assert_eq!(npm_name("riscv64"), "riscv64");
    }

    #[test]
    fn test_triple_name() {
        assert_eq!(triple_name("x86_64"), "x86_64");
        assert_eq!(triple_name("aarch64"), "aarch64");
        assert_eq!(triple_name("s390x"), "s390x");
    }
}
