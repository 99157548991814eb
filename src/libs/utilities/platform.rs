// Platform detection for the direct-download fallback installers.
// Release servers (dl.k8s.io, releases.hashicorp.com) name their artifacts
// with Go-style OS/arch identifiers, so Rust's `std::env::consts` values are
// normalized into that vocabulary here.

use crate::log_debug;
use colored::Colorize;

/// The OS/architecture pair used in download URLs (e.g. `darwin`/`arm64`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Platform {
    pub os: &'static str,
    pub arch: &'static str,
}

impl Platform {
    pub const fn new(os: &'static str, arch: &'static str) -> Self {
        Self { os, arch }
    }

    /// Detects the platform kubed is running on.
    pub fn current() -> Self {
        let platform = Self::new(
            normalize_os(std::env::consts::OS),
            normalize_arch(std::env::consts::ARCH),
        );
        log_debug!(
            "[Platform] Detected OS '{}' and architecture '{}'",
            platform.os.cyan(),
            platform.arch.magenta()
        );
        platform
    }
}

/// Maps Rust's OS names onto the names used by release artifacts.
fn normalize_os(os: &'static str) -> &'static str {
    match os {
        "macos" => "darwin",
        other => other,
    }
}

/// Maps Rust's architecture names onto the names used by release artifacts.
fn normalize_arch(arch: &'static str) -> &'static str {
    match arch {
        "x86_64" => "amd64",
        "aarch64" => "arm64",
        other => other,
    }
}
