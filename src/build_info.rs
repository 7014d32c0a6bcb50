//! Build information
//!
//! Metadata embedded at compile time by `build.rs`.

use std::fmt;

use serde::Serialize;

/// Package version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Package name from Cargo.toml
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Build timestamp in ISO 8601 format
pub const BUILD_TIMESTAMP: &str = match option_env!("SMARTEATS_BUILD_TIMESTAMP") {
    Some(s) => s,
    None => "unknown",
};

const BUILD_NUMBER_RAW: Option<&str> = option_env!("SMARTEATS_BUILD_NUMBER");

/// Build number, 0 when the build script did not provide one
pub fn build_number() -> u64 {
    BUILD_NUMBER_RAW.and_then(|s| s.parse().ok()).unwrap_or(0)
}

/// Build information structure for serialization
#[derive(Debug, Clone, Serialize)]
pub struct BuildInfo {
    pub name: &'static str,
    pub version: &'static str,
    pub build_number: u64,
    pub build_timestamp: &'static str,
}

impl BuildInfo {
    pub fn current() -> Self {
        Self {
            name: NAME,
            version: VERSION,
            build_number: build_number(),
            build_timestamp: BUILD_TIMESTAMP,
        }
    }
}

impl fmt::Display for BuildInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} (build {}, {})",
            self.name, self.version, self.build_number, self.build_timestamp
        )
    }
}

/// Print the startup banner to stderr
pub fn print_startup_banner() {
    eprintln!("SmartEats nutrition server: {}", BuildInfo::current());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let info = BuildInfo {
            name: "smarteats",
            version: "0.1.0",
            build_number: 7,
            build_timestamp: "2025-01-01T00:00:00Z",
        };
        assert_eq!(info.to_string(), "smarteats 0.1.0 (build 7, 2025-01-01T00:00:00Z)");
    }
}
