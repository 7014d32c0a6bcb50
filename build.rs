//! Build script for SmartEats
//!
//! Embeds a build number and timestamp. CI can pin the number through
//! `SMARTEATS_BUILD_NUMBER`; local builds bump a counter in `.build_number`.

use std::fs;
use std::path::Path;

const COUNTER_FILE: &str = ".build_number";

fn next_local_build_number() -> u64 {
    let path = Path::new(COUNTER_FILE);
    let previous: u64 = fs::read_to_string(path)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(0);
    let next = previous + 1;
    if let Err(e) = fs::write(path, next.to_string()) {
        println!("cargo:warning=could not update {}: {}", COUNTER_FILE, e);
    }
    next
}

fn main() {
    println!("cargo:rerun-if-changed=src");
    println!("cargo:rerun-if-env-changed=SMARTEATS_BUILD_NUMBER");

    let build_number = match std::env::var("SMARTEATS_BUILD_NUMBER") {
        Ok(pinned) => pinned,
        Err(_) => next_local_build_number().to_string(),
    };
    let timestamp = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string();

    println!("cargo:rustc-env=SMARTEATS_BUILD_NUMBER={}", build_number);
    println!("cargo:rustc-env=SMARTEATS_BUILD_TIMESTAMP={}", timestamp);
}
