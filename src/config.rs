//! Runtime configuration
//!
//! Environment only: `SMARTEATS_DATABASE_PATH` picks the database file and
//! `RUST_LOG` the log filter.

use std::path::{Path, PathBuf};

pub const DATABASE_PATH_VAR: &str = "SMARTEATS_DATABASE_PATH";

/// Directive applied on top of `RUST_LOG`
pub const DEFAULT_LOG_DIRECTIVE: &str = "smarteats=info";

/// Database path from environment, or `<project>/data/smarteats.db`
pub fn database_path() -> PathBuf {
    match std::env::var(DATABASE_PATH_VAR) {
        Ok(path) if !path.trim().is_empty() => PathBuf::from(path),
        _ => default_database_path(),
    }
}

fn default_database_path() -> PathBuf {
    let exe_dir = std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."));

    let mut path = project_root(&exe_dir);
    path.push("data");
    path.push("smarteats.db");
    path
}

/// Go up from target/release or target/debug to the project root
fn project_root(exe_dir: &Path) -> PathBuf {
    if exe_dir.ends_with("release") || exe_dir.ends_with("debug") {
        if let Some(root) = exe_dir.parent().and_then(Path::parent) {
            return root.to_path_buf();
        }
    }
    exe_dir.to_path_buf()
}

/// Create the database's parent directory if needed
pub fn ensure_parent_dir(path: &Path) -> std::io::Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => std::fs::create_dir_all(parent),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_root_strips_target_profile() {
        assert_eq!(
            project_root(Path::new("/srv/smarteats/target/release")),
            PathBuf::from("/srv/smarteats")
        );
        assert_eq!(project_root(Path::new("/usr/local/bin")), PathBuf::from("/usr/local/bin"));
    }

    #[test]
    fn test_default_path_file_name() {
        assert!(default_database_path().ends_with("data/smarteats.db"));
    }
}
