//! Configuration: the declarative package list and the installed-state lock

pub mod lock;
pub mod packages;
pub mod validation;

use std::path::{Path, PathBuf};

use directories::ProjectDirs;

use crate::error::GitpmError;

pub use lock::{LockFile, LockedPackage};
pub use packages::{ConfigEntry, PackageConfig, PackagesConfig, UpsertOutcome, DEFAULT_REFS};

/// Resolve the package-list path: an explicit flag wins, otherwise the
/// platform config directory
pub fn resolve_config_path(flag: Option<PathBuf>) -> Result<PathBuf, GitpmError> {
    if let Some(path) = flag {
        return Ok(path);
    }
    ProjectDirs::from("", "", "gitpm")
        .map(|dirs| dirs.config_dir().join("packages.toml"))
        .ok_or_else(|| {
            GitpmError::config_with_hint(
                "could not determine a configuration directory",
                "Pass --config <FILE> or set GITPM_CONFIG.",
            )
        })
}

/// The lock file lives next to the package list
pub fn lock_path_for(config_path: &Path) -> PathBuf {
    config_path.with_extension("lock")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_flag_wins() {
        let path = resolve_config_path(Some(PathBuf::from("/tmp/x.toml"))).unwrap();
        assert_eq!(path, PathBuf::from("/tmp/x.toml"));
    }

    #[test]
    fn test_lock_sits_next_to_config() {
        let lock = lock_path_for(Path::new("/etc/gitpm/packages.toml"));
        assert_eq!(lock, PathBuf::from("/etc/gitpm/packages.lock"));
    }
}
