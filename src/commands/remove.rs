//! Remove command implementation

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use console::style;

use crate::config::{lock_path_for, resolve_config_path, LockFile, PackagesConfig};

/// Remove a package from the package list
#[derive(Args, Debug)]
pub struct RemoveCommand {
    /// Package name as shown by `gitpm check`
    pub name: String,
}

impl RemoveCommand {
    /// Execute the remove command
    pub fn execute(self, config_flag: Option<PathBuf>) -> Result<()> {
        let config_path = resolve_config_path(config_flag)?;
        let mut config = PackagesConfig::load(&config_path)?;
        let removed = config.remove(&self.name)?;
        config.save(&config_path)?;

        // Drop the stale lock entry too, if there is one
        let lock_path = lock_path_for(&config_path);
        let mut lock = LockFile::load(&lock_path)?;
        let had_lock = lock.get(&removed.name).is_some();
        if had_lock {
            lock.packages.retain(|p| p.name != removed.name);
            lock.save(&lock_path)?;
        }

        println!("{} {}", style("Removed").green().bold(), removed.name);
        Ok(())
    }
}
