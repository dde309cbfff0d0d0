//! Add command implementation

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use console::style;

use crate::config::{
    resolve_config_path, PackageConfig, PackagesConfig, UpsertOutcome, DEFAULT_REFS,
};
use crate::git::{expand_git_url, extract_repo_name};
use crate::resolve::Selector;

/// Add a package to the package list
#[derive(Args, Debug)]
pub struct AddCommand {
    /// Repository URL or GitHub shortname (owner/repo)
    pub entry: String,

    /// Package name override (default: the repository base name)
    #[arg(long)]
    pub name: Option<String>,

    /// Ref selector
    #[arg(long, default_value = DEFAULT_REFS)]
    pub refs: String,
}

impl AddCommand {
    /// Execute the add command
    pub fn execute(self, config_flag: Option<PathBuf>) -> Result<()> {
        let config_path = resolve_config_path(config_flag)?;
        let mut config = PackagesConfig::load(&config_path)?;

        let url = expand_git_url(&self.entry)?;
        // Catch a bad selector now instead of at the first check
        Selector::parse(&self.refs)?;
        let package = PackageConfig {
            name: self.name.unwrap_or_else(|| extract_repo_name(&url)),
            url,
            refs: self.refs,
            unpacked: false,
            rest: toml::Table::new(),
        };

        let name = package.name.clone();
        match config.upsert(package)? {
            UpsertOutcome::Added => {
                println!("{} {}", style("Added").green().bold(), name);
            }
            UpsertOutcome::Replaced(old) => {
                println!(
                    "{} {} (replaced '{}')",
                    style("Updated").yellow().bold(),
                    name,
                    old.name
                );
            }
        }
        config.save(&config_path)?;
        Ok(())
    }
}
