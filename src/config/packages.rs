//! Package-list configuration
//!
//! The package list is a TOML file. An entry is either a GitHub shortname
//! or a table:
//!
//! ```toml
//! packages = [
//!     "wbond/package-name",
//!     { url = "kaste/plugin", refs = "heads/main" },
//!     { url = "https://gitlab.com/u/r.git", name = "R", refs = "tags/4070-*" },
//! ]
//! ```
//!
//! Normalization fills in defaults (`refs = "tags/*"`, name = repository
//! base name) and expands shortnames to full URLs. Keys this tool doesn't
//! interpret yet (`dependencies`, `bind`, …) are carried through verbatim
//! so editing the list never loses them.

use std::fs;
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::error::GitpmError;
use crate::git::shorthand::{expand_git_url, extract_repo_name};

use super::validation::check_for_duplicates;

/// The default selector: all tags, newest compatible version wins
pub const DEFAULT_REFS: &str = "tags/*";

/// A configuration entry as written in the file
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(untagged)]
pub enum ConfigEntry {
    /// `"owner/repo"` with all defaults
    Short(String),
    Full(PackageSpec),
}

/// The table form of an entry
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PackageSpec {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refs: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub unpacked: bool,
    /// Settings this tool doesn't interpret, carried through verbatim
    #[serde(flatten)]
    pub rest: toml::Table,
}

/// A normalized package configuration
#[derive(Debug, Clone, PartialEq)]
pub struct PackageConfig {
    pub name: String,
    pub url: String,
    pub refs: String,
    pub unpacked: bool,
    pub rest: toml::Table,
}

impl PackageConfig {
    /// Normalize a raw entry: expand the URL, fill in defaults
    pub fn from_entry(entry: &ConfigEntry) -> Result<Self, GitpmError> {
        match entry {
            ConfigEntry::Short(shortname) => {
                let url = expand_git_url(shortname)?;
                Ok(Self {
                    name: extract_repo_name(shortname),
                    url,
                    refs: DEFAULT_REFS.to_string(),
                    unpacked: false,
                    rest: toml::Table::new(),
                })
            }
            ConfigEntry::Full(spec) => {
                let url = expand_git_url(&spec.url)?;
                let name = match &spec.name {
                    Some(name) => name.clone(),
                    None => extract_repo_name(&url),
                };
                Ok(Self {
                    name,
                    url,
                    refs: spec.refs.clone().unwrap_or_else(|| DEFAULT_REFS.to_string()),
                    unpacked: spec.unpacked,
                    rest: spec.rest.clone(),
                })
            }
        }
    }

    /// Render back to the shortest faithful entry form
    pub fn simplify(&self) -> ConfigEntry {
        if self.refs == DEFAULT_REFS
            && !self.unpacked
            && self.rest.is_empty()
            && self.name == extract_repo_name(&self.url)
        {
            if let Some(rest) = self.url.strip_prefix("https://github.com/") {
                let short = rest.strip_suffix(".git").unwrap_or(rest);
                return ConfigEntry::Short(short.to_string());
            }
        }
        ConfigEntry::Full(PackageSpec {
            url: self.url.clone(),
            name: (self.name != extract_repo_name(&self.url)).then(|| self.name.clone()),
            refs: (self.refs != DEFAULT_REFS).then(|| self.refs.clone()),
            unpacked: self.unpacked,
            rest: self.rest.clone(),
        })
    }

    /// Does a new entry collide with this one? Returns what collides.
    pub fn conflict_with(&self, other: &Self) -> Option<&'static str> {
        if self.name == other.name {
            Some("entry with the same name")
        } else if self.url == other.url {
            Some("entry with the same url")
        } else if extract_repo_name(&self.url) == extract_repo_name(&other.url) {
            Some("entry with the same repo name")
        } else {
            None
        }
    }
}

/// The package list file
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PackagesConfig {
    #[serde(default)]
    pub packages: Vec<ConfigEntry>,
}

impl PackagesConfig {
    /// Load the package list; a missing file is an empty list
    pub fn load(path: &Path) -> Result<Self, GitpmError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))
            .map_err(|e| GitpmError::Config {
                message: e.to_string(),
                source: Some(e),
                hint: None,
            })?;
        toml::from_str(&raw).map_err(|e| GitpmError::Config {
            message: format!("{} is not a valid package list", path.display()),
            source: Some(e.into()),
            hint: Some("See `gitpm add --help` for the accepted entry forms.".to_string()),
        })
    }

    /// Persist the package list, creating parent directories as needed
    pub fn save(&self, path: &Path) -> Result<(), GitpmError> {
        let write = || -> anyhow::Result<()> {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            let rendered = toml::to_string_pretty(self)?;
            fs::write(path, rendered)?;
            Ok(())
        };
        write()
            .with_context(|| format!("failed to write {}", path.display()))
            .map_err(|e| GitpmError::Config {
                message: e.to_string(),
                source: Some(e),
                hint: None,
            })
    }

    /// Normalize every entry and reject duplicate configurations
    pub fn process(&self) -> Result<Vec<PackageConfig>, GitpmError> {
        let mut normalized = Vec::with_capacity(self.packages.len());
        for entry in &self.packages {
            normalized.push(PackageConfig::from_entry(entry)?);
        }
        check_for_duplicates(&normalized)?;
        Ok(normalized)
    }

    /// Add or update an entry; an entry colliding by name, url or repo
    /// base name is replaced in place
    pub fn upsert(&mut self, package: PackageConfig) -> Result<UpsertOutcome, GitpmError> {
        let existing = self.process()?;
        for (i, item) in existing.iter().enumerate() {
            if package.conflict_with(item).is_some() {
                self.packages[i] = package.simplify();
                return Ok(UpsertOutcome::Replaced(item.clone()));
            }
        }
        self.packages.push(package.simplify());
        Ok(UpsertOutcome::Added)
    }

    /// Remove an entry by package name
    pub fn remove(&mut self, name: &str) -> Result<PackageConfig, GitpmError> {
        let existing = self.process()?;
        for (i, item) in existing.iter().enumerate() {
            if item.name == name {
                self.packages.remove(i);
                return Ok(item.clone());
            }
        }
        Err(GitpmError::config(format!(
            "no package named '{}' in the package list",
            name
        )))
    }
}

/// What `upsert` did
#[derive(Debug)]
pub enum UpsertOutcome {
    Added,
    Replaced(PackageConfig),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn short(s: &str) -> ConfigEntry {
        ConfigEntry::Short(s.to_string())
    }

    #[test]
    fn test_short_entry_defaults() {
        let pkg = PackageConfig::from_entry(&short("wbond/package-name")).unwrap();
        assert_eq!(pkg.name, "package-name");
        assert_eq!(pkg.url, "https://github.com/wbond/package-name.git");
        assert_eq!(pkg.refs, DEFAULT_REFS);
        assert!(!pkg.unpacked);
    }

    #[test]
    fn test_full_entry_overrides() {
        let raw = r#"
            packages = [
                { url = "kaste/plugin", name = "The Plugin", refs = "heads/main" },
            ]
        "#;
        let config: PackagesConfig = toml::from_str(raw).unwrap();
        let pkgs = config.process().unwrap();
        assert_eq!(pkgs[0].name, "The Plugin");
        assert_eq!(pkgs[0].url, "https://github.com/kaste/plugin.git");
        assert_eq!(pkgs[0].refs, "heads/main");
    }

    #[test]
    fn test_unknown_keys_are_carried() {
        let raw = r#"
            packages = [
                { url = "a/b", dependencies = ["x"], bind = "ctrl+k" },
            ]
        "#;
        let config: PackagesConfig = toml::from_str(raw).unwrap();
        let pkgs = config.process().unwrap();
        assert!(pkgs[0].rest.contains_key("dependencies"));
        assert!(pkgs[0].rest.contains_key("bind"));
        // And survive a save round-trip
        let rendered = toml::to_string_pretty(&config).unwrap();
        assert!(rendered.contains("dependencies"));
        assert!(rendered.contains("bind"));
    }

    #[test]
    fn test_simplify_to_short_form() {
        let pkg = PackageConfig::from_entry(&short("a/b")).unwrap();
        match pkg.simplify() {
            ConfigEntry::Short(s) => assert_eq!(s, "a/b"),
            other => panic!("expected short form, got {:?}", other),
        }
    }

    #[test]
    fn test_simplify_keeps_overrides() {
        let mut pkg = PackageConfig::from_entry(&short("a/b")).unwrap();
        pkg.refs = "heads/main".to_string();
        match pkg.simplify() {
            ConfigEntry::Full(spec) => {
                assert_eq!(spec.refs.as_deref(), Some("heads/main"));
                assert!(spec.name.is_none());
            }
            other => panic!("expected full form, got {:?}", other),
        }
    }

    #[test]
    fn test_upsert_replaces_colliding_entry() {
        let mut config = PackagesConfig {
            packages: vec![short("a/b")],
        };
        let mut pkg = PackageConfig::from_entry(&short("a/b")).unwrap();
        pkg.refs = "heads/main".to_string();
        match config.upsert(pkg).unwrap() {
            UpsertOutcome::Replaced(old) => assert_eq!(old.name, "b"),
            other => panic!("expected replace, got {:?}", other),
        }
        assert_eq!(config.packages.len(), 1);
    }

    #[test]
    fn test_upsert_appends_new_entry() {
        let mut config = PackagesConfig {
            packages: vec![short("a/b")],
        };
        let pkg = PackageConfig::from_entry(&short("c/d")).unwrap();
        assert!(matches!(config.upsert(pkg).unwrap(), UpsertOutcome::Added));
        assert_eq!(config.packages.len(), 2);
    }

    #[test]
    fn test_remove_by_name() {
        let mut config = PackagesConfig {
            packages: vec![short("a/b"), short("c/d")],
        };
        let removed = config.remove("b").unwrap();
        assert_eq!(removed.url, "https://github.com/a/b.git");
        assert_eq!(config.packages.len(), 1);

        let err = config.remove("nope").unwrap_err();
        assert!(matches!(err, GitpmError::Config { .. }));
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let config = PackagesConfig::load(&dir.path().join("packages.toml")).unwrap();
        assert!(config.packages.is_empty());
    }

    #[test]
    fn test_save_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/packages.toml");
        let config = PackagesConfig {
            packages: vec![short("a/b")],
        };
        config.save(&path).unwrap();
        let loaded = PackagesConfig::load(&path).unwrap();
        assert_eq!(loaded.packages.len(), 1);
        assert_eq!(loaded.process().unwrap()[0].name, "b");
    }
}
