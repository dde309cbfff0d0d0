//! Installed-state lock file
//!
//! The resolver itself keeps no memory between calls; remembering what was
//! last chosen is the caller's job. This lock file records, per package,
//! the identity of the last resolved target so `check` can tell
//! "up-to-date" from "needs-update" without any repository checkout.

use std::fs;
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::error::GitpmError;
use crate::resolve::{classify, ClassifiedRef, RawRef, Resolution};

/// One locked package
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct LockedPackage {
    pub name: String,
    pub url: String,
    /// Full refname of the chosen target, absent for a frozen commit
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refname: Option<String>,
    /// Identity of the chosen target: its commit, or the bare name when
    /// the transport reported none
    pub revision: String,
}

impl LockedPackage {
    /// Record a fresh resolution
    pub fn from_resolution(name: &str, url: &str, resolution: &Resolution) -> Self {
        Self {
            name: name.to_string(),
            url: url.to_string(),
            refname: resolution.chosen.refname(),
            revision: resolution.chosen.identity().to_string(),
        }
    }

    /// Reconstitute the previously chosen ref for change detection
    pub fn to_classified(&self) -> ClassifiedRef {
        match &self.refname {
            Some(refname) => RawRef::from_refname(refname, self.revision.clone())
                .map(|raw| classify(&raw))
                .unwrap_or_else(|| ClassifiedRef::commit(self.revision.clone())),
            None => ClassifiedRef::commit(self.revision.clone()),
        }
    }
}

/// The lock file: a flat list of locked packages
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct LockFile {
    #[serde(default, rename = "package")]
    pub packages: Vec<LockedPackage>,
}

impl LockFile {
    /// Load the lock file; a missing file means nothing is locked yet
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
            message: format!("{} is not a valid lock file", path.display()),
            source: Some(e.into()),
            hint: Some("Delete the lock file and run `gitpm check --update-lock`.".to_string()),
        })
    }

    /// Persist the lock file
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

    pub fn get(&self, name: &str) -> Option<&LockedPackage> {
        self.packages.iter().find(|p| p.name == name)
    }

    /// Insert or replace the entry for a package
    pub fn upsert(&mut self, locked: LockedPackage) {
        match self.packages.iter_mut().find(|p| p.name == locked.name) {
            Some(existing) => *existing = locked,
            None => self.packages.push(locked),
        }
    }
}
