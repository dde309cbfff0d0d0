//! Package-list validation
//!
//! Duplicate entries are almost always a configuration mistake (the same
//! repository added under two names would be checked out twice into the
//! same package directory), so they abort processing with every collision
//! listed at once.

use std::collections::HashSet;

use crate::error::GitpmError;
use crate::git::shorthand::extract_repo_name;

use super::packages::PackageConfig;

/// Reject a package list containing duplicate names, urls or repo base names
pub fn check_for_duplicates(entries: &[PackageConfig]) -> Result<(), GitpmError> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut messages: Vec<String> = Vec::new();

    for entry in entries {
        let repo_name = extract_repo_name(&entry.url);
        if seen.contains(&entry.name) {
            messages.push(format!("duplicate package name: {}", entry.name));
        }
        if seen.contains(&repo_name) {
            messages.push(format!("duplicate repository base name: {}", repo_name));
        }
        if seen.contains(&entry.url) {
            messages.push(format!("duplicate package url: {}", entry.url));
        }
        seen.insert(entry.name.clone());
        seen.insert(repo_name);
        seen.insert(entry.url.clone());
    }

    if messages.is_empty() {
        return Ok(());
    }
    Err(GitpmError::config_with_hint(
        messages.join("\n"),
        "Ensure each package has a unique name, repository base name and URL.",
    ))
}
