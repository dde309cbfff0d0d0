//! Remote ref listing over `git ls-remote`
//!
//! The resolver never talks to the network itself; this transport is the
//! collaborator that does, one `ls-remote` per resolution attempt. No
//! clone, no fetch — listing refs is enough to decide what to install.
//!
//! Failures wrap into [`GitpmError::Transport`] with the underlying cause
//! attached; retrying is the caller's call.

use std::collections::HashMap;
use std::path::PathBuf;
use std::process::Command;

use anyhow::anyhow;

use crate::error::GitpmError;
use crate::resolve::RawRef;

/// Source of a repository's remote references
///
/// Abstracted as a trait so commands can be exercised against canned ref
/// sets in tests.
pub trait RefSource {
    fn list_refs(&self, url: &str) -> Result<Vec<RawRef>, GitpmError>;
}

/// The real transport, shelling out to git
#[derive(Debug, Clone)]
pub struct GitTransport {
    git: PathBuf,
}

impl Default for GitTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl GitTransport {
    pub fn new() -> Self {
        // Fall back to "git" and let spawning report a useful error
        let git = which::which("git").unwrap_or_else(|_| PathBuf::from("git"));
        Self { git }
    }
}

impl RefSource for GitTransport {
    fn list_refs(&self, url: &str) -> Result<Vec<RawRef>, GitpmError> {
        let output = Command::new(&self.git)
            .args(["ls-remote", url])
            .output()
            .map_err(|e| GitpmError::transport(url, anyhow!(e).context("failed to run git")))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(GitpmError::transport(
                url,
                anyhow!("git ls-remote failed: {}", stderr.trim()),
            ));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        Ok(parse_ls_remote(&stdout))
    }
}

/// Parse `ls-remote` output into raw references
///
/// Example:
///
/// ```text
/// c80596e48e4fedd78596a66b3d79c67488f828aa        refs/tags/2.47.1
/// f3fad6a5617c802c95b46c4eeada797bc282e7cd        refs/tags/2.47.1^{}
/// ```
///
/// A `^{}` line is the dereferenced target of an annotated tag; it wins
/// over the tag object's own sha. Refs outside the tags/heads/pull
/// namespaces (HEAD, notes, …) are skipped.
pub fn parse_ls_remote(stdout: &str) -> Vec<RawRef> {
    let mut order: Vec<String> = Vec::new();
    let mut target_by_ref: HashMap<String, String> = HashMap::new();

    for line in stdout.lines() {
        let Some((sha, refname)) = line.split_once('\t') else {
            continue;
        };
        let (sha, refname) = (sha.trim(), refname.trim());
        if sha.is_empty() || refname.is_empty() {
            continue;
        }

        if let Some(base) = refname.strip_suffix("^{}") {
            if !target_by_ref.contains_key(base) {
                order.push(base.to_string());
            }
            target_by_ref.insert(base.to_string(), sha.to_string());
        } else if !target_by_ref.contains_key(refname) {
            order.push(refname.to_string());
            target_by_ref.insert(refname.to_string(), sha.to_string());
        }
    }

    order
        .into_iter()
        .filter_map(|refname| {
            let sha = target_by_ref.remove(&refname)?;
            RawRef::from_refname(&refname, sha)
        })
        .collect()
}
