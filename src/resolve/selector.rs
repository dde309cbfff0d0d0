//! Declarative ref selectors
//!
//! A package's `refs` setting is a small expression describing which remote
//! reference counts as "the version to install":
//! - `tags/*`        every tag; the newest compatible version wins
//! - `tags/4070-*`   every tag carrying that exact build prefix
//! - `tags/2.1.9`    pin one tag
//! - `heads/master`  follow a branch tip
//! - `pull/1909`     follow a pull request head
//! - `2c18b09a`      freeze a commit hash
//!
//! Matching is pure filtering over the classified candidate set; the only
//! state it creates is the synthetic commit candidate for a hash pin.

use std::fmt;

use crate::error::GitpmError;

use super::classifier::{is_commit_hash, ClassifiedRef, RefKind};

/// Parsed form of a `refs` selector string
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    /// All tags, optionally restricted to one build-prefix token
    Wildcard { prefix: Option<String> },
    /// An exact tag/branch name, or a frozen commit hash
    Pin(String),
    /// The moving tip of a branch
    Branch(String),
    /// The head of a pull request
    PullRequest(u32),
}

impl Selector {
    /// Parse a `refs` string; malformed input is a configuration mistake
    /// and reports as `SelectorAmbiguous`
    pub fn parse(refs: &str) -> Result<Self, GitpmError> {
        let refs = refs.trim();
        if refs.is_empty() {
            return Err(GitpmError::selector_ambiguous(refs, "empty selector"));
        }

        if let Some(rest) = refs.strip_prefix("tags/") {
            if rest == "*" {
                return Ok(Self::Wildcard { prefix: None });
            }
            if let Some(stem) = rest.strip_suffix('*') {
                let prefix = stem.strip_suffix('-').unwrap_or(stem);
                if prefix.is_empty() || prefix.contains('*') {
                    return Err(GitpmError::selector_ambiguous(
                        refs,
                        "only a single trailing wildcard is supported",
                    ));
                }
                return Ok(Self::Wildcard {
                    prefix: Some(prefix.to_string()),
                });
            }
            if rest.is_empty() || rest.contains('*') {
                return Err(GitpmError::selector_ambiguous(refs, "malformed tag pattern"));
            }
            return Ok(Self::Pin(rest.to_string()));
        }

        if let Some(rest) = refs.strip_prefix("heads/") {
            if rest.is_empty() || rest.contains('*') {
                return Err(GitpmError::selector_ambiguous(refs, "malformed branch name"));
            }
            return Ok(Self::Branch(rest.to_string()));
        }

        if let Some(rest) = refs.strip_prefix("pull/") {
            let number = rest.parse().map_err(|_| {
                GitpmError::selector_ambiguous(refs, "pull request selector needs a number")
            })?;
            return Ok(Self::PullRequest(number));
        }

        if refs.contains('/') {
            return Err(GitpmError::selector_ambiguous(
                refs,
                "unrecognized ref namespace (expected tags/, heads/ or pull/)",
            ));
        }
        if refs.contains('*') {
            return Err(GitpmError::selector_ambiguous(
                refs,
                "wildcards only apply to tags (use tags/…*)",
            ));
        }

        // Bare names pin either a commit hash or an exact tag/branch
        Ok(Self::Pin(refs.to_string()))
    }

    /// Evaluate this selector against the classified candidate set
    ///
    /// Never mutates its input. For a hash pin the result is a synthetic,
    /// frozen `Commit` candidate that needs no live ref to exist.
    pub fn select(&self, candidates: &[ClassifiedRef]) -> Result<Vec<ClassifiedRef>, GitpmError> {
        match self {
            Self::Wildcard { prefix } => Ok(candidates
                .iter()
                .filter(|c| c.kind == RefKind::Tag)
                .filter(|c| match prefix {
                    // Case-sensitive: `ST3-` is somebody else's convention
                    Some(p) => c.build_prefix.token().as_deref() == Some(p.as_str()),
                    None => true,
                })
                .cloned()
                .collect()),

            Self::Pin(name) if is_commit_hash(name) => Ok(vec![ClassifiedRef::commit(name)]),

            Self::Pin(name) => {
                let matches: Vec<ClassifiedRef> = candidates
                    .iter()
                    .filter(|c| matches!(c.kind, RefKind::Tag | RefKind::Branch))
                    .filter(|c| c.raw_name == *name)
                    .cloned()
                    .collect();
                match matches.len() {
                    0 => Err(GitpmError::ref_not_found(
                        self.to_string(),
                        format!("no tag or branch named '{}' on the remote", name),
                    )),
                    1 => Ok(matches),
                    n => Err(GitpmError::selector_ambiguous(
                        self.to_string(),
                        format!("matches {} live refs; qualify with tags/ or heads/", n),
                    )),
                }
            }

            Self::Branch(name) => {
                let matches: Vec<ClassifiedRef> = candidates
                    .iter()
                    .filter(|c| c.kind == RefKind::Branch && c.raw_name == *name)
                    .cloned()
                    .collect();
                if matches.is_empty() {
                    return Err(GitpmError::ref_not_found(
                        self.to_string(),
                        format!("no branch named '{}' on the remote", name),
                    ));
                }
                Ok(matches)
            }

            Self::PullRequest(number) => {
                // ls-remote reports pull refs as "1909/head" (and "1909/merge");
                // the head is the author's actual work
                let head = format!("{}/head", number);
                let exact = number.to_string();
                let matches: Vec<ClassifiedRef> = candidates
                    .iter()
                    .filter(|c| c.kind == RefKind::PullRequest)
                    .filter(|c| c.raw_name == head || c.raw_name == exact)
                    .cloned()
                    .collect();
                if matches.is_empty() {
                    return Err(GitpmError::ref_not_found(
                        self.to_string(),
                        format!("no pull request #{} on the remote", number),
                    ));
                }
                Ok(matches)
            }
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Wildcard { prefix: None } => write!(f, "tags/*"),
            Self::Wildcard { prefix: Some(p) } => write!(f, "tags/{}-*", p),
            Self::Pin(name) => write!(f, "{}", name),
            Self::Branch(name) => write!(f, "heads/{}", name),
            Self::PullRequest(n) => write!(f, "pull/{}", n),
        }
    }
}
