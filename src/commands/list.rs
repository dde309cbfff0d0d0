//! List command implementation
//!
//! Shows every candidate a selector yields for a repository, newest
//! first — the pool "resolve" picks its winner from.

use anyhow::Result;
use clap::Args;
use console::style;

use crate::config::DEFAULT_REFS;
use crate::git::{expand_git_url, GitTransport, RefSource};
use crate::resolve::{resolve, Selector};

/// List installable versions of a repository, newest first
#[derive(Args, Debug)]
pub struct ListCommand {
    /// Repository URL or GitHub shortname (owner/repo)
    pub repo: String,

    /// Ref selector
    #[arg(long, default_value = DEFAULT_REFS)]
    pub refs: String,

    /// Build number of the host editor
    #[arg(long, env = "GITPM_ST_BUILD")]
    pub build: u32,

    /// Print machine-readable JSON
    #[arg(long)]
    pub json: bool,
}

impl ListCommand {
    /// Execute the list command
    pub fn execute(self) -> Result<()> {
        let url = expand_git_url(&self.repo)?;
        let selector = Selector::parse(&self.refs)?;
        let raw_refs = GitTransport::new().list_refs(&url)?;
        let resolution = resolve(&selector, self.build, &raw_refs, None)?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&resolution.candidates)?);
            return Ok(());
        }

        println!(
            "{} — {} candidate(s) for build {}",
            style(&url).bold(),
            resolution.candidates.len(),
            self.build
        );
        for candidate in &resolution.candidates {
            let version = candidate
                .version
                .as_ref()
                .map(|v| v.to_string())
                .unwrap_or_else(|| "-".to_string());
            let sha = candidate.sha.as_deref().unwrap_or("");
            println!(
                "  {:<28} {:<14} {:.8}",
                candidate.raw_name,
                version,
                sha
            );
        }
        Ok(())
    }
}
