//! Resolve command implementation
//!
//! One-shot resolution: which ref of this repository would be installed
//! for the given build? Useful for trying out a selector before adding
//! the package to the list.

use anyhow::Result;
use clap::Args;
use console::style;

use crate::config::DEFAULT_REFS;
use crate::git::{expand_git_url, GitTransport, RefSource};
use crate::resolve::{resolve, Resolution, Selector};

/// Resolve the installable version of a repository
#[derive(Args, Debug)]
pub struct ResolveCommand {
    /// Repository URL or GitHub shortname (owner/repo)
    pub repo: String,

    /// Ref selector (tags/*, tags/4070-*, heads/main, pull/1909, a tag or a commit hash)
    #[arg(long, default_value = DEFAULT_REFS)]
    pub refs: String,

    /// Build number of the host editor
    #[arg(long, env = "GITPM_ST_BUILD")]
    pub build: u32,

    /// Print machine-readable JSON
    #[arg(long)]
    pub json: bool,
}

impl ResolveCommand {
    /// Execute the resolve command
    pub fn execute(self) -> Result<()> {
        let url = expand_git_url(&self.repo)?;
        let selector = Selector::parse(&self.refs)?;
        let raw_refs = GitTransport::new().list_refs(&url)?;
        let resolution = resolve(&selector, self.build, &raw_refs, None)?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&resolution)?);
        } else {
            print_resolution(&url, &selector, self.build, &resolution);
        }
        Ok(())
    }
}

fn print_resolution(url: &str, selector: &Selector, build: u32, resolution: &Resolution) {
    println!("{} @ {}", style(url).bold(), selector);
    println!("  -> {}", style(&resolution.chosen).green().bold());

    if resolution.candidates.len() > 1 {
        println!(
            "\n{} candidates compatible with build {}:",
            resolution.candidates.len(),
            build
        );
        for candidate in &resolution.candidates {
            let marker = if candidate == &resolution.chosen { "*" } else { " " };
            match &candidate.version {
                Some(version) => println!("  {} {}  ({})", marker, candidate, version),
                None => println!("  {} {}", marker, candidate),
            }
        }
    }
}
