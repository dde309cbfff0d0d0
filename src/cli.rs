//! CLI argument parsing using clap derive macros

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::commands::{
    add::AddCommand, check::CheckCommand, list::ListCommand, remove::RemoveCommand,
    resolve::ResolveCommand,
};

/// gitpm - install and update editor packages directly from git
///
/// Tracks packages straight from their repositories: tags, branches, pull
/// requests or frozen commits, filtered by what the running editor build
/// can actually load.
#[derive(Parser, Debug)]
#[command(name = "gitpm")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Package list file (default: the platform config directory)
    #[arg(long, global = true, env = "GITPM_CONFIG", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Resolve the installable version of a repository
    Resolve(ResolveCommand),

    /// List installable versions of a repository
    List(ListCommand),

    /// Check all configured packages for updates
    Check(CheckCommand),

    /// Add a package to the package list
    Add(AddCommand),

    /// Remove a package from the package list
    Remove(RemoveCommand),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        if self.no_color {
            console::set_colors_enabled(false);
            console::set_colors_enabled_stderr(false);
        }

        match self.command {
            Commands::Resolve(cmd) => cmd.execute(),
            Commands::List(cmd) => cmd.execute(),
            Commands::Check(cmd) => cmd.execute(self.config),
            Commands::Add(cmd) => cmd.execute(self.config),
            Commands::Remove(cmd) => cmd.execute(self.config),
        }
    }
}
