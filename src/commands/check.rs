//! Check command implementation
//!
//! Resolves every configured package against its remote and compares the
//! outcome with the lock file. Packages are independent, so the remote
//! listings run in parallel; the engine itself is pure and needs no
//! synchronization.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use serde::Serialize;

use crate::config::{
    lock_path_for, resolve_config_path, LockFile, LockedPackage, PackageConfig, PackagesConfig,
};
use crate::error::GitpmError;
use crate::git::{to_display_name, GitTransport, RefSource};
use crate::resolve::{resolve, ClassifiedRef, Resolution, Selector};

/// Check all configured packages for updates
#[derive(Args, Debug)]
pub struct CheckCommand {
    /// Build number of the host editor
    #[arg(long, env = "GITPM_ST_BUILD")]
    pub build: u32,

    /// Record the resolved targets in the lock file
    #[arg(long)]
    pub update_lock: bool,

    /// Print machine-readable JSON
    #[arg(long)]
    pub json: bool,
}

/// Status of one package after a check run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
enum Status {
    UpToDate,
    NeedsUpdate,
    NoSuitableVersionFound,
    Error,
}

#[derive(Debug, Serialize)]
struct Report {
    name: String,
    url: String,
    status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    chosen: Option<ClassifiedRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

impl CheckCommand {
    /// Execute the check command
    pub fn execute(self, config_flag: Option<PathBuf>) -> Result<()> {
        let config_path = resolve_config_path(config_flag)?;
        let packages = PackagesConfig::load(&config_path)?.process()?;
        if packages.is_empty() {
            println!("No packages configured ({})", config_path.display());
            return Ok(());
        }

        let lock_path = lock_path_for(&config_path);
        let mut lock = LockFile::load(&lock_path)?;
        let transport = GitTransport::new();

        let progress = if self.json {
            ProgressBar::hidden()
        } else {
            ProgressBar::new(packages.len() as u64)
        };
        if let Ok(bar_style) = ProgressStyle::with_template("{bar:30} {pos}/{len} {msg}") {
            progress.set_style(bar_style);
        }

        let outcomes: Vec<(PackageConfig, Result<Resolution, GitpmError>)> = packages
            .par_iter()
            .map(|package| {
                progress.set_message(package.name.clone());
                let outcome = check_one(&transport, package, self.build, lock.get(&package.name));
                progress.inc(1);
                (package.clone(), outcome)
            })
            .collect();
        progress.finish_and_clear();

        let reports: Vec<Report> = outcomes
            .iter()
            .map(|(package, outcome)| report_for(package, outcome))
            .collect();

        if self.json {
            println!("{}", serde_json::to_string_pretty(&reports)?);
        } else {
            print_reports(&reports);
        }

        if self.update_lock {
            for (package, outcome) in &outcomes {
                if let Ok(resolution) = outcome {
                    lock.upsert(LockedPackage::from_resolution(
                        &package.name,
                        &package.url,
                        resolution,
                    ));
                }
            }
            lock.save(&lock_path)?;
            if !self.json {
                println!("\nLock file written to {}", lock_path.display());
            }
        }

        if reports.iter().any(|r| r.status == Status::Error) {
            std::process::exit(1);
        }
        Ok(())
    }
}

/// Resolve a single package against its remote
fn check_one(
    transport: &GitTransport,
    package: &PackageConfig,
    build: u32,
    locked: Option<&LockedPackage>,
) -> Result<Resolution, GitpmError> {
    let selector = Selector::parse(&package.refs)?;
    let raw_refs = transport.list_refs(&package.url)?;
    let previous = locked.map(|l| l.to_classified());
    resolve(&selector, build, &raw_refs, previous.as_ref())
}

fn report_for(package: &PackageConfig, outcome: &Result<Resolution, GitpmError>) -> Report {
    let (status, chosen, message) = match outcome {
        Ok(resolution) if resolution.changed => {
            (Status::NeedsUpdate, Some(resolution.chosen.clone()), None)
        }
        Ok(resolution) => (Status::UpToDate, Some(resolution.chosen.clone()), None),
        Err(err @ GitpmError::RefNotFound { .. }) => {
            (Status::NoSuitableVersionFound, None, Some(err.to_string()))
        }
        Err(err) => (Status::Error, None, Some(err.to_string())),
    };
    Report {
        name: package.name.clone(),
        url: package.url.clone(),
        status,
        chosen,
        message,
    }
}

fn print_reports(reports: &[Report]) {
    for report in reports {
        let label = format!("{} ({})", report.name, to_display_name(&report.url));
        match report.status {
            Status::UpToDate => {
                println!("  {} {}", style("up-to-date  ").green(), label);
            }
            Status::NeedsUpdate => {
                let target = report
                    .chosen
                    .as_ref()
                    .map(|c| c.to_string())
                    .unwrap_or_default();
                println!(
                    "  {} {} -> {}",
                    style("needs-update").yellow().bold(),
                    label,
                    target
                );
            }
            Status::NoSuitableVersionFound => {
                println!("  {} {}", style("no version  ").red(), label);
            }
            Status::Error => {
                println!("  {} {}", style("error       ").red().bold(), label);
                if let Some(message) = &report.message {
                    println!("                {}", style(message).dim());
                }
            }
        }
    }

    let count = |status: Status| reports.iter().filter(|r| r.status == status).count();
    println!(
        "\n{} checked: {} up-to-date, {} with updates, {} without a suitable version, {} failed",
        reports.len(),
        count(Status::UpToDate),
        count(Status::NeedsUpdate),
        count(Status::NoSuitableVersionFound),
        count(Status::Error),
    );
}
