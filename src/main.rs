use clap::Parser;

use gitpm::cli::Cli;
use gitpm::error::GitpmError;

fn main() {
    let cli = Cli::parse();
    if let Err(err) = cli.execute() {
        match err.downcast_ref::<GitpmError>() {
            Some(gitpm_err) => gitpm_err.display_with_hints(),
            None => eprintln!("\n{} {:#}", console::style("ERROR:").red().bold(), err),
        }
        std::process::exit(1);
    }
}
