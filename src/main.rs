//! Command-line front end for the organizer.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, bail};
use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

use tidyts::{Configuration, organize_file, organize_project, organize_source};

#[derive(Debug, Parser)]
#[command(
    name = "tidyts",
    version,
    about = "Organize the member declarations of TypeScript source files."
)]
struct Cli {
    /// Files to organize
    #[arg(value_name = "PATH")]
    paths: Vec<PathBuf>,

    /// Organize every .ts file under this root (vendor and output
    /// directories are skipped)
    #[arg(long, value_name = "ROOT", conflicts_with = "paths")]
    all: Option<PathBuf>,

    /// JSON configuration file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Report files that would change without rewriting them; exits with
    /// status 1 when any would
    #[arg(long)]
    check: bool,

    /// Print the organized text to stdout instead of writing the file
    #[arg(long, conflicts_with_all = ["all", "check"])]
    stdout: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    match run() {
        Ok(would_change) => {
            if would_change {
                ExitCode::from(1)
            } else {
                ExitCode::SUCCESS
            }
        }
        Err(e) => {
            error!("{e:?}");
            ExitCode::from(1)
        }
    }
}

/// Returns whether check mode found files that would change.
fn run() -> anyhow::Result<bool> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Configuration::from_file(path)?,
        None => Configuration::default(),
    };

    if cli.stdout {
        for path in &cli.paths {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            print!("{}", organize_source(&text, &config));
        }
        return Ok(false);
    }

    if let Some(root) = &cli.all {
        let report = organize_project(root, &config, !cli.check)?;
        if cli.check {
            for path in &report.organized {
                println!("{}", path.display());
            }
            return Ok(!report.organized.is_empty());
        }
        println!(
            "organized {} file(s), {} unchanged",
            report.organized.len(),
            report.unchanged
        );
        return Ok(false);
    }

    if cli.paths.is_empty() {
        bail!("no input: pass file paths or --all <ROOT>");
    }

    let mut would_change = false;
    for path in &cli.paths {
        let changed = organize_file(path, &config, !cli.check)?;
        if cli.check && changed {
            println!("{}", path.display());
            would_change = true;
        }
    }
    Ok(would_change)
}
