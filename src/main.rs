//! # fwd CLI Entry Point
//!
//! Parses CLI arguments using clap and drives the scan. The default action
//! is a dry run over the configured include directories; `--apply` rewrites
//! the headers in place after a confirmation prompt.

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{Shell, generate};
use colored::*;
use std::path::PathBuf;

use hdrfwd::config;
use hdrfwd::jobs;
use hdrfwd::walker;

#[derive(Parser)]
#[command(name = "fwd")]
#[command(about = "Rewrites C++ header includes into forward declarations", version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Apply changes to disk (default is a safe dry run)
    #[arg(long)]
    apply: bool,

    /// Skip the confirmation prompt in apply mode
    #[arg(long, short)]
    yes: bool,

    /// Project root containing the include tree [default: current dir]
    #[arg(long)]
    root: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the recommended parallel build-job count for this host
    Jobs,
    /// Generate shell completion scripts
    Completion { shell: Shell },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        Some(Commands::Jobs) => jobs::print_jobs(),
        Some(Commands::Completion { shell }) => {
            let mut cmd = Cli::command();
            let bin_name = cmd.get_name().to_string();
            generate(*shell, &mut cmd, bin_name, &mut std::io::stdout());
            Ok(())
        }
        None => run_scan(&cli),
    }
}

fn run_scan(cli: &Cli) -> Result<()> {
    let root = match &cli.root {
        Some(r) => r.clone(),
        None => std::env::current_dir()?,
    };
    let cfg = config::load(&root)?;

    if cli.apply {
        println!("{} APPLY MODE - files WILL be modified!", "⚠".yellow());
        if !cli.yes {
            let confirm = inquire::Confirm::new("Rewrite matching headers in place?")
                .with_default(false)
                .prompt()?;
            if !confirm {
                println!("Aborted. No files were touched.");
                return Ok(());
            }
        }
    } else {
        println!("{} DRY RUN MODE - no files will be modified", "🔍".cyan());
        println!("   Use {} to actually modify files", "--apply".cyan().bold());
    }

    let summary = walker::run(&root, &cfg, cli.apply)?;

    if !summary.failures.is_empty() {
        std::process::exit(1);
    }
    Ok(())
}
