//! `cd3-setup`: prepare this machine to run the CD3 Automation Toolkit.

use cd3_setup::{Console, Orchestrator, SetupError, SetupOptions, SystemHost};
use clap::Parser;
use std::io::{self, BufReader};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Command-line arguments for cd3-setup.
#[derive(Parser, Debug)]
#[command(name = "cd3-setup")]
#[command(version, about = "Install CD3 Automation Toolkit prerequisites and fetch the toolkit")]
struct Cli {
    /// Python interpreter used for pip and verification (default: python3, then python)
    #[arg(long, value_name = "PATH")]
    python: Option<String>,

    /// Base directory for install choice 1 (default: current directory)
    #[arg(long, value_name = "DIR")]
    script_dir: Option<PathBuf>,

    /// Show debug logging
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn into_options(self) -> SetupOptions {
        let mut options = SetupOptions::default();
        options.python = self.python;
        if let Some(dir) = self.script_dir {
            options.script_dir = dir;
        }
        options
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    };
    let env_filter = EnvFilter::builder()
        .with_default_directive(default_level.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(io::stderr)
        .compact()
        .init();
}

fn print_banner() {
    println!(
        r#"
    ╔══════════════════════════════════════════════════════════╗
    ║     CD3 Automation Toolkit - Local Setup                 ║
    ║     Oracle Cloud Infrastructure Automation               ║
    ╚══════════════════════════════════════════════════════════╝
    "#
    );
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    print_banner();

    let options = cli.into_options();
    let host = SystemHost::new(options.os(), options.home_dir.clone());
    let console = Console::new(BufReader::new(io::stdin()), io::stdout());
    let mut orchestrator = Orchestrator::new(options, host, console);

    // The run blocks on operator input, so it lives on a worker thread while
    // this task watches for Ctrl-C.
    let run = tokio::spawn(async move { orchestrator.run().await });

    tokio::select! {
        joined = run => match joined {
            Ok(Ok(summary)) => {
                tracing::info!(attention = summary.needs_attention().len(), "setup finished");
                ExitCode::SUCCESS
            }
            Ok(Err(SetupError::Interrupted)) => {
                eprintln!("\n\nSetup interrupted by user.");
                ExitCode::FAILURE
            }
            Ok(Err(e)) => {
                eprintln!("\n\nError during setup: {}", e);
                eprintln!("To fix: {}", e.fix_suggestion());
                ExitCode::FAILURE
            }
            Err(e) => {
                tracing::error!(error = %e, "setup task aborted");
                eprintln!("\n\nError during setup: {}", e);
                ExitCode::FAILURE
            }
        },
        _ = tokio::signal::ctrl_c() => {
            eprintln!("\n\nSetup interrupted by user.");
            // The run task may be parked in a blocking stdin read; don't wait for it.
            std::process::exit(1);
        }
    }
}
