//! `deptree-checkr` — resolve each pom.xml dependency in isolation against a
//! fixed platform baseline and collect the Maven dependency trees into one
//! report.
//!
//! # Flow
//! 1. Parse CLI arguments ([`cli`]).
//! 2. Load and merge configuration ([`config`]).
//! 3. Load the host descriptor ([`pom`]).
//! 4. Fan out one resolution job per declared dependency ([`dispatch`]):
//!    synthesize a single-dependency pom ([`synthesis`]), write it to disk,
//!    and run `mvn dependency:tree` against it ([`invoker`]).
//! 5. Append all captured output into the consolidated report ([`report`]).
//! 6. Print `<report> DONE` and exit `0`; any failure aborts the whole run
//!    with a non-zero exit and no partial report.

mod cli;
mod config;
mod dispatch;
mod error;
mod invoker;
mod models;
mod pom;
mod report;
mod synthesis;

use std::path::Path;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use cli::Cli;
use config::{load_config, Settings};
use invoker::{MavenInvoker, Resolver};
use models::{PlatformBaseline, Pom};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli);

    let config = load_config(cli.config.as_deref())?;
    let settings = Settings::merge(&cli, config)?;

    let host = pom::load_pom(&cli.pom)?;

    if !cli.quiet {
        eprintln!(
            "  {} {} declared {} {}",
            "→".cyan(),
            cli.pom.display(),
            host.dependencies.len(),
            if host.dependencies.len() == 1 {
                "dependency"
            } else {
                "dependencies"
            }
        );
    }

    let baseline = PlatformBaseline::new(cli.sb_version.clone(), cli.csb_version.clone());
    let invoker = MavenInvoker::new(settings.maven_home.clone());

    run(
        &host,
        &baseline,
        &invoker,
        &settings.workdir,
        settings.jobs,
        cli.quiet,
        &cli.output,
    )
    .await?;

    println!("{}", completion_line(&cli.output));
    Ok(())
}

/// Dispatch all resolution jobs, then aggregate into the report.
///
/// The report is only ever touched after every job has succeeded; a failing
/// job aborts here and leaves the report absent.
async fn run<R: Resolver>(
    host: &Pom,
    baseline: &PlatformBaseline,
    resolver: &R,
    workdir: &Path,
    jobs: usize,
    quiet: bool,
    report_path: &Path,
) -> Result<()> {
    let store = dispatch::dispatch(host, baseline, resolver, workdir, jobs, quiet).await?;

    if store.is_empty() && !quiet {
        eprintln!("  {} no dependencies to analyze", "→".cyan());
    }

    report::aggregate(store, report_path)
}

fn completion_line(report_path: &Path) -> String {
    format!("{} {}", report_path.display(), "DONE".green())
}


fn init_logging(cli: &Cli) {
    let default_level = if cli.quiet {
        "warn"
    } else if cli.verbose {
        "debug"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .compact()
        .init();
}
