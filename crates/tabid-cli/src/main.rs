//! tabid CLI - rename upstream/downstream message ids in a JSON table

// this_file: crates/tabid-cli/src/main.rs

mod cli;

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tabid_core::{Pipeline, RunReport, TabidError};

use crate::cli::Cli;

fn init_logging(cli: &Cli) {
    let default_level = if cli.verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();
}

fn run(cli: &Cli) -> Result<RunReport> {
    let pipeline = Pipeline::from_config(cli.to_config())?;
    log::info!(
        "Annotating {} -> {} (sentinels: {:?})",
        pipeline.input().display(),
        pipeline.output().display(),
        pipeline.annotator().sentinels()
    );
    let report = pipeline.run()?;
    Ok(report)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli);

    match run(&cli) {
        Ok(report) => {
            if !cli.quiet {
                let status = format!("done, result saved to {}", report.output.display());
                // Keep stdout clean when the document itself goes there
                if cli.writes_stdout() {
                    eprintln!("{status}");
                } else {
                    println!("{status}");
                }
                if cli.verbose {
                    eprintln!("  {}", report.stats);
                }
            }
            ExitCode::SUCCESS
        },
        Err(e) => {
            eprintln!("error processing file: {e}");
            if cli.verbose {
                if let Some(err) = e.downcast_ref::<TabidError>() {
                    eprintln!("  kind: {}", err.kind());
                }
            }
            ExitCode::FAILURE
        },
    }
}
