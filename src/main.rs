//! nunit-report: NUnit XML to HTML report CLI

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use nunit_report::config::{load_config, report_options};
use nunit_report::plan::{expand_inputs, preflight, resolve_output};
use nunit_report::reporter::{ConsoleReporter, JsonReporter};
use nunit_report::{generate_report, write_report, ReportError};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Turn NUnit XML result files into a single self-contained HTML report
#[derive(Parser, Debug)]
#[command(name = "nunit-report")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// NUnit result files, directories or glob patterns
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Output file (default: derived from the inputs)
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// Overwrite an existing output file
    #[arg(long, short)]
    force: bool,

    /// Verbose output
    #[arg(long, short)]
    verbose: bool,

    /// Quiet mode (one-line summary)
    #[arg(long, short)]
    quiet: bool,

    /// Print the run summary as JSON
    #[arg(long)]
    json: bool,

    /// Page title (default: "Results")
    #[arg(long)]
    title: Option<String>,

    /// Minimum overall success percentage (exit 1 if below)
    #[arg(long)]
    threshold: Option<u8>,

    /// Path to config file (default: search .nunitreportrc.json in current dir and parents)
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    match run(args) {
        Ok(code) => code,
        Err(e) => {
            match e.downcast_ref::<ReportError>() {
                Some(report_error) => {
                    for problem in report_error.problems() {
                        eprintln!("{}: {}", "Error".red().bold(), problem);
                    }
                }
                None => eprintln!("{}: {:#}", "Error".red().bold(), e),
            }
            ExitCode::from(2)
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn run(args: Args) -> Result<ExitCode> {
    let work_dir = std::env::current_dir().context("Failed to read current directory")?;
    let config = load_config(&work_dir, args.config.as_deref())?.merge_with_cli(
        args.title.clone(),
        args.threshold,
        args.force,
    );
    let options = report_options(&config)?;

    let plan = resolve_output(&args.inputs, args.output.as_deref(), config.default_output());
    let inputs = expand_inputs(&plan.inputs);
    preflight(&inputs, &plan.output, config.force())?;

    if args.verbose {
        eprintln!(
            "{}: Processing {} file(s)",
            "Info".blue().bold(),
            inputs.len()
        );
    }

    let report = generate_report(&inputs, &options)?;

    if !args.quiet {
        eprintln!("Writing output to {}", plan.output.display());
    }
    write_report(&plan.output, &report)?;

    if args.json {
        println!(
            "{}",
            JsonReporter::new().pretty().report(&plan.output, &report.totals)
        );
    } else if args.quiet {
        ConsoleReporter::new().report_quiet(&plan.output, &report.totals);
    } else {
        let mut reporter = ConsoleReporter::new();
        if args.verbose {
            reporter = reporter.verbose();
        }
        reporter.report(&plan.output, &report.totals);
    }

    if let Some(threshold) = config.threshold {
        let success = report.totals.stats.success_rate();
        if success.as_f64() < f64::from(threshold) {
            if !args.quiet {
                eprintln!(
                    "{}: Success rate {}% is below threshold {}%",
                    "Failed".red().bold(),
                    success,
                    threshold
                );
            }
            return Ok(ExitCode::from(1));
        }
    }

    if args.verbose {
        eprintln!("{}: {}", "Done".green().bold(), plan.output.display());
    }

    Ok(ExitCode::SUCCESS)
}
