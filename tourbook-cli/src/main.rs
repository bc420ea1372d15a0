mod reports;
mod run;
mod scenario;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use std::fs::File;
use std::io::{BufWriter, IsTerminal, Stdout, Write, stdout};
use std::path::{Path, PathBuf};

use run::{RunSummary, run_scenario};
use scenario::{Scenario, load_pricing};

#[derive(Debug, Parser)]
#[command(name = "tourbook", version)]
#[command(about = "Run a travel package booking scenario and report the outcome")]
struct Args {
    /// Scenario JSON file (defaults to the built-in Europe Tour demo)
    #[arg(long)]
    scenario: Option<PathBuf>,

    /// Pricing policy JSON file (defaults to the standard tier rates)
    #[arg(long)]
    pricing: Option<PathBuf>,

    /// Output report format
    #[arg(long, default_value = "console")]
    #[arg(value_parser = ["console", "json", "markdown"])]
    report: String,

    /// Optional path to write the report output instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,

    /// Verbose output (debug logging unless RUST_LOG says otherwise)
    #[arg(short, long)]
    verbose: bool,

    /// Exit with a non-zero status when any booking step is rejected
    #[arg(long)]
    strict: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let policy = load_pricing(args.pricing.as_deref())?;
    let scenario = Scenario::load(args.scenario.as_deref())?;
    log::debug!(
        "running {} with {} enrollments and {} sign-ups",
        scenario.package.name,
        scenario.enroll.len(),
        scenario.sign_ups.len()
    );

    let summary = run_scenario(&scenario, policy)?;
    write_reports(&args, &summary)?;

    if args.strict && summary.failed_steps() > 0 {
        eprintln!(
            "{} {} booking step(s) rejected",
            "❌".red(),
            summary.failed_steps()
        );
        std::process::exit(1);
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
}

fn write_reports(args: &Args, summary: &RunSummary) -> Result<()> {
    let mut output_target = OutputTarget::open(args.output.as_deref())?;
    if !output_target.supports_colour() {
        colored::control::set_override(false);
    }

    match args.report.as_str() {
        "json" => reports::generate_json_report(&mut output_target, summary)?,
        "markdown" => reports::generate_markdown_report(&mut output_target, summary)?,
        _ => reports::generate_console_report(&mut output_target, summary)?,
    }

    output_target.flush()?;
    Ok(())
}

/// Report destination. Colour codes only go to an interactive terminal.
enum OutputTarget {
    Stdout(BufWriter<Stdout>),
    File(BufWriter<File>),
}

impl OutputTarget {
    fn open(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::Stdout(BufWriter::new(stdout())));
        };
        let file = File::create(path)
            .with_context(|| format!("failed to create report file {}", path.display()))?;
        Ok(Self::File(BufWriter::new(file)))
    }

    fn supports_colour(&self) -> bool {
        match self {
            Self::Stdout(_) => stdout().is_terminal(),
            Self::File(_) => false,
        }
    }
}

impl Write for OutputTarget {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        match self {
            Self::Stdout(w) => w.write(buf),
            Self::File(w) => w.write(buf),
        }
    }

    fn flush(&mut self) -> std::io::Result<()> {
        match self {
            Self::Stdout(w) => w.flush(),
            Self::File(w) => w.flush(),
        }
    }
}
