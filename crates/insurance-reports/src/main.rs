//! Four-insurance monthly contribution reports
//!
//! Downloads the health, pension, employment and industrial accident
//! reports for a range of months, keeps the raw files and writes one
//! per-person contribution summary per month.

mod config;
mod constants;
mod convert;
mod portal;
mod prompt;
mod sink;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use insurance_core::{InsuranceCategory, Period, PeriodDriver, RunInput, RunReport};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use config::{Config, FileConfig};
use convert::Conversion;
use portal::{PortalClient, TokioPacer};
use prompt::{Preset, Prompter};
use sink::DirectorySink;

#[derive(Parser, Debug)]
#[command(name = "insurance-reports")]
#[command(about = "Monthly four-insurance contribution reports per employee")]
struct Args {
    /// Config file (optional; built-in defaults are used when missing)
    #[arg(long, default_value = constants::CONFIG_FILE, global = true)]
    config: PathBuf,

    /// Output directory for raw reports and monthly summaries
    #[arg(short, long, default_value = constants::OUTPUT_DIR)]
    output_dir: PathBuf,

    /// First month (YYYY-MM); prompted when omitted
    #[arg(long, value_parser = Period::parse)]
    start: Option<Period>,

    /// Last month (YYYY-MM); prompted when omitted
    #[arg(long, value_parser = Period::parse)]
    end: Option<Period>,

    /// Business registration number (10-11 digits); prompted when omitted
    #[arg(long)]
    business_number: Option<String>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Convert CSV files (EUC-KR or UTF-8) into Excel workbooks
    Convert {
        /// Folder containing the CSV files
        #[arg(long, default_value = constants::CONVERT_INPUT_DIR)]
        input: PathBuf,

        /// Folder for the converted files
        #[arg(long, default_value = constants::CONVERT_OUTPUT_DIR)]
        output: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    match args.command {
        Some(Command::Convert { input, output }) => run_convert(&input, &output),
        None => run_reports(args).await,
    }
}

/// `RUST_LOG` wins; otherwise info, or debug with --verbose
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

async fn run_reports(args: Args) -> Result<()> {
    let file_config = FileConfig::load_or_default(&args.config)?;
    let config = Config::from_file(file_config, args.output_dir);

    let preset = Preset {
        start: args.start,
        end: args.end,
        business_number: args.business_number,
    };
    let input = {
        let stdin = io::stdin();
        let mut prompter = Prompter::new(stdin.lock(), io::stdout());
        prompt::collect_run_input(&mut prompter, preset).context("Invalid input, nothing was downloaded")?
    };

    print_run_header(&input, &config);

    let sink = DirectorySink::create(&config.output_dir)
        .with_context(|| format!("Failed to create output directory: {}", config.output_dir.display()))?;
    let client = PortalClient::new(config.request_timeout)?;

    let mut driver = PeriodDriver::new(client, sink, TokioPacer, input.business_number.clone())
        .with_profile(config.profile)
        .with_layout(config.layout)
        .with_pacing(config.pacing);

    let report = driver.run(input.start, input.end).await?;
    let sink = driver.into_sink();

    print_run_report(&report);
    println!("\n{} file(s) written to {}", sink.written().len(), config.output_dir.display());

    Ok(())
}

fn print_run_header(input: &RunInput, config: &Config) {
    println!("=============================================");
    println!("Four-insurance contribution reports");
    println!("=============================================");
    println!("  Business number: {}", input.business_number);
    println!("  Months:          {} to {} ({})", input.start, input.end, input.month_count());
    println!("  Output:          {}", config.output_dir.display());
    println!();

    if input.month_count() == 0 {
        println!("Start month is after end month; nothing to download.");
    }
}

fn print_run_report(report: &RunReport) {
    if report.periods.is_empty() {
        return;
    }

    let titles: Vec<_> = InsuranceCategory::ALL.iter().map(|c| c.to_string()).collect();
    println!(
        "{:<8} {:>7} {:>12} {:>12} {:>12} {:>20} {:>13}",
        "Month", "People", titles[0], titles[1], titles[2], titles[3], "Total"
    );
    println!("{}", "-".repeat(90));

    let mut grand_total = 0u64;
    for outcome in &report.periods {
        let [health, pension, employment, accident] = outcome.category_totals;
        println!(
            "{:<8} {:>7} {:>12} {:>12} {:>12} {:>20} {:>13}{}",
            outcome.period.yyyymm(),
            outcome.people,
            health,
            pension,
            employment,
            accident,
            outcome.grand_total,
            if outcome.is_complete() { "" } else { "  *" },
        );
        grand_total += outcome.grand_total;
    }

    println!("{}", "-".repeat(90));
    println!("{:<8} {:>80}", "Total", grand_total);

    if report.failure_count() > 0 {
        println!("\n* Incomplete months:");
        for (period, failure) in report.failures() {
            println!("  ⚠️  {} {}: {}", period.yyyymm(), failure.category, failure.error);
        }
    }
}

fn run_convert(input: &std::path::Path, output: &std::path::Path) -> Result<()> {
    println!("Converting CSV files in {} to xlsx in {}...\n", input.display(), output.display());

    let results = convert::convert_folder(input, output)?;
    if results.is_empty() {
        println!("No CSV files found.");
        return Ok(());
    }

    let mut failed = 0usize;
    for result in &results {
        match result {
            Conversion::Converted {
                input,
                output,
                encoding,
            } => println!("  [done] {} -> {} ({})", input.display(), output.display(), encoding.label()),
            Conversion::Failed { input, error } => {
                failed += 1;
                println!("  [error] {}: {}", input.display(), error);
            }
        }
    }

    println!("\n{} converted, {} failed", results.len() - failed, failed);
    Ok(())
}
