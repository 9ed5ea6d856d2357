use anyhow::Context;
use clap::Parser;
use icp_recal::cli;
use icp_recal::config::{Layout, RunConfig};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "icp-recal")]
#[command(about = "Re-fit ICP-MS calibration curves and rewrite analyzed concentrations")]
#[command(long_about = "icp-recal - ICP-MS calibration spline correction

Modifies the concentrations computed by the instrument software (Agilent 8800
QQQ exports). The calibration standards are re-fitted with an interpolating
spline of degree k (default 1: straight lines between standards). Signals
outside the standard range are extrapolated from the boundary segment.

One element is corrected per run.

INPUTS:
  standard_file  - standard concentrations below a 'Final:' marker cell
  raw_file       - raw CPS per element, 'Sample Name' column in header row 2
  analyzed_file  - instrument concentrations, same row layout as raw_file

OUTPUT:
  <analyzed>_mod.xlsx next to the analyzed file (or --output)

EXAMPLES:
  icp-recal Te standard.xlsx raw_data.xlsx analyzed_data.xlsx
  icp-recal Te standard.xlsx raw_data.xlsx analyzed_data.xlsx -v -p -k 3
  icp-recal Cd std.xlsx raw.xlsx alz.xlsx --dry-run --report cd.json")]
#[command(version)]
struct Cli {
    /// Element to modify (matched against column headers)
    element: String,

    /// Excel file with standard concentrations
    standard_file: PathBuf,

    /// Excel file with raw data in CPS
    raw_file: PathBuf,

    /// Excel file with analyzed data in ug/L
    analyzed_file: PathBuf,

    /// Print every conversion
    #[arg(short, long)]
    verbose: bool,

    /// Write a log-log comparison chart workbook
    #[arg(short, long)]
    plot: bool,

    /// Degree of the interpolating spline
    #[arg(short = 'k', long, default_value_t = 1, value_parser = clap::value_parser!(u8).range(1..=5))]
    degree: u8,

    /// Output workbook (default: <analyzed>_mod.xlsx)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Compute and report without writing workbooks
    #[arg(short = 'n', long)]
    dry_run: bool,

    /// Write the conversion report as JSON
    #[arg(long)]
    report: Option<PathBuf>,

    /// YAML file overriding sheet layout conventions
    #[arg(long, env = "ICP_RECAL_LAYOUT")]
    layout: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "info" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let layout = match &cli.layout {
        Some(path) => Layout::from_file(path)
            .with_context(|| format!("Failed to load layout {}", path.display()))?,
        None => Layout::default(),
    };

    let mut config = RunConfig::new(
        cli.element,
        cli.standard_file,
        cli.raw_file,
        cli.analyzed_file,
    );
    config.degree = usize::from(cli.degree);
    config.verbose = cli.verbose;
    config.plot = cli.plot;
    config.dry_run = cli.dry_run;
    config.output = cli.output;
    config.report = cli.report;
    config.layout = layout;

    cli::recalibrate(config).context("Recalibration failed")
}
