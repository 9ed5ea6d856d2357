use crate::config::RunConfig;
use crate::convert::{SampleOutcome, SampleStatus};
use crate::error::RecalResult;
use crate::pipeline::{process, RunSummary};
use colored::Colorize;

/// Format a number for display, removing unnecessary decimal places
fn format_number(n: f64) -> String {
    let rounded = (n * 1e6).round() / 1e6;
    format!("{:.6}", rounded)
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}

fn format_optional(n: Option<f64>) -> String {
    n.map(format_number).unwrap_or_else(|| "-".to_string())
}

/// One line describing what happened to a sample
fn describe(outcome: &SampleOutcome) -> String {
    match &outcome.status {
        SampleStatus::Converted {
            signal,
            previous,
            corrected,
        } => format!(
            "Converting {} CPS: ({}) {} --> {}",
            outcome.name,
            format_number(*signal),
            format_optional(*previous),
            format_number(*corrected)
        ),
        SampleStatus::NotNumeric { value } => {
            format!("{}: not float -- value: {}", outcome.name, value)
        }
        SampleStatus::EvaluationFailed { signal, reason } => format!(
            "{}: cannot convert -- value: {} ({})",
            outcome.name,
            format_number(*signal),
            reason
        ),
    }
}

/// Execute a recalibration run
pub fn recalibrate(config: RunConfig) -> RecalResult<()> {
    println!("{}", "🧪 ICP-MS Recalibration".bold().green());
    println!("   Element:   {}", config.element.bright_blue().bold());
    println!("   Standards: {}", config.standard_file.display());
    println!("   Raw:       {}", config.raw_file.display());
    println!("   Analyzed:  {}", config.analyzed_file.display());
    println!("   Degree:    {}\n", config.degree);

    if config.dry_run {
        println!(
            "{}",
            "📋 DRY RUN MODE - No workbooks will be written\n".yellow()
        );
    }

    let summary = process(&config)?;
    print_summary(&summary, config.verbose);
    Ok(())
}

fn print_summary(summary: &RunSummary, verbose: bool) {
    let report = &summary.report;

    if verbose {
        println!("{}", "📈 Calibration:".cyan());
        for point in report.calibration.points() {
            println!(
                "   {} CPS → {}",
                format_number(point.signal),
                format_number(point.concentration)
            );
        }
        println!();
        println!("{}", "🔄 Converting...".cyan());
    }

    for outcome in &report.samples {
        if outcome.is_converted() {
            if verbose {
                println!("   {}", describe(outcome));
            }
        } else {
            println!("   {}", describe(outcome).yellow());
        }
    }
    if verbose || report.skipped() > 0 {
        println!();
    }

    println!(
        "{} {} converted, {} skipped",
        "✅".green(),
        report.converted().to_string().bold(),
        report.skipped()
    );

    match &summary.output {
        Some(path) => println!("   Saved: {}", path.display()),
        None => println!("{}", "📋 Dry run complete - no changes written".yellow()),
    }
    if let Some(path) = &summary.plot {
        println!("   Plot:   {}", path.display());
    }
    if let Some(path) = &summary.report_file {
        println!("   Report: {}", path.display());
    }
}
