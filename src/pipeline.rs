//! One recalibration run: load, extract, fit, rewrite, save

use crate::config::RunConfig;
use crate::convert::{convert_samples, ConversionReport};
use crate::core::CalibrationSet;
use crate::error::RecalResult;
use crate::excel::{ExcelExporter, ExcelImporter};
use crate::extract;
use crate::plot::{CalibrationRow, ComparisonPlot};
use std::fs;
use std::path::PathBuf;

/// Result of [`process`]
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub report: ConversionReport,
    /// Rewritten workbook, unless this was a dry run
    pub output: Option<PathBuf>,
    pub plot: Option<PathBuf>,
    pub report_file: Option<PathBuf>,
}

pub fn process(config: &RunConfig) -> RecalResult<RunSummary> {
    let layout = &config.layout;
    let element = config.element.as_str();

    let standards = ExcelImporter::new(&config.standard_file).import()?;
    let standards_sheet = standards.sheet(layout.standard_sheet.as_deref())?;
    let concentrations = extract::standard_concentrations(standards_sheet, element, layout)?;

    let raw = ExcelImporter::new(&config.raw_file).import()?;
    let raw_sheet = raw.sheet(layout.raw_sheet.as_deref())?;
    let column = extract::first_element_column(raw_sheet, element, layout)?;
    let signals = extract::calibration_signals(raw_sheet, column, layout)?;

    let calibration = CalibrationSet::new(&signals, &concentrations)?;
    let spline = calibration.fit(config.degree)?;
    tracing::info!(
        element,
        points = calibration.len(),
        degree = config.degree,
        "fitted calibration curve"
    );

    let mut analyzed = ExcelImporter::new(&config.analyzed_file).import()?;
    let analyzed_sheet = analyzed.sheet_mut(layout.analyzed_sheet.as_deref())?;
    let references = extract::reference_concentrations(analyzed_sheet, column, layout);

    let samples = extract::samples(raw_sheet, element, layout);
    let outcomes = convert_samples(&spline, &samples, analyzed_sheet);

    let report = ConversionReport {
        element: element.to_string(),
        degree: config.degree,
        calibration,
        samples: outcomes,
    };

    let mut summary = RunSummary {
        report,
        output: None,
        plot: None,
        report_file: None,
    };

    if let Some(path) = &config.report {
        fs::write(path, summary.report.to_json()?)?;
        summary.report_file = Some(path.clone());
    }

    if config.dry_run {
        return Ok(summary);
    }

    let output = config.output_path();
    ExcelExporter::new(&analyzed).export(&output)?;
    summary.output = Some(output);

    if config.plot {
        let rows = signals
            .iter()
            .zip(concentrations.iter().copied())
            .zip(references)
            .map(|((&signal, standard), reference)| CalibrationRow {
                signal,
                standard,
                reference,
            })
            .collect();
        let path = config.plot_path();
        ComparisonPlot::new(rows, &spline).write(&path)?;
        summary.plot = Some(path);
    }

    Ok(summary)
}
