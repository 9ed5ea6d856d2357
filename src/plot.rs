//! Log-log comparison chart of the calibration, written as an .xlsx chart

use crate::core::Interpolant;
use crate::error::RecalResult;
use crate::excel::new_xlsx_workbook;
use rust_xlsxwriter::{Chart, ChartFormat, ChartMarker, ChartMarkerType, ChartType};
use std::path::Path;

const CURVE_POINTS: usize = 50;
const SHEET: &str = "Comparison";

/// One calibration row as seen in the three input files
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalibrationRow {
    pub signal: f64,
    pub standard: f64,
    /// Concentration the instrument software reported for this standard
    pub reference: Option<f64>,
}

/// Data behind the comparison chart
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonPlot {
    pub rows: Vec<CalibrationRow>,
    pub curve: Vec<(f64, f64)>,
    pub degree: usize,
}

impl ComparisonPlot {
    /// Sample the fitted curve at log-spaced signals from 10 up to the decade
    /// of the largest calibration signal
    pub fn new(mut rows: Vec<CalibrationRow>, spline: &Interpolant) -> Self {
        rows.sort_by(|a, b| a.signal.total_cmp(&b.signal));

        let max_signal = rows.iter().map(|r| r.signal).fold(f64::MIN, f64::max);
        let curve = log_space(1.0, max_signal.log10().round(), CURVE_POINTS)
            .into_iter()
            .filter_map(|x| spline.evaluate(x).ok().map(|y| (x, y)))
            .collect();

        Self {
            rows,
            curve,
            degree: spline.degree(),
        }
    }

    pub fn write(&self, path: &Path) -> RecalResult<()> {
        let mut workbook = new_xlsx_workbook()?;
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(SHEET)?;

        let headers = ["CPS", "Standard", "Instrument", "", "Fit CPS", "Fit"];
        for (col, header) in headers.iter().enumerate() {
            if !header.is_empty() {
                worksheet.write_string(0, col as u16, *header)?;
            }
        }
        for (i, row) in self.rows.iter().enumerate() {
            let r = i as u32 + 1;
            worksheet.write_number(r, 0, row.signal)?;
            worksheet.write_number(r, 1, row.standard)?;
            if let Some(reference) = row.reference {
                worksheet.write_number(r, 2, reference)?;
            }
        }
        for (i, (x, y)) in self.curve.iter().enumerate() {
            let r = i as u32 + 1;
            worksheet.write_number(r, 4, *x)?;
            worksheet.write_number(r, 5, *y)?;
        }

        let last_row = self.rows.len() as u32;
        let last_curve = self.curve.len() as u32;

        let mut chart = Chart::new(ChartType::ScatterStraight);
        chart.title().set_name("Different interpolations");
        chart.x_axis().set_name("CPS").set_log_base(10);
        chart
            .y_axis()
            .set_name("Concentration (ug/L)")
            .set_log_base(10);

        chart
            .add_series()
            .set_name("standard")
            .set_categories((SHEET, 1, 0, last_row, 0))
            .set_values((SHEET, 1, 1, last_row, 1))
            .set_format(ChartFormat::new().set_no_line())
            .set_marker(ChartMarker::new().set_type(ChartMarkerType::Circle));
        chart
            .add_series()
            .set_name("linear fitting from instrument")
            .set_categories((SHEET, 1, 0, last_row, 0))
            .set_values((SHEET, 1, 2, last_row, 2));
        if last_curve > 0 {
            chart
                .add_series()
                .set_name(format!("interpolated spline (k={})", self.degree).as_str())
                .set_categories((SHEET, 1, 4, last_curve, 4))
                .set_values((SHEET, 1, 5, last_curve, 5));
        }

        worksheet.insert_chart(1, 7, &chart)?;
        workbook.save(path)?;
        tracing::debug!(path = %path.display(), "saved comparison chart");
        Ok(())
    }
}

/// `count` points evenly spaced in log10 between `10^start` and `10^stop`, inclusive
fn log_space(start: f64, stop: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![10f64.powf(start)],
        _ => {
            let step = (stop - start) / (count - 1) as f64;
            (0..count)
                .map(|i| 10f64.powf(start + step * i as f64))
                .collect()
        }
    }
}
