//! Pulls calibration standards, signals and sample names out of the sheets

use crate::config::{row_index, Layout};
use crate::error::{RecalError, RecalResult};
use crate::excel::{cell_number, cell_text, require_cell, CellPos, Sheet};
use calamine::Data;

/// One sample cell in the raw sheet
#[derive(Debug, Clone, PartialEq)]
pub struct RawSample {
    pub name: String,
    pub cell: CellPos,
    pub value: Data,
}

/// Standard concentrations for `element`, ascending.
///
/// Headers sit one row above the marker cell and data starts one row below
/// it. The sheet stores standards from the highest down, so the column is
/// reversed. Only the first matching column is read, pairing with the single
/// raw calibration column.
pub fn standard_concentrations(
    sheet: &Sheet,
    element: &str,
    layout: &Layout,
) -> RecalResult<Vec<f64>> {
    let anchor = require_cell(sheet, &layout.standard_marker)?;
    let not_found = || RecalError::ElementNotFound {
        element: element.to_string(),
        sheet: sheet.name().to_string(),
    };

    let header_row = anchor.row.checked_sub(1).ok_or_else(not_found)?;
    let column = (anchor.col + 1..sheet.width())
        .find(|&col| cell_text(sheet.value(CellPos::new(header_row, col))).contains(element))
        .ok_or_else(not_found)?;

    let mut values = Vec::new();
    for row in anchor.row + 1..sheet.height() {
        let cell = CellPos::new(row, column);
        let value = sheet.value(cell);
        if matches!(value, Data::Empty) {
            continue;
        }
        let number = cell_number(value).ok_or_else(|| RecalError::InvalidStandard {
            cell: cell.to_string(),
            value: cell_text(value),
        })?;
        values.push(number);
    }
    values.reverse();

    tracing::debug!(element, count = values.len(), "read standard concentrations");
    Ok(values)
}

/// Columns whose element header contains `element`, left to right
pub fn element_columns(sheet: &Sheet, element: &str, layout: &Layout) -> Vec<u32> {
    let header_row = row_index(layout.element_header_row);
    (0..sheet.width())
        .filter(|&col| cell_text(sheet.value(CellPos::new(header_row, col))).contains(element))
        .collect()
}

/// First element column, or an error when the element is absent
pub fn first_element_column(sheet: &Sheet, element: &str, layout: &Layout) -> RecalResult<u32> {
    element_columns(sheet, element, layout)
        .into_iter()
        .next()
        .ok_or_else(|| RecalError::ElementNotFound {
            element: element.to_string(),
            sheet: sheet.name().to_string(),
        })
}

/// Calibration rows of the layout, zero-based
pub fn calibration_rows(layout: &Layout) -> std::ops::RangeInclusive<u32> {
    row_index(layout.first_calibration_row)..=row_index(layout.last_calibration_row)
}

/// Signals of the calibration standards in sheet order; every cell must be numeric
pub fn calibration_signals(sheet: &Sheet, column: u32, layout: &Layout) -> RecalResult<Vec<f64>> {
    calibration_rows(layout)
        .map(|row| {
            let cell = CellPos::new(row, column);
            let value = sheet.value(cell);
            cell_number(value).ok_or_else(|| RecalError::InvalidCalibration {
                cell: cell.to_string(),
                value: cell_text(value),
            })
        })
        .collect()
}

/// Column holding sample names, found by its header
pub fn sample_name_column(sheet: &Sheet, layout: &Layout) -> Option<u32> {
    let header_row = row_index(layout.name_header_row);
    (0..sheet.width()).find(|&col| {
        cell_text(sheet.value(CellPos::new(header_row, col))).contains(&layout.sample_name_marker)
    })
}

/// Every non-empty sample cell in the element columns, column by column.
///
/// Values are kept as found; numeric checks happen at conversion time.
pub fn samples(sheet: &Sheet, element: &str, layout: &Layout) -> Vec<RawSample> {
    let name_column = sample_name_column(sheet, layout);
    let first_row = row_index(layout.first_sample_row);

    let mut samples = Vec::new();
    for column in element_columns(sheet, element, layout) {
        for row in first_row..sheet.height() {
            let cell = CellPos::new(row, column);
            let value = sheet.value(cell);
            if matches!(value, Data::Empty) {
                continue;
            }
            let name = name_column
                .map(|col| cell_text(sheet.value(CellPos::new(row, col))))
                .filter(|name| !name.is_empty())
                .unwrap_or_else(|| cell.to_string());
            samples.push(RawSample {
                name,
                cell,
                value: value.clone(),
            });
        }
    }

    tracing::debug!(element, count = samples.len(), "collected samples");
    samples
}

/// Values stored at the calibration rows of `column`, before any rewrite
pub fn reference_concentrations(sheet: &Sheet, column: u32, layout: &Layout) -> Vec<Option<f64>> {
    calibration_rows(layout)
        .map(|row| cell_number(sheet.value(CellPos::new(row, column))))
        .collect()
}
