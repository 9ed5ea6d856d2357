//! Workbook writer - [`Workbook`] → .xlsx

use crate::error::RecalResult;
use crate::excel::grid::{CellPos, Sheet, Workbook};
use calamine::Data;
use rust_xlsxwriter::{DocProperties, ExcelDateTime, Format, Workbook as XlsxWorkbook, Worksheet};
use std::path::Path;

/// Writes cell values of every sheet to a new .xlsx file
pub struct ExcelExporter<'a> {
    workbook: &'a Workbook,
}

impl<'a> ExcelExporter<'a> {
    pub fn new(workbook: &'a Workbook) -> Self {
        Self { workbook }
    }

    pub fn export(&self, output_path: &Path) -> RecalResult<()> {
        let mut xlsx = new_xlsx_workbook()?;

        for sheet in self.workbook.sheets() {
            let worksheet = xlsx.add_worksheet();
            worksheet.set_name(sheet.name())?;
            write_sheet(worksheet, sheet)?;
        }

        xlsx.save(output_path)?;
        tracing::debug!(path = %output_path.display(), "saved workbook");
        Ok(())
    }
}

/// Workbook with a fixed creation timestamp so repeated runs are byte-identical
pub fn new_xlsx_workbook() -> RecalResult<XlsxWorkbook> {
    let mut xlsx = XlsxWorkbook::new();
    let created = ExcelDateTime::from_ymd(2017, 1, 1)?;
    let properties = DocProperties::new()
        .set_author("icp-recal")
        .set_creation_datetime(&created);
    xlsx.set_properties(&properties);
    Ok(xlsx)
}

fn write_sheet(worksheet: &mut Worksheet, sheet: &Sheet) -> RecalResult<()> {
    for (row, cells) in sheet.rows() {
        for (col, value) in cells.iter().enumerate() {
            write_cell(worksheet, CellPos::new(row, col as u32), value)?;
        }
    }
    Ok(())
}

/// Write one cell value; formulas were already resolved to their cached values
fn write_cell(worksheet: &mut Worksheet, pos: CellPos, value: &Data) -> RecalResult<()> {
    let (row, col) = (pos.row, pos.col as u16);
    match value {
        Data::Empty => {}
        Data::Int(i) => {
            worksheet.write_number(row, col, *i as f64)?;
        }
        Data::Float(f) => {
            worksheet.write_number(row, col, *f)?;
        }
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => {
            worksheet.write_string(row, col, s)?;
        }
        Data::Bool(b) => {
            worksheet.write_boolean(row, col, *b)?;
        }
        Data::DateTime(dt) => {
            let datetime = ExcelDateTime::from_serial_datetime(dt.as_f64())?;
            let format = Format::new().set_num_format(date_format(dt));
            worksheet.write_datetime_with_format(row, col, &datetime, &format)?;
        }
        Data::Error(e) => {
            worksheet.write_string(row, col, e.to_string())?;
        }
    }
    Ok(())
}

/// Number format that keeps a date serial typed as a date (or duration)
fn date_format(dt: &calamine::ExcelDateTime) -> &'static str {
    if dt.is_duration() {
        "[h]:mm:ss"
    } else if dt.as_f64().fract() == 0.0 {
        "yyyy-mm-dd"
    } else {
        "yyyy-mm-dd hh:mm:ss"
    }
}
