//! Spreadsheet access: in-memory grids, anchor lookup, import and export
//!
//! - Import: any calamine-readable workbook → [`Workbook`]
//! - Export: [`Workbook`] → .xlsx with cached values

mod exporter;
pub mod grid;
mod importer;
pub mod locator;

pub use exporter::{new_xlsx_workbook, ExcelExporter};
pub use grid::{cell_number, cell_text, column_letter, CellPos, Sheet, Workbook};
pub use importer::ExcelImporter;
pub use locator::{find_first_cell, require_cell};
