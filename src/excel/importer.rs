//! Workbook reader - any format calamine understands → [`Workbook`]

use crate::error::{RecalError, RecalResult};
use crate::excel::grid::{Sheet, Workbook};
use calamine::{open_workbook_auto, Reader};
use std::path::{Path, PathBuf};

/// Reads every sheet of a workbook into memory
pub struct ExcelImporter {
    path: PathBuf,
}

impl ExcelImporter {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Load all sheets, keeping cached values of formula cells
    pub fn import(&self) -> RecalResult<Workbook> {
        let mut workbook = open_workbook_auto(&self.path).map_err(|e| self.error(e))?;

        let mut sheets = Vec::new();
        for sheet_name in workbook.sheet_names() {
            let range = workbook
                .worksheet_range(&sheet_name)
                .map_err(|e| self.error(e))?;
            sheets.push(Sheet::from_range(sheet_name, &range));
        }

        tracing::debug!(
            path = %self.path.display(),
            sheets = sheets.len(),
            "loaded workbook"
        );
        Ok(Workbook::new(sheets))
    }

    fn error(&self, e: impl std::fmt::Display) -> RecalError {
        RecalError::Workbook {
            path: self.path.display().to_string(),
            message: e.to_string(),
        }
    }
}
