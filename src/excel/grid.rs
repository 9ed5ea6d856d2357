//! In-memory sheets and workbooks
//!
//! Sheets are dense grids anchored at A1 so that positions read from one file
//! can be applied to another file sharing the same layout.

use crate::error::{RecalError, RecalResult};
use calamine::{Data, Range};
use std::fmt;

/// Zero-based cell position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellPos {
    pub row: u32,
    pub col: u32,
}

impl CellPos {
    pub fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for CellPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", column_letter(self.col), self.row + 1)
    }
}

/// Convert column index to Excel column letter (0→A, 1→B, 25→Z, 26→AA, etc.)
pub fn column_letter(n: u32) -> String {
    let mut result = String::new();
    let mut num = n;

    loop {
        let remainder = num % 26;
        result.insert(0, (b'A' + remainder as u8) as char);
        if num < 26 {
            break;
        }
        num = num / 26 - 1;
    }

    result
}

/// Text form of a cell used for marker and header matching
pub fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        other => other.to_string(),
    }
}

/// Numeric value of a cell, accepting numeric text
pub fn cell_number(cell: &Data) -> Option<f64> {
    match cell {
        Data::Float(f) => Some(*f),
        Data::Int(i) => Some(*i as f64),
        Data::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

/// A named worksheet
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Sheet {
    name: String,
    rows: Vec<Vec<Data>>,
}

impl Sheet {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rows: Vec::new(),
        }
    }

    /// Build a sheet from row-major values starting at A1
    pub fn from_rows(name: impl Into<String>, rows: Vec<Vec<Data>>) -> Self {
        Self {
            name: name.into(),
            rows,
        }
    }

    /// Build a sheet from a calamine range, keeping absolute positions
    pub fn from_range(name: impl Into<String>, range: &Range<Data>) -> Self {
        let mut sheet = Self::new(name);
        let (start_row, start_col) = range.start().unwrap_or((0, 0));
        for (row, col, value) in range.used_cells() {
            sheet.set(
                CellPos::new(start_row + row as u32, start_col + col as u32),
                value.clone(),
            );
        }
        sheet
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn height(&self) -> u32 {
        self.rows.len() as u32
    }

    pub fn width(&self) -> u32 {
        self.rows.iter().map(|r| r.len()).max().unwrap_or(0) as u32
    }

    pub fn get(&self, pos: CellPos) -> Option<&Data> {
        self.rows
            .get(pos.row as usize)
            .and_then(|row| row.get(pos.col as usize))
    }

    /// Cell value, with cells outside the grid reading as empty
    pub fn value(&self, pos: CellPos) -> &Data {
        const EMPTY: &Data = &Data::Empty;
        self.get(pos).unwrap_or(EMPTY)
    }

    pub fn set(&mut self, pos: CellPos, value: Data) {
        let (row, col) = (pos.row as usize, pos.col as usize);
        if self.rows.len() <= row {
            self.rows.resize_with(row + 1, Vec::new);
        }
        let cells = &mut self.rows[row];
        if cells.len() <= col {
            cells.resize(col + 1, Data::Empty);
        }
        cells[col] = value;
    }

    /// Rows in order, each as its stored (possibly ragged) slice
    pub fn rows(&self) -> impl Iterator<Item = (u32, &[Data])> {
        self.rows
            .iter()
            .enumerate()
            .map(|(i, r)| (i as u32, r.as_slice()))
    }
}

/// Ordered collection of sheets
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Workbook {
    sheets: Vec<Sheet>,
}

impl Workbook {
    pub fn new(sheets: Vec<Sheet>) -> Self {
        Self { sheets }
    }

    pub fn sheets(&self) -> &[Sheet] {
        &self.sheets
    }

    /// Sheet by name, or the first sheet when no name is given
    pub fn sheet(&self, name: Option<&str>) -> RecalResult<&Sheet> {
        let index = self.index_of(name)?;
        Ok(&self.sheets[index])
    }

    pub fn sheet_mut(&mut self, name: Option<&str>) -> RecalResult<&mut Sheet> {
        let index = self.index_of(name)?;
        Ok(&mut self.sheets[index])
    }

    fn index_of(&self, name: Option<&str>) -> RecalResult<usize> {
        match name {
            Some(name) => self
                .sheets
                .iter()
                .position(|s| s.name == name)
                .ok_or_else(|| RecalError::SheetNotFound(name.to_string())),
            None if self.sheets.is_empty() => {
                Err(RecalError::SheetNotFound("<first sheet>".to_string()))
            }
            None => Ok(0),
        }
    }
}
