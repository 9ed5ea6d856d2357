//! Fixture workbooks shaped like instrument exports

#![allow(dead_code)]

use rust_xlsxwriter::{Format, Workbook};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy)]
pub enum V {
    S(&'static str),
    N(f64),
    /// Date serial shown with a date format
    D(f64),
    E,
}

/// Te standards as stored in the standards file (highest first)
pub const TE_STANDARDS_DESC: [f64; 10] = [100.0, 50.0, 20.0, 10.0, 5.0, 2.0, 1.0, 0.5, 0.2, 0.1];

/// Te calibration signals, Cal-1 (lowest) to Cal-10
pub const TE_SIGNALS: [f64; 10] = [
    120.0, 230.0, 510.0, 1040.0, 2100.0, 5050.0, 10200.0, 20500.0, 51000.0, 99000.0,
];

pub const TE_COLUMN: u32 = 3;

pub fn write_sheet(path: &Path, rows: &[Vec<V>]) {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    for (r, row) in rows.iter().enumerate() {
        for (c, value) in row.iter().enumerate() {
            match value {
                V::S(s) => {
                    worksheet.write_string(r as u32, c as u16, *s).unwrap();
                }
                V::N(n) => {
                    worksheet.write_number(r as u32, c as u16, *n).unwrap();
                }
                V::D(serial) => {
                    let date = Format::new().set_num_format("yyyy-mm-dd");
                    worksheet
                        .write_number_with_format(r as u32, c as u16, *serial, &date)
                        .unwrap();
                }
                V::E => {}
            }
        }
    }
    workbook.save(path).unwrap();
}

pub fn standards_rows() -> Vec<Vec<V>> {
    let mut rows = vec![
        vec![V::S("Standard"), V::S("Cd"), V::S("Te")],
        vec![V::S("Final:"), V::S("ug/L"), V::S("ug/L")],
    ];
    for (i, te) in TE_STANDARDS_DESC.iter().enumerate() {
        rows.push(vec![V::S("Std"), V::N(te / 2.0 + i as f64), V::N(*te)]);
    }
    rows
}

fn data_rows(te_values: &dyn Fn(usize, f64) -> V) -> Vec<Vec<V>> {
    let mut rows = vec![
        vec![V::E, V::E, V::S("111  Cd  [ He ]"), V::S("125  Te  [ He ]")],
        vec![V::S("Sample Type"), V::S("Sample Name"), V::S("CPS"), V::S("CPS")],
        vec![V::S("CalBlk"), V::S("Cal Blank"), V::N(5.0), te_values(0, 3.0)],
    ];
    for (i, signal) in TE_SIGNALS.iter().enumerate() {
        let name: &'static str = [
            "Cal-1", "Cal-2", "Cal-3", "Cal-4", "Cal-5", "Cal-6", "Cal-7", "Cal-8", "Cal-9",
            "Cal-10",
        ][i];
        rows.push(vec![
            V::S("Cal"),
            V::S(name),
            V::N(100.0 * (i + 1) as f64),
            te_values(i + 1, *signal),
        ]);
    }
    rows.push(vec![V::S("Sample"), V::S("River A"), V::N(40.0), te_values(11, 2100.0)]);
    rows.push(vec![V::S("Sample"), V::S("River B"), V::N(41.0), V::S("<0.000")]);
    rows.push(vec![V::S("Sample"), V::S("River C"), V::N(42.0), te_values(13, 60.0)]);
    rows.push(vec![V::S("Sample"), V::S("Spike"), V::N(43.0), te_values(14, 150000.0)]);
    rows
}

pub fn raw_rows() -> Vec<Vec<V>> {
    data_rows(&|_, signal| V::N(signal))
}

/// Instrument concentrations: a straight line through the origin
pub fn analyzed_rows() -> Vec<Vec<V>> {
    let mut rows = data_rows(&|_, signal| V::N(signal / 1000.0));
    rows[14][3] = V::S("n/a");
    rows
}

pub struct Fixture {
    pub dir: tempfile::TempDir,
    pub standard: PathBuf,
    pub raw: PathBuf,
    pub analyzed: PathBuf,
}

impl Fixture {
    pub fn new() -> Self {
        Self::with_rows(standards_rows(), raw_rows(), analyzed_rows())
    }

    pub fn with_rows(standard: Vec<Vec<V>>, raw: Vec<Vec<V>>, analyzed: Vec<Vec<V>>) -> Self {
        let dir = tempfile::TempDir::new().unwrap();
        let fixture = Self {
            standard: dir.path().join("standard.xlsx"),
            raw: dir.path().join("raw_data.xlsx"),
            analyzed: dir.path().join("analyzed_data.xlsx"),
            dir,
        };
        write_sheet(&fixture.standard, &standard);
        write_sheet(&fixture.raw, &raw);
        write_sheet(&fixture.analyzed, &analyzed);
        fixture
    }

    pub fn modified(&self) -> PathBuf {
        self.dir.path().join("analyzed_data_mod.xlsx")
    }
}

/// Piecewise-linear interpolation with linear extrapolation from the end segments
pub fn expected_linear(xs: &[f64], ys: &[f64], x: f64) -> f64 {
    let n = xs.len();
    let i = if x <= xs[1] {
        0
    } else if x >= xs[n - 2] {
        n - 2
    } else {
        xs.windows(2).position(|w| x >= w[0] && x <= w[1]).unwrap()
    };
    ys[i] + (x - xs[i]) * (ys[i + 1] - ys[i]) / (xs[i + 1] - xs[i])
}
