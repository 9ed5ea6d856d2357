use crate::core::FitError;
use thiserror::Error;

pub type RecalResult<T> = Result<T, RecalError>;

#[derive(Error, Debug)]
pub enum RecalError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to read workbook {path}: {message}")]
    Workbook { path: String, message: String },

    #[error("Failed to write workbook: {0}")]
    Write(#[from] rust_xlsxwriter::XlsxError),

    #[error("Layout error: {0}")]
    Layout(String),

    #[error("Layout file parsing error: {0}")]
    LayoutYaml(#[from] serde_yaml::Error),

    #[error("Report serialization error: {0}")]
    Report(#[from] serde_json::Error),

    #[error("Sheet '{0}' not found")]
    SheetNotFound(String),

    #[error("Marker '{marker}' not found in sheet '{sheet}'")]
    AnchorNotFound { marker: String, sheet: String },

    #[error("Element '{element}' not found in sheet '{sheet}'")]
    ElementNotFound { element: String, sheet: String },

    #[error("Invalid standard concentration at {cell}: '{value}'")]
    InvalidStandard { cell: String, value: String },

    #[error("Invalid calibration signal at {cell}: '{value}'")]
    InvalidCalibration { cell: String, value: String },

    #[error("Calibration mismatch: {signals} signals but {concentrations} standard concentrations")]
    CalibrationMismatch {
        signals: usize,
        concentrations: usize,
    },

    #[error("Spline fit error: {0}")]
    Fit(#[from] FitError),
}
