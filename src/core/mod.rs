//! Calibration curve fitting

pub mod calibration;
pub mod spline;

pub use calibration::CalibrationSet;
pub use spline::{FitError, Interpolant, MAX_DEGREE, MIN_DEGREE};
