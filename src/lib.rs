//! icp-recal - re-fit ICP-MS calibration curves and rewrite analyzed concentrations
//!
//! The instrument software converts counts per second (CPS) to concentrations
//! with its own calibration. This crate re-fits the calibration standards with
//! an interpolating spline and writes the corrected values back into a copy of
//! the analyzed workbook.
//!
//! # Features
//!
//! - Interpolating B-splines of degree 1 to 5 with extrapolation past the standards
//! - Anchor-based lookup for loosely structured instrument exports
//! - Per-sample outcomes collected into a serializable report
//! - Optional log-log comparison chart
//!
//! # Example
//!
//! ```no_run
//! use icp_recal::config::RunConfig;
//! use icp_recal::pipeline::process;
//!
//! let config = RunConfig::new("Te", "standard.xlsx", "raw.xlsx", "analyzed.xlsx");
//! let summary = process(&config)?;
//!
//! println!("Converted: {}", summary.report.converted());
//! # Ok::<(), icp_recal::error::RecalError>(())
//! ```

pub mod cli;
pub mod config;
pub mod convert;
pub mod core;
pub mod error;
pub mod excel;
pub mod extract;
pub mod pipeline;
pub mod plot;

// Re-export commonly used types
pub use config::{Layout, RunConfig};
pub use convert::{ConversionReport, SampleOutcome, SampleStatus};
pub use core::{CalibrationSet, FitError, Interpolant};
pub use error::{RecalError, RecalResult};
