//! Calibration set: known standards paired with their measured signals

use crate::core::spline::{FitError, Interpolant};
use crate::error::{RecalError, RecalResult};
use serde::Serialize;

/// One calibration standard
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CalibrationPoint {
    /// Instrument signal (CPS)
    pub signal: f64,
    /// Known concentration
    pub concentration: f64,
}

/// Calibration standards, ascending by concentration
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalibrationSet {
    points: Vec<CalibrationPoint>,
}

impl CalibrationSet {
    /// Pair signals with concentrations index by index.
    ///
    /// Requires equal lengths, at least two finite points and strictly
    /// monotonic signals.
    pub fn new(signals: &[f64], concentrations: &[f64]) -> RecalResult<Self> {
        if signals.len() != concentrations.len() {
            return Err(RecalError::CalibrationMismatch {
                signals: signals.len(),
                concentrations: concentrations.len(),
            });
        }
        if signals.len() < 2 {
            return Err(FitError::TooFewPoints {
                degree: 1,
                needed: 2,
                got: signals.len(),
            }
            .into());
        }
        if let Some(i) = signals
            .iter()
            .zip(concentrations)
            .position(|(s, c)| !s.is_finite() || !c.is_finite())
        {
            return Err(FitError::NonFinite(i).into());
        }

        let increasing = signals.windows(2).all(|w| w[1] > w[0]);
        let decreasing = signals.windows(2).all(|w| w[1] < w[0]);
        if !increasing && !decreasing {
            let i = signals
                .windows(2)
                .position(|w| w[1] == w[0] || (w[1] > w[0]) != (signals[1] > signals[0]))
                .map_or(1, |i| i + 1);
            return Err(FitError::NotIncreasing(i).into());
        }

        let mut points: Vec<CalibrationPoint> = signals
            .iter()
            .zip(concentrations)
            .map(|(&signal, &concentration)| CalibrationPoint {
                signal,
                concentration,
            })
            .collect();
        points.sort_by(|a, b| a.concentration.total_cmp(&b.concentration));

        Ok(Self { points })
    }

    pub fn points(&self) -> &[CalibrationPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn signals(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.signal).collect()
    }

    pub fn concentrations(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.concentration).collect()
    }

    /// Fit a spline of the given degree from signal to concentration
    pub fn fit(&self, degree: usize) -> Result<Interpolant, FitError> {
        let mut by_signal = self.points.clone();
        by_signal.sort_by(|a, b| a.signal.total_cmp(&b.signal));

        let x: Vec<f64> = by_signal.iter().map(|p| p.signal).collect();
        let y: Vec<f64> = by_signal.iter().map(|p| p.concentration).collect();
        Interpolant::fit(&x, &y, degree)
    }
}
