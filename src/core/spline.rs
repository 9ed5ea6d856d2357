//! Interpolating B-splines of arbitrary degree
//!
//! The knot vector follows the FITPACK interpolation rule used by smoothing
//! spline libraries when the smoothing factor is zero:
//!
//! - `k + 1` coincident knots at each end of the data range
//! - interior knots at the data points for odd `k`
//! - interior knots halfway between data points for even `k`
//!
//! With `m` data points this yields exactly `m` basis functions, so the
//! coefficients solve a square collocation system. Outside the knot range the
//! boundary polynomial piece is extended, which for `k = 1` is plain linear
//! extrapolation from the two outermost points.

use thiserror::Error;

/// Smallest supported spline degree
pub const MIN_DEGREE: usize = 1;

/// Largest supported spline degree
pub const MAX_DEGREE: usize = 5;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FitError {
    #[error("Spline degree must be between 1 and 5, got {0}")]
    InvalidDegree(usize),

    #[error("x and y lengths differ ({x} vs {y})")]
    LengthMismatch { x: usize, y: usize },

    #[error("Degree {degree} needs at least {needed} points, got {got}")]
    TooFewPoints {
        degree: usize,
        needed: usize,
        got: usize,
    },

    #[error("Non-finite value at index {0}")]
    NonFinite(usize),

    #[error("x values must be strictly increasing (index {0})")]
    NotIncreasing(usize),

    #[error("Collocation system is singular")]
    Singular,

    #[error("Cannot evaluate at {0}")]
    InvalidInput(f64),

    #[error("Evaluation at {x} produced {y}")]
    NonFiniteResult { x: f64, y: f64 },
}

/// A fitted spline mapping x (signal) to y (concentration)
#[derive(Debug, Clone, PartialEq)]
pub struct Interpolant {
    degree: usize,
    knots: Vec<f64>,
    coeffs: Vec<f64>,
}

impl Interpolant {
    /// Fit an interpolating spline of the given degree through `(x, y)`.
    ///
    /// `x` must be strictly increasing and hold at least `degree + 1` points.
    pub fn fit(x: &[f64], y: &[f64], degree: usize) -> Result<Self, FitError> {
        if !(MIN_DEGREE..=MAX_DEGREE).contains(&degree) {
            return Err(FitError::InvalidDegree(degree));
        }
        if x.len() != y.len() {
            return Err(FitError::LengthMismatch {
                x: x.len(),
                y: y.len(),
            });
        }
        if x.len() <= degree {
            return Err(FitError::TooFewPoints {
                degree,
                needed: degree + 1,
                got: x.len(),
            });
        }
        if let Some(i) = x
            .iter()
            .zip(y)
            .position(|(a, b)| !a.is_finite() || !b.is_finite())
        {
            return Err(FitError::NonFinite(i));
        }
        if let Some(i) = x.windows(2).position(|w| w[1] <= w[0]) {
            return Err(FitError::NotIncreasing(i + 1));
        }

        let knots = interpolation_knots(x, degree);
        let m = x.len();

        let mut matrix = vec![vec![0.0; m]; m];
        for (row, &xj) in matrix.iter_mut().zip(x) {
            let span = find_span(&knots, degree, m, xj);
            let basis = basis_functions(&knots, degree, span, xj);
            for (r, value) in basis.into_iter().enumerate() {
                row[span - degree + r] = value;
            }
        }

        let coeffs = solve(matrix, y.to_vec())?;

        Ok(Self {
            degree,
            knots,
            coeffs,
        })
    }

    /// Evaluate the spline at `x`, extrapolating past either end.
    pub fn evaluate(&self, x: f64) -> Result<f64, FitError> {
        if !x.is_finite() {
            return Err(FitError::InvalidInput(x));
        }

        let m = self.coeffs.len();
        let span = find_span(&self.knots, self.degree, m, x);
        let basis = basis_functions(&self.knots, self.degree, span, x);
        let y: f64 = basis
            .iter()
            .zip(&self.coeffs[span - self.degree..=span])
            .map(|(b, c)| b * c)
            .sum();

        if y.is_finite() {
            Ok(y)
        } else {
            Err(FitError::NonFiniteResult { x, y })
        }
    }

    pub fn degree(&self) -> usize {
        self.degree
    }

    pub fn knots(&self) -> &[f64] {
        &self.knots
    }

    pub fn coefficients(&self) -> &[f64] {
        &self.coeffs
    }

    /// Range covered by the data (first and last knot)
    pub fn domain(&self) -> (f64, f64) {
        (self.knots[0], self.knots[self.knots.len() - 1])
    }
}

fn interpolation_knots(x: &[f64], k: usize) -> Vec<f64> {
    let m = x.len();
    let first = x[0];
    let last = x[m - 1];

    let mut knots = Vec::with_capacity(m + k + 1);
    knots.extend(std::iter::repeat(first).take(k + 1));
    for l in 0..m - k - 1 {
        let knot = if k % 2 == 1 {
            x[l + (k + 1) / 2]
        } else {
            (x[l + k / 2] + x[l + k / 2 + 1]) * 0.5
        };
        knots.push(knot);
    }
    knots.extend(std::iter::repeat(last).take(k + 1));
    knots
}

/// Index `mu` of the knot interval used for `x`, clamped to `[k, m - 1]`
fn find_span(knots: &[f64], k: usize, m: usize, x: f64) -> usize {
    k + knots[k + 1..m].partition_point(|&t| t <= x)
}

/// Values of the `k + 1` basis functions that are non-zero on `span`.
///
/// Products are formed before division so that a basis function equal to one
/// at a knot comes out as exactly one.
fn basis_functions(knots: &[f64], k: usize, span: usize, x: f64) -> Vec<f64> {
    let mut n = vec![0.0; k + 1];
    let mut left = vec![0.0; k + 1];
    let mut right = vec![0.0; k + 1];
    n[0] = 1.0;

    for j in 1..=k {
        left[j] = x - knots[span + 1 - j];
        right[j] = knots[span + j] - x;
        let mut saved = 0.0;
        for r in 0..j {
            let denom = right[r + 1] + left[j - r];
            let nr = n[r];
            n[r] = saved + right[r + 1] * nr / denom;
            saved = left[j - r] * nr / denom;
        }
        n[j] = saved;
    }

    n
}

/// Gaussian elimination with partial pivoting.
///
/// The collocation matrix is banded (`k + 1` non-zeros per row) but is solved
/// densely; calibration sets hold about ten points.
fn solve(mut a: Vec<Vec<f64>>, mut b: Vec<f64>) -> Result<Vec<f64>, FitError> {
    let n = b.len();

    for col in 0..n {
        let pivot = (col..n)
            .max_by(|&i, &j| a[i][col].abs().total_cmp(&a[j][col].abs()))
            .ok_or(FitError::Singular)?;
        if a[pivot][col] == 0.0 {
            return Err(FitError::Singular);
        }
        a.swap(col, pivot);
        b.swap(col, pivot);

        let pivot_row = a[col].clone();
        let pivot_b = b[col];
        for row in col + 1..n {
            let factor = a[row][col] / pivot_row[col];
            if factor == 0.0 {
                continue;
            }
            for (value, &p) in a[row][col..].iter_mut().zip(&pivot_row[col..]) {
                *value -= factor * p;
            }
            b[row] -= factor * pivot_b;
        }
    }

    let mut x = vec![0.0; n];
    for row in (0..n).rev() {
        let tail: f64 = (row + 1..n).map(|k| a[row][k] * x[k]).sum();
        x[row] = (b[row] - tail) / a[row][row];
    }

    Ok(x)
}
