//! Simple linear least-squares regression over `x,y` tables.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{OhpError, OhpResult};
use crate::table::Table;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Regression {
    pub samples: usize,
    pub slope: f64,
    pub intercept: f64,
    /// Pearson correlation coefficient.
    pub correlation: f64,
}

impl fmt::Display for Regression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "slope: {}, y-intercept: {}, r: {}",
            self.slope, self.intercept, self.correlation
        )
    }
}

/// Fit `y = slope * x + intercept` over the rows of a two-column table.
///
/// Blank rows are skipped. Any other row must hold exactly two numbers.
pub fn linear_regression(table: &Table) -> OhpResult<Regression> {
    let points = points(table)?;
    fit(&points)
}

/// Fit over raw `(x, y)` pairs.
pub fn fit(points: &[(f64, f64)]) -> OhpResult<Regression> {
    let samples = points.len();
    if samples < 2 {
        return Err(OhpError::InsufficientSamples(samples));
    }

    let n = samples as f64;
    let (mut sum_x, mut sum_y, mut sum_xy, mut sum_x2, mut sum_y2) = (0.0, 0.0, 0.0, 0.0, 0.0);
    for &(x, y) in points {
        sum_x += x;
        sum_y += y;
        sum_xy += x * y;
        sum_x2 += x * x;
        sum_y2 += y * y;
    }

    let sxy = sum_xy - sum_x * sum_y / n;
    let sxx = sum_x2 - sum_x * sum_x / n;
    let syy = sum_y2 - sum_y * sum_y / n;

    if sxx.abs() <= f64::EPSILON * sum_x2.max(1.0) {
        return Err(OhpError::Degenerate("all x values are equal".into()));
    }

    let slope = sxy / sxx;
    let intercept = sum_y / n - slope * sum_x / n;
    let correlation = if syy.abs() <= f64::EPSILON * sum_y2.max(1.0) {
        // Horizontal line: y does not vary, so there is nothing to correlate.
        0.0
    } else {
        sxy / (sxx * syy).sqrt()
    };

    Ok(Regression {
        samples,
        slope,
        intercept,
        correlation,
    })
}

fn points(table: &Table) -> OhpResult<Vec<(f64, f64)>> {
    let mut points = Vec::with_capacity(table.values.len());
    for (i, row) in table.values.iter().enumerate() {
        let line = i + 2;
        match row.as_slice() {
            [blank] if blank.trim().is_empty() => continue,
            [x, y] => points.push((number(x, line)?, number(y, line)?)),
            _ => {
                return Err(OhpError::Parse(format!(
                    "line {line}: expected 2 fields, found {}",
                    row.len()
                )))
            }
        }
    }
    Ok(points)
}

fn number(field: &str, line: usize) -> OhpResult<f64> {
    field
        .trim()
        .parse()
        .map_err(|e| OhpError::Parse(format!("line {line}: {field:?} is not a number: {e}")))
}
