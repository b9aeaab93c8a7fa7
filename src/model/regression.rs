//! Ordinary least squares on log-transformed volumes.
//!
//! Fits `ln(current) = slope · ln(prior) + intercept`, i.e. the power law
//! `current ≈ exp(intercept) · prior^slope`.

use crate::error::{ProjectionError, Result};
use crate::record::ProductRecord;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Below this `Σ(x - x̄)²` the explanatory variable is treated as constant.
const MIN_X_VARIANCE: f64 = 1e-12;

/// Natural log of a strictly positive, finite value.
///
/// Callers filter their inputs first; an `Err` here means that filter was
/// bypassed.
pub fn checked_ln(value: f64) -> Result<f64> {
    if value > 0.0 && value.is_finite() {
        Ok(value.ln())
    } else {
        Err(ProjectionError::DomainError { value })
    }
}

/// A fitted log-log line.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LogLogModel {
    pub slope: f64,
    pub intercept: f64,
    /// Number of rows in the fit set.
    pub fit_size: usize,
    /// Coefficient of determination in log space.
    pub r_squared: f64,
}

impl LogLogModel {
    /// Evaluate the line at `ln(x)`.
    pub fn predict_log(&self, ln_x: f64) -> f64 {
        self.slope * ln_x + self.intercept
    }

    /// Forecast in original units: `exp(slope · ln(units) + intercept)`.
    /// An overflowing extrapolation is an error, never `inf`.
    pub fn project(&self, units: f64) -> Result<f64> {
        let projected = self.predict_log(checked_ln(units)?).exp();
        if projected.is_finite() {
            Ok(projected)
        } else {
            Err(ProjectionError::NonFiniteProjection { units })
        }
    }

    /// Power-law scale factor `exp(intercept)`.
    pub fn multiplier(&self) -> f64 {
        self.intercept.exp()
    }

    pub fn formula(&self) -> String {
        format!("ln(y) = {:.2} · ln(x) + {:.2}", self.slope, self.intercept)
    }
}

/// Fit the model on every record whose prior and current units are both
/// strictly positive. Rows outside that set never reach the logarithm.
#[tracing::instrument(level = "info", skip_all, fields(rows = records.len()))]
pub fn fit_log_log(records: &[ProductRecord]) -> Result<LogLogModel> {
    let points: Vec<(f64, f64)> = records
        .iter()
        .filter(|r| r.in_fit_set())
        .map(|r| Ok((checked_ln(r.prior_units)?, checked_ln(r.current_units)?)))
        .collect::<Result<_>>()?;

    if points.is_empty() {
        return Err(ProjectionError::EmptyFitSet);
    }

    let n = points.len() as f64;
    let x_mean = points.iter().map(|(x, _)| x).sum::<f64>() / n;
    let y_mean = points.iter().map(|(_, y)| y).sum::<f64>() / n;

    let mut sxy = 0.0;
    let mut sxx = 0.0;
    let mut syy = 0.0;
    for &(x, y) in &points {
        let dx = x - x_mean;
        let dy = y - y_mean;
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }

    // Constant x: the minimum-norm solution is a flat line through ȳ.
    let slope = if sxx < MIN_X_VARIANCE { 0.0 } else { sxy / sxx };
    let intercept = y_mean - slope * x_mean;

    let ss_res: f64 = points
        .iter()
        .map(|&(x, y)| {
            let e = y - (slope * x + intercept);
            e * e
        })
        .sum();
    let r_squared = if syy < MIN_X_VARIANCE {
        1.0
    } else {
        1.0 - ss_res / syy
    };

    let model = LogLogModel {
        slope,
        intercept,
        fit_size: points.len(),
        r_squared,
    };
    info!(
        fit_size = model.fit_size,
        r_squared = model.r_squared,
        "fitted {}",
        model.formula()
    );
    Ok(model)
}
