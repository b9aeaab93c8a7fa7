// src/report/metrics.rs

use crate::process::utils::{round_to, round_units};
use crate::record::ProductRecord;
use serde::Serialize;

/// Derive `projected_diff` and `growth_pct` from each projection.
///
/// `growth_pct` is relative to the current period and only computed when
/// `current_units != 0`. Records without a projection get neither field.
pub fn apply_metrics(records: Vec<ProductRecord>) -> Vec<ProductRecord> {
    records
        .into_iter()
        .map(|mut r| {
            r.projected_diff = r.projected_units.map(|p| p - r.current_units);
            r.growth_pct = match r.projected_diff {
                Some(diff) if r.current_units != 0.0 => Some(diff / r.current_units * 100.0),
                _ => None,
            };
            r
        })
        .collect()
}

/// Presentation view of a record: unit columns to whole numbers, growth to
/// one decimal. Undefined values stay `None`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayRow {
    pub code: String,
    pub name: String,
    pub current_units: f64,
    pub projected_units: Option<f64>,
    pub projected_diff: Option<f64>,
    pub growth_pct: Option<f64>,
}

impl From<&ProductRecord> for DisplayRow {
    fn from(r: &ProductRecord) -> Self {
        Self {
            code: r.code.clone(),
            name: r.name.clone(),
            current_units: round_units(r.current_units),
            projected_units: r.projected_units.map(round_units),
            projected_diff: r.projected_diff.map(round_units),
            growth_pct: r.growth_pct.map(|g| round_to(g, 1)),
        }
    }
}
