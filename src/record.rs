// src/record.rs

use serde::{Deserialize, Serialize};

/// One product row of the working table.
///
/// The derived fields start out `None` and are filled in stage by stage:
/// projector → `projected_units`, metrics → `projected_diff` and `growth_pct`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub code: String,
    pub name: String,
    pub prior_units: f64,
    pub current_units: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub projected_units: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub projected_diff: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub growth_pct: Option<f64>,
}

impl ProductRecord {
    pub fn new(
        code: impl Into<String>,
        name: impl Into<String>,
        prior_units: f64,
        current_units: f64,
    ) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            prior_units,
            current_units,
            projected_units: None,
            projected_diff: None,
            growth_pct: None,
        }
    }

    /// Both volumes strictly positive, so both logarithms exist.
    pub fn in_fit_set(&self) -> bool {
        self.prior_units > 0.0 && self.current_units > 0.0
    }

    pub fn is_projectable(&self) -> bool {
        self.current_units > 0.0
    }
}
