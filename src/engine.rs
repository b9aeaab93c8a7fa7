// src/engine.rs

use crate::config::ProjectionConfig;
use crate::error::Result;
use crate::model::{fit_log_log, project_records, LogLogModel};
use crate::process::{sanitize, RawTable, SanitizedTable};
use crate::record::ProductRecord;
use crate::report::{apply_metrics, flag_severe_declines, top_declines, top_growth};
use serde::Serialize;
use tracing::{info, warn};

/// Everything one run hands to presentation: the enriched table, the model
/// that produced it, the severe-decline subset and both rankings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectedTable {
    pub model: LogLogModel,
    pub records: Vec<ProductRecord>,
    /// Source rows removed by the sanitizer.
    pub dropped: usize,
    pub severe_declines: Vec<ProductRecord>,
    pub top_declines: Vec<ProductRecord>,
    pub top_growth: Vec<ProductRecord>,
}

impl ProjectedTable {
    pub fn anomaly_count(&self) -> usize {
        self.severe_declines.len()
    }

    pub fn projected_count(&self) -> usize {
        self.records
            .iter()
            .filter(|r| r.projected_units.is_some())
            .count()
    }
}

/// Run the whole pipeline on a raw table.
///
/// Either the complete enriched table comes back or the run fails as a
/// whole; there is no partial result.
pub fn project(raw: &RawTable, config: &ProjectionConfig) -> Result<ProjectedTable> {
    config.validate()?;
    let clean = sanitize(raw, &config.columns)?;
    project_sanitized(&clean, config)
}

/// Pipeline from the fit onwards. Deterministic: the same table yields
/// bit-identical coefficients and output.
#[tracing::instrument(level = "info", skip_all, fields(rows = clean.records.len()))]
pub fn project_sanitized(clean: &SanitizedTable, config: &ProjectionConfig) -> Result<ProjectedTable> {
    let model = fit_log_log(&clean.records)?;
    let records = project_records(&model, clean.records.clone())?;
    let records = apply_metrics(records);

    let severe_declines = flag_severe_declines(&records, config.decline_threshold);
    if !severe_declines.is_empty() {
        warn!(
            count = severe_declines.len(),
            threshold_pct = config.decline_threshold * 100.0,
            "products projected to fall by more than the decline threshold"
        );
    }

    let top_declines = top_declines(&records, config.top_n);
    let top_growth = top_growth(&records, config.top_n);

    let table = ProjectedTable {
        model,
        records,
        dropped: clean.dropped,
        severe_declines,
        top_declines,
        top_growth,
    };
    info!(
        rows = table.records.len(),
        projected = table.projected_count(),
        anomalies = table.anomaly_count(),
        "projection complete"
    );
    Ok(table)
}
