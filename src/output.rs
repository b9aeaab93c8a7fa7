// src/output.rs

use crate::engine::ProjectedTable;
use crate::model::LogLogModel;
use crate::report::DisplayRow;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::{
    fs::{self, File},
    path::{Path, PathBuf},
};
use tracing::info;

pub const TABLE_FILE: &str = "projection.csv";
pub const SUMMARY_FILE: &str = "summary.json";

/// JSON hand-off for presentation: the model, the anomaly list and both
/// rankings, already rounded for display.
#[derive(Debug, Serialize)]
pub struct RunSummary {
    pub generated_at: DateTime<Utc>,
    pub source: String,
    pub formula: String,
    pub model: LogLogModel,
    pub rows: usize,
    pub dropped: usize,
    pub projected: usize,
    pub anomaly_count: usize,
    pub severe_declines: Vec<DisplayRow>,
    pub top_declines: Vec<DisplayRow>,
    pub top_growth: Vec<DisplayRow>,
}

impl RunSummary {
    pub fn new(table: &ProjectedTable, source: impl Into<String>) -> Self {
        let display = |rows: &[crate::record::ProductRecord]| -> Vec<DisplayRow> {
            rows.iter().map(DisplayRow::from).collect()
        };
        Self {
            generated_at: Utc::now(),
            source: source.into(),
            formula: table.model.formula(),
            model: table.model,
            rows: table.records.len(),
            dropped: table.dropped,
            projected: table.projected_count(),
            anomaly_count: table.anomaly_count(),
            severe_declines: display(&table.severe_declines),
            top_declines: display(&table.top_declines),
            top_growth: display(&table.top_growth),
        }
    }
}

/// Write the enriched table, one display row per product. Undefined
/// projections and growth are left blank.
pub fn write_table_csv(path: &Path, table: &ProjectedTable) -> Result<()> {
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let mut wtr = csv::Writer::from_writer(file);
    for record in &table.records {
        wtr.serialize(DisplayRow::from(record))
            .with_context(|| format!("writing row for {}", record.code))?;
    }
    wtr.flush().context("flushing projection table")?;
    Ok(())
}

pub fn write_summary_json(path: &Path, summary: &RunSummary) -> Result<()> {
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    serde_json::to_writer_pretty(file, summary).context("writing run summary")?;
    Ok(())
}

/// Write both artifacts under `out_dir`, creating it if needed.
/// Returns `(table_path, summary_path)`.
pub fn write_outputs(
    out_dir: &Path,
    table: &ProjectedTable,
    source: &str,
) -> Result<(PathBuf, PathBuf)> {
    fs::create_dir_all(out_dir)
        .with_context(|| format!("creating output directory {}", out_dir.display()))?;

    let table_path = out_dir.join(TABLE_FILE);
    let summary_path = out_dir.join(SUMMARY_FILE);
    write_table_csv(&table_path, table)?;
    write_summary_json(&summary_path, &RunSummary::new(table, source))?;

    info!(
        table = %table_path.display(),
        summary = %summary_path.display(),
        "wrote outputs"
    );
    Ok((table_path, summary_path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ProjectionConfig;
    use crate::engine::project;
    use crate::process::load_csv_str;
    use tempfile::tempdir;

    #[test]
    fn writes_rounded_table_and_summary() -> Result<()> {
        let raw = load_csv_str(
            "Código,articulo ,Unidades periodo anterior,Unidades periodo\n\
             A,Alpha,100,120\n\
             B,Beta,50,10\n\
             Z,Zeta,5,0\n",
        )?;
        let table = project(&raw, &ProjectionConfig::default())?;

        let dir = tempdir()?;
        let (table_path, summary_path) = write_outputs(dir.path(), &table, "test")?;

        let csv_text = fs::read_to_string(&table_path)?;
        let lines: Vec<&str> = csv_text.lines().collect();
        assert_eq!(
            lines[0],
            "code,name,current_units,projected_units,projected_diff,growth_pct"
        );
        assert_eq!(lines[1], "A,Alpha,120.0,231.0,111.0,92.5");
        assert_eq!(lines[3], "Z,Zeta,0.0,,,");

        let summary: serde_json::Value = serde_json::from_str(&fs::read_to_string(&summary_path)?)?;
        assert_eq!(summary["anomaly_count"], 1);
        assert_eq!(summary["projected"], 2);
        assert_eq!(summary["top_growth"][0]["code"], "A");
        assert_eq!(summary["source"], "test");
        Ok(())
    }
}
