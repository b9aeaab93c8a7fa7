// src/report/rank.rs

use crate::record::ProductRecord;

/// The `n` largest projected drops, most negative first.
///
/// Only projected rows take part. `sort_by` is stable, so equal keys keep
/// table order.
pub fn top_declines(records: &[ProductRecord], n: usize) -> Vec<ProductRecord> {
    let mut rows: Vec<(&ProductRecord, f64)> = records
        .iter()
        .filter_map(|r| r.projected_diff.map(|d| (r, d)))
        .collect();
    rows.sort_by(|a, b| a.1.total_cmp(&b.1));
    rows.into_iter().take(n).map(|(r, _)| r.clone()).collect()
}

/// The `n` highest growth percentages among rows projected to grow.
pub fn top_growth(records: &[ProductRecord], n: usize) -> Vec<ProductRecord> {
    let mut rows: Vec<(&ProductRecord, f64)> = records
        .iter()
        .filter(|r| r.projected_diff.is_some_and(|d| d > 0.0))
        .filter_map(|r| r.growth_pct.map(|g| (r, g)))
        .collect();
    rows.sort_by(|a, b| b.1.total_cmp(&a.1));
    rows.into_iter().take(n).map(|(r, _)| r.clone()).collect()
}
