// src/report/classify.rs

use crate::record::ProductRecord;

/// A projected drop larger than `threshold` × current volume.
///
/// Rows without a projected difference are never flagged.
pub fn is_severe_decline(record: &ProductRecord, threshold: f64) -> bool {
    match record.projected_diff {
        Some(diff) => diff < -(record.current_units * threshold),
        None => false,
    }
}

/// Flagged records in table order. The count is the returned length.
pub fn flag_severe_declines(records: &[ProductRecord], threshold: f64) -> Vec<ProductRecord> {
    records
        .iter()
        .filter(|r| is_severe_decline(r, threshold))
        .cloned()
        .collect()
}
