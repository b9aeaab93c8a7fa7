// src/model/projector.rs

use crate::error::Result;
use crate::model::regression::LogLogModel;
use crate::process::utils::round_units;
use crate::record::ProductRecord;
use tracing::debug;

/// Fill `projected_units` for every record with `current_units > 0`, treating
/// the current period as the next fit's "prior". Values are rounded to whole
/// units. Records with zero current volume keep `None`.
///
/// The one model is applied to every row; row order does not affect results.
pub fn project_records(
    model: &LogLogModel,
    records: Vec<ProductRecord>,
) -> Result<Vec<ProductRecord>> {
    let projected = records
        .into_iter()
        .map(|mut r| {
            r.projected_units = if r.is_projectable() {
                Some(round_units(model.project(r.current_units)?))
            } else {
                None
            };
            Ok(r)
        })
        .collect::<Result<Vec<_>>>()?;

    debug!(
        projected = projected.iter().filter(|r| r.projected_units.is_some()).count(),
        total = projected.len(),
        "applied projection"
    );
    Ok(projected)
}
