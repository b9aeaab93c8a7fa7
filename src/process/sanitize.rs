// src/process/sanitize.rs

use crate::config::ColumnNames;
use crate::error::{ProjectionError, Result};
use crate::process::utils::{header_key, normalize_code, parse_units};
use crate::process::RawTable;
use crate::record::ProductRecord;
use tracing::{debug, info};

/// Sanitizer output: clean records in source row order plus the drop count.
#[derive(Debug, Clone, PartialEq)]
pub struct SanitizedTable {
    pub records: Vec<ProductRecord>,
    pub dropped: usize,
}

/// Column positions of the four required fields within a `RawTable`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ColumnIndex {
    code: usize,
    name: usize,
    prior_units: usize,
    current_units: usize,
}

fn find_column(headers: &[String], wanted: &str) -> Result<usize> {
    let key = header_key(wanted);
    let mut hits = headers
        .iter()
        .enumerate()
        .filter(|(_, h)| header_key(h) == key)
        .map(|(i, _)| i);

    let first = hits.next().ok_or_else(|| ProjectionError::MissingColumn {
        column: wanted.to_string(),
    })?;
    if hits.next().is_some() {
        return Err(ProjectionError::DuplicateColumn {
            column: wanted.to_string(),
        });
    }
    Ok(first)
}

fn resolve_columns(headers: &[String], names: &ColumnNames) -> Result<ColumnIndex> {
    Ok(ColumnIndex {
        code: find_column(headers, &names.code)?,
        name: find_column(headers, &names.name)?,
        prior_units: find_column(headers, &names.prior_units)?,
        current_units: find_column(headers, &names.current_units)?,
    })
}

/// Coerce and filter a raw table into numeric product records.
///
/// Unparseable, non-finite or negative unit counts drop the row; they never
/// raise. Missing or ambiguous required columns fail fast, as does a table
/// with no surviving rows. The source table is not modified.
#[tracing::instrument(level = "info", skip_all, fields(rows = raw.len()))]
pub fn sanitize(raw: &RawTable, names: &ColumnNames) -> Result<SanitizedTable> {
    let idx = resolve_columns(&raw.headers, names)?;

    let mut records = Vec::with_capacity(raw.len());
    let mut dropped = 0usize;

    for (row_no, row) in raw.rows.iter().enumerate() {
        let cell = move |i: usize| row.get(i).map(String::as_str).unwrap_or("");

        let prior = parse_units(cell(idx.prior_units));
        let current = parse_units(cell(idx.current_units));

        let (prior, current) = match (prior, current) {
            (Some(p), Some(c)) if p >= 0.0 && c >= 0.0 => (p, c),
            (Some(_), Some(_)) => {
                debug!(row = row_no, "negative unit count; dropping row");
                dropped += 1;
                continue;
            }
            _ => {
                debug!(
                    row = row_no,
                    prior = cell(idx.prior_units),
                    current = cell(idx.current_units),
                    "unparseable unit count; dropping row"
                );
                dropped += 1;
                continue;
            }
        };

        records.push(ProductRecord::new(
            normalize_code(cell(idx.code)),
            cell(idx.name),
            prior,
            current,
        ));
    }

    if records.is_empty() {
        return Err(ProjectionError::EmptyTable { dropped });
    }

    info!(kept = records.len(), dropped, "sanitized table");
    Ok(SanitizedTable { records, dropped })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::load_csv_str;

    const HEADER: &str = "Código,articulo ,Unidades periodo anterior,Unidades periodo\n";

    fn table(body: &str) -> RawTable {
        load_csv_str(&format!("{}{}", HEADER, body)).unwrap()
    }

    #[test]
    fn drops_rows_with_missing_or_bad_units() {
        let raw = table(
            "001,Tornillo,10,12\n\
             002,Tuerca,abc,5\n\
             003,Arandela,4,\n\
             004,Clavo,-3,8\n\
             005, Perno ,0,0\n",
        );
        let clean = sanitize(&raw, &ColumnNames::default()).unwrap();

        assert_eq!(clean.dropped, 3);
        let codes: Vec<_> = clean.records.iter().map(|r| r.code.as_str()).collect();
        assert_eq!(codes, vec!["001", "005"]);
        // label text is kept as-is
        assert_eq!(clean.records[1].name, " Perno ");
        assert_eq!(clean.records[1].current_units, 0.0);
    }

    #[test]
    fn header_whitespace_does_not_matter() {
        let raw = load_csv_str("Código ,articulo,Unidades periodo anterior,Unidades periodo\n1,A,1,2\n")
            .unwrap();
        let clean = sanitize(&raw, &ColumnNames::default()).unwrap();
        assert_eq!(clean.records.len(), 1);
    }

    #[test]
    fn column_order_is_free() {
        let raw = load_csv_str("Unidades periodo,articulo ,Código,Unidades periodo anterior\n9,A,X1,3\n")
            .unwrap();
        let clean = sanitize(&raw, &ColumnNames::default()).unwrap();
        let r = &clean.records[0];
        assert_eq!((r.code.as_str(), r.prior_units, r.current_units), ("X1", 3.0, 9.0));
    }

    #[test]
    fn missing_column_is_named() {
        let raw = load_csv_str("Código,articulo ,Unidades periodo\n1,A,2\n").unwrap();
        let err = sanitize(&raw, &ColumnNames::default()).unwrap_err();
        assert_eq!(
            err,
            ProjectionError::MissingColumn {
                column: "Unidades periodo anterior".into()
            }
        );
    }

    #[test]
    fn duplicate_column_is_rejected() {
        let raw = load_csv_str(
            "Código,articulo ,articulo,Unidades periodo anterior,Unidades periodo\n1,A,B,2,3\n",
        )
        .unwrap();
        let err = sanitize(&raw, &ColumnNames::default()).unwrap_err();
        assert!(matches!(err, ProjectionError::DuplicateColumn { .. }));
    }

    #[test]
    fn all_rows_dropped_is_an_error() {
        let raw = table("1,A,x,y\n2,B,,\n");
        let err = sanitize(&raw, &ColumnNames::default()).unwrap_err();
        assert_eq!(err, ProjectionError::EmptyTable { dropped: 2 });
    }

    #[test]
    fn source_table_is_untouched() {
        let raw = table("1.0,A,1,2\n");
        let before = raw.clone();
        let clean = sanitize(&raw, &ColumnNames::default()).unwrap();
        assert_eq!(raw, before);
        assert_eq!(clean.records[0].code, "1");
    }
}
