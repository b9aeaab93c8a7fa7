// src/process/mod.rs
pub mod raw_table;
pub mod sanitize;
pub mod utils;

pub use raw_table::RawTable;
pub use sanitize::{sanitize, SanitizedTable};

use crate::error::Result;
use csv::ReaderBuilder;
use std::io::Read;
use tracing::debug;

/// Read a header row plus data rows from any CSV source.
///
/// Rows with a different field count are accepted (`flexible`) and padded to
/// the header width so column lookups by index never go out of bounds.
/// Fields are decoded lossily: invalid UTF-8 in one cell becomes U+FFFD
/// rather than failing the table, and the sanitizer then judges the row.
#[tracing::instrument(level = "debug", skip(reader))]
pub fn load_csv<R: Read>(reader: R) -> Result<RawTable> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = rdr
        .byte_headers()?
        .iter()
        .map(|h| decode_field(h).trim_start_matches('\u{feff}').to_string())
        .collect();
    let width = headers.len();

    let mut rows = Vec::new();
    for result in rdr.byte_records() {
        let record = result?;
        let mut row: Vec<String> = record.iter().map(decode_field).collect();
        if row.len() < width {
            row.resize(width, String::new());
        }
        rows.push(row);
    }

    debug!(columns = width, rows = rows.len(), "loaded csv");
    Ok(RawTable::new(headers, rows))
}

fn decode_field(raw: &[u8]) -> String {
    String::from_utf8_lossy(raw).into_owned()
}

/// Convenience wrapper for an in-memory CSV body (e.g. a downloaded sheet).
pub fn load_csv_str(body: &str) -> Result<RawTable> {
    load_csv(body.as_bytes())
}
