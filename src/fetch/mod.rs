// src/fetch/mod.rs

pub mod sheet;

pub use sheet::{fetch_sheet_csv, sheet_csv_url, SheetSource};
