//! Next-period sales volume projection.
//!
//! A raw product table (code, name, prior-period units, current-period units)
//! is sanitized, a log-log least-squares line is fitted across products, and
//! every product with current volume is projected forward. Growth metrics,
//! severe-decline flags and top-N rankings are derived from the projection.

pub mod config;
pub mod engine;
pub mod error;
pub mod fetch;
pub mod model;
pub mod output;
pub mod process;
pub mod record;
pub mod report;

pub use config::{ColumnNames, ProjectionConfig};
pub use engine::{project, project_sanitized, ProjectedTable};
pub use error::{ProjectionError, Result};
pub use record::ProductRecord;
