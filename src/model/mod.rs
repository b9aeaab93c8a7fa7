pub mod projector;
pub mod regression;

pub use projector::project_records;
pub use regression::{checked_ln, fit_log_log, LogLogModel};
