pub mod classify;
pub mod metrics;
pub mod rank;

pub use classify::{flag_severe_declines, is_severe_decline};
pub use metrics::{apply_metrics, DisplayRow};
pub use rank::{top_declines, top_growth};
