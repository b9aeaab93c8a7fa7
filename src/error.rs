//! Error types for the projection engine.

use thiserror::Error;

/// Result type alias for engine operations.
pub type Result<T> = std::result::Result<T, ProjectionError>;

/// Table-level failures. Individual malformed rows never surface here; the
/// sanitizer drops them and keeps going.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProjectionError {
    /// A required column is absent from the header row.
    #[error("malformed input: missing required column '{column}'")]
    MissingColumn { column: String },

    /// Two headers normalize to the same required column name.
    #[error("malformed input: column '{column}' appears more than once")]
    DuplicateColumn { column: String },

    /// Sanitization left no usable rows.
    #[error("malformed input: no usable rows after sanitization ({dropped} dropped)")]
    EmptyTable { dropped: usize },

    /// No row has both prior and current units strictly positive.
    #[error("empty fit set: no rows with prior_units > 0 and current_units > 0")]
    EmptyFitSet,

    /// Logarithm requested for a non-positive value.
    #[error("internal invariant violated: ln({value}) is undefined")]
    DomainError { value: f64 },

    /// Extrapolation overflowed; the fitted line is too steep for these volumes.
    #[error("projection from {units} units is not finite")]
    NonFiniteProjection { units: f64 },

    /// The configuration file could not be read.
    #[error("reading config {path}: {message}")]
    ConfigIo { path: String, message: String },

    /// Invalid configuration value.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The raw CSV could not be read.
    #[error("csv error: {0}")]
    Csv(String),
}

impl From<csv::Error> for ProjectionError {
    fn from(err: csv::Error) -> Self {
        ProjectionError::Csv(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages_name_the_failure() {
        let err = ProjectionError::MissingColumn {
            column: "Código".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "malformed input: missing required column 'Código'"
        );

        let err = ProjectionError::EmptyTable { dropped: 4 };
        assert_eq!(
            err.to_string(),
            "malformed input: no usable rows after sanitization (4 dropped)"
        );

        assert_eq!(
            ProjectionError::EmptyFitSet.to_string(),
            "empty fit set: no rows with prior_units > 0 and current_units > 0"
        );
    }

    #[test]
    fn errors_are_clonable_and_comparable() {
        let err = ProjectionError::DomainError { value: 0.0 };
        assert_eq!(err.clone(), err);
    }
}
