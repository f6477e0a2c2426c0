//! Error types for the core crate.

use thiserror::Error;

/// Errors raised while interpreting physical units.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum UnitsError {
    /// The unit suffix is not one of pt, in, mm, cm or pc.
    ///
    /// `value` holds the number that preceded the suffix.
    #[error("Unknown unit \"{unit}\"")]
    UnknownUnit {
        /// The number parsed before the suffix.
        value: f64,
        /// The unrecognized suffix.
        unit: String,
    },
}

/// Result type alias for unit operations.
pub type UnitsResult<T> = Result<T, UnitsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_units_error_display() {
        let err = UnitsError::UnknownUnit {
            value: 2.0,
            unit: "furlong".to_string(),
        };
        assert_eq!(err.to_string(), "Unknown unit \"furlong\"");
    }
}
