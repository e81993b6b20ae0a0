//! Error types for the simulation core

use thiserror::Error;

/// Errors raised before any simulation state is produced.
///
/// Clamped recurrences (a negative call rate, a fraction pushed past its
/// target) are absorbing boundaries of the model, not errors, and are never
/// reported through this type.
#[derive(Debug, Error)]
pub enum ModelError {
    /// A parameter failed fail-fast validation.
    #[error("invalid parameter {name}: {reason}")]
    InvalidParameter {
        name: &'static str,
        reason: String,
    },

    /// A historical cashflow carried a date that could not be parsed.
    #[error("unparseable cashflow date: {0:?}")]
    InvalidDate(String),
}

impl ModelError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        ModelError::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ModelError::invalid("dt", "must be positive, got 0");
        assert_eq!(
            err.to_string(),
            "invalid parameter dt: must be positive, got 0"
        );
    }
}
