//! Error types for qsynth-core.
//!
//! Two failure classes exist: [`Error::Validation`] for caller-supplied
//! parameters outside their domain, and [`Error::Domain`] for arithmetic that
//! would be undefined inside the generator itself. Validation always runs
//! before the first random draw, so a failed call never yields a partial
//! dataset.

use thiserror::Error;

/// Result type alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Generator error types.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// A parameter is malformed or out of its allowed range.
    #[error("invalid parameter `{field}`: {reason}")]
    Validation {
        /// Parameter name as it appears on the wire.
        field: &'static str,
        /// Human-readable constraint that was violated.
        reason: String,
    },

    /// An internal operation would be undefined (unclipped probability,
    /// negative standard deviation). Indicates a defect, not caller misuse.
    #[error("domain error: {0}")]
    Domain(String),
}

impl Error {
    pub(crate) fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Validation {
            field,
            reason: reason.into(),
        }
    }

    /// True for caller-side parameter errors.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_message_names_field() {
        let err = Error::validation("omega", "must be > 0, got 0");
        assert_eq!(
            err.to_string(),
            "invalid parameter `omega`: must be > 0, got 0"
        );
        assert!(err.is_validation());
    }

    #[test]
    fn domain_is_not_validation() {
        let err = Error::Domain("probability 1.5 outside [0, 1]".into());
        assert!(!err.is_validation());
        assert!(err.to_string().starts_with("domain error"));
    }
}
