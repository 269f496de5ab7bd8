//! Error types for the vitals engine.
//!
//! Health operations never fail (damage and healing clamp instead), so
//! every error here is either a caller passing a value outside its
//! documented domain or a lookup against the job registry.

use crate::id::JobId;
use thiserror::Error;

/// Errors surfaced by the stats engine and the job registry.
///
/// # Examples
///
/// ```rust
/// use colony_vitals::{JobId, VitalError};
///
/// let err = VitalError::UnknownJob(JobId::new("Astronaut"));
/// assert_eq!(err.to_string(), "Unknown job: Astronaut");
/// ```
#[derive(Debug, Error, Clone, PartialEq)]
pub enum VitalError {
    /// A value was outside the domain the operation accepts.
    ///
    /// Raised for negative experience or temp-HP grants and for
    /// negative baselines in a job table.
    #[error("Invalid argument `{name}`: {value}")]
    InvalidArgument { name: &'static str, value: f64 },

    /// No job with this identifier is registered.
    #[error("Unknown job: {0}")]
    UnknownJob(JobId),

    /// A job table declared the same identifier more than once.
    #[error("Duplicate job in table: {0}")]
    DuplicateJob(JobId),

    /// A job table could not be parsed.
    #[error("Invalid job table: {0}")]
    InvalidJobTable(String),
}

impl VitalError {
    pub(crate) fn invalid(name: &'static str, value: f64) -> Self {
        VitalError::InvalidArgument { name, value }
    }
}

impl From<serde_json::Error> for VitalError {
    fn from(err: serde_json::Error) -> Self {
        VitalError::InvalidJobTable(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = VitalError::UnknownJob(JobId::new("Miner"));
        assert!(err.to_string().contains("Miner"));
    }

    #[test]
    fn test_invalid_argument_display() {
        let err = VitalError::invalid("experience", -1.0);
        let display = err.to_string();
        assert!(display.contains("experience"));
        assert!(display.contains("-1"));
    }

    #[test]
    fn test_json_error_conversion() {
        let parse = serde_json::from_str::<serde_json::Value>("{ nope").unwrap_err();
        let err: VitalError = parse.into();
        assert!(matches!(err, VitalError::InvalidJobTable(_)));
    }
}
