//! # Error Types
//!
//! Structured error types for sow_core. These errors are designed to be
//! informative for both humans and LLMs, providing enough context to
//! understand and fix issues programmatically.
//!
//! ## Example
//!
//! ```rust
//! use sow_core::errors::{SowError, SowResult};
//!
//! fn validate_height(height_ft: f64) -> SowResult<()> {
//!     if height_ft <= 0.0 {
//!         return Err(SowError::InvalidInput {
//!             field: "building_height_ft".to_string(),
//!             value: height_ft.to_string(),
//!             reason: "Building height must be positive".to_string(),
//!         });
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for sow_core operations
pub type SowResult<T> = Result<T, SowError>;

/// Structured error type for SOW generation operations.
///
/// Each variant provides specific context about what went wrong,
/// enabling programmatic error handling by LLMs and other consumers.
///
/// Note the taxonomy split: out-of-range physical inputs fail with
/// `InvalidInput`, while plausibility issues in computed output (a corner
/// pressure that looks too low, a non-monotonic zone profile) are carried
/// as warnings on the result object, not as errors.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum SowError {
    /// An input value is invalid (out of range, wrong type, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A required field is missing
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    /// SOW template not found in the template catalog
    #[error("Template not found: {template_id}")]
    TemplateNotFound { template_id: String },

    /// Calculation failed (implausible geometry, unresolvable inputs, etc.)
    #[error("Calculation failed: {calculation_type} - {reason}")]
    CalculationFailed {
        calculation_type: String,
        reason: String,
    },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// File is locked by another user/process
    #[error("File locked: '{path}' is locked by {locked_by} since {locked_at}")]
    FileLocked {
        path: String,
        locked_by: String,
        locked_at: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Schema version mismatch
    #[error("Version mismatch: file version {file_version}, expected {expected_version}")]
    VersionMismatch {
        file_version: String,
        expected_version: String,
    },

    /// Generic internal error (should be rare)
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl SowError {
    /// Create an InvalidInput error
    pub fn invalid_input(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        SowError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a MissingField error
    pub fn missing_field(field: impl Into<String>) -> Self {
        SowError::MissingField {
            field: field.into(),
        }
    }

    /// Create a TemplateNotFound error
    pub fn template_not_found(template_id: impl Into<String>) -> Self {
        SowError::TemplateNotFound {
            template_id: template_id.into(),
        }
    }

    /// Create a CalculationFailed error
    pub fn calculation_failed(
        calculation_type: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        SowError::CalculationFailed {
            calculation_type: calculation_type.into(),
            reason: reason.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(
        operation: impl Into<String>,
        path: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        SowError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a FileLocked error
    pub fn file_locked(
        path: impl Into<String>,
        locked_by: impl Into<String>,
        locked_at: impl Into<String>,
    ) -> Self {
        SowError::FileLocked {
            path: path.into(),
            locked_by: locked_by.into(),
            locked_at: locked_at.into(),
        }
    }

    /// Check if this is a recoverable error (e.g., can retry)
    pub fn is_recoverable(&self) -> bool {
        matches!(self, SowError::FileLocked { .. })
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            SowError::InvalidInput { .. } => "INVALID_INPUT",
            SowError::MissingField { .. } => "MISSING_FIELD",
            SowError::TemplateNotFound { .. } => "TEMPLATE_NOT_FOUND",
            SowError::CalculationFailed { .. } => "CALCULATION_FAILED",
            SowError::FileError { .. } => "FILE_ERROR",
            SowError::FileLocked { .. } => "FILE_LOCKED",
            SowError::SerializationError { .. } => "SERIALIZATION_ERROR",
            SowError::VersionMismatch { .. } => "VERSION_MISMATCH",
            SowError::Internal { .. } => "INTERNAL_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = SowError::invalid_input("roof_area", "-500", "Roof area must be positive");
        let json = serde_json::to_string(&error).unwrap();
        let roundtrip: SowError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(SowError::missing_field("state").error_code(), "MISSING_FIELD");
        assert_eq!(
            SowError::template_not_found("T99").error_code(),
            "TEMPLATE_NOT_FOUND"
        );
    }

    #[test]
    fn test_recoverable() {
        let locked = SowError::file_locked("job.sow", "estimator@roofco.com", "2025-01-01");
        assert!(locked.is_recoverable());
        assert!(!SowError::missing_field("county").is_recoverable());
    }
}
