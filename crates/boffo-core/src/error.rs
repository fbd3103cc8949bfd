//! # Error Types
//!
//! Domain-specific error types for boffo-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  boffo-core errors (this file)                                         │
//! │  ├── CoreError        - Query composition failures                     │
//! │  └── ValidationError  - Filter / paging input rejected at construction │
//! │                                                                         │
//! │  boffo-client errors (separate crate)                                  │
//! │  ├── RequestError     - NetworkError / ApiError / UnknownError         │
//! │  └── ClientError      - Configuration and setup failures               │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → (caller never fetches)            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A `ListQuery` that fails validation is never sent: every error in this
//! file is raised while the caller is still building its next query.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Errors raised while composing a list query.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// A filter set was applied to a query for another resource.
    ///
    /// ## When This Occurs
    /// - Handing `PaymentFilters` to a query built for stock movements
    /// - A view reused for a different screen without a new query
    #[error("Filters for {actual} cannot be applied to a {expected} query")]
    ResourceMismatch { expected: String, actual: String },

    /// A resource name did not match any known list endpoint.
    #[error("Unknown resource: {0}")]
    UnknownResource(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Filters are validated when they are constructed, not when they are used,
/// so a built `FilterSpec` can always be rendered.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., invalid date).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },

    /// Range bounds are inverted.
    #[error("{field} start {start} is after end {end}")]
    InvalidRange {
        field: String,
        start: String,
        end: String,
    },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::ResourceMismatch {
            expected: "payments".to_string(),
            actual: "stock-movements".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Filters for stock-movements cannot be applied to a payments query"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::NotAllowed {
            field: "page_size".to_string(),
            allowed: vec!["10".to_string(), "20".to_string()],
        };
        assert_eq!(err.to_string(), "page_size must be one of: [\"10\", \"20\"]");

        let err = ValidationError::InvalidRange {
            field: "date range".to_string(),
            start: "2024-05-02".to_string(),
            end: "2024-05-01".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "date range start 2024-05-02 is after end 2024-05-01"
        );
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::MustBePositive {
            field: "page".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
