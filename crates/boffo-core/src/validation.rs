//! # Validation Module
//!
//! Input validation for everything a list screen feeds into a `ListQuery`.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Screen input (text boxes, selects, date pickers)             │
//! │  └── Raw strings and integers                                          │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Filter construction (Rust)                                   │
//! │  ├── THIS MODULE: page, page size, search, ids, date ranges            │
//! │  └── Typed values: Search, EntityId, DateRange, PageSize               │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Backend                                                      │
//! │  └── Rejects anything else with a business `message`                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use boffo_core::validation::{validate_page, validate_search_query};
//!
//! assert!(validate_page(1).is_ok());
//! assert_eq!(validate_search_query("  milk ").unwrap(), Some("milk".to_string()));
//! assert_eq!(validate_search_query("   ").unwrap(), None);
//! ```

use chrono::NaiveDate;

use crate::error::ValidationError;
use crate::{MAX_SEARCH_LENGTH, PAGE_SIZE_OPTIONS};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a free-text search query.
///
/// ## Rules
/// - Leading/trailing whitespace is dropped
/// - Empty input means "no search" and yields `None`
/// - Maximum 100 characters
pub fn validate_search_query(query: &str) -> ValidationResult<Option<String>> {
    let query = query.trim();

    if query.is_empty() {
        return Ok(None);
    }

    if query.chars().count() > MAX_SEARCH_LENGTH {
        return Err(ValidationError::TooLong {
            field: "search".to_string(),
            max: MAX_SEARCH_LENGTH,
        });
    }

    Ok(Some(query.to_string()))
}

/// Parses a `YYYY-MM-DD` date as produced by the date range picker.
pub fn validate_date(field: &str, raw: &str) -> ValidationResult<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|e| {
        ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: e.to_string(),
        }
    })
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a 1-based page number.
pub fn validate_page(page: u32) -> ValidationResult<()> {
    if page == 0 {
        return Err(ValidationError::MustBePositive {
            field: "page".to_string(),
        });
    }

    Ok(())
}

/// Validates a page size against the sizes the pagination control offers.
///
/// ## Rules
/// - Must be one of 10, 20, 30, 40, 50
///
/// ## Example
/// ```rust
/// use boffo_core::validation::validate_page_size;
///
/// assert!(validate_page_size(20).is_ok());
/// assert!(validate_page_size(25).is_err());
/// ```
pub fn validate_page_size(size: u32) -> ValidationResult<()> {
    if !PAGE_SIZE_OPTIONS.contains(&size) {
        return Err(ValidationError::NotAllowed {
            field: "page_size".to_string(),
            allowed: PAGE_SIZE_OPTIONS.iter().map(|s| s.to_string()).collect(),
        });
    }

    Ok(())
}

/// Validates an entity id used as a filter (reseller, product).
pub fn validate_entity_id(field: &str, id: u32) -> ValidationResult<()> {
    if id == 0 {
        return Err(ValidationError::MustBePositive {
            field: field.to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Range Validators
// =============================================================================

/// Validates that a date range is not inverted.
///
/// Half-open ranges are accepted here; whether they are sent is the query
/// builder's decision.
pub fn validate_date_range(from: Option<NaiveDate>, to: Option<NaiveDate>) -> ValidationResult<()> {
    if let (Some(from), Some(to)) = (from, to) {
        if from > to {
            return Err(ValidationError::InvalidRange {
                field: "date range".to_string(),
                start: from.to_string(),
                end: to.to_string(),
            });
        }
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_search_query() {
        assert_eq!(validate_search_query("milk").unwrap(), Some("milk".into()));
        assert_eq!(validate_search_query("  milk  ").unwrap(), Some("milk".into()));
        assert_eq!(validate_search_query("").unwrap(), None);
        assert_eq!(validate_search_query("   ").unwrap(), None);
        assert!(validate_search_query(&"a".repeat(101)).is_err());
        assert!(validate_search_query(&"a".repeat(100)).is_ok());
    }

    #[test]
    fn test_validate_page() {
        assert!(validate_page(1).is_ok());
        assert!(validate_page(500).is_ok());
        assert!(validate_page(0).is_err());
    }

    #[test]
    fn test_validate_page_size() {
        for size in [10, 20, 30, 40, 50] {
            assert!(validate_page_size(size).is_ok());
        }
        assert!(validate_page_size(0).is_err());
        assert!(validate_page_size(15).is_err());
        assert!(validate_page_size(100).is_err());
    }

    #[test]
    fn test_validate_entity_id() {
        assert!(validate_entity_id("reseller_id", 7).is_ok());
        assert!(validate_entity_id("reseller_id", 0).is_err());
    }

    #[test]
    fn test_validate_date() {
        let date = validate_date("date_from", "2024-03-01").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        assert!(validate_date("date_from", "01/03/2024").is_err());
    }

    #[test]
    fn test_validate_date_range() {
        let early = NaiveDate::from_ymd_opt(2024, 1, 1);
        let late = NaiveDate::from_ymd_opt(2024, 2, 1);

        assert!(validate_date_range(early, late).is_ok());
        assert!(validate_date_range(early, early).is_ok());
        assert!(validate_date_range(early, None).is_ok());
        assert!(validate_date_range(None, None).is_ok());
        assert!(validate_date_range(late, early).is_err());
    }
}
