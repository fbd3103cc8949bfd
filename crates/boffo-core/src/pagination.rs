//! # Pagination Contract
//!
//! Server-authoritative page metadata and the invariants it must satisfy.
//!
//! ## Contract
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  total_pages   = ceil(total / page_size)        (0 when total = 0)     │
//! │  has_next      ⇔ page < total_pages                                    │
//! │  has_previous  ⇔ page > 1                                              │
//! │  next_page     = has_next     ? page + 1 : page                        │
//! │  previous_page = has_previous ? page - 1 : page                        │
//! │                                                                         │
//! │  Example: page_size 20, total 45, page 3                               │
//! │  → total_pages 3, has_next false, has_previous true,                   │
//! │    next_page 3, previous_page 2                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The client never overwrites what the server sent. `violations()` exists
//! so a disagreement can be logged; the server value is still the one shown.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;

// =============================================================================
// Pagination
// =============================================================================

/// Page metadata returned alongside every list response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Pagination {
    pub page: u32,
    pub page_size: u32,
    #[ts(type = "number")]
    pub total: u64,
    pub total_pages: u32,
    pub has_next: bool,
    pub has_previous: bool,
    pub next_page: u32,
    pub previous_page: u32,
}

impl Pagination {
    /// The metadata a consistent server would send for this page.
    ///
    /// A `page_size` of zero yields zero pages.
    pub fn derive(page: u32, page_size: u32, total: u64) -> Self {
        let total_pages = if page_size == 0 {
            0
        } else {
            u32::try_from(total.div_ceil(u64::from(page_size))).unwrap_or(u32::MAX)
        };
        let has_next = page < total_pages;
        let has_previous = page > 1;

        Pagination {
            page,
            page_size,
            total,
            total_pages,
            has_next,
            has_previous,
            next_page: if has_next { page + 1 } else { page },
            previous_page: if has_previous { page - 1 } else { page },
        }
    }

    /// Placeholder shown before the first response arrives.
    pub fn empty(page_size: u32) -> Self {
        Self::derive(1, page_size, 0)
    }

    /// The highest page the control may show; at least 1.
    pub fn last_page(&self) -> u32 {
        self.total_pages.max(1)
    }

    /// The current page clamped into `[1, last_page()]`.
    pub fn display_page(&self) -> u32 {
        self.page.clamp(1, self.last_page())
    }

    /// Whether `page` lies in the range the control may navigate to.
    pub fn in_range(&self, page: u32) -> bool {
        (1..=self.last_page()).contains(&page)
    }

    /// Every contract rule this value breaks.
    pub fn violations(&self) -> Vec<PaginationViolation> {
        let mut found = Vec::new();

        if self.page_size > 0 {
            let expected = Self::derive(self.page, self.page_size, self.total).total_pages;
            if expected != self.total_pages {
                found.push(PaginationViolation::TotalPages {
                    expected,
                    actual: self.total_pages,
                });
            }
        }

        let has_next = self.page < self.total_pages;
        if has_next != self.has_next {
            found.push(PaginationViolation::HasNext {
                expected: has_next,
                actual: self.has_next,
            });
        }

        let has_previous = self.page > 1;
        if has_previous != self.has_previous {
            found.push(PaginationViolation::HasPrevious {
                expected: has_previous,
                actual: self.has_previous,
            });
        }

        let next_page = if self.has_next {
            self.page.saturating_add(1)
        } else {
            self.page
        };
        if next_page != self.next_page {
            found.push(PaginationViolation::NextPage {
                expected: next_page,
                actual: self.next_page,
            });
        }

        let previous_page = if self.has_previous {
            self.page.saturating_sub(1)
        } else {
            self.page
        };
        if previous_page != self.previous_page {
            found.push(PaginationViolation::PreviousPage {
                expected: previous_page,
                actual: self.previous_page,
            });
        }

        found
    }

    pub fn is_consistent(&self) -> bool {
        self.violations().is_empty()
    }
}

/// A pagination rule broken by a server response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PaginationViolation {
    #[error("total_pages is {actual}, expected {expected}")]
    TotalPages { expected: u32, actual: u32 },

    #[error("has_next is {actual}, expected {expected}")]
    HasNext { expected: bool, actual: bool },

    #[error("has_previous is {actual}, expected {expected}")]
    HasPrevious { expected: bool, actual: bool },

    #[error("next_page is {actual}, expected {expected}")]
    NextPage { expected: u32, actual: u32 },

    #[error("previous_page is {actual}, expected {expected}")]
    PreviousPage { expected: u32, actual: u32 },
}

// =============================================================================
// List Result
// =============================================================================

/// One page of records with the metadata the server sent for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListResult<T> {
    pub items: Vec<T>,
    pub pagination: Pagination,
}

impl<T> ListResult<T> {
    pub fn new(items: Vec<T>, pagination: Pagination) -> Self {
        ListResult { items, pagination }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
