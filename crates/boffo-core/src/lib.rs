//! # boffo-core: List Queries and Pagination for Boffo
//!
//! Everything a Boffo list screen computes without touching the network:
//! typed filters, the query string they render to, the server's pagination
//! contract and the pagination control driven by it.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Boffo List Flow                                  │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 List screen / boffo-cli                         │   │
//! │  │        filters ──► ListQuery ──► render ──► user intent         │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ boffo-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌────────────┐  ┌───────────┐  │   │
//! │  │   │  filters  │  │   query   │  │ pagination │  │  control  │  │   │
//! │  │   │ FilterSpec│  │ ListQuery │  │ Pagination │  │ ControlVw │  │   │
//! │  │   │  Choice   │  │QueryParams│  │ ListResult │  │ PageIntent│  │   │
//! │  │   └───────────┘  └───────────┘  └────────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • PURE FUNCTIONS                          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              boffo-client (HTTP, views, config)                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`resource`] - The eight list endpoints
//! - [`filters`] - Per-resource filter sets
//! - [`query`] - `ListQuery` and query-string rendering
//! - [`pagination`] - Server pagination metadata and its invariants
//! - [`control`] - Stateless pagination control
//! - [`types`] - Record shapes of every list
//! - [`page_data`] - Summary figures shown above each list
//! - [`error`] - Domain error types
//! - [`validation`] - Input checks run at construction
//!
//! ## Example Usage
//!
//! ```rust
//! use boffo_core::filters::{Choice, FilterSpec, ProductBatchFilters, Search};
//! use boffo_core::query::ListQuery;
//!
//! let filters = FilterSpec::ProductBatches(ProductBatchFilters {
//!     search: Search::parse("milk").unwrap(),
//!     in_stock: Choice::All,
//!     product_id: None,
//! });
//!
//! let query = ListQuery::new(filters);
//! assert_eq!(
//!     query.request_path(),
//!     "/company/stock-purchase?limit=10&page=1&search=milk"
//! );
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod control;
pub mod error;
pub mod filters;
pub mod page_data;
pub mod pagination;
pub mod query;
pub mod resource;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use control::{ControlView, PageIntent, PaginationControl};
pub use error::{CoreError, CoreResult, ValidationError};
pub use filters::{Choice, FilterSpec, RawFilters};
pub use page_data::{AdminPage, AdminPageData, PageDataTarget, ResellerPage, ResellerPageData};
pub use pagination::{ListResult, Pagination};
pub use query::{ListQuery, PageSize};
pub use resource::Resource;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Page sizes offered by the rows-per-page selector.
pub const PAGE_SIZE_OPTIONS: [u32; 5] = [10, 20, 30, 40, 50];

/// Page size of a freshly opened list.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Maximum length of a free-text search, in characters.
pub const MAX_SEARCH_LENGTH: usize = 100;

/// Select value meaning "do not filter on this field".
pub const ALL_SENTINEL: &str = "all";
