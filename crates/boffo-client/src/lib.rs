//! # boffo-client: REST List Client for Boffo
//!
//! Fetches pages from the Boffo backend and keeps list views consistent
//! with the order requests were issued in.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         boffo-client                                    │
//! │                                                                         │
//! │   ListView<F, T> ── owns ──► ListQuery, last ListResult<T>, last error │
//! │        │                                                                │
//! │        │ ticket (RequestSequencer)                                      │
//! │        ▼                                                                │
//! │   F: ListFetcher ── HttpListClient (reqwest) ──► REST backend          │
//! │        │                                                                │
//! │        ▼                                                                │
//! │   Envelope ──► ListResult<T> | RequestError { Network, Api, Unknown }  │
//! │                                                                         │
//! │   ClientConfig (TOML + env)     init_tracing (tracing-subscriber)      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust,no_run
//! use std::sync::Arc;
//! use boffo_client::{ClientConfig, HttpListClient, ListView};
//! use boffo_core::types::Payment;
//! use boffo_core::{ListQuery, Resource};
//!
//! # async fn run() -> boffo_client::ClientResult<()> {
//! let config = ClientConfig::load(None)?;
//! let client = Arc::new(HttpListClient::new(&config.api)?);
//!
//! let query = ListQuery::for_resource(Resource::Payments)
//!     .with_page_size(config.default_page_size()?);
//! let view: ListView<_, Payment> = ListView::new(client, query);
//! view.refresh().await?;
//!
//! println!("{}", view.control().await.label);
//! # Ok(())
//! # }
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod config;
pub mod envelope;
pub mod error;
pub mod fetch;
pub mod logging;
pub mod sequence;
pub mod view;

// =============================================================================
// Re-exports
// =============================================================================

pub use config::{ApiSettings, ClientConfig, ListSettings};
pub use envelope::Envelope;
pub use error::{ClientError, ClientResult, RequestError, FALLBACK_MESSAGE};
pub use fetch::{HttpListClient, ListFetcher};
pub use logging::init_tracing;
pub use sequence::{RequestSequencer, Ticket};
pub use view::{ListView, LoadOutcome, ViewState};
