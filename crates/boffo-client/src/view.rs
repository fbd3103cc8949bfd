//! # List Views
//!
//! A `ListView` is the client-side state of one list screen: the query it
//! shows, the last page it applied and the error of its latest fetch.
//!
//! ## Load Cycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  load(query)                                                           │
//! │  ├── query for another resource?           → Query(ResourceMismatch)   │
//! │  ├── [write lock] ticket = issue(); state.query = query; loading       │
//! │  ├── fetch_list(query)                 (lock released while waiting)   │
//! │  └── [write lock] ticket still current?                                │
//! │        ├── no  → drop response or error         → Superseded           │
//! │        ├── yes, Ok(page)  → result = page, error cleared → Applied     │
//! │        └── yes, Err(e)    → error = e, previous page kept → Request(e) │
//! │                                                                         │
//! │  apply_intents / set_filters / refresh all end in load(next query)     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Views never share state. Two views may fetch concurrently; within one
//! view only the most recently issued request can change what is shown.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use tokio::sync::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

use boffo_core::{
    ControlView, CoreError, FilterSpec, ListQuery, ListResult, PageIntent, Pagination,
    PaginationControl, Resource,
};

use crate::error::{ClientError, ClientResult, RequestError};
use crate::fetch::ListFetcher;
use crate::sequence::RequestSequencer;

/// What happened to a load once its response arrived.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The response is now what the view shows.
    Applied,
    /// A later load was issued first; the response was discarded.
    Superseded,
}

/// Renderable state of a view.
#[derive(Debug, Clone)]
pub struct ViewState<T> {
    pub query: ListQuery,
    pub result: Option<ListResult<T>>,
    pub error: Option<RequestError>,
    pub loading: bool,
}

/// One list screen's query and results.
///
/// A view is bound to the resource of the query it was created with.
pub struct ListView<F, T> {
    id: Uuid,
    resource: Resource,
    fetcher: Arc<F>,
    sequencer: RequestSequencer,
    state: RwLock<ViewState<T>>,
}

impl<F, T> ListView<F, T>
where
    F: ListFetcher,
    T: DeserializeOwned + Clone + Send + Sync + 'static,
{
    /// Creates a view showing nothing yet. Call `refresh()` to load.
    pub fn new(fetcher: Arc<F>, query: ListQuery) -> Self {
        let id = Uuid::new_v4();
        debug!(view_id = %id, resource = %query.resource(), "List view created");

        ListView {
            id,
            resource: query.resource(),
            fetcher,
            sequencer: RequestSequencer::new(),
            state: RwLock::new(ViewState {
                query,
                result: None,
                error: None,
                loading: false,
            }),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn resource(&self) -> Resource {
        self.resource
    }

    /// Makes `query` current and fetches it.
    ///
    /// # Errors
    /// - `ClientError::Query` when `query` targets another resource; nothing
    ///   is fetched and the view is left untouched.
    /// - `ClientError::Request` when the current fetch fails.
    pub async fn load(&self, query: ListQuery) -> ClientResult<LoadOutcome> {
        if query.resource() != self.resource {
            return Err(CoreError::ResourceMismatch {
                expected: self.resource.to_string(),
                actual: query.resource().to_string(),
            }
            .into());
        }

        let ticket = {
            let mut state = self.state.write().await;
            let ticket = self.sequencer.issue();
            state.query = query.clone();
            state.loading = true;
            ticket
        };

        debug!(
            view_id = %self.id,
            ticket = ticket.number(),
            path = %query.request_path(),
            "Loading page"
        );

        let fetched = self.fetcher.fetch_list::<T>(&query).await;

        let mut state = self.state.write().await;
        if !self.sequencer.is_current(ticket) {
            debug!(
                view_id = %self.id,
                ticket = ticket.number(),
                latest = self.sequencer.issued(),
                "Dropping superseded response"
            );
            return Ok(LoadOutcome::Superseded);
        }

        state.loading = false;
        match fetched {
            Ok(result) => {
                info!(
                    view_id = %self.id,
                    resource = %query.resource(),
                    page = result.pagination.page,
                    items = result.len(),
                    "Page applied"
                );
                state.result = Some(result);
                state.error = None;
                Ok(LoadOutcome::Applied)
            }
            Err(e) => {
                state.error = Some(e.clone());
                Err(ClientError::Request(e))
            }
        }
    }

    /// Folds control intents into the current query and loads the result.
    pub async fn apply_intents(&self, intents: &[PageIntent]) -> ClientResult<LoadOutcome> {
        let next = self.query().await.apply(intents)?;
        self.load(next).await
    }

    /// Replaces the filters and loads page 1.
    pub async fn set_filters(&self, filters: FilterSpec) -> ClientResult<LoadOutcome> {
        let next = self.query().await.with_filters(filters)?;
        self.load(next).await
    }

    /// Re-issues the current query, e.g. after the user asks to retry.
    pub async fn refresh(&self) -> ClientResult<LoadOutcome> {
        let query = self.query().await;
        self.load(query).await
    }

    pub async fn query(&self) -> ListQuery {
        self.state.read().await.query.clone()
    }

    pub async fn snapshot(&self) -> ViewState<T> {
        self.state.read().await.clone()
    }

    /// The pagination control for what the view currently shows.
    pub async fn control(&self) -> ControlView {
        let state = self.state.read().await;
        let page_size = state.query.page_size();
        let pagination = state
            .result
            .as_ref()
            .map(|r| r.pagination)
            .unwrap_or_else(|| Pagination::empty(page_size.get()));

        PaginationControl::render(&pagination, page_size)
    }
}
