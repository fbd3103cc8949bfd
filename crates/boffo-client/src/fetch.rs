//! # List Fetch Service
//!
//! Issues list and detail requests against the REST backend.
//!
//! ## Request Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ListQuery ──► request_path() ──► GET {base_url}{path}?{query}         │
//! │                                        │                                │
//! │              ┌─────────────────────────┼──────────────────────────┐    │
//! │              ▼                         ▼                          ▼    │
//! │     no response (connect,      non-2xx status              2xx status  │
//! │     DNS, timeout, aborted)     body.message → Api          Envelope    │
//! │              │                 otherwise   → Unknown          │        │
//! │              ▼                                                ▼        │
//! │          Network                              message? → Api           │
//! │                                               data + pagination → Ok   │
//! │                                               otherwise → Unknown      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Page data (`/admin/page-data/{page}`, `/resellers/page-data/{page}`)
//! goes through the detail path and the same envelope rules.
//!
//! Exactly one request per call. Nothing is retried and nothing is cached.

use std::future::Future;
use std::time::{Duration, Instant};

use reqwest::header::ACCEPT;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

use boffo_core::{ListQuery, ListResult, PageDataTarget};

use crate::config::ApiSettings;
use crate::envelope::Envelope;
use crate::error::{ClientError, ClientResult, RequestError};

// =============================================================================
// ListFetcher Trait
// =============================================================================

/// Fetches pages and single records from the backend.
///
/// List views are generic over this trait so they can be driven by a
/// scripted fetcher in tests.
pub trait ListFetcher: Send + Sync {
    /// Fetches one page of the query's resource.
    fn fetch_list<T>(
        &self,
        query: &ListQuery,
    ) -> impl Future<Output = Result<ListResult<T>, RequestError>> + Send
    where
        T: DeserializeOwned + Send + 'static;

    /// Fetches one record from a detail path such as `/admin/resellers/4`.
    fn fetch_detail<T>(&self, path: &str) -> impl Future<Output = Result<T, RequestError>> + Send
    where
        T: DeserializeOwned + Send + 'static;

    /// Fetches the summary of one screen. `T` is
    /// [`AdminPageData`](boffo_core::AdminPageData) or
    /// [`ResellerPageData`](boffo_core::ResellerPageData), matching the target.
    fn fetch_page_data<T>(
        &self,
        target: PageDataTarget,
    ) -> impl Future<Output = Result<T, RequestError>> + Send
    where
        T: DeserializeOwned + Send + 'static,
    {
        async move {
            debug!(%target, "Fetching page data");
            self.fetch_detail(&target.path()).await
        }
    }
}

// =============================================================================
// HTTP Implementation
// =============================================================================

/// `reqwest`-backed fetcher.
#[derive(Debug, Clone)]
pub struct HttpListClient {
    http: reqwest::Client,
    base_url: String,
    access_token: Option<String>,
}

impl HttpListClient {
    /// Builds a client from API settings.
    pub fn new(settings: &ApiSettings) -> ClientResult<Self> {
        let mut client = Self::with_timeouts(
            &settings.base_url,
            settings.request_timeout(),
            settings.connect_timeout(),
        )?;
        client.access_token = settings.access_token.clone();
        Ok(client)
    }

    /// Builds an unauthenticated client with explicit timeouts.
    pub fn with_timeouts(
        base_url: &str,
        request_timeout: Duration,
        connect_timeout: Duration,
    ) -> ClientResult<Self> {
        Url::parse(base_url)?;

        let http = reqwest::Client::builder()
            .timeout(request_timeout)
            .connect_timeout(connect_timeout)
            .build()
            .map_err(|e| ClientError::HttpClient(e.to_string()))?;

        Ok(HttpListClient {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            access_token: None,
        })
    }

    /// Attaches a bearer token to every request.
    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    fn url_for(&self, path: &str) -> Result<Url, RequestError> {
        Url::parse(&format!("{}{}", self.base_url, path))
            .map_err(|e| RequestError::Unknown(format!("invalid request URL: {}", e)))
    }

    /// Performs the GET and decodes the envelope of a 2xx response.
    async fn get_envelope(&self, path: &str) -> Result<Envelope, RequestError> {
        let url = self.url_for(path)?;

        let mut request = self.http.get(url).header(ACCEPT, "application/json");
        if let Some(token) = &self.access_token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| RequestError::from_transport(&e))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| RequestError::from_transport(&e))?;

        if !status.is_success() {
            return Err(RequestError::from_status(status, &body));
        }

        Envelope::from_slice(&body)
    }
}

impl ListFetcher for HttpListClient {
    async fn fetch_list<T>(&self, query: &ListQuery) -> Result<ListResult<T>, RequestError>
    where
        T: DeserializeOwned + Send + 'static,
    {
        let path = query.request_path();
        let started = Instant::now();

        let result = self
            .get_envelope(&path)
            .await
            .and_then(Envelope::into_list::<T>);

        let elapsed_ms = started.elapsed().as_millis() as u64;
        match &result {
            Ok(list) => {
                debug!(
                    resource = %query.resource(),
                    page = query.page(),
                    page_size = query.page_size().get(),
                    items = list.len(),
                    elapsed_ms,
                    "List fetched"
                );

                let violations = list.pagination.violations();
                if !violations.is_empty() {
                    warn!(
                        resource = %query.resource(),
                        ?violations,
                        "Server pagination is inconsistent, showing it as sent"
                    );
                }
            }
            Err(e) => {
                warn!(
                    resource = %query.resource(),
                    page = query.page(),
                    elapsed_ms,
                    error = %e,
                    "List fetch failed"
                );
            }
        }

        result
    }

    async fn fetch_detail<T>(&self, path: &str) -> Result<T, RequestError>
    where
        T: DeserializeOwned + Send + 'static,
    {
        let result = self.get_envelope(path).await.and_then(Envelope::into_detail::<T>);

        if let Err(e) = &result {
            warn!(path, error = %e, "Detail fetch failed");
        }

        result
    }
}
