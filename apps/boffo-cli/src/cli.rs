//! Command-line definitions and handlers.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use boffo_client::{ClientConfig, ClientError, HttpListClient, ListFetcher, ListView, RequestError};
use boffo_core::control::NavButton;
use boffo_core::types::{
    GoodsRequest, Payment, ProductBatch, Reseller, ResellerSale, ResellerStock, StockDistribution,
    StockMovement,
};
use boffo_core::{
    AdminPage, AdminPageData, ControlView, CoreError, FilterSpec, ListQuery, PageDataTarget,
    PageSize, RawFilters, ResellerPage, ResellerPageData, Resource, ValidationError,
};

// =============================================================================
// Errors
// =============================================================================

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Client(#[from] ClientError),

    #[error("Failed to write output: {0}")]
    Output(#[from] serde_json::Error),
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        CliError::Client(err.into())
    }
}

impl From<ValidationError> for CliError {
    fn from(err: ValidationError) -> Self {
        CliError::Client(CoreError::from(err).into())
    }
}

impl From<RequestError> for CliError {
    fn from(err: RequestError) -> Self {
        CliError::Client(err.into())
    }
}

impl CliError {
    /// Text printed before exiting non-zero.
    pub fn user_message(&self) -> String {
        match self {
            CliError::Client(err) => err.user_message(),
            other => other.to_string(),
        }
    }

    /// Follow-up line for failures where running the same command again
    /// might work.
    pub fn retry_hint(&self) -> Option<&'static str> {
        match self {
            CliError::Client(ClientError::Request(err)) if err.is_retryable() => {
                Some("the request did not complete; run the command again to retry")
            }
            _ => None,
        }
    }
}

// =============================================================================
// Arguments
// =============================================================================

#[derive(Debug, Parser)]
#[command(name = "boffo", version, about = "Browse Boffo list endpoints")]
pub struct Cli {
    /// Config file (default: platform config dir, client.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print one page of a list resource as JSON lines
    List {
        /// payments, product-batches, resellers, stock-distributions,
        /// stock-movements, goods-requests, reseller-sales, reseller-stock
        resource: Resource,

        /// Page number, starting at 1
        #[arg(long, default_value_t = 1)]
        page: u32,

        /// Rows per page: 10, 20, 30, 40 or 50 (default from config)
        #[arg(long)]
        page_size: Option<u32>,

        #[command(flatten)]
        filters: FilterArgs,

        /// Print the screen's summary figures before the page
        #[arg(long)]
        stats: bool,
    },

    /// Print one reseller with their account summary
    Reseller {
        /// Reseller id
        id: u32,
    },

    /// Print the summary figures of a screen
    Stats {
        #[command(subcommand)]
        target: StatsTarget,
    },
}

#[derive(Debug, Subcommand)]
pub enum StatsTarget {
    /// dashboard, products, batches, distributions, goods_requests,
    /// payments, resellers, stock_movements
    Admin { page: AdminPage },

    /// dashboard, payments, stock, goods_requests, sales
    Reseller { page: ResellerPage },
}

impl StatsTarget {
    pub fn target(&self) -> PageDataTarget {
        match self {
            StatsTarget::Admin { page } => PageDataTarget::Admin(*page),
            StatsTarget::Reseller { page } => PageDataTarget::Reseller(*page),
        }
    }
}

/// Filter flags; each resource uses the ones its endpoint accepts.
#[derive(Debug, Default, Args)]
pub struct FilterArgs {
    /// Free-text search
    #[arg(long)]
    pub search: Option<String>,

    /// recorded_by (payments), in_stock true/false (stock), or request status
    #[arg(long)]
    pub status: Option<String>,

    /// Payment method: MPESA, CASH or all
    #[arg(long)]
    pub method: Option<String>,

    /// Reseller id; 0 means any
    #[arg(long)]
    pub reseller_id: Option<u32>,

    /// Product id; 0 means any
    #[arg(long)]
    pub product_id: Option<u32>,

    /// COMPANY, RESELLER or all
    #[arg(long)]
    pub owner_type: Option<String>,

    /// IN, OUT or all
    #[arg(long)]
    pub movement_type: Option<String>,

    /// PURCHASE, DISTRIBUTION, SALE or all
    #[arg(long)]
    pub source: Option<String>,

    /// Start date, YYYY-MM-DD (only sent together with --to)
    #[arg(long = "from")]
    pub date_from: Option<String>,

    /// End date, YYYY-MM-DD (only sent together with --from)
    #[arg(long = "to")]
    pub date_to: Option<String>,
}

impl FilterArgs {
    pub fn to_raw(&self) -> RawFilters {
        RawFilters {
            search: self.search.clone(),
            status: self.status.clone(),
            method: self.method.clone(),
            reseller_id: self.reseller_id,
            product_id: self.product_id,
            owner_type: self.owner_type.clone(),
            movement_type: self.movement_type.clone(),
            source: self.source.clone(),
            date_from: self.date_from.clone(),
            date_to: self.date_to.clone(),
        }
    }
}

// =============================================================================
// Handlers
// =============================================================================

impl Cli {
    pub async fn run(self) -> Result<(), CliError> {
        let config = ClientConfig::load(self.config)?;
        let client = Arc::new(HttpListClient::new(&config.api)?);

        match self.command {
            Command::List {
                resource,
                page,
                page_size,
                filters,
                stats,
            } => {
                let page_size = match page_size {
                    Some(size) => PageSize::new(size)?,
                    None => config.default_page_size()?,
                };
                let query = build_query(resource, page, page_size, &filters)?;
                debug!(path = %query.request_path(), "Listing");

                if stats {
                    print_stats(client.as_ref(), resource.page_data()).await?;
                }

                match resource {
                    Resource::Payments => print_page::<_, Payment>(client, query).await,
                    Resource::ProductBatches => print_page::<_, ProductBatch>(client, query).await,
                    Resource::Resellers => print_page::<_, Reseller>(client, query).await,
                    Resource::StockDistributions => {
                        print_page::<_, StockDistribution>(client, query).await
                    }
                    Resource::StockMovements => print_page::<_, StockMovement>(client, query).await,
                    Resource::GoodsRequests => print_page::<_, GoodsRequest>(client, query).await,
                    Resource::ResellerSales => print_page::<_, ResellerSale>(client, query).await,
                    Resource::ResellerStock => print_page::<_, ResellerStock>(client, query).await,
                }
            }
            Command::Reseller { id } => {
                let path = Resource::Resellers
                    .detail_path(id)
                    .ok_or_else(|| CoreError::UnknownResource("reseller detail".into()))?;
                let reseller: Reseller = client.fetch_detail(&path).await?;
                println!("{}", serde_json::to_string_pretty(&reseller)?);
                Ok(())
            }
            Command::Stats { target } => print_stats(client.as_ref(), target.target()).await,
        }
    }
}

/// Query for the requested page, validated before anything is sent.
pub fn build_query(
    resource: Resource,
    page: u32,
    page_size: PageSize,
    filters: &FilterArgs,
) -> Result<ListQuery, CoreError> {
    let filters = FilterSpec::from_raw(resource, &filters.to_raw())?;
    ListQuery::new(filters).with_page_size(page_size).with_page(page)
}

async fn print_page<F, T>(client: Arc<F>, query: ListQuery) -> Result<(), CliError>
where
    F: ListFetcher,
    T: DeserializeOwned + Serialize + Clone + Send + Sync + 'static,
{
    let view: ListView<F, T> = ListView::new(client, query.clone());
    view.load(query).await?;

    if let Some(result) = view.snapshot().await.result {
        for item in &result.items {
            println!("{}", serde_json::to_string(item)?);
        }
    }

    println!("{}", control_line(&view.control().await));
    Ok(())
}

async fn print_stats<F: ListFetcher>(client: &F, target: PageDataTarget) -> Result<(), CliError> {
    let rendered = match target {
        PageDataTarget::Admin(_) => {
            let data: AdminPageData = client.fetch_page_data(target).await?;
            serde_json::to_string_pretty(&data)?
        }
        PageDataTarget::Reseller(_) => {
            let data: ResellerPageData = client.fetch_page_data(target).await?;
            serde_json::to_string_pretty(&data)?
        }
    };
    println!("{}", rendered);
    Ok(())
}

/// `Page X of Y  [prev: N]  [next: N]`, with `-` for a disabled button.
pub fn control_line(control: &ControlView) -> String {
    let button = |b: &NavButton| {
        if b.enabled {
            b.target.to_string()
        } else {
            "-".to_string()
        }
    };

    format!(
        "{}  [prev: {}]  [next: {}]",
        control.label,
        button(&control.previous),
        button(&control.next)
    )
}
