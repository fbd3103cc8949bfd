//! # Page Data
//!
//! Summary figures shown above each list screen. One request per screen,
//! independent of the list query and its filters.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  GET /admin/page-data/{page}        GET /resellers/page-data/{page}    │
//! │      dashboard                          dashboard                       │
//! │      products                           payments                        │
//! │      batches                            stock                           │
//! │      distributions                      goods_requests                  │
//! │      goods_requests                     sales                           │
//! │      payments                                                           │
//! │      resellers                                                          │
//! │      stock_movements                                                    │
//! │                │                                    │                   │
//! │                ▼                                    ▼                   │
//! │       { "data": { "<page>": {..stats..} } }  (same envelope rules)     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The backend fills only the section named after the requested page, so
//! every section is optional.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreError;
use crate::resource::Resource;

// =============================================================================
// Targets
// =============================================================================

macro_rules! page_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $wire:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(#[serde(rename = $wire)] $variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Path segment, as the backend routes it.
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $wire),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = CoreError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let normalized = s.trim().to_lowercase().replace('-', "_");
                $(
                    if normalized == $wire {
                        return Ok($name::$variant);
                    }
                )+
                Err(CoreError::UnknownResource(format!("page data {}", s)))
            }
        }
    };
}

page_enum! {
    /// Screens of the admin area.
    AdminPage {
        Dashboard => "dashboard",
        Products => "products",
        Batches => "batches",
        Distributions => "distributions",
        GoodsRequests => "goods_requests",
        Payments => "payments",
        Resellers => "resellers",
        StockMovements => "stock_movements",
    }
}

page_enum! {
    /// Screens of the reseller area.
    ResellerPage {
        Dashboard => "dashboard",
        Payments => "payments",
        Stock => "stock",
        GoodsRequests => "goods_requests",
        Sales => "sales",
    }
}

/// Which summary to request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageDataTarget {
    Admin(AdminPage),
    Reseller(ResellerPage),
}

impl PageDataTarget {
    pub fn path(&self) -> String {
        match self {
            PageDataTarget::Admin(page) => format!("/admin/page-data/{}", page),
            PageDataTarget::Reseller(page) => format!("/resellers/page-data/{}", page),
        }
    }
}

impl fmt::Display for PageDataTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageDataTarget::Admin(page) => write!(f, "admin/{}", page),
            PageDataTarget::Reseller(page) => write!(f, "reseller/{}", page),
        }
    }
}

impl Resource {
    /// Summary shown above this resource's list.
    pub const fn page_data(&self) -> PageDataTarget {
        match self {
            Resource::Payments => PageDataTarget::Admin(AdminPage::Payments),
            Resource::ProductBatches => PageDataTarget::Admin(AdminPage::Batches),
            Resource::Resellers => PageDataTarget::Admin(AdminPage::Resellers),
            Resource::StockDistributions => PageDataTarget::Admin(AdminPage::Distributions),
            Resource::StockMovements => PageDataTarget::Admin(AdminPage::StockMovements),
            Resource::GoodsRequests => PageDataTarget::Admin(AdminPage::GoodsRequests),
            Resource::ResellerSales => PageDataTarget::Reseller(ResellerPage::Sales),
            Resource::ResellerStock => PageDataTarget::Reseller(ResellerPage::Stock),
        }
    }
}

// =============================================================================
// Shared Sections
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PaymentsStats {
    pub cash_total: f64,
    pub mpesa_total: f64,
    pub total_payments: i64,
    pub total_received: f64,
}

// =============================================================================
// Reseller Sections
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ResellerGoodsRequestStats {
    pub approved_requests: i64,
    pub pending_requests: i64,
    pub rejected_requests: i64,
    pub total_requests: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SalesStats {
    pub total_sales_value: f64,
    pub total_units_sold: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct StockStats {
    pub total_low_stock: i64,
    pub total_units: i64,
    pub total_value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SalesTotals {
    pub sales_value: f64,
    pub units_sold: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RecentSale {
    pub id: u32,
    pub product_name: String,
    pub quantity: i64,
    pub selling_price: f64,
    pub total_amount: f64,
    #[ts(as = "String")]
    pub date_sold: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct StockOverview {
    pub id: u32,
    pub name: String,
    pub quantity: i64,
    pub low_stock_threshold: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ResellerDashboardStats {
    pub current_stock: i64,
    pub outstanding_balance: f64,
    pub profit: f64,
    pub total_sales: SalesTotals,
    #[serde(default)]
    pub recent_sales: Vec<RecentSale>,
    #[serde(default)]
    pub stock_overview: Vec<StockOverview>,
}

/// Same totals as the reseller account, without the id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AccountSummary {
    pub total_stock_received: i64,
    pub total_value_received: f64,
    pub total_sales_value: f64,
    pub total_paid: f64,
    pub total_cogs: f64,
    pub balance: f64,
}

/// `data` of `GET /resellers/page-data/{page}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ResellerPageData {
    pub goods_requests: Option<ResellerGoodsRequestStats>,
    pub sales: Option<SalesStats>,
    pub stock: Option<StockStats>,
    pub dashboard: Option<ResellerDashboardStats>,
    pub payments: Option<PaymentsStats>,
    pub account_summary: Option<AccountSummary>,
}

// =============================================================================
// Admin Sections
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct StockChartPoint {
    pub date: String,
    pub in_stock: i64,
    pub distributed: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RecentActivity {
    pub id: u32,
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct StockAlert {
    pub id: u32,
    pub product_name: String,
    pub quantity: i64,
    pub low_stock_threshold: i64,
    pub alert_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TopReseller {
    pub id: u32,
    pub name: String,
    pub total_sales_value: f64,
    pub stock_value: f64,
    /// Percentage change, may be negative.
    pub performance: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AdminDashboardStats {
    pub active_resellers: i64,
    pub company_low_stock: i64,
    pub payment_received: f64,
    pub stock_distributed_units: i64,
    pub total_company_stock: i64,
    pub total_pending_requests: i64,
    pub total_value_distributed: f64,
    #[serde(default)]
    pub recent_activities: Vec<RecentActivity>,
    #[serde(default)]
    pub stock_alerts: Vec<StockAlert>,
    #[serde(default)]
    pub top_resellers: Vec<TopReseller>,
    #[serde(default)]
    pub weekly_stock_chart: Vec<StockChartPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProductsStats {
    pub low_stock_items: i64,
    pub out_of_stock: i64,
    pub total_units: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct BatchesStats {
    pub active_batches: i64,
    pub remaining_value: f64,
    pub total_batches: i64,
    pub total_value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DistributionsStats {
    pub active_resellers: i64,
    pub total_distribution: i64,
    pub total_value: f64,
    pub units_distributed: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct GoodsRequestsStats {
    pub total_approved: i64,
    pub total_cancelled: i64,
    pub total_pending: i64,
    pub total_rejected: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ResellersStats {
    pub active_resellers: i64,
    pub outstanding_payments: f64,
    pub total_resellers: i64,
    pub total_stock_out: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct StockMovementsStats {
    /// Stock in minus stock out; negative when more left than arrived.
    pub net_movement: i64,
    pub total_movements: i64,
    pub total_stock_in: i64,
    pub total_stock_out: i64,
}

/// `data` of `GET /admin/page-data/{page}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AdminPageData {
    pub dashboard: Option<AdminDashboardStats>,
    pub products: Option<ProductsStats>,
    pub batches: Option<BatchesStats>,
    pub distributions: Option<DistributionsStats>,
    pub goods_requests: Option<GoodsRequestsStats>,
    pub payments: Option<PaymentsStats>,
    pub resellers: Option<ResellersStats>,
    pub stock_movements: Option<StockMovementsStats>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashSet;

    #[test]
    fn test_target_paths() {
        assert_eq!(
            PageDataTarget::Admin(AdminPage::StockMovements).path(),
            "/admin/page-data/stock_movements"
        );
        assert_eq!(
            PageDataTarget::Reseller(ResellerPage::GoodsRequests).path(),
            "/resellers/page-data/goods_requests"
        );
        assert_eq!(PageDataTarget::Admin(AdminPage::Dashboard).to_string(), "admin/dashboard");
    }

    #[test]
    fn test_page_names_parse() {
        for page in AdminPage::ALL {
            assert_eq!(page.as_str().parse::<AdminPage>().unwrap(), *page);
        }
        for page in ResellerPage::ALL {
            assert_eq!(page.as_str().parse::<ResellerPage>().unwrap(), *page);
        }
        assert_eq!("stock-movements".parse::<AdminPage>().unwrap(), AdminPage::StockMovements);
        assert!("stock".parse::<AdminPage>().is_err());
        assert!("batches".parse::<ResellerPage>().is_err());
    }

    #[test]
    fn test_every_resource_has_a_summary() {
        let targets: Vec<_> = Resource::ALL.iter().map(Resource::page_data).collect();
        assert_eq!(targets[0].path(), "/admin/page-data/payments");
        assert_eq!(targets[1].path(), "/admin/page-data/batches");
        assert_eq!(
            Resource::ResellerStock.page_data(),
            PageDataTarget::Reseller(ResellerPage::Stock)
        );

        let unique: HashSet<_> = targets.iter().collect();
        assert_eq!(unique.len(), targets.len());
    }

    #[test]
    fn test_only_requested_section_is_filled() {
        let data: AdminPageData = serde_json::from_value(json!({
            "stock_movements": {
                "net_movement": -12, "total_movements": 40,
                "total_stock_in": 14, "total_stock_out": 26
            }
        }))
        .unwrap();

        assert_eq!(data.stock_movements.unwrap().net_movement, -12);
        assert!(data.payments.is_none());
        assert!(data.dashboard.is_none());

        let empty: ResellerPageData = serde_json::from_value(json!({})).unwrap();
        assert_eq!(empty, ResellerPageData::default());
    }

    #[test]
    fn test_reseller_dashboard_shape() {
        let data: ResellerPageData = serde_json::from_value(json!({
            "dashboard": {
                "current_stock": 35, "outstanding_balance": 1200.5, "profit": 800.0,
                "total_sales": { "sales_value": 4300.0, "units_sold": 43 },
                "recent_sales": [{
                    "id": 9, "product_name": "Soap", "quantity": 3,
                    "selling_price": 100.0, "total_amount": 300.0,
                    "date_sold": "2024-03-02T09:30:00Z"
                }],
                "stock_overview": []
            }
        }))
        .unwrap();

        let dashboard = data.dashboard.unwrap();
        assert_eq!(dashboard.total_sales.units_sold, 43);
        assert_eq!(dashboard.recent_sales[0].product_name, "Soap");
        assert!(dashboard.stock_overview.is_empty());
    }

    #[test]
    fn test_activity_type_field() {
        let activity: RecentActivity = serde_json::from_value(json!({
            "id": 1, "title": "Stock distributed", "description": "20 units to Wanjiku",
            "type": "DISTRIBUTION", "created_at": "2024-03-02T09:30:00Z"
        }))
        .unwrap();
        assert_eq!(activity.kind, "DISTRIBUTION");
    }
}
