//! # Resource Catalogue
//!
//! The list endpoints of the Boffo backend.
//!
//! ```text
//! ┌──────────────────────┬───────────────────────────────┬──────────────────┐
//! │ Resource             │ Path                          │ Detail           │
//! ├──────────────────────┼───────────────────────────────┼──────────────────┤
//! │ Payments             │ /payments                     │ -                │
//! │ ProductBatches       │ /company/stock-purchase       │ -                │
//! │ Resellers            │ /admin/resellers              │ /admin/resellers/{id} │
//! │ StockDistributions   │ /company/stock-distributions  │ -                │
//! │ StockMovements       │ /stock-movements              │ -                │
//! │ GoodsRequests        │ /good-requests                │ -                │
//! │ ResellerSales        │ /resellers                    │ -                │
//! │ ResellerStock        │ /resellers/stock              │ -                │
//! └──────────────────────┴───────────────────────────────┴──────────────────┘
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// A server-paginated list resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Resource {
    Payments,
    ProductBatches,
    Resellers,
    StockDistributions,
    StockMovements,
    GoodsRequests,
    ResellerSales,
    ResellerStock,
}

impl Resource {
    /// Every list resource, in sidebar order.
    pub const ALL: [Resource; 8] = [
        Resource::Payments,
        Resource::ProductBatches,
        Resource::Resellers,
        Resource::StockDistributions,
        Resource::StockMovements,
        Resource::GoodsRequests,
        Resource::ResellerSales,
        Resource::ResellerStock,
    ];

    /// Endpoint path without query parameters.
    pub const fn path(&self) -> &'static str {
        match self {
            Resource::Payments => "/payments",
            Resource::ProductBatches => "/company/stock-purchase",
            Resource::Resellers => "/admin/resellers",
            Resource::StockDistributions => "/company/stock-distributions",
            Resource::StockMovements => "/stock-movements",
            Resource::GoodsRequests => "/good-requests",
            Resource::ResellerSales => "/resellers",
            Resource::ResellerStock => "/resellers/stock",
        }
    }

    /// Stable kebab-case name, used in logs and on the command line.
    pub const fn name(&self) -> &'static str {
        match self {
            Resource::Payments => "payments",
            Resource::ProductBatches => "product-batches",
            Resource::Resellers => "resellers",
            Resource::StockDistributions => "stock-distributions",
            Resource::StockMovements => "stock-movements",
            Resource::GoodsRequests => "goods-requests",
            Resource::ResellerSales => "reseller-sales",
            Resource::ResellerStock => "reseller-stock",
        }
    }

    /// Path of a single record, for resources the backend exposes one for.
    pub fn detail_path(&self, id: u32) -> Option<String> {
        match self {
            Resource::Resellers => Some(format!("{}/{}", self.path(), id)),
            _ => None,
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Resource {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('_', "-");
        match normalized.as_str() {
            "payments" => Ok(Resource::Payments),
            "product-batches" | "batches" => Ok(Resource::ProductBatches),
            "resellers" => Ok(Resource::Resellers),
            "stock-distributions" | "distributions" => Ok(Resource::StockDistributions),
            "stock-movements" | "movements" => Ok(Resource::StockMovements),
            "goods-requests" | "good-requests" => Ok(Resource::GoodsRequests),
            "reseller-sales" | "sales" => Ok(Resource::ResellerSales),
            "reseller-stock" => Ok(Resource::ResellerStock),
            _ => Err(CoreError::UnknownResource(s.to_string())),
        }
    }
}
