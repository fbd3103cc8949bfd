//! # Record Types
//!
//! The `data` records each list endpoint returns.
//!
//! ## Record Shapes
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         List Records                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Payment      │   │  ProductBatch   │   │    Reseller     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  reseller_id    │   │  batch_number   │   │  user: User     │       │
//! │  │  amount, method │   │  quantity       │   │  account:       │       │
//! │  │  recorded_by    │   │  purchase_price │   │   ResellerAcct  │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │StockDistribution│   │  StockMovement  │   │  GoodsRequest   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  quantity       │   │  owner_type/id  │   │  payload: [..]  │       │
//! │  │  unit/total     │   │  movement_type  │   │  status         │       │
//! │  │  price          │   │  source         │   │  cancelled      │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐                             │
//! │  │  ResellerSale   │   │  ResellerStock  │   Nested: ProductShort,     │
//! │  │  selling_price  │   │  quantity       │           UserShort         │
//! │  │  total_amount   │   │  low_stock_thr. │                             │
//! │  └─────────────────┘   └─────────────────┘                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Status-like fields stay plain strings: the list must still render when the
//! backend adds a value the filters do not know about yet.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

// =============================================================================
// Shared Nested Shapes
// =============================================================================

/// Product summary embedded in list records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProductShort {
    pub id: u32,
    pub name: String,
    pub price: f64,
    pub unit: String,
    pub low_stock_threshold: i64,
    pub description: Option<String>,
}

/// Reseller summary embedded in list records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct UserShort {
    pub id: u32,
    pub name: String,
    pub phone_number: String,
    pub email: Option<String>,
}

/// Full user record, as returned on the reseller list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct User {
    pub id: u32,
    pub name: String,
    pub email: String,
    pub phone_number: String,
    pub role: String,
    pub deleted: bool,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Payments
// =============================================================================

/// A payment received from a reseller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Payment {
    pub id: u32,
    pub reseller_id: u32,
    pub amount: f64,
    /// `MPESA` or `CASH`
    pub method: String,
    pub reference: Option<String>,
    /// `ADMIN` or `SYSTEM`
    pub recorded_by: String,
    #[ts(as = "String")]
    pub date_paid: DateTime<Utc>,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    pub user: Option<UserShort>,
}

// =============================================================================
// Company Stock
// =============================================================================

/// A purchased batch of company stock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProductBatch {
    pub id: u32,
    pub product_id: u32,
    pub batch_number: String,
    pub quantity: i64,
    pub purchase_price: f64,
    #[ts(as = "String")]
    pub date_received: DateTime<Utc>,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    pub remaining_quantity: Option<i64>,
    pub product_category: Option<String>,
    pub product: Option<ProductShort>,
}

/// Stock handed from the company to a reseller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct StockDistribution {
    pub id: u32,
    pub reseller_id: u32,
    pub product_id: u32,
    pub quantity: i64,
    pub unit_price: f64,
    pub total_price: f64,
    #[ts(as = "String")]
    pub date_distributed: DateTime<Utc>,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    pub product: Option<ProductShort>,
    pub user: Option<UserShort>,
}

/// One entry of the stock ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct StockMovement {
    pub id: u32,
    pub product_id: u32,
    /// `COMPANY` or `RESELLER`
    pub owner_type: String,
    /// Set when the owner is a reseller.
    pub owner_id: Option<u32>,
    /// `IN` or `OUT`
    pub movement_type: String,
    pub quantity: i64,
    pub unit_price: f64,
    /// `PURCHASE`, `DISTRIBUTION` or `SALE`
    pub source: String,
    pub note: Option<String>,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    pub product_category: Option<String>,
    pub product: Option<ProductShort>,
    pub user: Option<UserShort>,
}

// =============================================================================
// Resellers
// =============================================================================

/// Running totals of a reseller's account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ResellerAccount {
    pub reseller_id: u32,
    pub total_stock_received: i64,
    pub total_value_received: f64,
    pub total_sales_value: f64,
    pub total_paid: f64,
    pub total_cogs: f64,
    pub balance: f64,
}

/// A reseller with their account summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Reseller {
    pub user: User,
    pub account: ResellerAccount,
}

/// A line of a goods request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct GoodRequestItem {
    pub product_id: u32,
    pub product_name: String,
    pub quantity: i64,
    pub price_requested: f64,
}

/// Stock requested by a reseller, pending admin review.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct GoodsRequest {
    pub id: u32,
    pub reseller_id: u32,
    pub payload: Vec<GoodRequestItem>,
    /// `PENDING`, `APPROVED` or `REJECTED`
    pub status: String,
    pub comment: Option<String>,
    pub cancelled: bool,
    #[ts(as = "Option<String>")]
    pub cancelled_at: Option<DateTime<Utc>>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    pub user: Option<UserShort>,
}

/// A sale recorded by a reseller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ResellerSale {
    pub id: u32,
    pub reseller_id: u32,
    pub product_id: u32,
    pub quantity: i64,
    pub selling_price: f64,
    pub total_amount: f64,
    #[ts(as = "String")]
    pub date_sold: DateTime<Utc>,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    pub product_category: Option<String>,
    pub product: Option<ProductShort>,
    pub user: Option<UserShort>,
}

/// Stock a reseller holds of one product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ResellerStock {
    pub reseller_id: u32,
    pub product_id: u32,
    pub quantity: i64,
    pub product_category: Option<String>,
    pub low_stock_threshold: Option<i64>,
    pub product: Option<ProductShort>,
    pub user: Option<UserShort>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payment_from_backend_json() {
        let json = r#"{
            "id": 1,
            "reseller_id": 4,
            "amount": 1500.5,
            "method": "MPESA",
            "reference": "QWE123",
            "recorded_by": "ADMIN",
            "date_paid": "2024-03-01T00:00:00Z",
            "created_at": "2024-03-01T09:15:00+03:00",
            "user": { "id": 4, "name": "Wanjiku", "phone_number": "0700000000" }
        }"#;

        let payment: Payment = serde_json::from_str(json).unwrap();
        assert_eq!(payment.method, "MPESA");
        assert_eq!(payment.user.unwrap().email, None);
        assert_eq!(payment.created_at.to_rfc3339(), "2024-03-01T06:15:00+00:00");
    }

    #[test]
    fn test_goods_request_null_cancelled_at() {
        let json = r#"{
            "id": 2,
            "reseller_id": 4,
            "payload": [
                { "product_id": 1, "product_name": "Soap", "quantity": 3, "price_requested": 80 }
            ],
            "status": "PENDING",
            "comment": null,
            "cancelled": false,
            "cancelled_at": null,
            "updated_at": "2024-03-01T00:00:00Z",
            "created_at": "2024-03-01T00:00:00Z"
        }"#;

        let request: GoodsRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.payload.len(), 1);
        assert!(request.cancelled_at.is_none());
        assert!(request.user.is_none());
    }

    #[test]
    fn test_reseller_stock_without_optional_fields() {
        let json = r#"{ "reseller_id": 4, "product_id": 9, "quantity": 0 }"#;
        let stock: ResellerStock = serde_json::from_str(json).unwrap();
        assert_eq!(stock.quantity, 0);
        assert!(stock.product.is_none());
    }
}
