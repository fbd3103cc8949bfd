//! # Filter Specifications
//!
//! Typed, per-resource filter sets for list queries.
//!
//! ## Filter Shapes
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        FilterSpec (tagged)                              │
//! │                                                                         │
//! │  Shared:   search: Option<Search>   (free text, trimmed, ≤ 100 chars)  │
//! │                                                                         │
//! │  Payments            recorded_by, method, reseller_id, date_range      │
//! │  ProductBatches      in_stock, product_id                              │
//! │  Resellers           (search only)                                     │
//! │  StockDistributions  reseller_id, product_id                           │
//! │  StockMovements      product_id, owner_type, owner_id,                 │
//! │                      movement_type, source                             │
//! │  GoodsRequests       status, reseller_id            (no search)        │
//! │  ResellerSales       reseller_id, product_id        (no search)        │
//! │  ResellerStock       reseller_id, in_stock                             │
//! │                                                                         │
//! │  Enum-like filters are Choice<T>: All (sentinel) | Only(T)             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every field type validates itself on construction, so a `FilterSpec`
//! that exists can always be rendered to query parameters.

use std::fmt;
use std::num::NonZeroU32;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::resource::Resource;
use crate::validation::{
    validate_date, validate_date_range, validate_entity_id, validate_search_query,
    ValidationResult,
};
use crate::ALL_SENTINEL;

// =============================================================================
// Filter Values
// =============================================================================

/// A value that can be rendered as a single query parameter.
pub trait FilterValue {
    /// The unencoded wire representation.
    fn to_param(&self) -> String;
}

impl FilterValue for NaiveDate {
    fn to_param(&self) -> String {
        self.format("%Y-%m-%d").to_string()
    }
}

/// Free-text search term. Never empty, never longer than 100 characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Search(String);

impl Search {
    /// Parses user input; blank input means "no search".
    pub fn parse(raw: &str) -> ValidationResult<Option<Search>> {
        Ok(validate_search_query(raw)?.map(Search))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FilterValue for Search {
    fn to_param(&self) -> String {
        self.0.clone()
    }
}

/// Identifier of a reseller or product used as a filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(NonZeroU32);

impl EntityId {
    /// Creates an id, rejecting zero.
    pub fn new(field: &str, id: u32) -> ValidationResult<Self> {
        validate_entity_id(field, id)?;
        NonZeroU32::new(id)
            .map(EntityId)
            .ok_or_else(|| ValidationError::MustBePositive {
                field: field.to_string(),
            })
    }

    /// Maps the screens' "0 = any" convention onto `None`.
    pub fn from_raw(id: u32) -> Option<Self> {
        NonZeroU32::new(id).map(EntityId)
    }

    pub fn get(&self) -> u32 {
        self.0.get()
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FilterValue for EntityId {
    fn to_param(&self) -> String {
        self.0.to_string()
    }
}

// =============================================================================
// Choice (All sentinel)
// =============================================================================

/// An enum-like filter that may be left at "all".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Choice<T> {
    /// The distinguished sentinel: no narrowing, never sent.
    All,
    /// Narrow to a single value.
    Only(T),
}

impl<T> Choice<T> {
    pub fn only(value: T) -> Self {
        Choice::Only(value)
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Choice::All)
    }

    pub fn as_option(&self) -> Option<&T> {
        match self {
            Choice::All => None,
            Choice::Only(value) => Some(value),
        }
    }
}

impl<T> Default for Choice<T> {
    fn default() -> Self {
        Choice::All
    }
}

impl<T> FromStr for Choice<T>
where
    T: FromStr<Err = ValidationError>,
{
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case(ALL_SENTINEL) {
            return Ok(Choice::All);
        }
        s.parse().map(Choice::Only)
    }
}

impl<T: fmt::Display> fmt::Display for Choice<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Choice::All => f.write_str(ALL_SENTINEL),
            Choice::Only(value) => value.fmt(f),
        }
    }
}

// =============================================================================
// Wire Enums
// =============================================================================

/// Declares an enum-like filter value with its exact backend spelling.
macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $field:literal {
            $($(#[$vmeta:meta])* $variant:ident => $wire:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $($(#[$vmeta])* #[serde(rename = $wire)] $variant),+
        }

        impl $name {
            /// Every accepted value.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// The value exactly as the backend expects it.
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
            type Err = ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let s = s.trim();
                $(
                    if s.eq_ignore_ascii_case($wire) {
                        return Ok($name::$variant);
                    }
                )+
                Err(ValidationError::NotAllowed {
                    field: $field.to_string(),
                    allowed: vec![$($wire.to_string()),+],
                })
            }
        }

        impl FilterValue for $name {
            fn to_param(&self) -> String {
                self.as_str().to_string()
            }
        }
    };
}

wire_enum! {
    /// Who recorded a payment.
    RecordedBy, "recorded_by" {
        Admin => "ADMIN",
        System => "SYSTEM",
    }
}

wire_enum! {
    /// How a reseller paid.
    PaymentMethod, "method" {
        Mpesa => "MPESA",
        Cash => "CASH",
    }
}

wire_enum! {
    /// Whether a batch or reseller stock line still has units left.
    StockStatus, "in_stock" {
        InStock => "true",
        OutOfStock => "false",
    }
}

wire_enum! {
    /// Lifecycle state of a goods request.
    GoodsRequestStatus, "status" {
        Pending => "PENDING",
        Approved => "APPROVED",
        Rejected => "REJECTED",
    }
}

wire_enum! {
    /// Holder of the stock a movement affects.
    OwnerType, "owner_type" {
        Company => "COMPANY",
        Reseller => "RESELLER",
    }
}

wire_enum! {
    /// Direction of a stock movement.
    MovementType, "movement_type" {
        In => "IN",
        Out => "OUT",
    }
}

wire_enum! {
    /// Business event that produced a stock movement.
    MovementSource, "source" {
        Purchase => "PURCHASE",
        Distribution => "DISTRIBUTION",
        Sale => "SALE",
    }
}

// =============================================================================
// Date Range
// =============================================================================

/// A date range filter. Only sent when both bounds are present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct DateRange {
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
}

impl DateRange {
    /// Creates a range, rejecting `from > to`.
    pub fn new(from: Option<NaiveDate>, to: Option<NaiveDate>) -> ValidationResult<Self> {
        validate_date_range(from, to)?;
        Ok(DateRange { from, to })
    }

    /// Parses picker output; empty strings are missing bounds.
    pub fn parse(from: &str, to: &str) -> ValidationResult<Self> {
        let parse_bound = |field: &str, raw: &str| -> ValidationResult<Option<NaiveDate>> {
            if raw.trim().is_empty() {
                Ok(None)
            } else {
                validate_date(field, raw).map(Some)
            }
        };
        DateRange::new(parse_bound("date_from", from)?, parse_bound("date_to", to)?)
    }

    pub fn from(&self) -> Option<NaiveDate> {
        self.from
    }

    pub fn to(&self) -> Option<NaiveDate> {
        self.to
    }

    /// Both bounds, if the range is complete.
    pub fn bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        self.from.zip(self.to)
    }
}

// =============================================================================
// Per-Resource Filters
// =============================================================================

/// Filters for `GET /payments`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PaymentFilters {
    pub search: Option<Search>,
    pub recorded_by: Choice<RecordedBy>,
    pub method: Choice<PaymentMethod>,
    pub reseller_id: Option<EntityId>,
    pub date_range: DateRange,
}

/// Filters for `GET /company/stock-purchase`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProductBatchFilters {
    pub search: Option<Search>,
    pub in_stock: Choice<StockStatus>,
    pub product_id: Option<EntityId>,
}

/// Filters for `GET /admin/resellers`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResellerFilters {
    pub search: Option<Search>,
}

/// Filters for `GET /company/stock-distributions`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StockDistributionFilters {
    pub search: Option<Search>,
    pub reseller_id: Option<EntityId>,
    pub product_id: Option<EntityId>,
}

/// Filters for `GET /stock-movements`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StockMovementFilters {
    pub search: Option<Search>,
    pub product_id: Option<EntityId>,
    pub owner_type: Choice<OwnerType>,
    /// Sent as `owner_id`; the screens fill it from the reseller picker.
    pub owner_id: Option<EntityId>,
    pub movement_type: Choice<MovementType>,
    pub source: Choice<MovementSource>,
}

/// Filters for `GET /good-requests`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GoodsRequestFilters {
    pub status: Choice<GoodsRequestStatus>,
    pub reseller_id: Option<EntityId>,
}

/// Filters for `GET /resellers`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResellerSaleFilters {
    pub reseller_id: Option<EntityId>,
    pub product_id: Option<EntityId>,
}

/// Filters for `GET /resellers/stock`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResellerStockFilters {
    pub search: Option<Search>,
    pub reseller_id: Option<EntityId>,
    pub in_stock: Choice<StockStatus>,
}

// =============================================================================
// FilterSpec
// =============================================================================

/// The filter set of one list query, tagged by resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterSpec {
    Payments(PaymentFilters),
    ProductBatches(ProductBatchFilters),
    Resellers(ResellerFilters),
    StockDistributions(StockDistributionFilters),
    StockMovements(StockMovementFilters),
    GoodsRequests(GoodsRequestFilters),
    ResellerSales(ResellerSaleFilters),
    ResellerStock(ResellerStockFilters),
}

impl FilterSpec {
    /// The empty filter set for a resource.
    pub fn for_resource(resource: Resource) -> Self {
        match resource {
            Resource::Payments => FilterSpec::Payments(Default::default()),
            Resource::ProductBatches => FilterSpec::ProductBatches(Default::default()),
            Resource::Resellers => FilterSpec::Resellers(Default::default()),
            Resource::StockDistributions => FilterSpec::StockDistributions(Default::default()),
            Resource::StockMovements => FilterSpec::StockMovements(Default::default()),
            Resource::GoodsRequests => FilterSpec::GoodsRequests(Default::default()),
            Resource::ResellerSales => FilterSpec::ResellerSales(Default::default()),
            Resource::ResellerStock => FilterSpec::ResellerStock(Default::default()),
        }
    }

    /// The resource these filters narrow.
    pub fn resource(&self) -> Resource {
        match self {
            FilterSpec::Payments(_) => Resource::Payments,
            FilterSpec::ProductBatches(_) => Resource::ProductBatches,
            FilterSpec::Resellers(_) => Resource::Resellers,
            FilterSpec::StockDistributions(_) => Resource::StockDistributions,
            FilterSpec::StockMovements(_) => Resource::StockMovements,
            FilterSpec::GoodsRequests(_) => Resource::GoodsRequests,
            FilterSpec::ResellerSales(_) => Resource::ResellerSales,
            FilterSpec::ResellerStock(_) => Resource::ResellerStock,
        }
    }

    /// The shared free-text search, where the resource supports one.
    pub fn search(&self) -> Option<&Search> {
        match self {
            FilterSpec::Payments(f) => f.search.as_ref(),
            FilterSpec::ProductBatches(f) => f.search.as_ref(),
            FilterSpec::Resellers(f) => f.search.as_ref(),
            FilterSpec::StockDistributions(f) => f.search.as_ref(),
            FilterSpec::StockMovements(f) => f.search.as_ref(),
            FilterSpec::ResellerStock(f) => f.search.as_ref(),
            FilterSpec::GoodsRequests(_) | FilterSpec::ResellerSales(_) => None,
        }
    }

    /// Builds a typed filter set from loosely-typed screen input.
    ///
    /// Fields the resource does not filter on are ignored; `status` maps to
    /// `recorded_by`, `in_stock` or the goods request status depending on
    /// the resource, and ids of `0` mean "any".
    pub fn from_raw(resource: Resource, raw: &RawFilters) -> ValidationResult<Self> {
        fn choice<T>(value: &Option<String>) -> ValidationResult<Choice<T>>
        where
            T: FromStr<Err = ValidationError>,
        {
            value.as_deref().unwrap_or(ALL_SENTINEL).parse()
        }

        let search = || Search::parse(raw.search.as_deref().unwrap_or_default());
        let reseller_id = EntityId::from_raw(raw.reseller_id.unwrap_or(0));
        let product_id = EntityId::from_raw(raw.product_id.unwrap_or(0));

        let spec = match resource {
            Resource::Payments => FilterSpec::Payments(PaymentFilters {
                search: search()?,
                recorded_by: choice(&raw.status)?,
                method: choice(&raw.method)?,
                reseller_id,
                date_range: DateRange::parse(
                    raw.date_from.as_deref().unwrap_or_default(),
                    raw.date_to.as_deref().unwrap_or_default(),
                )?,
            }),
            Resource::ProductBatches => FilterSpec::ProductBatches(ProductBatchFilters {
                search: search()?,
                in_stock: choice(&raw.status)?,
                product_id,
            }),
            Resource::Resellers => FilterSpec::Resellers(ResellerFilters { search: search()? }),
            Resource::StockDistributions => {
                FilterSpec::StockDistributions(StockDistributionFilters {
                    search: search()?,
                    reseller_id,
                    product_id,
                })
            }
            Resource::StockMovements => FilterSpec::StockMovements(StockMovementFilters {
                search: search()?,
                product_id,
                owner_type: choice(&raw.owner_type)?,
                owner_id: reseller_id,
                movement_type: choice(&raw.movement_type)?,
                source: choice(&raw.source)?,
            }),
            Resource::GoodsRequests => FilterSpec::GoodsRequests(GoodsRequestFilters {
                status: choice(&raw.status)?,
                reseller_id,
            }),
            Resource::ResellerSales => FilterSpec::ResellerSales(ResellerSaleFilters {
                reseller_id,
                product_id,
            }),
            Resource::ResellerStock => FilterSpec::ResellerStock(ResellerStockFilters {
                search: search()?,
                reseller_id,
                in_stock: choice(&raw.status)?,
            }),
        };

        Ok(spec)
    }
}

/// Loosely-typed filter input as list screens collect it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawFilters {
    pub search: Option<String>,
    pub status: Option<String>,
    pub method: Option<String>,
    pub reseller_id: Option<u32>,
    pub product_id: Option<u32>,
    pub owner_type: Option<String>,
    pub movement_type: Option<String>,
    pub source: Option<String>,
    pub date_from: Option<String>,
    pub date_to: Option<String>,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_choice_parses_all_sentinel() {
        assert_eq!("all".parse::<Choice<PaymentMethod>>().unwrap(), Choice::All);
        assert_eq!("ALL".parse::<Choice<PaymentMethod>>().unwrap(), Choice::All);
        assert_eq!("".parse::<Choice<PaymentMethod>>().unwrap(), Choice::All);
        assert_eq!(
            "mpesa".parse::<Choice<PaymentMethod>>().unwrap(),
            Choice::Only(PaymentMethod::Mpesa)
        );
        assert!("CHEQUE".parse::<Choice<PaymentMethod>>().is_err());
    }

    #[test]
    fn test_wire_enum_spelling() {
        assert_eq!(RecordedBy::Admin.as_str(), "ADMIN");
        assert_eq!(StockStatus::InStock.as_str(), "true");
        assert_eq!(StockStatus::OutOfStock.to_param(), "false");
        assert_eq!(MovementSource::Distribution.to_string(), "DISTRIBUTION");
        assert_eq!(GoodsRequestStatus::ALL.len(), 3);
    }

    #[test]
    fn test_entity_id_zero_means_any() {
        assert_eq!(EntityId::from_raw(0), None);
        assert_eq!(EntityId::from_raw(4).map(|id| id.get()), Some(4));
        assert!(EntityId::new("product_id", 0).is_err());
    }

    #[test]
    fn test_date_range_construction() {
        let range = DateRange::parse("2024-01-01", "2024-01-31").unwrap();
        assert!(range.bounds().is_some());

        let half = DateRange::parse("2024-01-01", "").unwrap();
        assert!(half.bounds().is_none());
        assert!(half.from().is_some());

        assert!(DateRange::parse("2024-02-01", "2024-01-31").is_err());
        assert!(DateRange::parse("yesterday", "").is_err());
    }

    #[test]
    fn test_from_raw_maps_status_per_resource() {
        let raw = RawFilters {
            search: Some("milk".into()),
            status: Some("true".into()),
            product_id: Some(0),
            ..Default::default()
        };

        let spec = FilterSpec::from_raw(Resource::ProductBatches, &raw).unwrap();
        match spec {
            FilterSpec::ProductBatches(f) => {
                assert_eq!(f.search.unwrap().as_str(), "milk");
                assert_eq!(f.in_stock, Choice::Only(StockStatus::InStock));
                assert_eq!(f.product_id, None);
            }
            other => panic!("unexpected filters: {:?}", other),
        }

        // The same status string is not a goods request status
        assert!(FilterSpec::from_raw(Resource::GoodsRequests, &raw).is_err());
    }

    #[test]
    fn test_from_raw_movement_owner_comes_from_reseller() {
        let raw = RawFilters {
            reseller_id: Some(9),
            owner_type: Some("RESELLER".into()),
            ..Default::default()
        };

        let spec = FilterSpec::from_raw(Resource::StockMovements, &raw).unwrap();
        match spec {
            FilterSpec::StockMovements(f) => {
                assert_eq!(f.owner_id.map(|id| id.get()), Some(9));
                assert_eq!(f.owner_type, Choice::Only(OwnerType::Reseller));
                assert!(f.movement_type.is_all());
            }
            other => panic!("unexpected filters: {:?}", other),
        }
    }

    #[test]
    fn test_for_resource_matches_resource() {
        for resource in Resource::ALL {
            assert_eq!(FilterSpec::for_resource(resource).resource(), resource);
        }
    }

    #[test]
    fn test_search_only_on_supporting_resources() {
        let raw = RawFilters {
            search: Some("x".into()),
            ..Default::default()
        };
        let sales = FilterSpec::from_raw(Resource::ResellerSales, &raw).unwrap();
        assert!(sales.search().is_none());
        let resellers = FilterSpec::from_raw(Resource::Resellers, &raw).unwrap();
        assert_eq!(resellers.search().map(Search::as_str), Some("x"));
    }
}
