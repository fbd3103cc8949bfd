//! # List Query Builder
//!
//! Renders a `ListQuery` into the request path a list endpoint expects.
//!
//! ## Rendering Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ListQuery { page, page_size, filters }                                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  limit=<page_size> & page=<page>          (always, in this order)      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  filter params, in declaration order:                                  │
//! │  ├── Option::None          → omitted                                   │
//! │  ├── Choice::All ("all")   → omitted                                   │
//! │  ├── DateRange             → date_from & date_to, or nothing           │
//! │  └── anything else         → key=<percent-encoded value>, once         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  /payments?limit=10&page=1&search=milk&method=MPESA                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every operation here is pure: a `ListQuery` is never mutated, each change
//! produces a new value.

use std::fmt;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::{Deserialize, Serialize};

use crate::control::PageIntent;
use crate::error::{CoreError, CoreResult, ValidationError};
use crate::filters::{Choice, DateRange, FilterSpec, FilterValue};
use crate::resource::Resource;
use crate::validation::{validate_page, validate_page_size, ValidationResult};
use crate::{DEFAULT_PAGE_SIZE, PAGE_SIZE_OPTIONS};

// =============================================================================
// Query Parameters
// =============================================================================

/// Bytes escaped in keys and values: everything but `A-Z a-z 0-9 - _ . ! ~ * ' ( )`,
/// the set browsers leave alone when encoding a URI component.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Ordered query parameters. Keys appear in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(&'static str, String)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a parameter unconditionally.
    pub fn push<V: FilterValue + ?Sized>(&mut self, key: &'static str, value: &V) -> &mut Self {
        self.pairs.push((key, value.to_param()));
        self
    }

    /// Adds a parameter when the value is present.
    pub fn push_opt<V: FilterValue>(&mut self, key: &'static str, value: Option<&V>) -> &mut Self {
        if let Some(value) = value {
            self.push(key, value);
        }
        self
    }

    /// Adds a parameter unless the choice is the `all` sentinel.
    pub fn push_choice<V: FilterValue>(&mut self, key: &'static str, choice: &Choice<V>) -> &mut Self {
        self.push_opt(key, choice.as_option())
    }

    /// Adds both bounds of a range, or neither.
    pub fn push_range(
        &mut self,
        from_key: &'static str,
        to_key: &'static str,
        range: &DateRange,
    ) -> &mut Self {
        if let Some((from, to)) = range.bounds() {
            self.push(from_key, &from);
            self.push(to_key, &to);
        }
        self
    }

    /// Appends every pair of `other`, keeping its order.
    pub fn extend(&mut self, other: QueryParams) -> &mut Self {
        self.pairs.extend(other.pairs);
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.pairs.iter().any(|(k, _)| *k == key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.pairs.iter().map(|(k, _)| *k)
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Renders `k=v&k=v` with percent-encoded values; a space becomes `%20`.
    pub fn encode(&self) -> String {
        self.pairs
            .iter()
            .map(|(k, v)| {
                format!(
                    "{}={}",
                    utf8_percent_encode(k, COMPONENT),
                    utf8_percent_encode(v, COMPONENT)
                )
            })
            .collect::<Vec<_>>()
            .join("&")
    }
}

impl FilterValue for u32 {
    fn to_param(&self) -> String {
        self.to_string()
    }
}

// =============================================================================
// Filter Rendering
// =============================================================================

impl FilterSpec {
    /// Filter parameters in the order each list screen declares them.
    pub fn to_params(&self) -> QueryParams {
        let mut params = QueryParams::new();

        match self {
            FilterSpec::Payments(f) => {
                params
                    .push_opt("search", f.search.as_ref())
                    .push_choice("recorded_by", &f.recorded_by)
                    .push_choice("method", &f.method)
                    .push_opt("reseller_id", f.reseller_id.as_ref())
                    .push_range("date_from", "date_to", &f.date_range);
            }
            FilterSpec::ProductBatches(f) => {
                params
                    .push_opt("search", f.search.as_ref())
                    .push_choice("in_stock", &f.in_stock)
                    .push_opt("product_id", f.product_id.as_ref());
            }
            FilterSpec::Resellers(f) => {
                params.push_opt("search", f.search.as_ref());
            }
            FilterSpec::StockDistributions(f) => {
                params
                    .push_opt("search", f.search.as_ref())
                    .push_opt("reseller_id", f.reseller_id.as_ref())
                    .push_opt("product_id", f.product_id.as_ref());
            }
            FilterSpec::StockMovements(f) => {
                params
                    .push_opt("search", f.search.as_ref())
                    .push_opt("product_id", f.product_id.as_ref())
                    .push_choice("owner_type", &f.owner_type)
                    .push_opt("owner_id", f.owner_id.as_ref())
                    .push_choice("movement_type", &f.movement_type)
                    .push_choice("source", &f.source);
            }
            FilterSpec::GoodsRequests(f) => {
                params
                    .push_choice("status", &f.status)
                    .push_opt("reseller_id", f.reseller_id.as_ref());
            }
            FilterSpec::ResellerSales(f) => {
                params
                    .push_opt("reseller_id", f.reseller_id.as_ref())
                    .push_opt("product_id", f.product_id.as_ref());
            }
            FilterSpec::ResellerStock(f) => {
                params
                    .push_opt("search", f.search.as_ref())
                    .push_opt("reseller_id", f.reseller_id.as_ref())
                    .push_choice("in_stock", &f.in_stock);
            }
        }

        params
    }
}

/// Builds `base?params` from a filter set, or `base` alone when nothing
/// narrows the list.
///
/// ## Example
/// ```rust
/// use boffo_core::filters::{FilterSpec, ResellerFilters, Search};
/// use boffo_core::query::build;
///
/// let filters = FilterSpec::Resellers(ResellerFilters {
///     search: Search::parse("mama mboga").unwrap(),
/// });
/// assert_eq!(build("/admin/resellers", &filters), "/admin/resellers?search=mama%20mboga");
/// ```
pub fn build(base: &str, filters: &FilterSpec) -> String {
    join(base, &filters.to_params())
}

/// Appends encoded parameters to a path.
pub fn join(base: &str, params: &QueryParams) -> String {
    if params.is_empty() {
        base.to_string()
    } else {
        format!("{}?{}", base, params.encode())
    }
}

// =============================================================================
// Page Size
// =============================================================================

/// One of the page sizes the pagination control offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct PageSize(u32);

impl PageSize {
    pub fn new(size: u32) -> ValidationResult<Self> {
        validate_page_size(size)?;
        Ok(PageSize(size))
    }

    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Every selectable size, smallest first.
    pub fn options() -> impl Iterator<Item = PageSize> {
        PAGE_SIZE_OPTIONS.into_iter().map(PageSize)
    }
}

impl Default for PageSize {
    fn default() -> Self {
        PageSize(DEFAULT_PAGE_SIZE)
    }
}

impl TryFrom<u32> for PageSize {
    type Error = ValidationError;

    fn try_from(size: u32) -> Result<Self, Self::Error> {
        PageSize::new(size)
    }
}

impl From<PageSize> for u32 {
    fn from(size: PageSize) -> Self {
        size.0
    }
}

impl fmt::Display for PageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// List Query
// =============================================================================

/// A page request for one resource: filters plus page and page size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    page: u32,
    page_size: PageSize,
    filters: FilterSpec,
}

impl ListQuery {
    /// First page at the default size.
    pub fn new(filters: FilterSpec) -> Self {
        ListQuery {
            page: 1,
            page_size: PageSize::default(),
            filters,
        }
    }

    /// Unfiltered first page of a resource.
    pub fn for_resource(resource: Resource) -> Self {
        Self::new(FilterSpec::for_resource(resource))
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn page_size(&self) -> PageSize {
        self.page_size
    }

    pub fn filters(&self) -> &FilterSpec {
        &self.filters
    }

    pub fn resource(&self) -> Resource {
        self.filters.resource()
    }

    /// Moves to another page, keeping size and filters.
    pub fn with_page(&self, page: u32) -> CoreResult<Self> {
        validate_page(page)?;
        Ok(ListQuery {
            page,
            ..self.clone()
        })
    }

    /// Changes the page size. Always lands on page 1.
    pub fn with_page_size(&self, page_size: PageSize) -> Self {
        ListQuery {
            page: 1,
            page_size,
            filters: self.filters.clone(),
        }
    }

    /// Replaces the filters. Always lands on page 1.
    ///
    /// # Errors
    /// `CoreError::ResourceMismatch` when `filters` belong to another resource.
    pub fn with_filters(&self, filters: FilterSpec) -> CoreResult<Self> {
        if filters.resource() != self.resource() {
            return Err(CoreError::ResourceMismatch {
                expected: self.resource().to_string(),
                actual: filters.resource().to_string(),
            });
        }

        Ok(ListQuery {
            page: 1,
            page_size: self.page_size,
            filters,
        })
    }

    /// Folds a batch of control intents into a single new query.
    ///
    /// `[ChangePage(1), ChangePageSize(s)]` from a size change therefore
    /// yields one request, not two.
    pub fn apply(&self, intents: &[PageIntent]) -> CoreResult<Self> {
        intents
            .iter()
            .try_fold(self.clone(), |query, intent| match *intent {
                PageIntent::ChangePage(page) => query.with_page(page),
                PageIntent::ChangePageSize(size) => Ok(query.with_page_size(size)),
            })
    }

    /// `limit`, `page`, then the filter parameters.
    pub fn to_params(&self) -> QueryParams {
        let mut params = QueryParams::new();
        params
            .push("limit", &self.page_size.get())
            .push("page", &self.page)
            .extend(self.filters.to_params());
        params
    }

    /// Endpoint path with the encoded query string.
    pub fn request_path(&self) -> String {
        join(self.resource().path(), &self.to_params())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::filters::{
        EntityId, GoodsRequestFilters, GoodsRequestStatus, MovementSource, MovementType,
        OwnerType, PaymentFilters, PaymentMethod, ProductBatchFilters, RecordedBy,
        ResellerFilters, ResellerSaleFilters, ResellerStockFilters, Search,
        StockDistributionFilters, StockMovementFilters, StockStatus,
    };
    use crate::ALL_SENTINEL;
    use chrono::NaiveDate;
    use percent_encoding::percent_decode_str;
    use proptest::prelude::*;

    fn search() -> impl Strategy<Value = Option<Search>> {
        "[ a-zA-Z0-9&=/+%#?'()*!~._ü-]{0,24}".prop_map(|raw| Search::parse(&raw).unwrap())
    }

    // 0 is the "any" picker value
    fn entity_id() -> impl Strategy<Value = Option<EntityId>> {
        (0u32..50).prop_map(EntityId::from_raw)
    }

    fn choice<T>(values: &'static [T]) -> impl Strategy<Value = Choice<T>>
    where
        T: Clone + std::fmt::Debug + 'static,
    {
        prop_oneof![
            Just(Choice::All),
            prop::sample::select(values).prop_map(Choice::Only),
        ]
    }

    fn date() -> impl Strategy<Value = NaiveDate> {
        (738_000i32..739_000).prop_map(|days| NaiveDate::from_num_days_from_ce_opt(days).unwrap())
    }

    fn date_range() -> impl Strategy<Value = DateRange> {
        (prop::option::of(date()), prop::option::of(date())).prop_map(|(a, b)| match (a, b) {
            (Some(a), Some(b)) => DateRange::new(Some(a.min(b)), Some(a.max(b))).unwrap(),
            (from, to) => DateRange::new(from, to).unwrap(),
        })
    }

    fn filter_spec() -> impl Strategy<Value = FilterSpec> {
        prop_oneof![
            (
                search(),
                choice(RecordedBy::ALL),
                choice(PaymentMethod::ALL),
                entity_id(),
                date_range()
            )
                .prop_map(|(search, recorded_by, method, reseller_id, date_range)| {
                    FilterSpec::Payments(PaymentFilters {
                        search,
                        recorded_by,
                        method,
                        reseller_id,
                        date_range,
                    })
                }),
            (search(), choice(StockStatus::ALL), entity_id()).prop_map(
                |(search, in_stock, product_id)| {
                    FilterSpec::ProductBatches(ProductBatchFilters {
                        search,
                        in_stock,
                        product_id,
                    })
                }
            ),
            search().prop_map(|search| FilterSpec::Resellers(ResellerFilters { search })),
            (search(), entity_id(), entity_id()).prop_map(|(search, reseller_id, product_id)| {
                FilterSpec::StockDistributions(StockDistributionFilters {
                    search,
                    reseller_id,
                    product_id,
                })
            }),
            (
                search(),
                entity_id(),
                choice(OwnerType::ALL),
                entity_id(),
                choice(MovementType::ALL),
                choice(MovementSource::ALL)
            )
                .prop_map(
                    |(search, product_id, owner_type, owner_id, movement_type, source)| {
                        FilterSpec::StockMovements(StockMovementFilters {
                            search,
                            product_id,
                            owner_type,
                            owner_id,
                            movement_type,
                            source,
                        })
                    }
                ),
            (choice(GoodsRequestStatus::ALL), entity_id()).prop_map(|(status, reseller_id)| {
                FilterSpec::GoodsRequests(GoodsRequestFilters {
                    status,
                    reseller_id,
                })
            }),
            (entity_id(), entity_id()).prop_map(|(reseller_id, product_id)| {
                FilterSpec::ResellerSales(ResellerSaleFilters {
                    reseller_id,
                    product_id,
                })
            }),
            (search(), entity_id(), choice(StockStatus::ALL)).prop_map(
                |(search, reseller_id, in_stock)| {
                    FilterSpec::ResellerStock(ResellerStockFilters {
                        search,
                        reseller_id,
                        in_stock,
                    })
                }
            ),
        ]
    }

    fn param<V: FilterValue>(value: Option<&V>) -> Option<String> {
        value.map(|v| v.to_param())
    }

    /// Every key a resource accepts, with the value it should carry.
    fn expected(spec: &FilterSpec) -> Vec<(&'static str, Option<String>)> {
        match spec {
            FilterSpec::Payments(f) => {
                let (from, to) = f.date_range.bounds().unzip();
                vec![
                    ("search", param(f.search.as_ref())),
                    ("recorded_by", param(f.recorded_by.as_option())),
                    ("method", param(f.method.as_option())),
                    ("reseller_id", param(f.reseller_id.as_ref())),
                    ("date_from", param(from.as_ref())),
                    ("date_to", param(to.as_ref())),
                ]
            }
            FilterSpec::ProductBatches(f) => vec![
                ("search", param(f.search.as_ref())),
                ("in_stock", param(f.in_stock.as_option())),
                ("product_id", param(f.product_id.as_ref())),
            ],
            FilterSpec::Resellers(f) => vec![("search", param(f.search.as_ref()))],
            FilterSpec::StockDistributions(f) => vec![
                ("search", param(f.search.as_ref())),
                ("reseller_id", param(f.reseller_id.as_ref())),
                ("product_id", param(f.product_id.as_ref())),
            ],
            FilterSpec::StockMovements(f) => vec![
                ("search", param(f.search.as_ref())),
                ("product_id", param(f.product_id.as_ref())),
                ("owner_type", param(f.owner_type.as_option())),
                ("owner_id", param(f.owner_id.as_ref())),
                ("movement_type", param(f.movement_type.as_option())),
                ("source", param(f.source.as_option())),
            ],
            FilterSpec::GoodsRequests(f) => vec![
                ("status", param(f.status.as_option())),
                ("reseller_id", param(f.reseller_id.as_ref())),
            ],
            FilterSpec::ResellerSales(f) => vec![
                ("reseller_id", param(f.reseller_id.as_ref())),
                ("product_id", param(f.product_id.as_ref())),
            ],
            FilterSpec::ResellerStock(f) => vec![
                ("search", param(f.search.as_ref())),
                ("reseller_id", param(f.reseller_id.as_ref())),
                ("in_stock", param(f.in_stock.as_option())),
            ],
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(512))]

        #[test]
        fn present_fields_appear_once_and_absent_fields_never(spec in filter_spec()) {
            let params = spec.to_params();
            let expected = expected(&spec);

            for (key, value) in &expected {
                prop_assert_eq!(params.get(key), value.as_deref(), "key {}", key);
                prop_assert!(params.keys().filter(|k| k == key).count() <= 1);
            }
            let present = expected.iter().filter(|(_, v)| v.is_some()).count();
            prop_assert_eq!(params.len(), present);
            prop_assert!(params.keys().all(|k| expected.iter().any(|(e, _)| *e == k)));
        }

        #[test]
        fn all_sentinel_is_never_sent(spec in filter_spec()) {
            let params = spec.to_params();
            for key in params.keys() {
                prop_assert_ne!(params.get(key), Some(ALL_SENTINEL));
            }
        }

        #[test]
        fn encoded_pairs_decode_to_the_raw_values(spec in filter_spec()) {
            let params = spec.to_params();
            let encoded = params.encode();
            if params.is_empty() {
                prop_assert_eq!(encoded, "");
                return Ok(());
            }

            let pairs: Vec<&str> = encoded.split('&').collect();
            prop_assert_eq!(pairs.len(), params.len());

            for (pair, key) in pairs.iter().zip(params.keys()) {
                let (k, v) = pair.split_once('=').unwrap();
                prop_assert_eq!(k, key);
                prop_assert!(!v.contains(['&', '=', ' ', '+', '#', '?', '/']));
                let decoded = percent_decode_str(v).decode_utf8().unwrap();
                prop_assert_eq!(Some(&*decoded), params.get(key));
            }
        }

        #[test]
        fn query_path_keeps_pagination_first(spec in filter_spec(), page in 1u32..500) {
            let resource = spec.resource();
            let query = ListQuery::new(spec).with_page(page).unwrap();
            let path = query.request_path();

            let prefix = format!("{}?limit=10&page={}", resource.path(), page);
            prop_assert!(path.starts_with(&prefix), "{}", path);
        }
    }
}
