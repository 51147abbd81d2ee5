//! Filtering, sorting, and pagination over an in-memory record set.
//!
//! The caller owns the authoritative collection and re-derives its view by
//! calling [`derive_view`] whenever the criteria or the collection change.
//! Nothing here performs I/O or mutates the input.

use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::InventoryRecord;

/// Page size used when the caller does not choose one.
pub const DEFAULT_PAGE_SIZE: usize = 25;

// ── Criteria ────────────────────────────────────────────────────────────────

/// Tri-state ownership filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OwnershipFilter {
    #[default]
    Any,
    OwnedOnly,
    NotOwnedOnly,
}

impl OwnershipFilter {
    pub fn matches(&self, record: &InventoryRecord) -> bool {
        match self {
            Self::Any => true,
            Self::OwnedOnly => record.owned,
            Self::NotOwnedOnly => !record.owned,
        }
    }
}

/// Attribute a view can be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    #[default]
    Title,
    PrimaryCode,
    ReleaseYear,
    ApproximateValue,
    PartCount,
    CreatedAt,
}

impl SortKey {
    pub const ALL: [SortKey; 6] = [
        SortKey::Title,
        SortKey::PrimaryCode,
        SortKey::ReleaseYear,
        SortKey::ApproximateValue,
        SortKey::PartCount,
        SortKey::CreatedAt,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::PrimaryCode => "primary_code",
            Self::ReleaseYear => "release_year",
            Self::ApproximateValue => "approximate_value",
            Self::PartCount => "part_count",
            Self::CreatedAt => "created_at",
        }
    }

    /// Older names accepted alongside [`as_str`](Self::as_str).
    fn aliases(&self) -> &'static [&'static str] {
        match self {
            Self::Title => &["name"],
            Self::PrimaryCode => &["set_number", "code", "number"],
            Self::ReleaseYear => &["year"],
            Self::ApproximateValue => &["value", "price"],
            Self::PartCount => &["num_parts", "parts", "pieces"],
            Self::CreatedAt => &["created", "added"],
        }
    }

    /// Compare two records by this key, ascending. Text compares
    /// case-insensitively; absent values sort first.
    pub fn compare(&self, a: &InventoryRecord, b: &InventoryRecord) -> Ordering {
        match self {
            Self::Title => cmp_text(&a.title, &b.title),
            Self::PrimaryCode => cmp_text(&a.primary_code, &b.primary_code),
            Self::ReleaseYear => a.release_year.cmp(&b.release_year),
            Self::ApproximateValue => cmp_decimal(a.approximate_value, b.approximate_value),
            Self::PartCount => a.part_count.cmp(&b.part_count),
            Self::CreatedAt => a.created_at.cmp(&b.created_at),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn apply(&self, ordering: Ordering) -> Ordering {
        match self {
            Self::Ascending => ordering,
            Self::Descending => ordering.reverse(),
        }
    }
}

/// Everything the caller can vary about the displayed view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryCriteria {
    pub search: String,
    pub category: Option<String>,
    pub ownership: OwnershipFilter,
    pub sort_key: SortKey,
    pub direction: SortDirection,
    /// 1-based page number.
    pub page: usize,
    /// Zero disables pagination.
    pub page_size: usize,
}

impl Default for QueryCriteria {
    fn default() -> Self {
        Self {
            search: String::new(),
            category: None,
            ownership: OwnershipFilter::Any,
            sort_key: SortKey::Title,
            direction: SortDirection::Ascending,
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

// ── Parsing ─────────────────────────────────────────────────────────────────

/// Error returned when a criteria keyword is not recognized.
#[derive(Debug, Clone)]
pub struct CriteriaParseError {
    pub what: &'static str,
    pub value: String,
}

impl fmt::Display for CriteriaParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown {}: '{}'", self.what, self.value)
    }
}

impl std::error::Error for CriteriaParseError {}

/// Lowercase and fold `-`/space separators to `_`.
fn keyword(s: &str) -> String {
    s.trim().to_lowercase().replace(['-', ' '], "_")
}

impl std::str::FromStr for SortKey {
    type Err = CriteriaParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = keyword(s);
        let compact = key.replace('_', "");
        for sort_key in SortKey::ALL {
            let name = sort_key.as_str();
            if name == key
                || name.replace('_', "") == compact
                || sort_key.aliases().contains(&key.as_str())
            {
                return Ok(sort_key);
            }
        }
        Err(CriteriaParseError {
            what: "sort key",
            value: s.to_string(),
        })
    }
}

impl std::str::FromStr for SortDirection {
    type Err = CriteriaParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match keyword(s).as_str() {
            "asc" | "ascending" => Ok(Self::Ascending),
            "desc" | "descending" => Ok(Self::Descending),
            _ => Err(CriteriaParseError {
                what: "sort direction",
                value: s.to_string(),
            }),
        }
    }
}

impl std::str::FromStr for OwnershipFilter {
    type Err = CriteriaParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match keyword(s).as_str() {
            "" | "any" | "all" => Ok(Self::Any),
            "owned" | "owned_only" => Ok(Self::OwnedOnly),
            "not_owned" | "not_owned_only" | "wanted" => Ok(Self::NotOwnedOnly),
            _ => Err(CriteriaParseError {
                what: "ownership filter",
                value: s.to_string(),
            }),
        }
    }
}

// ── View Derivation ─────────────────────────────────────────────────────────

/// One page of the filtered, sorted collection.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogView<'a> {
    pub items: Vec<&'a InventoryRecord>,
    /// Matches after filtering, before pagination.
    pub total_matched: usize,
    /// Always at least 1.
    pub total_pages: usize,
    /// Owned-subset total value over all matches (not just this page).
    pub owned_value: f64,
}

/// Derive the displayed page from the full record set.
///
/// Pages are not clamped: requesting page 0 or a page past `total_pages`
/// yields no items while the totals still describe the full match set.
pub fn derive_view<'a>(records: &'a [InventoryRecord], criteria: &QueryCriteria) -> CatalogView<'a> {
    let mut matched = filter_records(records, criteria);
    sort_records(&mut matched, criteria.sort_key, criteria.direction);

    let total_matched = matched.len();
    let total_pages = page_count(total_matched, criteria.page_size);
    let owned_value = owned_total_value(matched.iter().copied());

    let items = if criteria.page_size == 0 {
        if criteria.page == 1 { matched } else { Vec::new() }
    } else if criteria.page == 0 {
        Vec::new()
    } else {
        let start = (criteria.page - 1).saturating_mul(criteria.page_size);
        matched
            .into_iter()
            .skip(start)
            .take(criteria.page_size)
            .collect()
    };

    CatalogView {
        items,
        total_matched,
        total_pages,
        owned_value,
    }
}

/// Apply text search, category, and ownership filters, preserving input order.
pub fn filter_records<'a>(
    records: &'a [InventoryRecord],
    criteria: &QueryCriteria,
) -> Vec<&'a InventoryRecord> {
    let needle = criteria.search.to_lowercase();
    let category = criteria.category.as_deref().filter(|c| !c.is_empty());

    records
        .iter()
        .filter(|r| needle.is_empty() || matches_search(r, &needle))
        .filter(|r| category.is_none_or(|c| r.category.as_deref() == Some(c)))
        .filter(|r| criteria.ownership.matches(r))
        .collect()
}

/// Stable sort; ties keep their input order in both directions.
pub fn sort_records(records: &mut [&InventoryRecord], key: SortKey, direction: SortDirection) {
    records.sort_by(|a, b| direction.apply(key.compare(a, b)));
}

/// `ceil(total / page_size)`, never less than 1.
pub fn page_count(total: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 1;
    }
    total.div_ceil(page_size).max(1)
}

/// Sum of `approximate_value * quantity_owned` over owned records.
pub fn owned_total_value<'a>(records: impl IntoIterator<Item = &'a InventoryRecord>) -> f64 {
    records.into_iter().map(InventoryRecord::owned_value).sum()
}

/// Sorted, de-duplicated, non-empty categories present in `records`.
pub fn distinct_categories(records: &[InventoryRecord]) -> BTreeSet<String> {
    records
        .iter()
        .filter_map(|r| r.category.as_deref())
        .filter(|c| !c.trim().is_empty())
        .map(str::to_string)
        .collect()
}

/// `needle` must already be lowercased.
fn matches_search(record: &InventoryRecord, needle: &str) -> bool {
    let contains = |s: &str| s.to_lowercase().contains(needle);
    contains(&record.primary_code)
        || contains(&record.title)
        || record.description.as_deref().is_some_and(contains)
        || record.category.as_deref().is_some_and(contains)
}

fn cmp_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

fn cmp_decimal(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => x.total_cmp(&y),
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
    }
}
