//! The declarative filtering request.

use crate::value::{FilterValue, Value};
use std::fmt;

/// Sort direction for `orderKey`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    /// The direction as emitted in the order specification.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }

    /// Parse `asc` / `desc` (case-insensitive).
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        if s.eq_ignore_ascii_case("asc") {
            Some(Self::Asc)
        } else if s.eq_ignore_ascii_case("desc") {
            Some(Self::Desc)
        } else {
            None
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A `{key, start, end}` range entry.
///
/// A [`Value::Null`] bound leaves that side of the range open.
#[derive(Debug, Clone, PartialEq)]
pub struct RangedFilter {
    pub key: String,
    pub start: Value,
    pub end: Value,
}

impl RangedFilter {
    /// Create a new range entry.
    pub fn new(key: impl Into<String>, start: impl Into<Value>, end: impl Into<Value>) -> Self {
        Self {
            key: key.into(),
            start: start.into(),
            end: end.into(),
        }
    }
}

/// A filtering request: equality filters, substring searches, ranges,
/// ordering and pagination.
///
/// Filter maps keep insertion order; inserting an existing key replaces its
/// value in place.
///
/// # Example
///
/// ```
/// use mik_filter::{FilteringQuery, SortOrder};
///
/// let query = FilteringQuery::new()
///     .filter("status", "active")
///     .filter("author.profile.region", vec!["US", "EU"])
///     .search("title", "rust")
///     .range("createdAt", "2024-01-01T00:00:00Z", "2024-12-31T23:59:59Z")
///     .order_by("createdAt", SortOrder::Desc)
///     .page(2)
///     .rows(25);
///
/// assert_eq!(query.filters.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FilteringQuery {
    /// Equality filters: field path to value.
    pub filters: Vec<(String, FilterValue)>,
    /// Substring searches: field path to search term.
    pub search_filters: Vec<(String, FilterValue)>,
    /// Inclusive range filters, always combined with AND.
    pub ranged_filters: Vec<RangedFilter>,
    /// Field path to sort by.
    pub order_key: Option<String>,
    /// Sort direction, `asc` when unset.
    pub order_rule: SortOrder,
    /// 1-based page number.
    pub page: Option<u32>,
    /// Page size.
    pub rows: Option<u32>,
}

impl FilteringQuery {
    /// Create an empty request.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace an equality filter.
    #[must_use]
    pub fn filter(mut self, field: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        upsert(&mut self.filters, field.into(), value.into());
        self
    }

    /// Add or replace a substring search.
    #[must_use]
    pub fn search(mut self, field: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        upsert(&mut self.search_filters, field.into(), value.into());
        self
    }

    /// Append a range filter.
    #[must_use]
    pub fn range(
        mut self,
        key: impl Into<String>,
        start: impl Into<Value>,
        end: impl Into<Value>,
    ) -> Self {
        self.ranged_filters.push(RangedFilter::new(key, start, end));
        self
    }

    /// Set the sort field and direction.
    #[must_use]
    pub fn order_by(mut self, key: impl Into<String>, rule: SortOrder) -> Self {
        self.order_key = Some(key.into());
        self.order_rule = rule;
        self
    }

    /// Set the 1-based page number.
    #[must_use]
    pub const fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    /// Set the page size.
    #[must_use]
    pub const fn rows(mut self, rows: u32) -> Self {
        self.rows = Some(rows);
        self
    }

    /// Every field path the request references, tagged by where it appears.
    ///
    /// Order: filters, search filters, range keys, order key.
    pub fn field_paths(&self) -> impl Iterator<Item = (FieldSource, &str)> {
        let filters = self
            .filters
            .iter()
            .map(|(field, _)| (FieldSource::Filter, field.as_str()));
        let search = self
            .search_filters
            .iter()
            .map(|(field, _)| (FieldSource::Search, field.as_str()));
        let ranges = self
            .ranged_filters
            .iter()
            .map(|range| (FieldSource::Range, range.key.as_str()));
        let order = self
            .order_key
            .iter()
            .map(|key| (FieldSource::Order, key.as_str()));
        filters.chain(search).chain(ranges).chain(order)
    }
}

/// Which part of a request a field path came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldSource {
    Filter,
    Search,
    Range,
    Order,
}

fn upsert(entries: &mut Vec<(String, FilterValue)>, field: String, value: FilterValue) {
    match entries.iter_mut().find(|(existing, _)| *existing == field) {
        Some(entry) => entry.1 = value,
        None => entries.push((field, value)),
    }
}
