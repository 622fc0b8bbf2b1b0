//! Query builder: request to `{where, orderBy, take, skip}`.

use crate::node::Node;
use crate::pagination::Pagination;
use crate::query::FilteringQuery;
use crate::specification::{QuerySpecification, SearchMode};
use crate::transform::TransformConfig;

use super::filter::Context;
use super::types::BuiltQuery;

/// Builds nested query trees from filtering requests.
///
/// The builder never consults the validator and never fails; unknown fields
/// or out-of-range pagination are built as given.
///
/// # Example
///
/// ```
/// use mik_filter::{FilteringQuery, QueryBuilder, QuerySpecification, SearchMode};
///
/// let spec = QuerySpecification::new().default_search_mode(SearchMode::Sensitive);
/// let built = QueryBuilder::new()
///     .specification(&spec)
///     .build(&FilteringQuery::new().search("title", "Rust"));
///
/// assert_eq!(built.conditions().len(), 1);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct QueryBuilder<'a> {
    specification: Option<&'a QuerySpecification>,
    transform: Option<&'a TransformConfig>,
}

impl<'a> QueryBuilder<'a> {
    /// A builder with no specification and no transform configuration.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            specification: None,
            transform: None,
        }
    }

    /// Use a specification (only its default search mode affects building).
    pub const fn specification(mut self, specification: &'a QuerySpecification) -> Self {
        self.specification = Some(specification);
        self
    }

    /// Consult a transform configuration before folding.
    pub const fn transform(mut self, transform: &'a TransformConfig) -> Self {
        self.transform = Some(transform);
        self
    }

    /// Build the query tree.
    ///
    /// Stages run in a fixed order, each appending to the top-level `AND`:
    /// equality filters, search filters, ranged filters. Ordering and
    /// pagination are resolved last.
    pub fn build(&self, query: &FilteringQuery) -> BuiltQuery {
        let ctx = Context {
            default_search_mode: self
                .specification
                .map_or(SearchMode::default(), |s| s.default_search_mode),
            transform: self.transform,
        };

        let mut conditions = Vec::new();

        for (field, value) in &query.filters {
            if let Some(condition) = ctx.equality(field, value) {
                tracing::trace!(field = %field, "equality condition");
                conditions.push(condition);
            }
        }

        let mut searches: Vec<Node> = query
            .search_filters
            .iter()
            .filter_map(|(field, value)| ctx.search(field, value))
            .collect();
        let search_count = searches.len();
        match search_count {
            0 => {},
            1 => conditions.append(&mut searches),
            _ => conditions.push(Node::or(searches)),
        }

        for range in &query.ranged_filters {
            if let Some(condition) = ctx.range(range) {
                tracing::trace!(field = %range.key, "range condition");
                conditions.push(condition);
            }
        }

        let order_by = query
            .order_key
            .as_deref()
            .map(|key| ctx.order(key, query.order_rule));

        let Pagination { take, skip } = Pagination::resolve(query.page, query.rows);

        tracing::debug!(
            conditions = conditions.len(),
            searches = search_count,
            ordered = order_by.is_some(),
            take,
            skip,
            "built filtering query"
        );

        BuiltQuery {
            where_clause: Node::and(conditions),
            order_by,
            take,
            skip,
        }
    }
}

/// Build a query tree with an optional specification.
///
/// Shorthand for [`QueryBuilder`] without a transform configuration.
///
/// # Example
///
/// ```
/// use mik_filter::{FilteringQuery, build};
///
/// let built = build(&FilteringQuery::new().page(3), None);
/// assert_eq!((built.take, built.skip), (10, 20));
/// ```
pub fn build(query: &FilteringQuery, specification: Option<&QuerySpecification>) -> BuiltQuery {
    let builder = QueryBuilder::new();
    match specification {
        Some(spec) => builder.specification(spec).build(query),
        None => builder.build(query),
    }
}
