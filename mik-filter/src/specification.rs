//! Caller-supplied query policy.

use crate::query::FilteringQuery;
use crate::validate::{ValidationReport, validate};

/// Case handling for substring search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchMode {
    #[default]
    Insensitive,
    Sensitive,
}

impl SearchMode {
    /// The mode as emitted in a `{contains, mode}` leaf.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Insensitive => "insensitive",
            Self::Sensitive => "sensitive",
        }
    }
}

/// Policy governing which fields, relations and page sizes a request may use.
///
/// Unset lists mean "no restriction". Passing no specification at all to
/// [`validate`] skips every check, which is different from passing an
/// empty one.
///
/// # Example
///
/// ```
/// use mik_filter::{QuerySpecification, SearchMode};
///
/// let spec = QuerySpecification::new()
///     .allow_fields(&["title", "status", "author.name"])
///     .forbid_fields(&["password"])
///     .allow_relations(&["author"])
///     .max_page_size(100)
///     .default_search_mode(SearchMode::Sensitive);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[non_exhaustive]
pub struct QuerySpecification {
    /// Field paths that may be filtered, searched, ranged or ordered on.
    pub allowed_fields: Option<Vec<String>>,
    /// Field paths whose use in equality filters is an error.
    pub forbidden_fields: Vec<String>,
    /// Relation segments that may appear before the terminal attribute.
    pub allowed_relations: Option<Vec<String>>,
    /// Upper bound for `rows`.
    pub max_page_size: Option<u32>,
    /// Search mode used unless a field handler overrides it.
    pub default_search_mode: SearchMode,
}

impl QuerySpecification {
    /// Create a specification that restricts nothing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict fields to an allow-list.
    #[must_use]
    pub fn allow_fields(mut self, fields: &[&str]) -> Self {
        self.allowed_fields = Some(to_owned(fields));
        self
    }

    /// Mark fields as forbidden in equality filters.
    #[must_use]
    pub fn forbid_fields(mut self, fields: &[&str]) -> Self {
        self.forbidden_fields = to_owned(fields);
        self
    }

    /// Restrict relation hops to an allow-list.
    #[must_use]
    pub fn allow_relations(mut self, relations: &[&str]) -> Self {
        self.allowed_relations = Some(to_owned(relations));
        self
    }

    /// Cap the page size.
    #[must_use]
    pub const fn max_page_size(mut self, max: u32) -> Self {
        self.max_page_size = Some(max);
        self
    }

    /// Set the default search mode.
    #[must_use]
    pub const fn default_search_mode(mut self, mode: SearchMode) -> Self {
        self.default_search_mode = mode;
        self
    }

    /// Whether `path` passes the field allow-list.
    #[must_use]
    pub fn is_field_allowed(&self, path: &str) -> bool {
        self.allowed_fields
            .as_ref()
            .is_none_or(|allowed| allowed.iter().any(|f| f == path))
    }

    /// Whether `path` is listed as forbidden.
    #[must_use]
    pub fn is_field_forbidden(&self, path: &str) -> bool {
        self.forbidden_fields.iter().any(|f| f == path)
    }

    /// Whether `relation` passes the relation allow-list.
    #[must_use]
    pub fn is_relation_allowed(&self, relation: &str) -> bool {
        self.allowed_relations
            .as_ref()
            .is_none_or(|allowed| allowed.iter().any(|r| r == relation))
    }

    /// Validate a request against this specification.
    pub fn validate(&self, query: &FilteringQuery) -> ValidationReport {
        validate(query, Some(self))
    }
}

fn to_owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}
