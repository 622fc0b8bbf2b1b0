//! Field remapping and per-field / per-relation handlers.
//!
//! The builder consults a [`TransformConfig`] before running the default fold:
//!
//! 1. the request path is rewritten through [`TransformConfig::map_field`];
//! 2. a [`FieldHandler`] registered for the rewritten path may override the
//!    equality operator, the search mode, or replace the leaf entirely;
//! 3. a [`RelationHandler`] registered for a relation segment decides how
//!    that hop wraps the structure below it.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use mik_filter::{FieldHandler, Quantifier, RelationHandler, SearchMode, TransformConfig};
//!
//! let config = TransformConfig::new()
//!     .map_field("author", "author.name")
//!     .field("title", FieldHandler::new().search_mode(SearchMode::Sensitive))
//!     .relation("tags", RelationHandler::Quantified(Quantifier::Some));
//! ```

use crate::node::Node;
use crate::path::FieldPath;
use crate::specification::SearchMode;
use crate::value::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// What the builder is about to place at a field's terminal segment.
#[derive(Debug, Clone, Copy, PartialEq)]
#[non_exhaustive]
pub enum LeafRequest<'a> {
    /// An equality filter value (one OR member for list filters).
    Equals(&'a Value),
    /// A substring search term and its resolved mode.
    Contains { value: &'a Value, mode: SearchMode },
    /// Range bounds; `Null` means open.
    Range { start: &'a Value, end: &'a Value },
}

/// Replaces the default leaf condition for a field.
///
/// Returning `None` falls back to the default leaf.
pub trait LeafTransformer: Send + Sync {
    /// Build the leaf for `path`.
    fn transform(&self, path: FieldPath<'_>, request: LeafRequest<'_>) -> Option<Node>;
}

impl<F> LeafTransformer for F
where
    F: Fn(FieldPath<'_>, LeafRequest<'_>) -> Option<Node> + Send + Sync,
{
    fn transform(&self, path: FieldPath<'_>, request: LeafRequest<'_>) -> Option<Node> {
        self(path, request)
    }
}

/// Replaces how a relation hop wraps the structure below it.
pub trait RelationWrapper: Send + Sync {
    /// Wrap `inner` under `relation`.
    fn wrap(&self, relation: &str, inner: Node) -> Node;
}

impl<F> RelationWrapper for F
where
    F: Fn(&str, Node) -> Node + Send + Sync,
{
    fn wrap(&self, relation: &str, inner: Node) -> Node {
        self(relation, inner)
    }
}

/// Quantifiers for to-many and optional relations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quantifier {
    Some,
    Every,
    None,
    Is,
    IsNot,
}

impl Quantifier {
    /// The key the quantifier is emitted under.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Some => "some",
            Self::Every => "every",
            Self::None => "none",
            Self::Is => "is",
            Self::IsNot => "isNot",
        }
    }
}

/// How a relation hop is wrapped.
#[derive(Clone)]
#[non_exhaustive]
pub enum RelationHandler {
    /// `{relation: inner}`, the default.
    Plain,
    /// `{relation: {quantifier: inner}}`.
    Quantified(Quantifier),
    /// Fully custom wrapping.
    Custom(Arc<dyn RelationWrapper>),
}

impl RelationHandler {
    /// Wrap `inner` under `relation` according to this handler.
    #[must_use]
    pub fn wrap(&self, relation: &str, inner: Node) -> Node {
        match self {
            Self::Plain => Node::entry(relation, inner),
            Self::Quantified(q) => Node::entry(relation, Node::entry(q.as_str(), inner)),
            Self::Custom(wrapper) => wrapper.wrap(relation, inner),
        }
    }
}

impl fmt::Debug for RelationHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Plain => f.write_str("Plain"),
            Self::Quantified(q) => f.debug_tuple("Quantified").field(q).finish(),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// Per-field overrides.
#[derive(Clone, Default)]
#[non_exhaustive]
pub struct FieldHandler {
    /// Equality leaf becomes `{operator: value}` instead of the raw value.
    pub operator: Option<String>,
    /// Overrides the specification's default search mode.
    pub search_mode: Option<SearchMode>,
    /// Fully custom leaf construction.
    pub transformer: Option<Arc<dyn LeafTransformer>>,
}

impl FieldHandler {
    /// A handler that overrides nothing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap equality values as `{operator: value}`.
    #[must_use]
    pub fn operator(mut self, operator: impl Into<String>) -> Self {
        self.operator = Some(operator.into());
        self
    }

    /// Override the search mode for this field.
    #[must_use]
    pub const fn search_mode(mut self, mode: SearchMode) -> Self {
        self.search_mode = Some(mode);
        self
    }

    /// Install a custom leaf transformer.
    #[must_use]
    pub fn transformer(mut self, transformer: impl LeafTransformer + 'static) -> Self {
        self.transformer = Some(Arc::new(transformer));
        self
    }
}

impl fmt::Debug for FieldHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldHandler")
            .field("operator", &self.operator)
            .field("search_mode", &self.search_mode)
            .field("transformer", &self.transformer.as_ref().map(|_| ".."))
            .finish()
    }
}

/// Field remapping plus field and relation handlers.
#[derive(Debug, Clone, Default)]
pub struct TransformConfig {
    field_mappings: HashMap<String, String>,
    fields: HashMap<String, FieldHandler>,
    relations: HashMap<String, RelationHandler>,
}

impl TransformConfig {
    /// An empty configuration; the builder behaves as if none was given.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rewrite request path `from` to `to` before building.
    #[must_use]
    pub fn map_field(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.field_mappings.insert(from.into(), to.into());
        self
    }

    /// Register a handler for a (rewritten) field path.
    #[must_use]
    pub fn field(mut self, path: impl Into<String>, handler: FieldHandler) -> Self {
        self.fields.insert(path.into(), handler);
        self
    }

    /// Register a handler for a relation segment.
    #[must_use]
    pub fn relation(mut self, relation: impl Into<String>, handler: RelationHandler) -> Self {
        self.relations.insert(relation.into(), handler);
        self
    }

    /// The path a request field is rewritten to.
    #[must_use]
    pub fn resolve_path<'a>(&'a self, path: &'a str) -> &'a str {
        self.field_mappings.get(path).map_or(path, String::as_str)
    }

    /// The handler registered for `path`, if any.
    #[must_use]
    pub fn field_handler(&self, path: &str) -> Option<&FieldHandler> {
        self.fields.get(path)
    }

    /// The handler registered for `relation`, if any.
    #[must_use]
    pub fn relation_handler(&self, relation: &str) -> Option<&RelationHandler> {
        self.relations.get(relation)
    }
}
