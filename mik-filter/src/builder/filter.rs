//! Shared condition building functions.
//!
//! Each function resolves the request path through the transform
//! configuration, builds the leaf for its stage and folds the path around it.

use crate::node::Node;
use crate::path::{FieldPath, fold, fold_with};
use crate::query::{RangedFilter, SortOrder};
use crate::specification::SearchMode;
use crate::transform::{FieldHandler, LeafRequest, TransformConfig};
use crate::value::{FilterValue, Value};

use super::types::{CONTAINS, GTE, LTE, MODE};

/// Read-only state shared by all stages of one build.
#[derive(Debug, Clone, Copy)]
pub(super) struct Context<'a> {
    pub(super) default_search_mode: SearchMode,
    pub(super) transform: Option<&'a TransformConfig>,
}

impl<'a> Context<'a> {
    /// The path a request field is built under.
    fn resolve(&self, field: &'a str) -> FieldPath<'a> {
        FieldPath::new(self.transform.map_or(field, |t| t.resolve_path(field)))
    }

    fn handler(&self, path: FieldPath<'_>) -> Option<&'a FieldHandler> {
        self.transform.and_then(|t| t.field_handler(path.as_str()))
    }

    /// Custom leaf from a registered transformer, if it produces one.
    fn custom_leaf(&self, path: FieldPath<'_>, request: LeafRequest<'_>) -> Option<Node> {
        self.handler(path)
            .and_then(|h| h.transformer.as_ref())
            .and_then(|t| t.transform(path, request))
    }

    /// Fold a where-condition, honouring relation handlers.
    fn fold_condition(&self, path: FieldPath<'_>, leaf: Node) -> Node {
        match self.transform {
            Some(transform) => fold_with(path, leaf, |relation, inner| {
                match transform.relation_handler(relation) {
                    Some(handler) => handler.wrap(relation, inner),
                    None => Node::entry(relation, inner),
                }
            }),
            None => fold(path, leaf),
        }
    }

    fn equality_leaf(&self, path: FieldPath<'_>, value: &Value) -> Node {
        if let Some(leaf) = self.custom_leaf(path, LeafRequest::Equals(value)) {
            return leaf;
        }
        match self.handler(path).and_then(|h| h.operator.as_deref()) {
            Some(operator) => Node::entry(operator, Node::from(value.clone())),
            None => Node::from(value.clone()),
        }
    }

    /// Equality filter: a single folded condition for scalars, an `OR` group
    /// with one independently folded member per element for lists.
    pub(super) fn equality(&self, field: &'a str, value: &FilterValue) -> Option<Node> {
        let path = self.resolve(field);
        match value {
            FilterValue::Absent => None,
            FilterValue::Scalar(value) => {
                Some(self.fold_condition(path, self.equality_leaf(path, value)))
            },
            FilterValue::List(values) => Some(Node::or(
                values
                    .iter()
                    .map(|value| self.fold_condition(path, self.equality_leaf(path, value)))
                    .collect(),
            )),
        }
    }

    fn search_leaf(&self, path: FieldPath<'_>, value: &Value) -> Node {
        let mode = self
            .handler(path)
            .and_then(|h| h.search_mode)
            .unwrap_or(self.default_search_mode);
        if let Some(leaf) = self.custom_leaf(path, LeafRequest::Contains { value, mode }) {
            return leaf;
        }
        Node::map([
            (CONTAINS, Node::from(value.clone())),
            (MODE, Node::from(mode.as_str())),
        ])
    }

    /// Substring search on one field. A list of terms matches any of them.
    pub(super) fn search(&self, field: &'a str, value: &FilterValue) -> Option<Node> {
        let path = self.resolve(field);
        match value {
            FilterValue::Absent => None,
            FilterValue::Scalar(value) => {
                Some(self.fold_condition(path, self.search_leaf(path, value)))
            },
            FilterValue::List(values) => Some(Node::or(
                values
                    .iter()
                    .map(|value| self.fold_condition(path, self.search_leaf(path, value)))
                    .collect(),
            )),
        }
    }

    /// Inclusive range. `Null` bounds are left out; a range with neither
    /// bound produces nothing.
    pub(super) fn range(&self, range: &'a RangedFilter) -> Option<Node> {
        let path = self.resolve(&range.key);
        let request = LeafRequest::Range {
            start: &range.start,
            end: &range.end,
        };
        let leaf = match self.custom_leaf(path, request) {
            Some(leaf) => leaf,
            None => {
                let bounds: Vec<_> = [(GTE, &range.start), (LTE, &range.end)]
                    .into_iter()
                    .filter(|(_, bound)| !bound.is_null())
                    .map(|(op, bound)| (op, Node::from(bound.clone())))
                    .collect();
                if bounds.is_empty() {
                    return None;
                }
                Node::map(bounds)
            },
        };
        Some(self.fold_condition(path, leaf))
    }

    /// Sort specification: the direction folded onto the path. Relation
    /// handlers do not apply to ordering.
    pub(super) fn order(&self, key: &'a str, rule: SortOrder) -> Node {
        fold(self.resolve(key), Node::from(rule.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::{Quantifier, RelationHandler};

    const PLAIN: Context<'static> = Context {
        default_search_mode: SearchMode::Insensitive,
        transform: None,
    };

    #[test]
    fn test_equality_scalar_has_no_or() {
        let node = PLAIN.equality("status", &FilterValue::from("active")).unwrap();
        assert_eq!(node, Node::entry("status", Node::from("active")));
        assert!(!node.is_or_group());
    }

    #[test]
    fn test_equality_absent_is_skipped() {
        assert_eq!(PLAIN.equality("status", &FilterValue::Absent), None);
    }

    #[test]
    fn test_equality_list_folds_each_member() {
        let node = PLAIN
            .equality("author.region", &FilterValue::from(vec!["US", "EU"]))
            .unwrap();
        let members = node.get("OR").and_then(Node::as_list).unwrap();
        assert_eq!(members.len(), 2);
        assert_eq!(
            members[1].pointer(["author", "region"]),
            Some(&Node::from("EU"))
        );
    }

    #[test]
    fn test_search_leaf_shape() {
        let node = PLAIN.search("title", &FilterValue::from("rust")).unwrap();
        let leaf = node.get("title").unwrap();
        assert_eq!(leaf.get("contains"), Some(&Node::from("rust")));
        assert_eq!(leaf.get("mode"), Some(&Node::from("insensitive")));
    }

    #[test]
    fn test_range_open_bounds() {
        let range = RangedFilter::new("price", Value::Null, 10);
        let node = PLAIN.range(&range).unwrap();
        let leaf = node.get("price").unwrap();
        assert_eq!(leaf.get("gte"), None);
        assert_eq!(leaf.get("lte"), Some(&Node::from(Value::Int(10))));

        let empty = RangedFilter::new("price", Value::Null, Value::Null);
        assert_eq!(PLAIN.range(&empty), None);
    }

    #[test]
    fn test_order_ignores_relation_handlers() {
        let transform = TransformConfig::new()
            .relation("posts", RelationHandler::Quantified(Quantifier::Some));
        let ctx = Context {
            default_search_mode: SearchMode::Insensitive,
            transform: Some(&transform),
        };
        let node = ctx.order("posts.createdAt", SortOrder::Desc);
        assert_eq!(
            node.pointer(["posts", "createdAt"]),
            Some(&Node::from("desc"))
        );
    }

    #[test]
    fn test_operator_override() {
        let transform =
            TransformConfig::new().field("email", FieldHandler::new().operator("equals"));
        let ctx = Context {
            default_search_mode: SearchMode::Insensitive,
            transform: Some(&transform),
        };
        let node = ctx.equality("email", &FilterValue::from("a@b.c")).unwrap();
        assert_eq!(
            node.pointer(["email", "equals"]),
            Some(&Node::from("a@b.c"))
        );
    }
}
