//! Output types for the query builder.

use crate::node::{AND, Node};
use miniserde::json::{Number, Object, Value as JsonValue};

/// Substring operator key in a search leaf.
pub const CONTAINS: &str = "contains";
/// Case mode key in a search leaf.
pub const MODE: &str = "mode";
/// Lower bound key in a range leaf.
pub const GTE: &str = "gte";
/// Upper bound key in a range leaf.
pub const LTE: &str = "lte";

/// The built query handed to the persistence layer.
///
/// Equivalent to `{where: {AND: [...]}, orderBy, take, skip}`.
#[derive(Debug, Clone, PartialEq)]
#[must_use = "BuiltQuery must be handed to the persistence layer"]
pub struct BuiltQuery {
    /// `{AND: [conditions...]}`, possibly with an empty list.
    pub where_clause: Node,
    /// Folded sort specification, if an order key was requested.
    pub order_by: Option<Node>,
    /// Number of records to return.
    pub take: u64,
    /// Number of records to skip.
    pub skip: u64,
}

impl BuiltQuery {
    /// The members of the top-level `AND`.
    #[must_use]
    pub fn conditions(&self) -> &[Node] {
        self.where_clause
            .get(AND)
            .and_then(Node::as_list)
            .unwrap_or_default()
    }

    /// Render as `{where, orderBy?, take, skip}`.
    ///
    /// `orderBy` is left out when no order key was requested.
    ///
    /// # Example
    ///
    /// ```
    /// use mik_filter::{FilteringQuery, build};
    ///
    /// let built = build(&FilteringQuery::new().filter("status", "active"), None);
    /// assert_eq!(
    ///     miniserde::json::to_string(&built.to_json()),
    ///     r#"{"skip":0,"take":10,"where":{"AND":[{"status":"active"}]}}"#
    /// );
    /// ```
    #[must_use]
    pub fn to_json(&self) -> JsonValue {
        let mut obj = Object::new();
        obj.insert("where".to_string(), self.where_clause.to_json());
        if let Some(order_by) = &self.order_by {
            obj.insert("orderBy".to_string(), order_by.to_json());
        }
        obj.insert("take".to_string(), JsonValue::Number(Number::U64(self.take)));
        obj.insert("skip".to_string(), JsonValue::Number(Number::U64(self.skip)));
        JsonValue::Object(obj)
    }
}
