// =============================================================================
// CRATE-LEVEL QUALITY LINTS (following Tokio/Serde standards)
// =============================================================================
#![forbid(unsafe_code)]
#![deny(unused_must_use)]
#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![warn(rust_2018_idioms)]
#![warn(unreachable_pub)]
#![warn(rustdoc::missing_crate_level_docs)]
#![warn(rustdoc::broken_intra_doc_links)]
// =============================================================================
// CLIPPY CONFIGURATION
// =============================================================================
#![allow(clippy::doc_markdown)] // Code items in docs - extensive doc changes needed
#![allow(clippy::missing_errors_doc)] // # Errors sections - doc-heavy
#![allow(clippy::module_name_repetitions)] // Type names matching module - acceptable
#![allow(clippy::return_self_not_must_use)] // Builder pattern methods return Self by design
#![allow(clippy::must_use_candidate)] // Builder methods - fluent API doesn't need must_use

//! # mik-filter - Declarative Filters to Nested Query Trees
//!
//! Turns a filtering request (equality filters, substring searches, ranges,
//! ordering, pagination) into the nested `{where, orderBy, take, skip}`
//! structure consumed by relational query layers, and validates requests
//! against an allow/forbid policy.
//!
//! ## Quick Start
//!
//! ```
//! # use mik_filter::prelude::*;
//! let query = FilteringQuery::new()
//!     .filter("author.profile.department.region", vec!["US", "EU"])
//!     .search("title", "rust")
//!     .order_by("createdAt", SortOrder::Desc)
//!     .page(2)
//!     .rows(25);
//!
//! let built = build(&query, None);
//! assert_eq!(built.conditions().len(), 2);
//! assert_eq!((built.take, built.skip), (25, 25));
//! ```
//!
//! ## Field Paths
//!
//! Dotted paths denote relation traversal and are folded right to left:
//!
//! | Path | Leaf | Result |
//! |------|------|--------|
//! | `status` | `"active"` | `{status: "active"}` |
//! | `author.name` | `{contains, mode}` | `{author: {name: {contains, mode}}}` |
//! | `a.b.c` | `{gte, lte}` | `{a: {b: {c: {gte, lte}}}}` |
//!
//! ## Validation
//!
//! ```
//! # use mik_filter::prelude::*;
//! let spec = QuerySpecification::new()
//!     .allow_fields(&["title"])
//!     .allow_relations(&["a"])
//!     .max_page_size(100);
//!
//! let report = validate(&FilteringQuery::new().filter("a.b.c", 1), Some(&spec));
//! assert_eq!(
//!     report.error_messages(),
//!     ["Relation 'b' in field 'a.b.c' is not allowed"]
//! );
//! assert_eq!(
//!     report.warning_messages(),
//!     ["Field 'a.b.c' is not in allowed fields list"]
//! );
//! ```
//!
//! Validation and building are independent: callers may build without
//! validating, and the builder never fails.

mod builder;
mod node;
mod pagination;
mod path;
mod query;
mod specification;
mod transform;
mod validate;
mod value;

pub use builder::{BuiltQuery, CONTAINS, GTE, LTE, MODE, QueryBuilder, build};
pub use node::{AND, Node, OR};
pub use pagination::{DEFAULT_PAGE_SIZE, PageInfo, Pagination};
pub use path::{FieldPath, SEPARATOR, fold, fold_with};
pub use query::{FieldSource, FilteringQuery, RangedFilter, SortOrder};
pub use specification::{QuerySpecification, SearchMode};
pub use transform::{
    FieldHandler, LeafRequest, LeafTransformer, Quantifier, RelationHandler, RelationWrapper,
    TransformConfig,
};
pub use validate::{
    Severity, ValidationError, ValidationReport, Violation, is_iso_utc_timestamp,
    parse_utc_timestamp, validate,
};
pub use value::{FilterValue, Value};

/// Prelude module for convenient imports.
///
/// ```
/// use mik_filter::prelude::*;
/// let built = build(&FilteringQuery::new(), None);
/// assert!(built.conditions().is_empty());
/// ```
pub mod prelude {
    pub use crate::{
        BuiltQuery, FieldHandler, FieldPath, FilterValue, FilteringQuery, LeafRequest, Node,
        PageInfo, Pagination, Quantifier, QueryBuilder, QuerySpecification, RangedFilter,
        RelationHandler, SearchMode, SortOrder, TransformConfig, ValidationError,
        ValidationReport, Value, Violation, build, fold, validate,
    };
}


// ============================================================================
// API Contract Tests (compile-time assertions)
// ============================================================================
