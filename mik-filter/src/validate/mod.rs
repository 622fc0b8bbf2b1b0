//! Policy validation for filtering requests.
//!
//! Checks a [`FilteringQuery`] against a [`QuerySpecification`]:
//! - Field allow-list (warnings), escalated to errors for forbidden fields
//!   used in equality filters
//! - Relation allow-list for every dotted path (first offending hop only)
//! - Range bounds that are both ISO-8601 UTC timestamps must be ordered
//! - Pagination bounds and the maximum page size
//!
//! Every rule runs; nothing short-circuits.
//!
//! # Example
//!
//! ```
//! use mik_filter::{FilteringQuery, QuerySpecification, validate};
//!
//! let spec = QuerySpecification::new()
//!     .allow_fields(&["status", "author.name"])
//!     .forbid_fields(&["password"])
//!     .allow_relations(&["author"]);
//!
//! let query = FilteringQuery::new()
//!     .filter("password", "hunter2")
//!     .search("author.name", "ada");
//!
//! let report = validate(&query, Some(&spec));
//! assert!(!report.is_valid());
//! assert_eq!(report.error_messages(), ["Field 'password' is forbidden"]);
//! ```

mod report;
mod timestamp;

pub use report::{Severity, ValidationError, ValidationReport, Violation};
pub use timestamp::{is_iso_utc_timestamp, parse_utc_timestamp};

use crate::path::FieldPath;
use crate::query::{FieldSource, FilteringQuery, RangedFilter};
use crate::specification::QuerySpecification;

/// Validate a request against an optional specification.
///
/// Without a specification the request is always valid and no diagnostics
/// are produced.
pub fn validate(
    query: &FilteringQuery,
    specification: Option<&QuerySpecification>,
) -> ValidationReport {
    let Some(spec) = specification else {
        return ValidationReport::default();
    };

    let mut report = ValidationReport::default();

    for (source, field) in query.field_paths() {
        check_field(spec, source, field, &mut report);
        check_relations(spec, FieldPath::new(field), &mut report);
    }

    for range in &query.ranged_filters {
        check_range_order(range, &mut report);
    }

    check_pagination(spec, query, &mut report);

    tracing::debug!(
        errors = report.errors.len(),
        warnings = report.warnings.len(),
        "validated filtering query"
    );

    report
}

/// Allow-list membership. Only equality filters escalate forbidden fields.
fn check_field(
    spec: &QuerySpecification,
    source: FieldSource,
    field: &str,
    report: &mut ValidationReport,
) {
    if spec.allowed_fields.is_none() || spec.is_field_allowed(field) {
        return;
    }
    if source == FieldSource::Filter && spec.is_field_forbidden(field) {
        report.push(Violation::ForbiddenField {
            field: field.to_string(),
        });
    } else {
        report.push(Violation::FieldNotAllowed {
            field: field.to_string(),
            source,
        });
    }
}

/// First disallowed relation hop, if any.
fn check_relations(spec: &QuerySpecification, path: FieldPath<'_>, report: &mut ValidationReport) {
    if spec.allowed_relations.is_none() {
        return;
    }
    if let Some(relation) = path.relations().find(|r| !spec.is_relation_allowed(r)) {
        report.push(Violation::RelationNotAllowed {
            relation: relation.to_string(),
            field: path.as_str().to_string(),
        });
    }
}

/// Start after end, when both bounds are ISO-8601 UTC timestamps.
fn check_range_order(range: &RangedFilter, report: &mut ValidationReport) {
    let bounds = range
        .start
        .as_str()
        .and_then(parse_utc_timestamp)
        .zip(range.end.as_str().and_then(parse_utc_timestamp));
    if let Some((start, end)) = bounds
        && start > end
    {
        report.push(Violation::RangeStartAfterEnd {
            field: range.key.clone(),
        });
    }
}

fn check_pagination(spec: &QuerySpecification, query: &FilteringQuery, report: &mut ValidationReport) {
    if let Some(page) = query.page
        && page < 1
    {
        report.push(Violation::PageOutOfRange { page });
    }

    if let Some(rows) = query.rows {
        if rows < 1 {
            report.push(Violation::RowsOutOfRange { rows });
        }
        if let Some(max) = spec.max_page_size
            && rows > max
        {
            report.push(Violation::RowsExceedMax { rows, max });
        }
    }
}
