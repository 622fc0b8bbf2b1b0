//! Validation diagnostics and the report returned by `validate`.

use crate::query::FieldSource;
use std::fmt;

/// Whether a diagnostic affects validity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Makes the request invalid.
    Error,
    /// Reported only.
    Warning,
}

/// A single policy violation.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Violation {
    /// Equality filter on a forbidden field.
    ForbiddenField {
        /// The offending field path.
        field: String,
    },
    /// Field outside the allow-list.
    FieldNotAllowed {
        /// The offending field path.
        field: String,
        /// Where in the request the field was used.
        source: FieldSource,
    },
    /// Relation hop outside the relation allow-list.
    RelationNotAllowed {
        /// The first disallowed segment.
        relation: String,
        /// The field path it appeared in.
        field: String,
    },
    /// Range whose start timestamp is after its end timestamp.
    RangeStartAfterEnd {
        /// The range key.
        field: String,
    },
    /// `page` below 1.
    PageOutOfRange {
        /// The requested page.
        page: u32,
    },
    /// `rows` below 1.
    RowsOutOfRange {
        /// The requested page size.
        rows: u32,
    },
    /// `rows` above the specification's maximum.
    RowsExceedMax {
        /// The requested page size.
        rows: u32,
        /// The configured maximum.
        max: u32,
    },
}

impl Violation {
    /// Severity of this violation.
    #[must_use]
    pub const fn severity(&self) -> Severity {
        match self {
            Self::FieldNotAllowed { .. } => Severity::Warning,
            _ => Severity::Error,
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ForbiddenField { field } => write!(f, "Field '{field}' is forbidden"),
            Self::FieldNotAllowed { field, source } => {
                let label = match source {
                    FieldSource::Filter => "Field",
                    FieldSource::Search => "Search field",
                    FieldSource::Range => "Range field",
                    FieldSource::Order => "Order field",
                };
                write!(f, "{label} '{field}' is not in allowed fields list")
            },
            Self::RelationNotAllowed { relation, field } => {
                write!(f, "Relation '{relation}' in field '{field}' is not allowed")
            },
            Self::RangeStartAfterEnd { field } => {
                write!(f, "Range filter for '{field}' has start date after end date")
            },
            Self::PageOutOfRange { .. } => write!(f, "Page must be greater than or equal to 1"),
            Self::RowsOutOfRange { .. } => write!(f, "Rows must be greater than or equal to 1"),
            Self::RowsExceedMax { max, .. } => {
                write!(f, "Rows cannot exceed maximum page size of {max}")
            },
        }
    }
}

/// Outcome of validating a request.
///
/// Warnings never affect [`is_valid`](Self::is_valid).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    /// Hard violations.
    pub errors: Vec<Violation>,
    /// Soft violations.
    pub warnings: Vec<Violation>,
}

impl ValidationReport {
    /// `true` iff there are no errors.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Record a violation under its severity.
    pub fn push(&mut self, violation: Violation) {
        match violation.severity() {
            Severity::Error => self.errors.push(violation),
            Severity::Warning => self.warnings.push(violation),
        }
    }

    /// Error messages, in the order they were found.
    #[must_use]
    pub fn error_messages(&self) -> Vec<String> {
        self.errors.iter().map(ToString::to_string).collect()
    }

    /// Warning messages, in the order they were found.
    #[must_use]
    pub fn warning_messages(&self) -> Vec<String> {
        self.warnings.iter().map(ToString::to_string).collect()
    }

    /// Turn a report with errors into an `Err`, keeping warnings on success.
    ///
    /// # Example
    ///
    /// ```
    /// use mik_filter::{FilteringQuery, QuerySpecification};
    ///
    /// let spec = QuerySpecification::new().max_page_size(50);
    /// let result = spec.validate(&FilteringQuery::new().rows(500)).into_result();
    ///
    /// let err = result.unwrap_err();
    /// assert_eq!(err.to_string(), "Rows cannot exceed maximum page size of 50");
    /// ```
    pub fn into_result(self) -> Result<Vec<Violation>, ValidationError> {
        if self.errors.is_empty() {
            Ok(self.warnings)
        } else {
            Err(ValidationError {
                errors: self.errors,
                warnings: self.warnings,
            })
        }
    }
}

/// A request that failed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct ValidationError {
    /// The violations that made the request invalid (never empty).
    pub errors: Vec<Violation>,
    /// Warnings found alongside.
    pub warnings: Vec<Violation>,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.errors.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{error}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}
