//! Scalar values and the tagged filter value used by request maps.

use miniserde::json::{Number, Value as JsonValue};

/// A scalar value carried by a filter, search term or range bound.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
}

impl Value {
    /// Returns the string contents, if this is a string value.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Returns `true` for [`Value::Null`].
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Convert from a scalar miniserde JSON value.
    ///
    /// Arrays and objects are not scalars and yield `None`.
    ///
    /// # Example
    ///
    /// ```
    /// use mik_filter::Value;
    /// use miniserde::json::{Number, Value as JsonValue};
    ///
    /// let json = JsonValue::Number(Number::I64(42));
    /// assert_eq!(Value::from_json(&json), Some(Value::Int(42)));
    /// ```
    #[must_use]
    pub fn from_json(json: &JsonValue) -> Option<Self> {
        match json {
            JsonValue::Null => Some(Self::Null),
            JsonValue::Bool(b) => Some(Self::Bool(*b)),
            JsonValue::Number(n) => match n {
                Number::I64(i) => Some(Self::Int(*i)),
                Number::U64(u) => i64::try_from(*u).ok().map(Self::Int),
                Number::F64(f) => Some(Self::Float(*f)),
            },
            JsonValue::String(s) => Some(Self::String(s.clone())),
            JsonValue::Array(_) | JsonValue::Object(_) => None,
        }
    }

    /// Convert into a miniserde JSON value.
    #[must_use]
    pub fn to_json(&self) -> JsonValue {
        match self {
            Self::Null => JsonValue::Null,
            Self::Bool(b) => JsonValue::Bool(*b),
            Self::Int(i) => JsonValue::Number(Number::I64(*i)),
            Self::Float(f) => JsonValue::Number(Number::F64(*f)),
            Self::String(s) => JsonValue::String(s.clone()),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Self::Int(i64::from(i))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

/// The value side of a `filters` or `searchFilters` entry.
///
/// Requests arrive untyped; this makes the three shapes explicit.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum FilterValue {
    /// No constraint. Skipped by the builder.
    #[default]
    Absent,
    /// A single value.
    Scalar(Value),
    /// Any of the listed values (logical OR).
    List(Vec<Value>),
}

impl FilterValue {
    /// Returns `true` if this entry imposes no constraint.
    #[must_use]
    pub const fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    /// Convert from a parsed miniserde JSON value.
    ///
    /// `null` becomes [`FilterValue::Absent`], arrays of scalars become
    /// [`FilterValue::List`]. Objects and nested arrays are rejected.
    ///
    /// # Example
    ///
    /// ```
    /// use mik_filter::{FilterValue, Value};
    /// use miniserde::json::{self, Value as JsonValue};
    ///
    /// let json: JsonValue = json::from_str(r#"["US", "EU"]"#).unwrap();
    /// assert_eq!(
    ///     FilterValue::from_json(&json),
    ///     Some(FilterValue::List(vec![Value::from("US"), Value::from("EU")]))
    /// );
    /// ```
    #[must_use]
    pub fn from_json(json: &JsonValue) -> Option<Self> {
        match json {
            JsonValue::Null => Some(Self::Absent),
            JsonValue::Array(arr) => {
                let values: Option<Vec<Value>> = arr.iter().map(Value::from_json).collect();
                values.map(Self::List)
            },
            JsonValue::Object(_) => None,
            scalar => Value::from_json(scalar).map(Self::Scalar),
        }
    }
}

impl From<Value> for FilterValue {
    fn from(value: Value) -> Self {
        if value.is_null() {
            Self::Absent
        } else {
            Self::Scalar(value)
        }
    }
}

impl<T: Into<Value>> From<Vec<T>> for FilterValue {
    fn from(values: Vec<T>) -> Self {
        Self::List(values.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for FilterValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Absent, |v| Self::from(Into::<Value>::into(v)))
    }
}

impl From<&str> for FilterValue {
    fn from(s: &str) -> Self {
        Self::Scalar(Value::from(s))
    }
}

impl From<String> for FilterValue {
    fn from(s: String) -> Self {
        Self::Scalar(Value::String(s))
    }
}

impl From<i64> for FilterValue {
    fn from(i: i64) -> Self {
        Self::Scalar(Value::Int(i))
    }
}

impl From<i32> for FilterValue {
    fn from(i: i32) -> Self {
        Self::Scalar(Value::from(i))
    }
}

impl From<bool> for FilterValue {
    fn from(b: bool) -> Self {
        Self::Scalar(Value::Bool(b))
    }
}

impl From<f64> for FilterValue {
    fn from(f: f64) -> Self {
        Self::Scalar(Value::Float(f))
    }
}
