//! Filtering, ordering and windowing types for repository queries
//!
//! These are the storage-neutral building blocks the request layer hands to a
//! data source: a set of [`FilterCondition`]s (the predicate set), a
//! [`SortSpec`] and a [`Pagination`] window.
//!
//! # Example
//!
//! ```rust
//! use roster_service::repository::{FilterCondition, OrderDirection, Pagination};
//!
//! let filters = vec![
//!     FilterCondition::eq("leftHanded", true),
//!     FilterCondition::lte("studentLimit", 20_i64),
//! ];
//! let order = [("lastName", OrderDirection::Ascending)];
//! let window = Pagination::new(0, 10);
//! # let _ = (filters, order, window);
//! ```

use std::fmt;

/// Direction for ordering results
///
/// # Example
///
/// ```rust
/// use roster_service::repository::OrderDirection;
///
/// assert_eq!(format!("{}", OrderDirection::Ascending), "asc");
/// assert_eq!(OrderDirection::Descending.as_sql(), "DESC");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderDirection {
    /// Sort in ascending order (A-Z, 0-9)
    #[default]
    Ascending,
    /// Sort in descending order (Z-A, 9-0)
    Descending,
}

impl OrderDirection {
    /// SQL keyword for this direction
    #[must_use]
    pub const fn as_sql(&self) -> &'static str {
        match self {
            Self::Ascending => "ASC",
            Self::Descending => "DESC",
        }
    }
}

impl fmt::Display for OrderDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ascending => write!(f, "asc"),
            Self::Descending => write!(f, "desc"),
        }
    }
}

/// Ordered list of `(field, direction)` keys; earlier keys take precedence
pub type SortSpec = &'static [(&'static str, OrderDirection)];

/// Limit/offset window applied to a row fetch
///
/// # Example
///
/// ```rust
/// use roster_service::repository::Pagination;
///
/// let third = Pagination::new(40, 20);
/// assert_eq!(third.offset, 40);
/// assert_eq!(third.limit, 20);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// Number of results to skip
    pub offset: u64,
    /// Maximum number of results to return
    pub limit: u64,
}

impl Pagination {
    /// Create new pagination parameters
    #[must_use]
    pub const fn new(offset: u64, limit: u64) -> Self {
        Self { offset, limit }
    }
}

/// Comparison operators for filter conditions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOperator {
    /// Equal to (=)
    Equal,
    /// Less than or equal to (<=)
    LessThanOrEqual,
    /// Inclusive range (BETWEEN)
    Between,
    /// Pattern matching (LIKE)
    Like,
}

impl fmt::Display for FilterOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Equal => write!(f, "="),
            Self::LessThanOrEqual => write!(f, "<="),
            Self::Between => write!(f, "BETWEEN"),
            Self::Like => write!(f, "LIKE"),
        }
    }
}

/// A value that can be used in filter conditions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterValue {
    /// String value
    String(String),
    /// 64-bit integer value
    Integer(i64),
    /// Boolean value
    Boolean(bool),
    /// Inclusive `(min, max)` bounds for BETWEEN
    IntegerRange(i64, i64),
}

impl From<&str> for FilterValue {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<i64> for FilterValue {
    fn from(n: i64) -> Self {
        Self::Integer(n)
    }
}

impl From<bool> for FilterValue {
    fn from(b: bool) -> Self {
        Self::Boolean(b)
    }
}

/// A single predicate fragment contributed to a query's combined filter set
///
/// All conditions in a set are combined with AND.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterCondition {
    /// The field name to filter on
    pub field: &'static str,
    /// The comparison operator
    pub operator: FilterOperator,
    /// The value to compare against
    pub value: FilterValue,
}

impl FilterCondition {
    /// Create an equality filter (field = value)
    pub fn eq(field: &'static str, value: impl Into<FilterValue>) -> Self {
        Self {
            field,
            operator: FilterOperator::Equal,
            value: value.into(),
        }
    }

    /// Create a less-than-or-equal filter (field <= value)
    pub fn lte(field: &'static str, value: impl Into<FilterValue>) -> Self {
        Self {
            field,
            operator: FilterOperator::LessThanOrEqual,
            value: value.into(),
        }
    }

    /// Create an inclusive range filter (field BETWEEN min AND max)
    pub fn between(field: &'static str, min: i64, max: i64) -> Self {
        Self {
            field,
            operator: FilterOperator::Between,
            value: FilterValue::IntegerRange(min, max),
        }
    }

    /// Create a LIKE pattern filter
    ///
    /// The pattern is used exactly as given; no wildcards are added.
    pub fn like(field: &'static str, pattern: impl Into<String>) -> Self {
        Self {
            field,
            operator: FilterOperator::Like,
            value: FilterValue::String(pattern.into()),
        }
    }
}
