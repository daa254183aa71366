//! Pagination and filtering types for repository queries
//!
//! Filters are a flat list of [`FilterCondition`]s combined with AND.
//! Backends translate them: the PostgreSQL store renders a WHERE clause and
//! the in-memory store evaluates them against each record.
//!
//! # Example
//!
//! ```rust
//! use lens_catalog::repository::{FilterCondition, OrderDirection, Pagination};
//!
//! let pagination = Pagination::page(2, 5);
//! assert_eq!(pagination.offset, 5);
//!
//! let filters = vec![
//!     FilterCondition::eq("type", "Zoom"),
//!     FilterCondition::icontains("model", "nikon"),
//! ];
//! let order_by = Some(("id", OrderDirection::Descending));
//! # let _ = (filters, order_by);
//! ```

use std::fmt;

use uuid::Uuid;

/// Direction for ordering results
///
/// Listing is newest first, so descending is the only direction in use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderDirection {
    /// Sort in descending order
    Descending,
}

impl OrderDirection {
    /// SQL keyword for this direction
    #[must_use]
    pub const fn as_sql(&self) -> &'static str {
        match self {
            Self::Descending => "DESC",
        }
    }
}

impl fmt::Display for OrderDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Descending => write!(f, "desc"),
        }
    }
}

/// Offset/limit window over a result set
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

    /// Window for a 1-indexed page number
    ///
    /// Page 0 is treated as page 1. Offsets saturate instead of overflowing.
    #[must_use]
    pub const fn page(page_number: u64, page_size: u64) -> Self {
        let offset = page_number.saturating_sub(1).saturating_mul(page_size);
        Self {
            offset,
            limit: page_size,
        }
    }
}

/// Comparison operators for filter conditions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOperator {
    /// Equal to (=)
    Equal,
    /// Case-insensitive substring match (ILIKE '%value%')
    IContains,
}

impl fmt::Display for FilterOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Equal => write!(f, "="),
            Self::IContains => write!(f, "ILIKE"),
        }
    }
}

/// A value that can be used in filter conditions
#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
    /// String value
    String(String),
    /// 64-bit integer value
    Integer(i64),
    /// Boolean value
    Boolean(bool),
    /// UUID value
    Uuid(Uuid),
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

impl From<i32> for FilterValue {
    fn from(n: i32) -> Self {
        Self::Integer(i64::from(n))
    }
}

impl From<bool> for FilterValue {
    fn from(b: bool) -> Self {
        Self::Boolean(b)
    }
}

impl From<Uuid> for FilterValue {
    fn from(id: Uuid) -> Self {
        Self::Uuid(id)
    }
}

/// A single filter condition
#[derive(Debug, Clone, PartialEq)]
pub struct FilterCondition {
    /// The field name to filter on
    pub field: String,
    /// The comparison operator
    pub operator: FilterOperator,
    /// The value to compare against
    pub value: FilterValue,
}

impl FilterCondition {
    /// Create a new filter condition
    pub fn new(field: impl Into<String>, operator: FilterOperator, value: FilterValue) -> Self {
        Self {
            field: field.into(),
            operator,
            value,
        }
    }

    /// Create an equality filter (field = value)
    pub fn eq(field: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        Self::new(field, FilterOperator::Equal, value.into())
    }

    /// Create a case-insensitive "contains" filter
    ///
    /// `needle` is matched literally; backends escape any wildcard
    /// characters it contains.
    pub fn icontains(field: impl Into<String>, needle: impl Into<String>) -> Self {
        Self::new(
            field,
            FilterOperator::IContains,
            FilterValue::String(needle.into()),
        )
    }
}
