//! Query string for `GET /products`
//!
//! Every parameter arrives as text and is parsed leniently. A `page` or
//! `limit` keeps its leading integer (`"2.5"` is 2, `"3abc"` is 3); one
//! without leading digits is treated as missing rather than rejected.
//!
//! # Example
//!
//! ```rust
//! use lens_catalog::handlers::ListQuery;
//!
//! let query = ListQuery::default()
//!     .with_page("2")
//!     .with_limit("abc")
//!     .with_search("nikon");
//!
//! let products = query.into_product_query();
//! assert_eq!(products.page, Some(2));
//! assert_eq!(products.limit, None);
//! ```

use serde::{Deserialize, Serialize};

use crate::products::{ProductFilter, ProductQuery};

/// Raw list parameters: `page`, `limit`, `search`, `type`
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(utoipa::IntoParams))]
#[cfg_attr(feature = "openapi", into_params(parameter_in = Query))]
pub struct ListQuery {
    /// 1-based page number, default 1
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<String>,

    /// Page size, default 5, at most 100
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<String>,

    /// Case-insensitive substring of the model name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,

    /// Exact lens category
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

impl ListQuery {
    #[must_use]
    pub fn with_page(mut self, page: impl Into<String>) -> Self {
        self.page = Some(page.into());
        self
    }

    #[must_use]
    pub fn with_limit(mut self, limit: impl Into<String>) -> Self {
        self.limit = Some(limit.into());
        self
    }

    #[must_use]
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    #[must_use]
    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    /// Convert into the service-level query
    ///
    /// Clamping of page and limit happens in the service, not here.
    #[must_use]
    pub fn into_product_query(self) -> ProductQuery {
        let mut filter = ProductFilter::new();
        filter.search = self.search;
        filter.kind = self.kind;

        ProductQuery {
            filter,
            page: parse_lenient(self.page.as_deref()),
            limit: parse_lenient(self.limit.as_deref()),
        }
    }
}

/// Leading optionally-signed integer of `raw`, ignoring whatever follows
///
/// Magnitudes beyond `i64` saturate; clamping happens later anyway.
fn parse_lenient(raw: Option<&str>) -> Option<i64> {
    let value = raw?.trim_start();
    let (negative, rest) = match value.as_bytes().first() {
        Some(b'-') => (true, &value[1..]),
        Some(b'+') => (false, &value[1..]),
        _ => (false, value),
    };

    let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }

    let magnitude = rest[..digits].parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -magnitude } else { magnitude })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_lenient() {
        assert_eq!(parse_lenient(None), None);
        assert_eq!(parse_lenient(Some("3")), Some(3));
        assert_eq!(parse_lenient(Some(" 7 ")), Some(7));
        assert_eq!(parse_lenient(Some("-1")), Some(-1));
        assert_eq!(parse_lenient(Some("abc")), None);
        assert_eq!(parse_lenient(Some("")), None);
        assert_eq!(parse_lenient(Some("-")), None);
        assert_eq!(parse_lenient(Some(".5")), None);
    }

    #[test]
    fn test_parse_lenient_keeps_leading_integer() {
        assert_eq!(parse_lenient(Some("2.5")), Some(2));
        assert_eq!(parse_lenient(Some("3abc")), Some(3));
        assert_eq!(parse_lenient(Some("+4")), Some(4));
        assert_eq!(parse_lenient(Some("1e3")), Some(1));
        assert_eq!(parse_lenient(Some("-2.9")), Some(-2));
        assert_eq!(parse_lenient(Some("99999999999999999999")), Some(i64::MAX));
        assert_eq!(parse_lenient(Some("-99999999999999999999")), Some(-i64::MAX));
    }

    #[test]
    fn test_deserialize_type_parameter() {
        let query: ListQuery =
            serde_json::from_value(serde_json::json!({ "type": "Zoom", "page": "2" })).unwrap();
        assert_eq!(query.kind.as_deref(), Some("Zoom"));
        assert_eq!(query.page.as_deref(), Some("2"));
    }

    #[test]
    fn test_into_product_query_carries_filters() {
        let query = ListQuery::default()
            .with_search("nikon")
            .with_kind("Prime")
            .with_limit("500")
            .into_product_query();

        assert_eq!(query.filter.search.as_deref(), Some("nikon"));
        assert_eq!(query.filter.kind.as_deref(), Some("Prime"));
        assert_eq!(query.page, None);
        assert_eq!(query.limit, Some(500));
    }
}
