//! List filters for products

use crate::repository::FilterCondition;

use super::model::fields;

/// Optional search criteria for listing products
///
/// Criteria are combined with AND. Empty values count as absent; anything
/// else, whitespace included, is used verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
    /// Case-insensitive substring of the model name
    pub search: Option<String>,
    /// Exact lens category, e.g. `Zoom`
    pub kind: Option<String>,
}

impl ProductFilter {
    /// Filter that matches every active product
    #[must_use]
    pub fn new() -> Self {
        Self::default()
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

    /// Compile into repository conditions
    ///
    /// The active-only condition is not part of this list; the repository
    /// scope adds it.
    #[must_use]
    pub fn conditions(&self) -> Vec<FilterCondition> {
        let mut conditions = Vec::new();
        if let Some(search) = present(&self.search) {
            conditions.push(FilterCondition::icontains(fields::MODEL, search));
        }
        if let Some(kind) = present(&self.kind) {
            // Unknown categories are kept so they match nothing.
            conditions.push(FilterCondition::eq(fields::TYPE, kind));
        }
        conditions
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// Everything `list` needs: filters plus raw page input
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductQuery {
    pub filter: ProductFilter,
    /// Requested page; clamped by the service
    pub page: Option<i64>,
    /// Requested page size; clamped by the service
    pub limit: Option<i64>,
}

impl ProductQuery {
    #[must_use]
    pub fn new(filter: ProductFilter) -> Self {
        Self {
            filter,
            page: None,
            limit: None,
        }
    }

    #[must_use]
    pub fn with_page(mut self, page: i64) -> Self {
        self.page = Some(page);
        self
    }

    #[must_use]
    pub fn with_limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }
}
