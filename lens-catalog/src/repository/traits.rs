//! Repository trait definitions
//!
//! Uses RPITIT (Return Position Impl Trait In Traits) so backends can write
//! plain `async fn` without `async_trait`.
//!
//! - [`ProductRepository`]: raw storage operations, implemented per backend
//! - [`ActiveProducts`]: the read paths the service uses, always scoped to
//!   active products

use std::future::Future;

use uuid::Uuid;

use super::error::RepositoryError;
use super::pagination::{FilterCondition, OrderDirection, Pagination};
use crate::products::model::{fields, Product};

/// Result type for repository operations
pub type RepositoryResult<T> = std::result::Result<T, RepositoryError>;

/// Storage backend for products
///
/// Nothing here ever physically deletes a record. Implementations evaluate
/// the filter list exactly as given; visibility rules live in
/// [`ActiveProducts`].
pub trait ProductRepository: Send + Sync + 'static {
    /// Find products matching every filter
    ///
    /// Results follow `order_by` when given and are windowed by
    /// `pagination`.
    fn find_all(
        &self,
        filters: &[FilterCondition],
        order_by: Option<(&str, OrderDirection)>,
        pagination: Option<Pagination>,
    ) -> impl Future<Output = RepositoryResult<Vec<Product>>> + Send;

    /// Count products matching every filter
    fn count(
        &self,
        filters: &[FilterCondition],
    ) -> impl Future<Output = RepositoryResult<u64>> + Send;

    /// Store a new product and return it as persisted
    ///
    /// # Errors
    ///
    /// `AlreadyExists` if the identifier is taken.
    fn insert(&self, product: Product) -> impl Future<Output = RepositoryResult<Product>> + Send;

    /// Overwrite an existing product and return it as persisted
    ///
    /// # Errors
    ///
    /// `NotFound` if no record has this identifier.
    fn save(&self, product: Product) -> impl Future<Output = RepositoryResult<Product>> + Send;

    /// Check that the backend is reachable
    fn ping(&self) -> impl Future<Output = RepositoryResult<()>> + Send;
}

/// Prefix `filters` with the active-only condition
///
/// Every read the service performs goes through this function.
#[must_use]
pub fn active_scope(filters: &[FilterCondition]) -> Vec<FilterCondition> {
    std::iter::once(FilterCondition::eq(fields::ACTIVE, true))
        .chain(filters.iter().cloned())
        .collect()
}

/// Read paths that only ever see active products
///
/// Implemented for every [`ProductRepository`].
pub trait ActiveProducts: ProductRepository {
    /// Resolve an active product by identifier
    ///
    /// Missing and inactive products both yield `Ok(None)`.
    fn find_active(
        &self,
        id: Uuid,
    ) -> impl Future<Output = RepositoryResult<Option<Product>>> + Send;

    /// One window of active products, newest identifier first, plus the
    /// total number of matches
    fn list_active(
        &self,
        filters: &[FilterCondition],
        pagination: Pagination,
    ) -> impl Future<Output = RepositoryResult<(Vec<Product>, u64)>> + Send;
}

impl<R: ProductRepository> ActiveProducts for R {
    async fn find_active(&self, id: Uuid) -> RepositoryResult<Option<Product>> {
        let filters = active_scope(&[FilterCondition::eq(fields::ID, id)]);
        let mut found = self
            .find_all(&filters, None, Some(Pagination::new(0, 1)))
            .await?;
        Ok(found.pop())
    }

    async fn list_active(
        &self,
        filters: &[FilterCondition],
        pagination: Pagination,
    ) -> RepositoryResult<(Vec<Product>, u64)> {
        let scoped = active_scope(filters);
        let total = self.count(&scoped).await?;
        let items = self
            .find_all(
                &scoped,
                Some((fields::ID, OrderDirection::Descending)),
                Some(pagination),
            )
            .await?;
        Ok((items, total))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{FilterOperator, FilterValue};

    #[test]
    fn test_active_scope_comes_first() {
        let scoped = active_scope(&[FilterCondition::icontains("model", "nikon")]);
        assert_eq!(scoped.len(), 2);
        assert_eq!(scoped[0].field, "active");
        assert_eq!(scoped[0].operator, FilterOperator::Equal);
        assert_eq!(scoped[0].value, FilterValue::Boolean(true));
        assert_eq!(scoped[1].field, "model");
    }

    #[test]
    fn test_active_scope_on_empty_filters() {
        assert_eq!(active_scope(&[]), vec![FilterCondition::eq("active", true)]);
    }
}
