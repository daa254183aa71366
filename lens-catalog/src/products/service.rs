//! Product catalog operations
//!
//! [`ProductService`] is the only place that decides what `list`, `get`,
//! `create`, `update` and `remove` mean. Handlers translate HTTP into calls
//! here; the repository only stores.

use tracing::instrument;
use uuid::Uuid;

use crate::pagination::{Page, PageRequest, DEFAULT_LIMIT};
use crate::repository::{
    ActiveProducts, ProductRepository, RepositoryError, RepositoryOperation, RepositoryResult,
};

use super::filter::ProductQuery;
use super::model::{NewProduct, Product, ProductPatch, ENTITY};

/// Catalog operations over a storage backend
#[derive(Debug)]
pub struct ProductService<R> {
    repo: R,
    default_limit: u64,
}

impl<R: ProductRepository> ProductService<R> {
    pub fn new(repo: R) -> Self {
        Self {
            repo,
            default_limit: DEFAULT_LIMIT,
        }
    }

    /// Page size used when a list request does not give one
    #[must_use]
    pub fn with_default_limit(mut self, default_limit: u64) -> Self {
        self.default_limit = default_limit;
        self
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// One page of active products, newest identifier first
    #[instrument(skip(self), fields(page = ?query.page, limit = ?query.limit))]
    pub async fn list(&self, query: ProductQuery) -> RepositoryResult<Page<Product>> {
        let request = PageRequest::resolve(query.page, query.limit, self.default_limit);
        let (items, total) = self
            .repo
            .list_active(&query.filter.conditions(), request.window())
            .await?;

        tracing::debug!(total, returned = items.len(), "Listed products");
        Ok(Page::new(items, total, request))
    }

    /// An active product by identifier
    ///
    /// # Errors
    ///
    /// `NotFound` when the product is missing or has been removed.
    #[instrument(skip(self))]
    pub async fn get(&self, id: Uuid) -> RepositoryResult<Product> {
        self.repo
            .find_active(id)
            .await?
            .ok_or_else(|| RepositoryError::not_found(ENTITY, id.to_string()))
    }

    /// Store a new, active product under a fresh identifier
    #[instrument(skip(self, input), fields(model = %input.model))]
    pub async fn create(&self, input: NewProduct) -> RepositoryResult<Product> {
        let product = self.repo.insert(input.into_product(Uuid::now_v7())).await?;
        tracing::info!(product_id = %product.id, "Product created");
        Ok(product)
    }

    /// Merge `patch` into an active product
    ///
    /// An empty patch returns the stored record untouched.
    #[instrument(skip(self, patch))]
    pub async fn update(&self, id: Uuid, patch: ProductPatch) -> RepositoryResult<Product> {
        let mut product = self
            .get(id)
            .await
            .map_err(|e| e.with_operation(RepositoryOperation::Update))?;
        if patch.is_empty() {
            return Ok(product);
        }

        patch.apply_to(&mut product);
        let product = self.repo.save(product).await?;
        tracing::info!(product_id = %product.id, "Product updated");
        Ok(product)
    }

    /// Soft-delete: mark the product inactive and return it
    ///
    /// Removing an already removed product is `NotFound`.
    #[instrument(skip(self))]
    pub async fn remove(&self, id: Uuid) -> RepositoryResult<Product> {
        let mut product = self
            .get(id)
            .await
            .map_err(|e| e.with_operation(RepositoryOperation::SoftDelete))?;
        product.active = false;

        let product = self
            .repo
            .save(product)
            .await
            .map_err(|e| e.with_operation(RepositoryOperation::SoftDelete))?;
        tracing::info!(product_id = %product.id, "Product removed");
        Ok(product)
    }

    /// Check that storage is reachable
    pub async fn ping(&self) -> RepositoryResult<()> {
        self.repo.ping().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::products::filter::ProductFilter;
    use crate::products::model::LensType;
    use crate::repository::MemoryProductStore;

    fn input(model: &str, kind: LensType) -> NewProduct {
        NewProduct {
            model: model.to_string(),
            brand: "Nikon".to_string(),
            kind,
            focal_length: "50mm".to_string(),
            max_aperture: "f/1.8".to_string(),
            mount: "Nikon Z".to_string(),
            weight: 400,
            has_stabilization: false,
        }
    }

    fn service() -> ProductService<MemoryProductStore> {
        ProductService::new(MemoryProductStore::new())
    }

    #[tokio::test]
    async fn test_create_assigns_id_and_active() {
        let service = service();
        let product = service.create(input("Z 50mm", LensType::Prime)).await.unwrap();

        assert!(product.active);
        assert_eq!(service.get(product.id).await.unwrap(), product);
    }

    #[tokio::test]
    async fn test_list_six_products_limit_five() {
        let service = service();
        let mut created = Vec::new();
        for i in 0..6 {
            created.push(
                service
                    .create(input(&format!("Lens {}", i), LensType::Prime))
                    .await
                    .unwrap(),
            );
        }

        let first = service.list(ProductQuery::default()).await.unwrap();
        assert_eq!(first.data.len(), 5);
        assert_eq!(first.total, 6);
        assert_eq!(first.total_pages, 2);
        assert!(first.has_next);
        assert!(!first.has_prev);
        assert_eq!(first.data[0].id, created[5].id);

        let second = service
            .list(ProductQuery::default().with_page(2))
            .await
            .unwrap();
        assert_eq!(second.data.len(), 1);
        assert_eq!(second.data[0].id, created[0].id);
        assert!(!second.has_next);
        assert!(second.has_prev);
    }

    #[tokio::test]
    async fn test_list_uses_configured_default_limit() {
        let service = service().with_default_limit(2);
        for i in 0..3 {
            service
                .create(input(&format!("Lens {}", i), LensType::Zoom))
                .await
                .unwrap();
        }

        let page = service.list(ProductQuery::default()).await.unwrap();
        assert_eq!(page.limit, 2);
        assert_eq!(page.data.len(), 2);
    }

    #[tokio::test]
    async fn test_list_filters_by_kind_and_search() {
        let service = service();
        service.create(input("Nikon Z 24-70mm", LensType::Zoom)).await.unwrap();
        service.create(input("Nikon Z 50mm", LensType::Prime)).await.unwrap();
        service.create(input("Sony FE 24-70mm", LensType::Zoom)).await.unwrap();

        let query = ProductQuery::new(ProductFilter::new().with_search("NIKON").with_kind("Zoom"));
        let page = service.list(query).await.unwrap();
        assert_eq!(page.total, 1);
        assert_eq!(page.data[0].model, "Nikon Z 24-70mm");
    }

    #[tokio::test]
    async fn test_get_unknown_is_not_found() {
        let err = service().get(Uuid::now_v7()).await.unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.entity_type.as_deref(), Some("Product"));
    }

    #[tokio::test]
    async fn test_update_merges_fields() {
        let service = service();
        let product = service.create(input("Z 50mm", LensType::Prime)).await.unwrap();

        let patch = ProductPatch {
            weight: Some(390),
            has_stabilization: Some(true),
            ..ProductPatch::default()
        };
        let updated = service.update(product.id, patch).await.unwrap();

        assert_eq!(updated.weight, 390);
        assert!(updated.has_stabilization);
        assert_eq!(updated.model, product.model);
        assert_eq!(updated.id, product.id);
        assert!(updated.active);
    }

    #[tokio::test]
    async fn test_empty_update_returns_record_unchanged() {
        let service = service();
        let product = service.create(input("Z 50mm", LensType::Prime)).await.unwrap();

        let same = service
            .update(product.id, ProductPatch::default())
            .await
            .unwrap();
        assert_eq!(same, product);
    }

    #[tokio::test]
    async fn test_remove_hides_product() {
        let service = service();
        let product = service.create(input("Z 50mm", LensType::Prime)).await.unwrap();

        let removed = service.remove(product.id).await.unwrap();
        assert!(!removed.active);
        assert_eq!(removed.model, product.model);

        assert!(service.get(product.id).await.unwrap_err().is_not_found());
        assert_eq!(service.list(ProductQuery::default()).await.unwrap().total, 0);

        let stored = service.repository().get_raw(&product.id).await.unwrap();
        assert!(!stored.active);
    }

    #[tokio::test]
    async fn test_remove_twice_is_not_found() {
        let service = service();
        let product = service.create(input("Z 50mm", LensType::Prime)).await.unwrap();
        service.remove(product.id).await.unwrap();

        let err = service.remove(product.id).await.unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.operation, RepositoryOperation::SoftDelete);
    }

    #[tokio::test]
    async fn test_update_removed_is_not_found() {
        let service = service();
        let product = service.create(input("Z 50mm", LensType::Prime)).await.unwrap();
        service.remove(product.id).await.unwrap();

        let patch = ProductPatch {
            model: Some("revived".to_string()),
            ..ProductPatch::default()
        };
        let err = service.update(product.id, patch).await.unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.operation, RepositoryOperation::Update);
    }
}
