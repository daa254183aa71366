//! In-memory product store
//!
//! Used when no database is configured and throughout the test suite. The
//! lock only guards the map; read-then-write sequences in the service are
//! not atomic, same as with PostgreSQL.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use uuid::Uuid;

use super::error::{RepositoryError, RepositoryOperation};
use super::pagination::{FilterCondition, FilterOperator, FilterValue, OrderDirection, Pagination};
use super::traits::{ProductRepository, RepositoryResult};
use crate::products::model::{fields, Product, ENTITY};

/// Product store backed by a `BTreeMap` keyed by identifier
#[derive(Debug, Clone, Default)]
pub struct MemoryProductStore {
    products: Arc<RwLock<BTreeMap<Uuid, Product>>>,
}

impl MemoryProductStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records, active or not
    pub async fn len(&self) -> usize {
        self.products.read().await.len()
    }

    /// Raw lookup that ignores `active`
    pub async fn get_raw(&self, id: &Uuid) -> Option<Product> {
        self.products.read().await.get(id).cloned()
    }
}

fn field_value(product: &Product, field: &str) -> RepositoryResult<FilterValue> {
    let value = match field {
        fields::ID => FilterValue::Uuid(product.id),
        fields::MODEL => FilterValue::String(product.model.clone()),
        fields::BRAND => FilterValue::String(product.brand.clone()),
        fields::TYPE => FilterValue::String(product.kind.as_str().to_string()),
        fields::FOCAL_LENGTH => FilterValue::String(product.focal_length.clone()),
        fields::MAX_APERTURE => FilterValue::String(product.max_aperture.clone()),
        fields::MOUNT => FilterValue::String(product.mount.clone()),
        fields::WEIGHT => FilterValue::Integer(i64::from(product.weight)),
        fields::HAS_STABILIZATION => FilterValue::Boolean(product.has_stabilization),
        fields::ACTIVE => FilterValue::Boolean(product.active),
        other => {
            return Err(RepositoryError::validation_failed(format!(
                "Unknown filter field '{}'",
                other
            )))
        }
    };
    Ok(value)
}

fn matches(product: &Product, condition: &FilterCondition) -> RepositoryResult<bool> {
    let actual = field_value(product, &condition.field)?;
    match condition.operator {
        FilterOperator::Equal => Ok(actual == condition.value),
        FilterOperator::IContains => match (&actual, &condition.value) {
            (FilterValue::String(haystack), FilterValue::String(needle)) => {
                Ok(haystack.to_lowercase().contains(&needle.to_lowercase()))
            }
            _ => Err(RepositoryError::validation_failed(format!(
                "ILIKE requires a text field and value, got '{}'",
                condition.field
            ))),
        },
    }
}

fn matches_all(product: &Product, filters: &[FilterCondition]) -> RepositoryResult<bool> {
    for condition in filters {
        if !matches(product, condition)? {
            return Ok(false);
        }
    }
    Ok(true)
}

fn compare_values(a: &FilterValue, b: &FilterValue) -> Ordering {
    match (a, b) {
        (FilterValue::String(a), FilterValue::String(b)) => a.cmp(b),
        (FilterValue::Integer(a), FilterValue::Integer(b)) => a.cmp(b),
        (FilterValue::Boolean(a), FilterValue::Boolean(b)) => a.cmp(b),
        (FilterValue::Uuid(a), FilterValue::Uuid(b)) => a.cmp(b),
        _ => Ordering::Equal,
    }
}

fn to_usize(n: u64) -> usize {
    usize::try_from(n).unwrap_or(usize::MAX)
}

impl ProductRepository for MemoryProductStore {
    async fn find_all(
        &self,
        filters: &[FilterCondition],
        order_by: Option<(&str, OrderDirection)>,
        pagination: Option<Pagination>,
    ) -> RepositoryResult<Vec<Product>> {
        let products = self.products.read().await;

        let mut found = Vec::new();
        for product in products.values() {
            if matches_all(product, filters)
                .map_err(|e| e.with_operation(RepositoryOperation::FindAll))?
            {
                found.push(product.clone());
            }
        }
        drop(products);

        if let Some((field, direction)) = order_by {
            let mut keyed = found
                .into_iter()
                .map(|p| field_value(&p, field).map(|key| (key, p)))
                .collect::<RepositoryResult<Vec<_>>>()
                .map_err(|e| e.with_operation(RepositoryOperation::FindAll))?;
            keyed.sort_by(|(a, _), (b, _)| match direction {
                OrderDirection::Descending => compare_values(b, a),
            });
            found = keyed.into_iter().map(|(_, p)| p).collect();
        }

        Ok(match pagination {
            Some(window) => found
                .into_iter()
                .skip(to_usize(window.offset))
                .take(to_usize(window.limit))
                .collect(),
            None => found,
        })
    }

    async fn count(&self, filters: &[FilterCondition]) -> RepositoryResult<u64> {
        let products = self.products.read().await;
        let mut total = 0_u64;
        for product in products.values() {
            if matches_all(product, filters)
                .map_err(|e| e.with_operation(RepositoryOperation::Count))?
            {
                total += 1;
            }
        }
        Ok(total)
    }

    async fn insert(&self, product: Product) -> RepositoryResult<Product> {
        let mut products = self.products.write().await;
        if products.contains_key(&product.id) {
            return Err(RepositoryError::already_exists(ENTITY, product.id.to_string()));
        }
        products.insert(product.id, product.clone());
        Ok(product)
    }

    async fn save(&self, product: Product) -> RepositoryResult<Product> {
        let mut products = self.products.write().await;
        match products.get_mut(&product.id) {
            Some(slot) => {
                *slot = product.clone();
                Ok(product)
            }
            None => Err(RepositoryError::not_found(ENTITY, product.id.to_string())
                .with_operation(RepositoryOperation::Update)),
        }
    }

    async fn ping(&self) -> RepositoryResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::products::model::{LensType, NewProduct};
    use crate::repository::{active_scope, ActiveProducts, RepositoryErrorKind};

    fn lens(model: &str, kind: LensType) -> Product {
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
        .into_product(Uuid::now_v7())
    }

    async fn seeded(models: &[(&str, LensType)]) -> (MemoryProductStore, Vec<Product>) {
        let store = MemoryProductStore::new();
        let mut stored = Vec::new();
        for (model, kind) in models {
            stored.push(store.insert(lens(model, *kind)).await.unwrap());
        }
        (store, stored)
    }

    #[tokio::test]
    async fn test_insert_rejects_duplicate_id() {
        let store = MemoryProductStore::new();
        let product = lens("Z 50mm", LensType::Prime);
        store.insert(product.clone()).await.unwrap();

        let err = store.insert(product).await.unwrap_err();
        assert_eq!(err.kind, RepositoryErrorKind::AlreadyExists);
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_save_unknown_is_not_found() {
        let store = MemoryProductStore::new();
        let err = store.save(lens("Z 50mm", LensType::Prime)).await.unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.operation, RepositoryOperation::Update);
    }

    #[tokio::test]
    async fn test_icontains_is_case_insensitive() {
        let (store, _) = seeded(&[
            ("Nikon Z 24-70mm", LensType::Zoom),
            ("Sony FE 85mm", LensType::Prime),
        ])
        .await;

        let found = store
            .find_all(&[FilterCondition::icontains("model", "nikon")], None, None)
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].model, "Nikon Z 24-70mm");
    }

    #[tokio::test]
    async fn test_type_filter_matches_wire_name() {
        let (store, _) = seeded(&[
            ("A", LensType::TiltShift),
            ("B", LensType::Prime),
        ])
        .await;

        let count = store
            .count(&[FilterCondition::eq("type", "Tilt-Shift")])
            .await
            .unwrap();
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn test_order_and_window() {
        let (store, stored) = seeded(&[
            ("A", LensType::Prime),
            ("B", LensType::Prime),
            ("C", LensType::Prime),
        ])
        .await;

        let found = store
            .find_all(
                &[],
                Some(("id", OrderDirection::Descending)),
                Some(Pagination::new(1, 1)),
            )
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, stored[1].id);
    }

    #[tokio::test]
    async fn test_unknown_field_is_rejected() {
        let (store, _) = seeded(&[("A", LensType::Prime)]).await;
        let err = store
            .count(&[FilterCondition::eq("colour", "black")])
            .await
            .unwrap_err();
        assert_eq!(err.kind, RepositoryErrorKind::ValidationFailed);
        assert_eq!(err.operation, RepositoryOperation::Count);
    }

    #[tokio::test]
    async fn test_inactive_records_stay_stored_but_hidden() {
        let (store, stored) = seeded(&[("A", LensType::Prime), ("B", LensType::Zoom)]).await;
        let mut removed = stored[0].clone();
        removed.active = false;
        store.save(removed).await.unwrap();

        assert_eq!(store.len().await, 2);
        assert!(store.find_active(stored[0].id).await.unwrap().is_none());
        assert!(store.find_active(stored[1].id).await.unwrap().is_some());

        let (items, total) = store
            .list_active(&[], Pagination::new(0, 10))
            .await
            .unwrap();
        assert_eq!(total, 1);
        assert_eq!(items[0].id, stored[1].id);

        let hidden = store.count(&active_scope(&[])).await.unwrap();
        assert_eq!(hidden, 1);
    }
}
