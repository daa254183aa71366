//! PostgreSQL product store
//!
//! Filters are rendered with [`sqlx::QueryBuilder`] so every value is
//! bound, never interpolated. Field names are mapped through a fixed column
//! list; anything else is rejected.

use sqlx::{postgres::Postgres, FromRow, PgPool, QueryBuilder};
use uuid::Uuid;

use super::error::{RepositoryError, RepositoryOperation};
use super::pagination::{FilterCondition, FilterOperator, FilterValue, OrderDirection, Pagination};
use super::traits::{ProductRepository, RepositoryResult};
use crate::products::model::{fields, Product, ENTITY};

const COLUMNS: &str =
    "id, model, brand, lens_type, focal_length, max_aperture, mount, weight, has_stabilization, active";

const CREATE_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS products (
    id UUID PRIMARY KEY,
    model TEXT NOT NULL,
    brand TEXT NOT NULL,
    lens_type TEXT NOT NULL,
    focal_length TEXT NOT NULL,
    max_aperture TEXT NOT NULL,
    mount TEXT NOT NULL,
    weight INTEGER NOT NULL,
    has_stabilization BOOLEAN NOT NULL DEFAULT FALSE,
    active BOOLEAN NOT NULL DEFAULT TRUE
)
"#;

const CREATE_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS products_active_id_idx ON products (active, id DESC)";

/// Product store backed by a `products` table
#[derive(Debug, Clone)]
pub struct PgProductStore {
    pool: PgPool,
}

impl PgProductStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create the table and index if they are missing
    pub async fn ensure_schema(&self) -> RepositoryResult<()> {
        for statement in [CREATE_TABLE, CREATE_INDEX] {
            sqlx::query(statement)
                .execute(&self.pool)
                .await
                .map_err(|e| {
                    RepositoryError::from(e).with_operation(RepositoryOperation::HealthCheck)
                })?;
        }
        tracing::info!("Product schema ready");
        Ok(())
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[derive(Debug, FromRow)]
struct ProductRow {
    id: Uuid,
    model: String,
    brand: String,
    lens_type: String,
    focal_length: String,
    max_aperture: String,
    mount: String,
    weight: i32,
    has_stabilization: bool,
    active: bool,
}

impl TryFrom<ProductRow> for Product {
    type Error = RepositoryError;

    fn try_from(row: ProductRow) -> Result<Self, Self::Error> {
        let kind = row.lens_type.parse().map_err(|e| {
            RepositoryError::serialization_error(
                RepositoryOperation::FindAll,
                format!("Stored product has {}", e),
            )
            .with_entity(ENTITY, row.id.to_string())
        })?;
        Ok(Product {
            id: row.id,
            model: row.model,
            brand: row.brand,
            kind,
            focal_length: row.focal_length,
            max_aperture: row.max_aperture,
            mount: row.mount,
            weight: row.weight,
            has_stabilization: row.has_stabilization,
            active: row.active,
        })
    }
}

fn column(field: &str) -> RepositoryResult<&'static str> {
    let column = match field {
        fields::ID => "id",
        fields::MODEL => "model",
        fields::BRAND => "brand",
        fields::TYPE => "lens_type",
        fields::FOCAL_LENGTH => "focal_length",
        fields::MAX_APERTURE => "max_aperture",
        fields::MOUNT => "mount",
        fields::WEIGHT => "weight",
        fields::HAS_STABILIZATION => "has_stabilization",
        fields::ACTIVE => "active",
        other => {
            return Err(RepositoryError::validation_failed(format!(
                "Unknown filter field '{}'",
                other
            )))
        }
    };
    Ok(column)
}

/// Escape LIKE wildcards so user input matches literally
fn escape_like(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for ch in input.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

fn push_value(qb: &mut QueryBuilder<'_, Postgres>, value: &FilterValue) {
    match value {
        FilterValue::String(s) => {
            qb.push_bind(s.clone());
        }
        FilterValue::Integer(n) => {
            qb.push_bind(*n);
        }
        FilterValue::Boolean(b) => {
            qb.push_bind(*b);
        }
        FilterValue::Uuid(id) => {
            qb.push_bind(*id);
        }
    }
}

fn push_filters(
    qb: &mut QueryBuilder<'_, Postgres>,
    filters: &[FilterCondition],
) -> RepositoryResult<()> {
    for (i, condition) in filters.iter().enumerate() {
        qb.push(if i == 0 { " WHERE " } else { " AND " });
        qb.push(column(&condition.field)?);
        match condition.operator {
            FilterOperator::Equal => {
                qb.push(format!(" {} ", condition.operator));
                push_value(qb, &condition.value);
            }
            FilterOperator::IContains => {
                let FilterValue::String(needle) = &condition.value else {
                    return Err(RepositoryError::validation_failed(format!(
                        "ILIKE requires a text value for '{}'",
                        condition.field
                    )));
                };
                qb.push(" ILIKE ");
                qb.push_bind(format!("%{}%", escape_like(needle)));
                qb.push(" ESCAPE '\\'");
            }
        }
    }
    Ok(())
}

fn to_i64(n: u64) -> i64 {
    i64::try_from(n).unwrap_or(i64::MAX)
}

fn select_query(
    filters: &[FilterCondition],
    order_by: Option<(&str, OrderDirection)>,
    pagination: Option<Pagination>,
) -> RepositoryResult<QueryBuilder<'static, Postgres>> {
    let mut qb = QueryBuilder::new(format!("SELECT {} FROM products", COLUMNS));
    push_filters(&mut qb, filters)?;
    if let Some((field, direction)) = order_by {
        qb.push(" ORDER BY ")
            .push(column(field)?)
            .push(" ")
            .push(direction.as_sql());
    }
    if let Some(window) = pagination {
        qb.push(" LIMIT ")
            .push_bind(to_i64(window.limit))
            .push(" OFFSET ")
            .push_bind(to_i64(window.offset));
    }
    Ok(qb)
}

fn count_query(filters: &[FilterCondition]) -> RepositoryResult<QueryBuilder<'static, Postgres>> {
    let mut qb = QueryBuilder::new("SELECT COUNT(*) FROM products");
    push_filters(&mut qb, filters)?;
    Ok(qb)
}

impl ProductRepository for PgProductStore {
    async fn find_all(
        &self,
        filters: &[FilterCondition],
        order_by: Option<(&str, OrderDirection)>,
        pagination: Option<Pagination>,
    ) -> RepositoryResult<Vec<Product>> {
        let mut qb = select_query(filters, order_by, pagination)
            .map_err(|e| e.with_operation(RepositoryOperation::FindAll))?;
        let rows: Vec<ProductRow> = qb
            .build_query_as()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| RepositoryError::from(e).with_operation(RepositoryOperation::FindAll))?;
        rows.into_iter().map(Product::try_from).collect()
    }

    async fn count(&self, filters: &[FilterCondition]) -> RepositoryResult<u64> {
        let mut qb =
            count_query(filters).map_err(|e| e.with_operation(RepositoryOperation::Count))?;
        let total: i64 = qb
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| RepositoryError::from(e).with_operation(RepositoryOperation::Count))?;
        Ok(u64::try_from(total).unwrap_or_default())
    }

    async fn insert(&self, product: Product) -> RepositoryResult<Product> {
        let sql = format!(
            "INSERT INTO products ({COLUMNS}) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) \
             RETURNING {COLUMNS}"
        );
        let row: ProductRow = sqlx::query_as(&sql)
            .bind(product.id)
            .bind(&product.model)
            .bind(&product.brand)
            .bind(product.kind.as_str())
            .bind(&product.focal_length)
            .bind(&product.max_aperture)
            .bind(&product.mount)
            .bind(product.weight)
            .bind(product.has_stabilization)
            .bind(product.active)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                RepositoryError::from(e)
                    .with_operation(RepositoryOperation::Create)
                    .with_entity(ENTITY, product.id.to_string())
            })?;
        Product::try_from(row)
    }

    async fn save(&self, product: Product) -> RepositoryResult<Product> {
        let sql = format!(
            "UPDATE products SET model = $2, brand = $3, lens_type = $4, focal_length = $5, \
             max_aperture = $6, mount = $7, weight = $8, has_stabilization = $9, active = $10 \
             WHERE id = $1 RETURNING {COLUMNS}"
        );
        let row: Option<ProductRow> = sqlx::query_as(&sql)
            .bind(product.id)
            .bind(&product.model)
            .bind(&product.brand)
            .bind(product.kind.as_str())
            .bind(&product.focal_length)
            .bind(&product.max_aperture)
            .bind(&product.mount)
            .bind(product.weight)
            .bind(product.has_stabilization)
            .bind(product.active)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepositoryError::from(e).with_operation(RepositoryOperation::Update))?;

        match row {
            Some(row) => Product::try_from(row),
            None => Err(RepositoryError::not_found(ENTITY, product.id.to_string())
                .with_operation(RepositoryOperation::Update)),
        }
    }

    async fn ping(&self) -> RepositoryResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| RepositoryError::from(e).with_operation(RepositoryOperation::HealthCheck))?;
        Ok(())
    }
}
