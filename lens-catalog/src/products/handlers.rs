//! HTTP handlers for `/products`
//!
//! Thin translation between axum extractors and [`ProductService`]. Bodies
//! are taken as raw JSON so validation can report every field at once.
//!
//! [`ProductService`]: super::ProductService

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    Json,
};
use serde_json::Value;
use uuid::Uuid;

use crate::{
    handlers::{ApiError, ApiOperation, HandlerResult, ListQuery, ListResponse},
    repository::ProductRepository,
    responses::Created,
    state::AppState,
};

use super::model::{Product, ENTITY};
use super::validation::{malformed_body, validate_create, validate_patch};

#[cfg(feature = "openapi")]
use super::model::{NewProduct, ProductPatch};
#[cfg(feature = "openapi")]
use crate::{pagination::Page, responses::ValidationError};

/// List active products, newest first
///
/// `page` and `limit` that are not integers fall back to their defaults.
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/products",
    tag = "products",
    params(ListQuery),
    responses(
        (status = 200, description = "One page of active products", body = Page<Product>,
            headers(("x-total-count" = u64, description = "Matching products across all pages"))),
    )
))]
pub async fn list_products<R: ProductRepository>(
    State(state): State<AppState<R>>,
    Query(query): Query<ListQuery>,
) -> HandlerResult<ListResponse<Product>> {
    let page = state.service().list(query.into_product_query()).await?;
    Ok(page.into())
}

/// Fetch one active product
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/products/{id}",
    tag = "products",
    params(("id" = String, Path, description = "Product identifier (UUID)")),
    responses(
        (status = 200, description = "The product", body = Product),
        (status = 404, description = "Unknown, malformed or removed identifier",
            body = crate::handlers::ApiErrorResponse),
    )
))]
pub async fn get_product<R: ProductRepository>(
    State(state): State<AppState<R>>,
    Path(id): Path<String>,
) -> HandlerResult<Json<Product>> {
    let id = parse_id(&id, ApiOperation::Get)?;
    Ok(Json(state.service().get(id).await?))
}

/// Create a product
#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/products",
    tag = "products",
    request_body = NewProduct,
    responses(
        (status = 201, description = "Created; `Location` points at the product", body = Product),
        (status = 422, description = "Per-field validation errors", body = ValidationError),
    )
))]
pub async fn create_product<R: ProductRepository>(
    State(state): State<AppState<R>>,
    body: Result<Json<Value>, JsonRejection>,
) -> HandlerResult<Created<Product>> {
    let Json(body) = body.map_err(|e| malformed_body(e.body_text()))?;
    let input = validate_create(&body)?;

    let product = state.service().create(input).await?;
    let location = format!("/products/{}", product.id);
    Ok(Created::new(product).with_location(location))
}

/// Merge the supplied fields into an active product
///
/// Mounted for both `PUT` and `PATCH`.
#[cfg_attr(feature = "openapi", utoipa::path(
    method(put, patch),
    path = "/products/{id}",
    tag = "products",
    params(("id" = String, Path, description = "Product identifier (UUID)")),
    request_body = ProductPatch,
    responses(
        (status = 200, description = "The merged product", body = Product),
        (status = 404, description = "Unknown, malformed or removed identifier",
            body = crate::handlers::ApiErrorResponse),
        (status = 422, description = "Per-field validation errors", body = ValidationError),
    )
))]
pub async fn update_product<R: ProductRepository>(
    State(state): State<AppState<R>>,
    Path(id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> HandlerResult<Json<Product>> {
    let id = parse_id(&id, ApiOperation::Update)?;
    let Json(body) = body.map_err(|e| malformed_body(e.body_text()))?;
    let patch = validate_patch(&body)?;

    Ok(Json(state.service().update(id, patch).await?))
}

/// Soft-delete a product and return it with `active: false`
#[cfg_attr(feature = "openapi", utoipa::path(
    delete,
    path = "/products/{id}",
    tag = "products",
    params(("id" = String, Path, description = "Product identifier (UUID)")),
    responses(
        (status = 200, description = "The removed product", body = Product),
        (status = 404, description = "Unknown, malformed or already removed identifier",
            body = crate::handlers::ApiErrorResponse),
    )
))]
pub async fn remove_product<R: ProductRepository>(
    State(state): State<AppState<R>>,
    Path(id): Path<String>,
) -> HandlerResult<Json<Product>> {
    let id = parse_id(&id, ApiOperation::Remove)?;
    Ok(Json(state.service().remove(id).await?))
}

/// An identifier that is not a UUID cannot name a product, so it is a 404
fn parse_id(raw: &str, operation: ApiOperation) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::not_found(ENTITY, raw).with_operation(operation))
}
