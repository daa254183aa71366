//! OpenAPI document and Swagger UI
//!
//! The document is assembled by utoipa from the handler annotations in
//! [`products::handlers`](crate::products::handlers) and [`health`](crate::health).
//! [`swagger_ui`] serves it at [`OPENAPI_JSON_PATH`] with the UI under
//! [`SWAGGER_UI_PATH`].

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    handlers::ApiErrorResponse,
    health::{self, DependencyStatus, HealthResponse, ReadinessResponse},
    products::{handlers, LensType, NewProduct, Product, ProductPatch},
    responses::{FieldError, ValidationError},
};

/// Where Swagger UI is mounted
pub const SWAGGER_UI_PATH: &str = "/swagger-ui";

/// Where the raw OpenAPI JSON is served
pub const OPENAPI_JSON_PATH: &str = "/api-docs/openapi.json";

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::list_products,
        handlers::get_product,
        handlers::create_product,
        handlers::update_product,
        handlers::remove_product,
        health::health,
        health::readiness,
    ),
    components(schemas(
        Product,
        NewProduct,
        ProductPatch,
        LensType,
        FieldError,
        ValidationError,
        ApiErrorResponse,
        HealthResponse,
        ReadinessResponse,
        DependencyStatus,
    )),
    tags(
        (name = "products", description = "Camera lens catalog"),
        (name = "health", description = "Liveness and readiness checks"),
    )
)]
struct ApiDoc;

/// Builder for the service's OpenAPI document
pub struct OpenApiBuilder {
    openapi: utoipa::openapi::OpenApi,
}

impl OpenApiBuilder {
    pub fn new(openapi: utoipa::openapi::OpenApi) -> Self {
        Self { openapi }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.openapi.info.title = title.into();
        self
    }

    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.openapi.info.version = version.into();
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.openapi.info.description = Some(description.into());
        self
    }

    pub fn build(self) -> utoipa::openapi::OpenApi {
        self.openapi
    }
}

/// The catalog's OpenAPI document
pub fn api_docs() -> utoipa::openapi::OpenApi {
    OpenApiBuilder::new(ApiDoc::openapi())
        .title("Lens catalog API")
        .version(env!("CARGO_PKG_VERSION"))
        .description("Paginated search, partial updates and soft delete for camera lenses")
        .build()
}

/// Router serving Swagger UI and the OpenAPI JSON it reads
pub fn swagger_ui() -> Router {
    SwaggerUi::new(SWAGGER_UI_PATH)
        .url(OPENAPI_JSON_PATH, api_docs())
        .into()
}
