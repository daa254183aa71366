//! # lens-catalog
//!
//! REST catalog of camera lenses: paginated search, partial updates and
//! soft delete over PostgreSQL or an in-memory store.
//!
//! ## Features
//!
//! - **Products**: list, get, create, update (PUT and PATCH) and remove
//! - **Listing**: page/limit clamping, case-insensitive model search, lens
//!   category filter, newest first, `X-Total-Count`
//! - **Soft delete**: removed products stay stored but are never visible
//! - **Middleware stack**: request IDs, tracing, CORS, compression, timeouts,
//!   body limits, panic recovery
//! - **Health checks**: liveness and readiness probes
//! - **API docs**: OpenAPI document and Swagger UI (`openapi` feature)
//!
//! ## Example
//!
//! ```rust,no_run
//! use lens_catalog::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = Config::load()?;
//!     init_tracing(&config)?;
//!
//!     let state = AppState::new(config.clone(), MemoryProductStore::new());
//!
//!     Server::new(config).serve(router(state)).await?;
//!
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod handlers;
pub mod health;
pub mod ids;
pub mod middleware;
pub mod observability;
pub mod pagination;
pub mod products;
pub mod repository;
pub mod responses;
pub mod server;
pub mod state;

#[cfg(feature = "postgres")]
pub mod database;

#[cfg(feature = "openapi")]
pub mod openapi;

use axum::{routing::get, Router};

use crate::{repository::ProductRepository, state::AppState};

/// The full application: health checks, the product endpoints and, with
/// the `openapi` feature, Swagger UI
///
/// Middleware is added by [`Server`](server::Server).
pub fn router<R: ProductRepository>(state: AppState<R>) -> Router {
    let app = Router::new()
        .route("/health", get(health::health::<R>))
        .route("/ready", get(health::readiness::<R>))
        .merge(products::routes::<R>())
        .with_state(state);

    #[cfg(feature = "openapi")]
    let app = app.merge(openapi::swagger_ui());

    app
}

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::{CatalogConfig, Config, DatabaseConfig, MiddlewareConfig, ServiceConfig};
    pub use crate::error::{Error, Result};
    pub use crate::handlers::{ApiError, ApiErrorKind, ApiOperation, ListQuery, ListResponse};
    pub use crate::health::{health, readiness};
    pub use crate::ids::{MakeTypedRequestId, RequestId, RequestIdError};
    pub use crate::middleware::{
        request_id_layer, request_id_propagation_layer, sensitive_headers_layer, SENSITIVE_HEADERS,
    };
    pub use crate::observability::init_tracing;
    pub use crate::pagination::{Page, PageRequest, DEFAULT_LIMIT, MAX_LIMIT};
    pub use crate::products::{
        LensType, NewProduct, Product, ProductFilter, ProductPatch, ProductQuery, ProductService,
    };
    pub use crate::repository::{
        ActiveProducts, MemoryProductStore, ProductRepository, RepositoryError,
        RepositoryErrorKind, RepositoryOperation, RepositoryResult,
    };
    pub use crate::responses::{Created, FieldError, ValidationError};
    pub use crate::router;
    pub use crate::server::Server;
    pub use crate::state::AppState;

    #[cfg(feature = "postgres")]
    pub use crate::database::create_pool;

    #[cfg(feature = "postgres")]
    pub use crate::repository::PgProductStore;

    #[cfg(feature = "openapi")]
    pub use crate::openapi::{api_docs, swagger_ui};

    pub use axum::{
        extract::{Path, Query, State},
        http::StatusCode,
        response::{IntoResponse, Json, Response},
        Router,
    };

    pub use serde::{Deserialize, Serialize};

    pub use tracing::{debug, error, info, instrument, warn};

    pub use uuid::Uuid;
}
