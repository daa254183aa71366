//! Camera lens products
//!
//! - [`model`]: the record, its category and the create/patch inputs
//! - [`filter`]: list criteria compiled into repository conditions
//! - [`validation`]: per-field checks on raw JSON bodies
//! - [`service`]: list, get, create, update and soft-delete
//! - [`handlers`]: the axum endpoints, mounted by [`routes`]

pub mod filter;
pub mod handlers;
pub mod model;
pub mod service;
pub mod validation;

use axum::{routing::get, Router};

use crate::{repository::ProductRepository, state::AppState};

pub use filter::{ProductFilter, ProductQuery};
pub use model::{LensType, NewProduct, Product, ProductPatch, UnknownLensType};
pub use service::ProductService;

/// Product endpoints, to be merged into the application router
pub fn routes<R: ProductRepository>() -> Router<AppState<R>> {
    Router::new()
        .route(
            "/products",
            get(handlers::list_products::<R>).post(handlers::create_product::<R>),
        )
        .route(
            "/products/{id}",
            get(handlers::get_product::<R>)
                .put(handlers::update_product::<R>)
                .patch(handlers::update_product::<R>)
                .delete(handlers::remove_product::<R>),
        )
}
