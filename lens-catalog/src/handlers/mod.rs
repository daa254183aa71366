//! Handler-level building blocks shared by the endpoints
//!
//! - [`ApiError`] and [`HandlerError`]: errors with HTTP status mapping
//! - [`ListQuery`]: lenient parsing of list query strings
//! - [`ListResponse`]: the paginated envelope plus `X-Total-Count`
//!
//! ```rust,ignore
//! use axum::extract::{Query, State};
//! use lens_catalog::handlers::{HandlerResult, ListQuery, ListResponse};
//!
//! async fn list_products(
//!     State(state): State<AppState<R>>,
//!     Query(query): Query<ListQuery>,
//! ) -> HandlerResult<ListResponse<Product>> {
//!     let page = state.service().list(query.into_product_query()).await?;
//!     Ok(page.into())
//! }
//! ```

mod error;
mod query;
mod response;

pub use error::{ApiError, ApiErrorKind, ApiOperation, HandlerError, HandlerResult};
#[cfg(feature = "openapi")]
pub(crate) use error::ApiErrorResponse;
pub use query::ListQuery;
pub use response::{ListResponse, TOTAL_COUNT_HEADER};
