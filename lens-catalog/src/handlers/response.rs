//! Response types for product handlers

use axum::{
    http::{HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::pagination::Page;

/// Header carrying the total number of matches for a list request
pub const TOTAL_COUNT_HEADER: HeaderName = HeaderName::from_static("x-total-count");

/// Paginated list response
///
/// The body is the [`Page`] envelope. `X-Total-Count` repeats `total` for
/// clients that only read headers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListResponse<T>(pub Page<T>);

impl<T> From<Page<T>> for ListResponse<T> {
    fn from(page: Page<T>) -> Self {
        Self(page)
    }
}

impl<T: Serialize> IntoResponse for ListResponse<T> {
    fn into_response(self) -> Response {
        let total = HeaderValue::from(self.0.total);
        let mut response = (StatusCode::OK, Json(self.0)).into_response();
        response
            .headers_mut()
            .insert(TOTAL_COUNT_HEADER, total);
        response
    }
}
