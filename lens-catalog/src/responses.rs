//! Success and validation responses with the right status codes
//!
//! - **201 Created**: [`Created`], with an optional `Location` header
//! - **422 Unprocessable Entity**: [`ValidationError`], listing every
//!   offending field
//!
//! ```rust,ignore
//! use lens_catalog::responses::{Created, ValidationError};
//!
//! async fn create() -> Result<Created<Product>, ValidationError> {
//!     let mut errors = ValidationError::new("Validation failed");
//!     errors.add_field_error("weight", "INVALID_VALUE", "weight must be a positive integer");
//!     Err(errors)
//! }
//! ```

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ============================================================================
// 201 Created
// ============================================================================

/// HTTP 201 Created response
///
/// The body is the created resource. `Location` is only set when the value
/// is a valid header.
#[derive(Debug)]
pub struct Created<T> {
    data: T,
    location: Option<String>,
}

impl<T> Created<T> {
    pub fn new(data: T) -> Self {
        Self {
            data,
            location: None,
        }
    }

    /// Point `Location` at the created resource
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }
}

impl<T: Serialize> IntoResponse for Created<T> {
    fn into_response(self) -> Response {
        let mut response = (StatusCode::CREATED, Json(&self.data)).into_response();

        if let Some(location) = self.location {
            if let Ok(header_value) = HeaderValue::from_str(&location) {
                response.headers_mut().insert(header::LOCATION, header_value);
            }
        }

        response
    }
}

// ============================================================================
// 422 Unprocessable Entity
// ============================================================================

/// Field-level validation error
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct FieldError {
    /// Field name as it appears on the wire, e.g. `maxAperture`
    pub field: String,
    /// Machine-readable code (`REQUIRED`, `INVALID_TYPE`, ...)
    pub code: String,
    pub message: String,
}

/// HTTP 422 Unprocessable Entity response
///
/// ```json
/// {
///   "error": "Validation failed",
///   "code": "VALIDATION_ERROR",
///   "status": 422,
///   "errors": {
///     "weight": [{ "field": "weight", "code": "INVALID_VALUE", "message": "..." }]
///   }
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ValidationError {
    error: String,
    code: String,
    status: u16,
    /// Field-level validation errors
    pub errors: HashMap<String, Vec<FieldError>>,
}

impl ValidationError {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            code: "VALIDATION_ERROR".to_string(),
            status: StatusCode::UNPROCESSABLE_ENTITY.as_u16(),
            errors: HashMap::new(),
        }
    }

    /// Add a field-level error
    pub fn add_field_error(
        &mut self,
        field: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) {
        let field = field.into();
        let error = FieldError {
            field: field.clone(),
            code: code.into(),
            message: message.into(),
        };

        self.errors.entry(field).or_default().push(error);
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Number of field errors across all fields
    pub fn error_count(&self) -> usize {
        self.errors.values().map(|v| v.len()).sum()
    }

    /// Codes reported for `field`, in insertion order
    pub fn codes_for(&self, field: &str) -> Vec<&str> {
        self.errors
            .get(field)
            .map(|errors| errors.iter().map(|e| e.code.as_str()).collect())
            .unwrap_or_default()
    }
}

impl IntoResponse for ValidationError {
    fn into_response(self) -> Response {
        tracing::debug!(fields = self.errors.len(), "Request failed validation");
        (StatusCode::UNPROCESSABLE_ENTITY, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Lens {
        id: u64,
    }

    #[test]
    fn test_created_response() {
        let response = Created::new(Lens { id: 1 })
            .with_location("/products/1")
            .into_response();
        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(response.headers()[header::LOCATION], "/products/1");
    }

    #[test]
    fn test_created_skips_invalid_location() {
        let response = Created::new(Lens { id: 1 })
            .with_location("/products/\n1")
            .into_response();
        assert_eq!(response.status(), StatusCode::CREATED);
        assert!(response.headers().get(header::LOCATION).is_none());
    }

    #[test]
    fn test_validation_error() {
        let mut error = ValidationError::new("Validation failed");
        error.add_field_error("model", "REQUIRED", "model is required");
        error.add_field_error("weight", "INVALID_TYPE", "weight must be an integer");
        error.add_field_error("weight", "INVALID_VALUE", "weight must be positive");

        assert!(error.has_errors());
        assert_eq!(error.error_count(), 3);
        assert_eq!(error.codes_for("weight"), vec!["INVALID_TYPE", "INVALID_VALUE"]);
        assert!(error.codes_for("brand").is_empty());
    }

    #[test]
    fn test_validation_error_status() {
        let response = ValidationError::new("Validation failed").into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
