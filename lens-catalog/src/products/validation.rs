//! Request body validation
//!
//! Bodies are checked as raw JSON so every problem can be reported against
//! its field in one response, instead of stopping at the first serde error.
//! Unknown keys, including `id` and `active`, are ignored.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Map, Value};

use crate::responses::ValidationError;

use super::model::{fields, LensType, NewProduct, ProductPatch};

pub const REQUIRED: &str = "REQUIRED";
pub const INVALID_TYPE: &str = "INVALID_TYPE";
pub const INVALID_VALUE: &str = "INVALID_VALUE";
pub const INVALID_FORMAT: &str = "INVALID_FORMAT";
pub const INVALID_JSON: &str = "INVALID_JSON";

/// Field name used for errors about the body as a whole
pub const BODY: &str = "body";

static APERTURE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^f/\d+(\.\d+)?$").expect("aperture regex is valid")
});

/// Report for a body that could not be parsed as JSON at all
pub fn malformed_body(detail: impl Into<String>) -> ValidationError {
    let mut errors = ValidationError::new("Validation failed");
    errors.add_field_error(BODY, INVALID_JSON, detail);
    errors
}

/// Validate a create body; every field is required
pub fn validate_create(body: &Value) -> Result<NewProduct, ValidationError> {
    let mut reader = FieldReader::new(body)?;

    let model = reader.text(fields::MODEL, true);
    let brand = reader.text(fields::BRAND, true);
    let kind = reader.lens_type(true);
    let focal_length = reader.text(fields::FOCAL_LENGTH, true);
    let max_aperture = reader.aperture(true);
    let mount = reader.text(fields::MOUNT, true);
    let weight = reader.weight(true);
    let has_stabilization = reader.flag(fields::HAS_STABILIZATION, true);

    reader.finish()?;

    match (
        model,
        brand,
        kind,
        focal_length,
        max_aperture,
        mount,
        weight,
        has_stabilization,
    ) {
        (
            Some(model),
            Some(brand),
            Some(kind),
            Some(focal_length),
            Some(max_aperture),
            Some(mount),
            Some(weight),
            Some(has_stabilization),
        ) => Ok(NewProduct {
            model,
            brand,
            kind,
            focal_length,
            max_aperture,
            mount,
            weight,
            has_stabilization,
        }),
        // finish() reported every missing field already
        _ => Err(ValidationError::new("Validation failed")),
    }
}

/// Validate a partial update; only present fields are checked
pub fn validate_patch(body: &Value) -> Result<ProductPatch, ValidationError> {
    let mut reader = FieldReader::new(body)?;

    let patch = ProductPatch {
        model: reader.text(fields::MODEL, false),
        brand: reader.text(fields::BRAND, false),
        kind: reader.lens_type(false),
        focal_length: reader.text(fields::FOCAL_LENGTH, false),
        max_aperture: reader.aperture(false),
        mount: reader.text(fields::MOUNT, false),
        weight: reader.weight(false),
        has_stabilization: reader.flag(fields::HAS_STABILIZATION, false),
    };

    reader.finish()?;
    Ok(patch)
}

/// Reads typed fields out of a JSON object, collecting errors as it goes
struct FieldReader<'a> {
    object: &'a Map<String, Value>,
    errors: ValidationError,
}

impl<'a> FieldReader<'a> {
    fn new(body: &'a Value) -> Result<Self, ValidationError> {
        match body.as_object() {
            Some(object) => Ok(Self {
                object,
                errors: ValidationError::new("Validation failed"),
            }),
            None => {
                let mut errors = ValidationError::new("Validation failed");
                errors.add_field_error(BODY, INVALID_TYPE, "body must be a JSON object");
                Err(errors)
            }
        }
    }

    fn finish(self) -> Result<(), ValidationError> {
        if self.errors.has_errors() {
            Err(self.errors)
        } else {
            Ok(())
        }
    }

    /// Present value, or `None` after recording `REQUIRED` when needed
    fn value(&mut self, field: &str, required: bool) -> Option<&'a Value> {
        match self.object.get(field) {
            Some(value) => Some(value),
            None => {
                if required {
                    self.errors
                        .add_field_error(field, REQUIRED, format!("{field} is required"));
                }
                None
            }
        }
    }

    fn string(&mut self, field: &str, required: bool) -> Option<&'a str> {
        let value = self.value(field, required)?;
        match value.as_str() {
            Some(s) => Some(s),
            None => {
                self.errors
                    .add_field_error(field, INVALID_TYPE, format!("{field} must be a string"));
                None
            }
        }
    }

    fn text(&mut self, field: &str, required: bool) -> Option<String> {
        let s = self.string(field, required)?;
        if s.is_empty() {
            self.errors
                .add_field_error(field, INVALID_VALUE, format!("{field} must not be empty"));
            return None;
        }
        Some(s.to_string())
    }

    fn lens_type(&mut self, required: bool) -> Option<LensType> {
        let s = self.string(fields::TYPE, required)?;
        match s.parse() {
            Ok(kind) => Some(kind),
            Err(_) => {
                let allowed = LensType::ALL.map(|k| k.as_str()).join(", ");
                self.errors.add_field_error(
                    fields::TYPE,
                    INVALID_VALUE,
                    format!("type must be one of: {allowed}"),
                );
                None
            }
        }
    }

    fn aperture(&mut self, required: bool) -> Option<String> {
        let s = self.string(fields::MAX_APERTURE, required)?;
        if !APERTURE.is_match(s) {
            self.errors.add_field_error(
                fields::MAX_APERTURE,
                INVALID_FORMAT,
                "maxAperture must look like f/2.8",
            );
            return None;
        }
        Some(s.to_string())
    }

    fn weight(&mut self, required: bool) -> Option<i32> {
        let value = self.value(fields::WEIGHT, required)?;
        let Some(n) = value.as_i64() else {
            self.errors.add_field_error(
                fields::WEIGHT,
                INVALID_TYPE,
                "weight must be an integer",
            );
            return None;
        };
        match i32::try_from(n) {
            Ok(weight) if weight > 0 => Some(weight),
            _ => {
                self.errors.add_field_error(
                    fields::WEIGHT,
                    INVALID_VALUE,
                    "weight must be a positive integer",
                );
                None
            }
        }
    }

    fn flag(&mut self, field: &str, required: bool) -> Option<bool> {
        let value = self.value(field, required)?;
        match value.as_bool() {
            Some(b) => Some(b),
            None => {
                self.errors
                    .add_field_error(field, INVALID_TYPE, format!("{field} must be a boolean"));
                None
            }
        }
    }
}
