//! Product records and the inputs used to create and modify them

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Entity name used in errors and logs
pub const ENTITY: &str = "Product";

/// Field names understood by the repository filters
pub mod fields {
    pub const ID: &str = "id";
    pub const MODEL: &str = "model";
    pub const BRAND: &str = "brand";
    pub const TYPE: &str = "type";
    pub const FOCAL_LENGTH: &str = "focalLength";
    pub const MAX_APERTURE: &str = "maxAperture";
    pub const MOUNT: &str = "mount";
    pub const WEIGHT: &str = "weight";
    pub const HAS_STABILIZATION: &str = "hasStabilization";
    pub const ACTIVE: &str = "active";
}

/// Lens category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum LensType {
    Prime,
    Zoom,
    Macro,
    #[serde(rename = "Tilt-Shift")]
    TiltShift,
}

impl LensType {
    /// Every category, in display order
    pub const ALL: [LensType; 4] = [Self::Prime, Self::Zoom, Self::Macro, Self::TiltShift];

    /// Canonical wire name
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Prime => "Prime",
            Self::Zoom => "Zoom",
            Self::Macro => "Macro",
            Self::TiltShift => "Tilt-Shift",
        }
    }
}

impl fmt::Display for LensType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string names no known lens category
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown lens type '{0}'")]
pub struct UnknownLensType(pub String);

impl FromStr for LensType {
    type Err = UnknownLensType;

    /// Exact, case-sensitive match on the wire name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| UnknownLensType(s.to_string()))
    }
}

/// A catalog entry
///
/// `active` is `false` only after the product has been removed. Inactive
/// products stay in storage but are invisible to every read path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: Uuid,
    #[cfg_attr(feature = "openapi", schema(example = "Nikon NIKKOR Z 24-70mm f/2.8 S"))]
    pub model: String,
    pub brand: String,
    #[serde(rename = "type")]
    pub kind: LensType,
    pub focal_length: String,
    pub max_aperture: String,
    pub mount: String,
    /// Grams
    pub weight: i32,
    pub has_stabilization: bool,
    pub active: bool,
}

/// Fields required to create a product
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    #[cfg_attr(feature = "openapi", schema(example = "Nikon NIKKOR Z 24-70mm f/2.8 S"))]
    pub model: String,
    #[cfg_attr(feature = "openapi", schema(example = "Nikon"))]
    pub brand: String,
    #[serde(rename = "type")]
    pub kind: LensType,
    #[cfg_attr(feature = "openapi", schema(example = "24-70mm"))]
    pub focal_length: String,
    #[cfg_attr(feature = "openapi", schema(example = "f/2.8", pattern = r"^f/\d+(\.\d+)?$"))]
    pub max_aperture: String,
    #[cfg_attr(feature = "openapi", schema(example = "Nikon Z Mount"))]
    pub mount: String,
    /// Grams
    #[cfg_attr(feature = "openapi", schema(example = 805, minimum = 1))]
    pub weight: i32,
    #[cfg_attr(feature = "openapi", schema(example = true))]
    pub has_stabilization: bool,
}

impl NewProduct {
    /// Build the stored record under `id`, active
    #[must_use]
    pub fn into_product(self, id: Uuid) -> Product {
        Product {
            id,
            model: self.model,
            brand: self.brand,
            kind: self.kind,
            focal_length: self.focal_length,
            max_aperture: self.max_aperture,
            mount: self.mount,
            weight: self.weight,
            has_stabilization: self.has_stabilization,
            active: true,
        }
    }
}

/// Partial update; `None` leaves the stored value untouched
///
/// `id` and `active` cannot be expressed here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct ProductPatch {
    pub model: Option<String>,
    pub brand: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<LensType>,
    pub focal_length: Option<String>,
    pub max_aperture: Option<String>,
    pub mount: Option<String>,
    pub weight: Option<i32>,
    pub has_stabilization: Option<bool>,
}

impl ProductPatch {
    /// True when no field would change
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Merge the supplied fields into `product`
    pub fn apply_to(self, product: &mut Product) {
        if let Some(model) = self.model {
            product.model = model;
        }
        if let Some(brand) = self.brand {
            product.brand = brand;
        }
        if let Some(kind) = self.kind {
            product.kind = kind;
        }
        if let Some(focal_length) = self.focal_length {
            product.focal_length = focal_length;
        }
        if let Some(max_aperture) = self.max_aperture {
            product.max_aperture = max_aperture;
        }
        if let Some(mount) = self.mount {
            product.mount = mount;
        }
        if let Some(weight) = self.weight {
            product.weight = weight;
        }
        if let Some(has_stabilization) = self.has_stabilization {
            product.has_stabilization = has_stabilization;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Product {
        NewProduct {
            model: "Nikon Z 24-70mm".into(),
            brand: "Nikon".into(),
            kind: LensType::Zoom,
            focal_length: "24-70mm".into(),
            max_aperture: "f/2.8".into(),
            mount: "Nikon Z".into(),
            weight: 805,
            has_stabilization: false,
        }
        .into_product(Uuid::now_v7())
    }

    #[test]
    fn test_lens_type_round_trips_wire_names() {
        for kind in LensType::ALL {
            assert_eq!(kind.as_str().parse::<LensType>(), Ok(kind));
        }
        assert_eq!(
            serde_json::to_value(LensType::TiltShift).unwrap(),
            json!("Tilt-Shift")
        );
    }

    #[test]
    fn test_lens_type_is_case_sensitive() {
        assert!("zoom".parse::<LensType>().is_err());
        assert!("TiltShift".parse::<LensType>().is_err());
    }

    #[test]
    fn test_new_product_is_active() {
        let product = sample();
        assert!(product.active);
        assert_eq!(product.weight, 805);
    }

    #[test]
    fn test_product_serializes_camel_case() {
        let value = serde_json::to_value(sample()).unwrap();
        assert_eq!(value["type"], "Zoom");
        assert_eq!(value["focalLength"], "24-70mm");
        assert_eq!(value["maxAperture"], "f/2.8");
        assert_eq!(value["hasStabilization"], false);
        assert_eq!(value["active"], true);
        assert!(value.get("kind").is_none());
    }

    #[test]
    fn test_empty_patch_changes_nothing() {
        let mut product = sample();
        let before = product.clone();
        let patch = ProductPatch::default();
        assert!(patch.is_empty());
        patch.apply_to(&mut product);
        assert_eq!(product, before);
    }

    #[test]
    fn test_patch_merges_only_supplied_fields() {
        let mut product = sample();
        let id = product.id;
        ProductPatch {
            weight: Some(700),
            kind: Some(LensType::Prime),
            ..Default::default()
        }
        .apply_to(&mut product);

        assert_eq!(product.id, id);
        assert_eq!(product.weight, 700);
        assert_eq!(product.kind, LensType::Prime);
        assert_eq!(product.model, "Nikon Z 24-70mm");
        assert!(product.active);
    }

    #[test]
    fn test_patch_ignores_identity_keys() {
        let patch: ProductPatch =
            serde_json::from_value(json!({"id": "x", "active": false, "mount": "F"})).unwrap();
        assert_eq!(patch.mount.as_deref(), Some("F"));
        let mut product = sample();
        patch.apply_to(&mut product);
        assert!(product.active);
    }
}
