//! Shared wire types used across document types.

use serde::{Deserialize, Serialize};

use loomwood_core::AssetId;

/// A reference to another document or asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    /// Referenced document id.
    #[serde(rename = "_ref")]
    pub reference: String,
    /// Always `"reference"`.
    #[serde(rename = "_type")]
    pub kind: String,
}

impl Reference {
    /// Create a reference to the given id.
    #[must_use]
    pub fn to(id: impl Into<String>) -> Self {
        Self {
            reference: id.into(),
            kind: "reference".to_string(),
        }
    }
}

/// An image field: a typed wrapper around an asset reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRef {
    /// Always `"image"`.
    #[serde(rename = "_type")]
    pub kind: String,
    /// The referenced stored asset.
    pub asset: Reference,
}

impl ImageRef {
    /// Build an image field pointing at a stored asset id.
    #[must_use]
    pub fn from_asset_id(asset_id: impl Into<String>) -> Self {
        Self {
            kind: "image".to_string(),
            asset: Reference::to(asset_id),
        }
    }

    /// The raw asset reference string.
    #[must_use]
    pub fn asset_ref(&self) -> &str {
        &self.asset.reference
    }
}

/// A stored image asset, as returned by the asset upload endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageAsset {
    /// Asset id (also usable as an image reference).
    #[serde(rename = "_id")]
    pub id: AssetId,
    /// Public CDN URL.
    pub url: String,
}

/// Postal address nested on user and order documents.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostalAddress {
    #[serde(default)]
    pub street: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub zip: String,
}

impl PostalAddress {
    /// Single-line rendering for list cards.
    #[must_use]
    pub fn display_line(&self) -> String {
        let parts: Vec<&str> = [self.street.as_str(), self.city.as_str(), self.zip.as_str()]
            .into_iter()
            .filter(|s| !s.is_empty())
            .collect();
        parts.join(", ")
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_image_ref_wire_shape() {
        let image = ImageRef::from_asset_id("image-a1b2c3-800x600-jpg");
        let json = serde_json::to_value(&image).unwrap();
        assert_eq!(json["_type"], "image");
        assert_eq!(json["asset"]["_type"], "reference");
        assert_eq!(json["asset"]["_ref"], "image-a1b2c3-800x600-jpg");
        assert_eq!(image.asset_ref(), "image-a1b2c3-800x600-jpg");
    }

    #[test]
    fn test_postal_address_display_line() {
        let addr = PostalAddress {
            street: "12 Alder Way".to_string(),
            city: "Portland".to_string(),
            zip: "97201".to_string(),
        };
        assert_eq!(addr.display_line(), "12 Alder Way, Portland, 97201");

        let partial = PostalAddress {
            street: String::new(),
            city: "Portland".to_string(),
            zip: String::new(),
        };
        assert_eq!(partial.display_line(), "Portland");
    }

    #[test]
    fn test_postal_address_tolerates_missing_fields() {
        let addr: PostalAddress = serde_json::from_str(r#"{"city": "Bend"}"#).unwrap();
        assert_eq!(addr.city, "Bend");
        assert_eq!(addr.street, "");
    }
}
