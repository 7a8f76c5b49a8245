//! Catalog product documents.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use loomwood_core::{ProductCategory, ProductId};

use crate::components::list_store::Keyed;

use super::common::ImageRef;

/// `_type` discriminator for product documents.
pub const DOC_TYPE: &str = "product";

/// A catalog product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductDoc {
    #[serde(rename = "_id")]
    pub id: ProductId,
    #[serde(rename = "_createdAt")]
    pub created_at: DateTime<Utc>,
    pub name: String,
    #[serde(default)]
    pub image: Option<ImageRef>,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(default)]
    pub description: String,
    /// Whole-number discount percentage (0 when not on sale).
    #[serde(default)]
    pub discount: i64,
    #[serde(default)]
    pub featured: bool,
    pub stock: i64,
    pub category: ProductCategory,
}

impl Keyed for ProductDoc {
    fn key(&self) -> &str {
        self.id.as_str()
    }
}

/// Create payload for a product document.
#[derive(Debug, Clone, Serialize)]
pub struct NewProduct {
    #[serde(rename = "_type")]
    pub doc_type: &'static str,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<ImageRef>,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub description: String,
    pub discount: i64,
    pub featured: bool,
    pub stock: i64,
    pub category: ProductCategory,
}

/// Patch payload for a product: names only the fields allowed to change.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProductPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<ImageRef>,
    #[serde(
        default,
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub price: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub featured: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<ProductCategory>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_deserialize_wire_document() {
        let doc: ProductDoc = serde_json::from_str(
            r#"{
                "_id": "product-11",
                "_type": "product",
                "_createdAt": "2025-11-05T10:15:00Z",
                "name": "Fjord Lounge Chair",
                "image": {"_type": "image", "asset": {"_ref": "image-aa11-900x900-jpg", "_type": "reference"}},
                "price": 449.5,
                "description": "Steam-bent oak frame with wool upholstery.",
                "discount": 15,
                "featured": true,
                "stock": 8,
                "category": "Chair"
            }"#,
        )
        .unwrap();

        assert_eq!(doc.name, "Fjord Lounge Chair");
        assert_eq!(doc.price, Decimal::from_str("449.5").unwrap());
        assert_eq!(doc.category, ProductCategory::Chair);
        assert_eq!(doc.image.unwrap().asset_ref(), "image-aa11-900x900-jpg");
    }

    #[test]
    fn test_optional_fields_default() {
        let doc: ProductDoc = serde_json::from_str(
            r#"{
                "_id": "product-12",
                "_createdAt": "2025-11-05T10:15:00Z",
                "name": "Brygge Sofa",
                "price": 1299.0,
                "stock": 3,
                "category": "Sofa"
            }"#,
        )
        .unwrap();
        assert_eq!(doc.discount, 0);
        assert!(!doc.featured);
        assert!(doc.image.is_none());
    }

    #[test]
    fn test_new_product_carries_type_discriminator() {
        let new_product = NewProduct {
            doc_type: DOC_TYPE,
            name: "Brygge Sofa".to_string(),
            image: None,
            price: Decimal::from_str("1299").unwrap(),
            description: String::new(),
            discount: 0,
            featured: false,
            stock: 3,
            category: ProductCategory::Sofa,
        };
        let json = serde_json::to_value(&new_product).unwrap();
        assert_eq!(json["_type"], "product");
        assert_eq!(json["category"], "Sofa");
        assert!(json.get("image").is_none());
        // Prices go over the wire as numbers
        assert!(json["price"].is_f64() || json["price"].is_i64());
    }

    #[test]
    fn test_patch_names_only_changed_fields() {
        let patch = ProductPatch {
            stock: Some(4),
            featured: Some(true),
            ..ProductPatch::default()
        };
        let json = serde_json::to_value(&patch).unwrap();
        assert_eq!(json, serde_json::json!({"stock": 4, "featured": true}));
    }
}
