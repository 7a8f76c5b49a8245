//! Seed the content backend with a demo catalog.
//!
//! Reads products from a YAML file and creates one document per entry via
//! the backend's mutation API. Images are not seeded; attach them through
//! the dashboard afterwards.

use std::path::Path;

use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::info;

use loomwood_admin::config::SanityConfig;
use loomwood_admin::sanity::SanityClient;
use loomwood_admin::sanity::types::{NewProduct, ProductDoc, product};
use loomwood_core::ProductCategory;

/// Top-level shape of the catalog seed file.
#[derive(Debug, Deserialize)]
pub struct CatalogFile {
    pub products: Vec<SeedProduct>,
}

/// One product entry in the seed file.
#[derive(Debug, Deserialize)]
pub struct SeedProduct {
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub discount: i64,
    #[serde(default)]
    pub featured: bool,
    pub stock: i64,
    pub category: ProductCategory,
}

/// Seed products from a YAML catalog file.
///
/// # Errors
///
/// Returns an error if environment variables are missing, the file cannot
/// be read or parsed, or a create fails (entries created before the
/// failure stay created).
pub async fn catalog(file_path: &str) -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Verify file exists before touching the network
    let path = Path::new(file_path);
    if !path.exists() {
        return Err(format!("File not found: {file_path}").into());
    }

    info!(path = %file_path, "Loading catalog seed file");

    let content = tokio::fs::read_to_string(path).await?;
    let catalog: CatalogFile = serde_yaml::from_str(&content)?;

    info!(products = catalog.products.len(), "Parsed catalog");

    let config = SanityConfig::from_env()?;
    let client = SanityClient::new(&config);

    let mut created = 0usize;
    for seed in catalog.products {
        let doc = NewProduct {
            doc_type: product::DOC_TYPE,
            name: seed.name,
            image: None,
            price: seed.price,
            description: seed.description,
            discount: seed.discount,
            featured: seed.featured,
            stock: seed.stock,
            category: seed.category,
        };

        let persisted: ProductDoc = client.create(&doc).await?;
        info!(id = %persisted.id, name = %persisted.name, "Created product");
        created += 1;
    }

    info!(created, "Seeding complete");
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_parse_catalog_yaml() {
        let catalog: CatalogFile = serde_yaml::from_str(
            r"
products:
  - name: Fjord Lounge Chair
    price: 449.50
    description: Steam-bent oak frame with wool upholstery.
    discount: 15
    featured: true
    stock: 8
    category: Chair
  - name: Brygge Sofa
    price: 1299
    stock: 3
    category: Sofa
",
        )
        .unwrap();

        assert_eq!(catalog.products.len(), 2);
        let chair = &catalog.products[0];
        assert_eq!(chair.price, Decimal::from_str("449.5").unwrap());
        assert_eq!(chair.category, ProductCategory::Chair);

        // Optional fields default
        let sofa = &catalog.products[1];
        assert_eq!(sofa.discount, 0);
        assert!(!sofa.featured);
    }
}
