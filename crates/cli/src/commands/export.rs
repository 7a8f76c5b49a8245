//! Export documents of one type as JSON.

use std::io::Write;

use serde_json::Value;
use tracing::info;

use loomwood_admin::config::SanityConfig;
use loomwood_admin::sanity::{SanityClient, queries};

/// Document types that can be exported.
const EXPORTABLE_TYPES: &[&str] = &["product", "order", "user", "message"];

/// Export all documents of `doc_type` as pretty-printed JSON, to `output`
/// or stdout.
///
/// # Errors
///
/// Returns an error for an unknown type, missing environment variables, or
/// a failed query or write.
pub async fn documents(doc_type: &str, output: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    if !EXPORTABLE_TYPES.contains(&doc_type) {
        return Err(format!(
            "Unknown document type '{doc_type}' (expected one of: {})",
            EXPORTABLE_TYPES.join(", ")
        )
        .into());
    }

    // Load environment variables
    dotenvy::dotenv().ok();

    let config = SanityConfig::from_env()?;
    let client = SanityClient::new(&config);

    let docs: Vec<Value> = client
        .query(
            queries::ALL_BY_TYPE,
            &[("type", Value::String(doc_type.to_string()))],
        )
        .await?;

    info!(count = docs.len(), doc_type, "Fetched documents");

    let json = serde_json::to_string_pretty(&docs)?;

    match output {
        Some(path) => {
            tokio::fs::write(path, &json).await?;
            info!(path, "Wrote export");
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(json.as_bytes())?;
            stdout.write_all(b"\n")?;
        }
    }

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_rejects_unknown_type() {
        let result = documents("invoice", None).await;
        let message = result.unwrap_err().to_string();
        assert!(message.contains("Unknown document type 'invoice'"));
    }
}
