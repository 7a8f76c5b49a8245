//! HTTP client for the hosted content backend.
//!
//! Thin wrapper over the backend's data API: GROQ queries, the mutation
//! endpoint, and binary asset uploads. Mutations are submitted with
//! `returnDocuments=true` so the backend's persisted document (with its
//! generated id) is authoritative for local reconciliation.

use std::sync::Arc;

use secrecy::ExposeSecret;
use serde::{Deserialize, de::DeserializeOwned};
use serde_json::Value;
use tracing::instrument;

use crate::config::SanityConfig;

use super::{ApiError, SanityError, image, types::ImageAsset};

/// Content backend API client.
///
/// Cheaply cloneable; all clones share one connection pool.
#[derive(Clone)]
pub struct SanityClient {
    inner: Arc<SanityClientInner>,
}

struct SanityClientInner {
    client: reqwest::Client,
    project_id: String,
    dataset: String,
    api_version: String,
    token: String,
}

/// Query response envelope.
#[derive(Debug, Deserialize)]
struct QueryResponse<T> {
    result: T,
}

/// Mutation response envelope.
#[derive(Debug, Deserialize)]
struct MutationResponse {
    #[serde(default)]
    results: Vec<MutationResult>,
}

#[derive(Debug, Deserialize)]
struct MutationResult {
    #[allow(dead_code)]
    id: Option<String>,
    document: Option<Value>,
}

/// Error response envelope.
#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ErrorPayload,
}

#[derive(Debug, Deserialize)]
struct ErrorPayload {
    #[serde(rename = "type")]
    kind: Option<String>,
    description: Option<String>,
    message: Option<String>,
}

/// Asset upload response envelope.
#[derive(Debug, Deserialize)]
struct AssetResponse {
    document: ImageAsset,
}

impl SanityClient {
    /// Create a new content backend client.
    #[must_use]
    pub fn new(config: &SanityConfig) -> Self {
        let client = reqwest::Client::new();

        Self {
            inner: Arc::new(SanityClientInner {
                client,
                project_id: config.project_id.clone(),
                dataset: config.dataset.clone(),
                api_version: config.api_version.clone(),
                token: config.token.expose_secret().to_string(),
            }),
        }
    }

    /// Get the backend project id.
    #[must_use]
    pub fn project_id(&self) -> &str {
        &self.inner.project_id
    }

    /// Get the dataset name.
    #[must_use]
    pub fn dataset(&self) -> &str {
        &self.inner.dataset
    }

    fn api_base(&self) -> String {
        format!(
            "https://{}.api.sanity.io/v{}",
            self.inner.project_id, self.inner.api_version
        )
    }

    fn query_url(&self) -> String {
        format!("{}/data/query/{}", self.api_base(), self.inner.dataset)
    }

    fn mutate_url(&self) -> String {
        format!(
            "{}/data/mutate/{}?returnDocuments=true",
            self.api_base(),
            self.inner.dataset
        )
    }

    fn assets_url(&self) -> String {
        format!("{}/assets/images/{}", self.api_base(), self.inner.dataset)
    }

    /// Resolve an image asset reference to its public CDN URL.
    #[must_use]
    pub fn image_url(&self, asset_ref: &str) -> Option<String> {
        image::image_url(&self.inner.project_id, &self.inner.dataset, asset_ref)
    }

    // =========================================================================
    // Query
    // =========================================================================

    /// Execute a GROQ query and deserialize its `result`.
    ///
    /// `params` are exposed to the query as `$name`; values are
    /// JSON-encoded on the wire.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend reports one.
    #[instrument(skip(self, params), fields(query = %groq))]
    pub async fn query<T: DeserializeOwned>(
        &self,
        groq: &str,
        params: &[(&str, Value)],
    ) -> Result<T, SanityError> {
        let pairs = encode_params(groq, params);

        let response = self
            .inner
            .client
            .get(self.query_url())
            .bearer_auth(&self.inner.token)
            .query(&pairs)
            .send()
            .await?;

        let response = check_response(response).await?;
        let envelope: QueryResponse<T> = response.json().await?;
        Ok(envelope.result)
    }

    /// Count documents of a given type.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend reports one.
    #[instrument(skip(self))]
    pub async fn count(&self, doc_type: &str) -> Result<i64, SanityError> {
        self.query(
            super::queries::COUNT_BY_TYPE,
            &[("type", Value::String(doc_type.to_string()))],
        )
        .await
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Submit a batch of mutations and return the backend's results.
    async fn mutate(&self, mutations: Value) -> Result<MutationResponse, SanityError> {
        let body = serde_json::json!({ "mutations": mutations });

        let response = self
            .inner
            .client
            .post(self.mutate_url())
            .bearer_auth(&self.inner.token)
            .json(&body)
            .send()
            .await?;

        let response = check_response(response).await?;
        Ok(response.json().await?)
    }

    /// Create a new document.
    ///
    /// The document must carry its `_type` discriminator; the backend
    /// assigns the id. Returns the persisted document.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the backend reports one, or
    /// the response carries no document.
    #[instrument(skip(self, doc))]
    pub async fn create<In, Out>(&self, doc: &In) -> Result<Out, SanityError>
    where
        In: serde::Serialize + Sync,
        Out: DeserializeOwned,
    {
        let mutation = serde_json::json!([{ "create": doc }]);
        let mut response = self.mutate(mutation).await?;

        first_document(&mut response).map_or_else(
            || {
                Err(SanityError::Api(ApiError {
                    kind: None,
                    description: "create returned no document".to_string(),
                }))
            },
            |doc| Ok(serde_json::from_value(doc)?),
        )
    }

    /// Apply a partial patch to a document by id.
    ///
    /// `set` names only the fields to change; the backend returns the full
    /// updated document. No revision check is sent, so concurrent patches
    /// are last-write-wins.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the backend reports one, or
    /// the document does not exist.
    #[instrument(skip(self, set), fields(document_id = %id))]
    pub async fn patch<S, Out>(&self, id: &str, set: &S) -> Result<Out, SanityError>
    where
        S: serde::Serialize + Sync,
        Out: DeserializeOwned,
    {
        let mutation = serde_json::json!([{ "patch": { "id": id, "set": set } }]);
        let mut response = self.mutate(mutation).await?;

        first_document(&mut response).map_or_else(
            || Err(SanityError::NotFound(id.to_string())),
            |doc| Ok(serde_json::from_value(doc)?),
        )
    }

    /// Delete a document by id.
    ///
    /// Deleting an id that is already gone is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend reports one.
    #[instrument(skip(self), fields(document_id = %id))]
    pub async fn delete(&self, id: &str) -> Result<(), SanityError> {
        let mutation = serde_json::json!([{ "delete": { "id": id } }]);
        self.mutate(mutation).await?;
        Ok(())
    }

    // =========================================================================
    // Assets
    // =========================================================================

    /// Upload binary image data to the backend's asset store.
    ///
    /// Returns the stored asset document, including its public URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend reports one.
    #[instrument(skip(self, bytes), fields(bytes = bytes.len(), content_type = %content_type))]
    pub async fn upload_image(
        &self,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<ImageAsset, SanityError> {
        let response = self
            .inner
            .client
            .post(self.assets_url())
            .bearer_auth(&self.inner.token)
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .body(bytes)
            .send()
            .await?;

        let response = check_response(response).await?;
        let envelope: AssetResponse = response.json().await?;
        Ok(envelope.document)
    }
}

/// Build the query-string pairs for a GROQ request.
///
/// Parameter values are JSON-encoded, so string params arrive quoted.
fn encode_params(groq: &str, params: &[(&str, Value)]) -> Vec<(String, String)> {
    let mut pairs = Vec::with_capacity(params.len() + 1);
    pairs.push(("query".to_string(), groq.to_string()));
    for (name, value) in params {
        pairs.push((format!("${name}"), value.to_string()));
    }
    pairs
}

/// Map transport-level failures to the error taxonomy.
async fn check_response(response: reqwest::Response) -> Result<reqwest::Response, SanityError> {
    let status = response.status();

    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
        let retry_after = response
            .headers()
            .get("Retry-After")
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.parse().ok())
            .unwrap_or(60);
        return Err(SanityError::RateLimited(retry_after));
    }

    if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
        return Err(SanityError::Unauthorized(
            "Invalid or missing API token".to_string(),
        ));
    }

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        let payload = serde_json::from_str::<ErrorResponse>(&body).map_or_else(
            |_| ApiError {
                kind: None,
                description: format!("HTTP {status}: {body}"),
            },
            |e| ApiError {
                kind: e.error.kind,
                description: e
                    .error
                    .description
                    .or(e.error.message)
                    .unwrap_or_else(|| format!("HTTP {status}")),
            },
        );
        return Err(SanityError::Api(payload));
    }

    Ok(response)
}

/// Pull the first returned document out of a mutation response.
fn first_document(response: &mut MutationResponse) -> Option<Value> {
    response
        .results
        .iter_mut()
        .find_map(|r| r.document.take())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use secrecy::SecretString;

    fn test_client() -> SanityClient {
        SanityClient::new(&SanityConfig {
            project_id: "9x7k2p4q".to_string(),
            dataset: "production".to_string(),
            api_version: "2021-10-21".to_string(),
            token: SecretString::from("sk-test-token"),
        })
    }

    #[test]
    fn test_endpoint_urls() {
        let client = test_client();
        assert_eq!(
            client.query_url(),
            "https://9x7k2p4q.api.sanity.io/v2021-10-21/data/query/production"
        );
        assert_eq!(
            client.mutate_url(),
            "https://9x7k2p4q.api.sanity.io/v2021-10-21/data/mutate/production?returnDocuments=true"
        );
        assert_eq!(
            client.assets_url(),
            "https://9x7k2p4q.api.sanity.io/v2021-10-21/assets/images/production"
        );
    }

    #[test]
    fn test_encode_params_json_encodes_values() {
        let pairs = encode_params(
            "*[_id == $id][0]",
            &[("id", Value::String("product-1".to_string()))],
        );
        assert_eq!(pairs[0], ("query".to_string(), "*[_id == $id][0]".to_string()));
        // String params are JSON-encoded (quoted) on the wire
        assert_eq!(pairs[1], ("$id".to_string(), "\"product-1\"".to_string()));
    }

    #[test]
    fn test_query_envelope_parsing() {
        let envelope: QueryResponse<Vec<i64>> =
            serde_json::from_str(r#"{"result": [1, 2, 3], "ms": 12}"#).unwrap();
        assert_eq!(envelope.result, vec![1, 2, 3]);
    }

    #[test]
    fn test_mutation_envelope_parsing() {
        let mut response: MutationResponse = serde_json::from_str(
            r#"{
                "transactionId": "abc123",
                "results": [
                    {"id": "message-1", "operation": "update", "document": {"_id": "message-1", "pinned": true}}
                ]
            }"#,
        )
        .unwrap();

        let doc = first_document(&mut response).unwrap();
        assert_eq!(doc["_id"], "message-1");
        assert_eq!(doc["pinned"], true);
        // The document is taken, not cloned
        assert!(first_document(&mut response).is_none());
    }

    #[test]
    fn test_mutation_envelope_without_documents() {
        let mut response: MutationResponse =
            serde_json::from_str(r#"{"transactionId": "abc123", "results": []}"#).unwrap();
        assert!(first_document(&mut response).is_none());
    }

    #[test]
    fn test_error_envelope_parsing() {
        let envelope: ErrorResponse = serde_json::from_str(
            r#"{"error": {"type": "queryParseError", "description": "unexpected token"}}"#,
        )
        .unwrap();
        assert_eq!(envelope.error.kind.as_deref(), Some("queryParseError"));
        assert_eq!(envelope.error.description.as_deref(), Some("unexpected token"));
    }
}
