//! Pinecone-style vector index client
//!
//! The index is an external store whose contents are populated out of band;
//! this client only shapes the query request (vector, topK, includeMetadata)
//! and passes the ranked matches through.

use reqwest::Client;
use serde::Deserialize;
use serde::Serialize;
use tracing::debug;

use crate::config::AppConfig;
use crate::errors::Result;
use crate::errors::VirtualTaError;

/// Metadata stored alongside each indexed vector
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MatchMetadata {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub text: String,
}

/// One ranked result from a similarity query
#[derive(Debug, Clone, Deserialize)]
pub struct Match {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub score: Option<f32>,
    #[serde(default)]
    pub metadata: MatchMetadata,
}

/// Client for querying the vector index data plane
pub struct VectorIndexClient {
    endpoint: String,
    api_key: String,
    client: Client,
}

impl VectorIndexClient {
    /// Create a new index client
    ///
    /// # Errors
    /// - HTTP client build errors (invalid configuration)
    pub fn new(endpoint: String, api_key: String) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(120))
            .pool_idle_timeout(std::time::Duration::from_secs(30))
            .build()
            .map_err(|e| VirtualTaError::Http(e.to_string()))?;

        Ok(Self {
            endpoint,
            api_key,
            client,
        })
    }

    /// Create a client from application configuration
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        Self::new(config.index_endpoint(), config.pinecone.api_key.clone())
    }

    /// Query the index for the nearest neighbors of a vector
    ///
    /// An empty result set is not an error; it means the index has no
    /// entries close to the query (or no entries at all).
    ///
    /// # Errors
    /// - API request failures (network errors, timeouts, authentication failures)
    /// - Invalid API responses (malformed JSON)
    pub async fn query(
        &self,
        vector: &[f32],
        top_k: usize,
        include_metadata: bool,
    ) -> Result<Vec<Match>> {
        #[derive(Serialize)]
        struct QueryRequest<'a> {
            vector: &'a [f32],
            #[serde(rename = "topK")]
            top_k: usize,
            #[serde(rename = "includeMetadata")]
            include_metadata: bool,
        }

        #[derive(Deserialize)]
        struct QueryResponse {
            #[serde(default)]
            matches: Vec<Match>,
        }

        let url = format!("{}/query", self.endpoint);
        debug!("Querying vector index: {} (topK={})", url, top_k);

        let request = QueryRequest {
            vector,
            top_k,
            include_metadata,
        };

        let response = self
            .client
            .post(&url)
            .header("Api-Key", &self.api_key)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| VirtualTaError::Http(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(VirtualTaError::Retrieval(format!(
                "Vector index error ({status}): {error_text}"
            )));
        }

        let result: QueryResponse = response.json().await.map_err(|e| {
            VirtualTaError::Retrieval(format!("Failed to parse response: {e}"))
        })?;

        Ok(result.matches)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_deserializes_with_missing_metadata_fields() {
        let raw = r#"{"id": "doc-1", "score": 0.87, "metadata": {"url": "https://example.com"}}"#;
        let m: Match = serde_json::from_str(raw).unwrap();
        assert_eq!(m.id, "doc-1");
        assert_eq!(m.metadata.url, "https://example.com");
        assert_eq!(m.metadata.text, "");
    }

    #[test]
    fn test_match_deserializes_without_metadata() {
        let raw = r#"{"id": "doc-2"}"#;
        let m: Match = serde_json::from_str(raw).unwrap();
        assert_eq!(m.metadata.url, "");
        assert!(m.score.is_none());
    }
}
