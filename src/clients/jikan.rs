use reqwest::{Client, StatusCode};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("Jikan request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Jikan API error: {status} - {body}")]
    Status { status: StatusCode, body: String },

    #[error("Unexpected Jikan response: {0}")]
    Decode(String),
}

/// Read-only client for the Jikan v4 manga endpoints.
///
/// Items are returned as raw JSON; their shape differs between endpoints and
/// is reconciled by normalization.
#[derive(Clone)]
pub struct JikanClient {
    client: Client,
    base_url: String,
}

impl JikanClient {
    #[must_use]
    pub fn with_shared_client(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Every manga mentioned in the latest user recommendations, in listing
    /// order.
    pub async fn recommendations(&self) -> Result<Vec<Value>, UpstreamError> {
        let url = format!("{}/recommendations/manga", self.base_url);
        let recommendations = self.get_data(&url).await?;
        Ok(flatten_recommendations(recommendations))
    }

    pub async fn top(&self) -> Result<Vec<Value>, UpstreamError> {
        let url = format!("{}/top/manga", self.base_url);
        self.get_data(&url).await
    }

    pub async fn popular(&self) -> Result<Vec<Value>, UpstreamError> {
        let url = format!("{}/top/manga?filter=bypopularity", self.base_url);
        self.get_data(&url).await
    }

    /// The single most popular safe-for-work match for `query`, if any.
    pub async fn search(&self, query: &str) -> Result<Option<Value>, UpstreamError> {
        let url = format!(
            "{}/manga?q={}&order_by=popularity&sort=asc&sfw&limit=1",
            self.base_url,
            urlencoding::encode(query)
        );
        let results = self.get_data(&url).await?;
        Ok(results.into_iter().next())
    }

    async fn get_data(&self, url: &str) -> Result<Vec<Value>, UpstreamError> {
        debug!("GET {}", url);
        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(UpstreamError::Status { status, body });
        }

        let body: Value = response.json().await?;
        match body {
            Value::Object(mut obj) => match obj.remove("data") {
                Some(Value::Array(items)) => Ok(items),
                _ => Err(UpstreamError::Decode(
                    "response has no `data` array".to_string(),
                )),
            },
            _ => Err(UpstreamError::Decode(
                "response is not a JSON object".to_string(),
            )),
        }
    }
}

/// Recommendation entries carry the recommended titles in an `entry` array.
fn flatten_recommendations(recommendations: Vec<Value>) -> Vec<Value> {
    recommendations
        .into_iter()
        .flat_map(|mut rec| match rec.get_mut("entry").map(Value::take) {
            Some(Value::Array(entries)) => entries,
            _ => Vec::new(),
        })
        .collect()
}
