//! Client for the Product Recommendation API.
//!
//! This module wraps the three backend endpoints behind typed methods:
//! the product listing (`GET /products`), the autocomplete title list
//! (`GET /titles`), and the recommendation query (`POST /recommendations`).
//!
//! Records with a missing or invalid price are filtered out here, before
//! they ever reach the aggregator. The aggregation layer only sees clean
//! input; anything that goes wrong on the wire surfaces as an [`ApiError`].

use crate::models::{Product, RecommendationRequest};
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

/// Errors surfaced by the API client.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("request timed out after {seconds}s")]
    Timeout { seconds: u64 },

    #[error("cannot connect to API at {url}")]
    Connect { url: String },

    #[error("{detail}")]
    NotFound { detail: String },

    #[error("API error {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed API response: {0}")]
    MalformedResponse(#[source] reqwest::Error),

    #[error("request failed: {0}")]
    Transport(#[source] reqwest::Error),
}

impl ApiError {
    /// True when the backend rejected the query with 404 (unknown
    /// product title).
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound { .. })
    }
}

/// Response envelope of the titles endpoint.
#[derive(Debug, Deserialize)]
struct TitlesResponse {
    titles: Vec<String>,
}

/// FastAPI-style error body, `{"detail": "..."}`.
#[derive(Debug, Deserialize)]
struct ErrorDetail {
    detail: String,
}

/// Result of fetching the product listing.
#[derive(Debug)]
pub struct FetchedProducts {
    /// Records with a usable price, ready for aggregation.
    pub products: Vec<Product>,
    /// Number of records dropped for a missing or invalid price.
    pub skipped: usize,
}

/// Typed client for the Product Recommendation API.
pub struct ApiClient {
    base_url: String,
    timeout_seconds: u64,
    http_client: reqwest::Client,
}

impl ApiClient {
    /// Create a client for the given base URL with a request timeout.
    pub fn new(base_url: &str, timeout_seconds: u64) -> Result<Self, ApiError> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .build()
            .map_err(ApiError::Transport)?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout_seconds,
            http_client,
        })
    }

    /// The base URL this client talks to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch up to `limit` products from the listing endpoint.
    ///
    /// Records without a usable price are dropped here and counted in
    /// the result, so downstream aggregation is total over its input.
    pub async fn fetch_products(&self, limit: usize) -> Result<FetchedProducts, ApiError> {
        let url = endpoint_url(&self.base_url, "products");
        debug!("GET {} (limit={})", url, limit);

        let response = self
            .http_client
            .get(&url)
            .query(&[("limit", limit)])
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let response = self.check_status(response).await?;

        let raw: Vec<Product> = response.json().await.map_err(ApiError::MalformedResponse)?;

        let total = raw.len();
        let products: Vec<Product> =
            raw.into_iter().filter(Product::has_valid_price).collect();
        let skipped = total - products.len();

        if skipped > 0 {
            warn!(
                "Skipped {} of {} records with missing or invalid price",
                skipped, total
            );
        }

        Ok(FetchedProducts { products, skipped })
    }

    /// Fetch all catalog titles (the search autocomplete list).
    pub async fn fetch_titles(&self) -> Result<Vec<String>, ApiError> {
        let url = endpoint_url(&self.base_url, "titles");
        debug!("GET {}", url);

        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let response = self.check_status(response).await?;

        let envelope: TitlesResponse =
            response.json().await.map_err(ApiError::MalformedResponse)?;

        Ok(envelope.titles)
    }

    /// Request recommendations for a product title.
    ///
    /// An unknown title surfaces as [`ApiError::NotFound`] carrying the
    /// backend's detail message.
    pub async fn fetch_recommendations(
        &self,
        title: &str,
        num_recommendations: usize,
    ) -> Result<Vec<Product>, ApiError> {
        let url = endpoint_url(&self.base_url, "recommendations");
        debug!("POST {} (title={:?}, n={})", url, title, num_recommendations);

        let request = RecommendationRequest {
            title: title.to_string(),
            num_recommendations,
        };

        let response = self
            .http_client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let response = self.check_status(response).await?;

        response.json().await.map_err(ApiError::MalformedResponse)
    }

    /// Map a non-success status to an error, extracting the FastAPI
    /// `detail` field from 404 bodies when present.
    async fn check_status(
        &self,
        response: reqwest::Response,
    ) -> Result<reqwest::Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();

        if status == reqwest::StatusCode::NOT_FOUND {
            let detail = serde_json::from_str::<ErrorDetail>(&body)
                .map(|e| e.detail)
                .unwrap_or_else(|_| "Product not found.".to_string());
            return Err(ApiError::NotFound { detail });
        }

        Err(ApiError::Status {
            status: status.as_u16(),
            body,
        })
    }

    /// Classify a transport-level reqwest error.
    fn classify(&self, error: reqwest::Error) -> ApiError {
        if error.is_timeout() {
            ApiError::Timeout {
                seconds: self.timeout_seconds,
            }
        } else if error.is_connect() {
            ApiError::Connect {
                url: self.base_url.clone(),
            }
        } else {
            ApiError::Transport(error)
        }
    }
}

/// Join a base URL and an endpoint path without doubling slashes.
pub fn endpoint_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_url_joining() {
        assert_eq!(
            endpoint_url("http://127.0.0.1:8000", "products"),
            "http://127.0.0.1:8000/products"
        );
        assert_eq!(
            endpoint_url("http://127.0.0.1:8000/", "/titles"),
            "http://127.0.0.1:8000/titles"
        );
    }

    #[test]
    fn test_client_trims_trailing_slash() {
        let client = ApiClient::new("http://localhost:8000/", 30).unwrap();
        assert_eq!(client.base_url(), "http://localhost:8000");
    }

    #[test]
    fn test_not_found_detection() {
        let not_found = ApiError::NotFound {
            detail: "Product 'x' not found.".to_string(),
        };
        assert!(not_found.is_not_found());
        assert_eq!(not_found.to_string(), "Product 'x' not found.");

        let status = ApiError::Status {
            status: 500,
            body: "boom".to_string(),
        };
        assert!(!status.is_not_found());
    }

    #[test]
    fn test_error_display() {
        let timeout = ApiError::Timeout { seconds: 30 };
        assert_eq!(timeout.to_string(), "request timed out after 30s");

        let connect = ApiError::Connect {
            url: "http://localhost:8000".to_string(),
        };
        assert!(connect.to_string().contains("http://localhost:8000"));
    }

    #[test]
    fn test_titles_envelope_deserializes() {
        let json = r#"{"titles": ["shoe rack", "desk lamp"]}"#;
        let envelope: TitlesResponse = serde_json::from_str(json).unwrap();
        assert_eq!(envelope.titles.len(), 2);
    }

    #[test]
    fn test_error_detail_deserializes() {
        let json = r#"{"detail": "Product 'foo' not found."}"#;
        let detail: ErrorDetail = serde_json::from_str(json).unwrap();
        assert_eq!(detail.detail, "Product 'foo' not found.");
    }
}
