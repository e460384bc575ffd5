//! Data models for the catalog analytics client.
//!
//! This module contains all the core data structures used throughout
//! the application for representing products, aggregated statistics,
//! and reports.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One product record as returned by the listing and recommendation
/// endpoints.
///
/// The backend serves rows straight out of its cleaned dataset, so every
/// field is treated as optional here and unknown fields are ignored. Only
/// `price` and `brand` feed the aggregator; the rest are passthrough
/// display fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Product {
    /// Unique identifier of the product.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uniq_id: Option<String>,
    /// Display title of the product.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Listed price. Absent when the upstream row was malformed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    /// Brand label. Absent or empty for unbranded listings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    /// Image URLs for display.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<String>,
}

impl Product {
    /// Returns true if the record carries a usable price: present,
    /// finite, and non-negative.
    pub fn has_valid_price(&self) -> bool {
        matches!(self.price, Some(p) if p.is_finite() && p >= 0.0)
    }

    /// Returns the trimmed brand label, or `None` when the brand is
    /// absent or empty. Records without a label never contribute to
    /// brand counts.
    pub fn brand_label(&self) -> Option<&str> {
        match self.brand.as_deref().map(str::trim) {
            Some(b) if !b.is_empty() => Some(b),
            _ => None,
        }
    }

    /// Returns the title, falling back to the id when missing.
    pub fn display_title(&self) -> &str {
        self.title
            .as_deref()
            .filter(|t| !t.is_empty())
            .or(self.uniq_id.as_deref())
            .unwrap_or("(untitled)")
    }
}

/// A brand together with its occurrence count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrandCount {
    /// Brand label.
    pub brand: String,
    /// Number of products carrying this brand.
    pub count: usize,
}

/// Aggregated statistics over one fetched catalog slice.
///
/// Recomputed in full for every fetch; never maintained incrementally.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogStats {
    /// Number of records in the input.
    pub total_count: usize,
    /// Arithmetic mean of all prices. 0.0 when the input is empty.
    pub average_price: f64,
    /// Lowest price seen. 0.0 when the input is empty.
    pub min_price: f64,
    /// Highest price seen. 0.0 when the input is empty.
    pub max_price: f64,
    /// Number of distinct non-empty brand labels.
    pub distinct_brands: usize,
    /// Highest-frequency brands, count descending, at most the
    /// configured top-N.
    pub top_brands: Vec<BrandCount>,
}

/// Metadata about one analytics run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// Base URL of the API the data came from.
    pub api_url: String,
    /// When the catalog was fetched.
    pub fetch_date: DateTime<Utc>,
    /// Number of records that entered the aggregation.
    pub products_fetched: usize,
    /// Number of records dropped for a missing or invalid price.
    pub products_skipped: usize,
    /// The `limit` query parameter sent to the listing endpoint.
    pub limit: usize,
    /// Wall-clock duration of the run in seconds.
    pub duration_seconds: f64,
}

/// The complete analytics report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    /// Metadata about the run.
    pub metadata: ReportMetadata,
    /// Aggregated catalog statistics.
    pub stats: CatalogStats,
}

/// Request body for the recommendation endpoint.
///
/// Mirrors the backend's request model; the server defaults
/// `num_recommendations` to 10 when omitted, but the client always
/// sends an explicit value.
#[derive(Debug, Clone, Serialize)]
pub struct RecommendationRequest {
    /// Title of the product to find similar items for.
    pub title: String,
    /// How many recommendations to return.
    pub num_recommendations: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_full_product() {
        let json = r#"{
            "uniq_id": "abc123",
            "title": "Free Standing Shoe Rack",
            "price": 19.99,
            "brand": "GOYMFK",
            "images": ["https://example.com/a.jpg"]
        }"#;

        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.uniq_id.as_deref(), Some("abc123"));
        assert_eq!(product.price, Some(19.99));
        assert_eq!(product.brand_label(), Some("GOYMFK"));
        assert_eq!(product.images.len(), 1);
    }

    #[test]
    fn test_deserialize_sparse_product() {
        // Backend rows can miss brand and price entirely; unknown
        // passthrough fields must not break decoding.
        let json = r#"{"title": "Mystery Item", "category": "misc"}"#;

        let product: Product = serde_json::from_str(json).unwrap();
        assert!(!product.has_valid_price());
        assert_eq!(product.brand_label(), None);
        assert_eq!(product.display_title(), "Mystery Item");
    }

    #[test]
    fn test_valid_price() {
        let mut product = Product {
            price: Some(10.0),
            ..Default::default()
        };
        assert!(product.has_valid_price());

        product.price = Some(0.0);
        assert!(product.has_valid_price());

        product.price = Some(-1.0);
        assert!(!product.has_valid_price());

        product.price = Some(f64::NAN);
        assert!(!product.has_valid_price());

        product.price = None;
        assert!(!product.has_valid_price());
    }

    #[test]
    fn test_brand_label_trims_and_skips_empty() {
        let mut product = Product {
            brand: Some("  Acme  ".to_string()),
            ..Default::default()
        };
        assert_eq!(product.brand_label(), Some("Acme"));

        product.brand = Some("   ".to_string());
        assert_eq!(product.brand_label(), None);

        product.brand = Some(String::new());
        assert_eq!(product.brand_label(), None);
    }

    #[test]
    fn test_display_title_fallbacks() {
        let product = Product {
            uniq_id: Some("id-1".to_string()),
            title: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(product.display_title(), "id-1");

        let empty = Product::default();
        assert_eq!(empty.display_title(), "(untitled)");
    }

    #[test]
    fn test_recommendation_request_serializes() {
        let request = RecommendationRequest {
            title: "shoe rack".to_string(),
            num_recommendations: 5,
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["title"], "shoe rack");
        assert_eq!(json["num_recommendations"], 5);
    }
}
