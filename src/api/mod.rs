//! HTTP client for the Product Recommendation API.

pub mod client;

pub use client::{ApiClient, ApiError};
