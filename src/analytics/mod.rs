//! Catalog analytics.
//!
//! This module holds the pure aggregation logic that turns a fetched
//! product listing into summary statistics.

pub mod aggregator;

pub use aggregator::*;
