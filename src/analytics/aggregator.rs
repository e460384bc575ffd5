//! Product aggregation and statistics.
//!
//! This module computes catalog-level statistics from a slice of product
//! records: total count, average price, and the highest-frequency brands.
//! Everything here is a pure function of its input; the caller is
//! responsible for filtering out records without a usable price before
//! aggregating.

use crate::models::{BrandCount, CatalogStats, Product};
use std::collections::HashMap;

/// Default number of brands reported in the top list.
pub const DEFAULT_TOP_BRANDS: usize = 5;

/// Aggregate a product listing into catalog statistics.
///
/// The result is recomputed in full on every call. An empty input yields
/// all-zero statistics and an empty brand list.
pub fn aggregate(products: &[Product], top_n: usize) -> CatalogStats {
    let total_count = products.len();

    if total_count == 0 {
        return CatalogStats::default();
    }

    let mut sum = 0.0;
    let mut min_price = f64::INFINITY;
    let mut max_price = f64::NEG_INFINITY;

    for product in products {
        let price = product.price.unwrap_or(0.0);
        sum += price;
        min_price = min_price.min(price);
        max_price = max_price.max(price);
    }

    let frequency = brand_frequency(products);

    CatalogStats {
        total_count,
        average_price: sum / total_count as f64,
        min_price,
        max_price,
        distinct_brands: frequency.len(),
        top_brands: top_brands(frequency, top_n),
    }
}

/// Count products per brand in a single scan.
///
/// Entries are returned in first-seen order. Records with an absent or
/// empty brand label are skipped entirely; there is no "unknown" bucket.
pub fn brand_frequency(products: &[Product]) -> Vec<(String, usize)> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for product in products {
        let Some(brand) = product.brand_label() else {
            continue;
        };

        match index.get(brand) {
            Some(&i) => counts[i].1 += 1,
            None => {
                index.insert(brand.to_string(), counts.len());
                counts.push((brand.to_string(), 1));
            }
        }
    }

    counts
}

/// Select the `n` highest-frequency brands, count descending.
///
/// Ties are broken by first-seen order: when two brands have the same
/// count, the one encountered earlier in the input ranks first. The sort
/// is stable over the first-seen ordering of `frequency`, so the result
/// is deterministic for any input.
pub fn top_brands(frequency: Vec<(String, usize)>, n: usize) -> Vec<BrandCount> {
    let mut ranked = frequency;
    ranked.sort_by_key(|(_, count)| std::cmp::Reverse(*count));
    ranked.truncate(n);

    ranked
        .into_iter()
        .map(|(brand, count)| BrandCount { brand, count })
        .collect()
}
