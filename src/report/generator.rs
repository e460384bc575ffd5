//! Markdown and JSON report generation.
//!
//! This module renders the aggregated catalog statistics into the
//! Markdown report written to disk, the JSON alternative, and the short
//! summary printed to the terminal.

use crate::models::{CatalogStats, Product, Report, ReportMetadata};
use anyhow::Result;

/// Generate a complete Markdown report.
pub fn generate_markdown_report(report: &Report) -> String {
    let mut output = String::new();

    output.push_str("# Catalog Analytics Report\n\n");
    output.push_str(&generate_metadata_section(&report.metadata));
    output.push_str(&generate_stats_section(&report.stats));
    output.push_str(&generate_footer());

    output
}

/// Generate the metadata section.
fn generate_metadata_section(metadata: &ReportMetadata) -> String {
    let mut section = String::new();

    section.push_str("## Metadata\n\n");
    section.push_str(&format!("- **API:** {}\n", metadata.api_url));
    section.push_str(&format!(
        "- **Fetch Date:** {}\n",
        metadata.fetch_date.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    section.push_str(&format!("- **Requested Limit:** {}\n", metadata.limit));
    section.push_str(&format!(
        "- **Products Analyzed:** {}\n",
        metadata.products_fetched
    ));
    if metadata.products_skipped > 0 {
        section.push_str(&format!(
            "- **Records Skipped (invalid price):** {}\n",
            metadata.products_skipped
        ));
    }
    section.push_str(&format!(
        "- **Duration:** {:.1}s\n",
        metadata.duration_seconds
    ));
    section.push('\n');

    section
}

/// Generate the statistics section.
fn generate_stats_section(stats: &CatalogStats) -> String {
    let mut section = String::new();

    section.push_str("## Catalog Overview\n\n");
    section.push_str("| Total Products | Average Price | Min Price | Max Price | Distinct Brands |\n");
    section.push_str("|:---:|:---:|:---:|:---:|:---:|\n");
    section.push_str(&format!(
        "| {} | ${:.2} | ${:.2} | ${:.2} | {} |\n\n",
        stats.total_count,
        stats.average_price,
        stats.min_price,
        stats.max_price,
        stats.distinct_brands
    ));

    section.push_str(&format!("## Top {} Brands\n\n", stats.top_brands.len()));

    if stats.top_brands.is_empty() {
        section.push_str("No branded products in the fetched listing.\n\n");
        return section;
    }

    section.push_str("| Rank | Brand | Products | Share |\n");
    section.push_str("|:---:|:---|:---:|:---:|\n");

    for (rank, entry) in stats.top_brands.iter().enumerate() {
        let share = if stats.total_count > 0 {
            entry.count as f64 / stats.total_count as f64 * 100.0
        } else {
            0.0
        };
        section.push_str(&format!(
            "| {} | {} | {} | {:.1}% |\n",
            rank + 1,
            entry.brand,
            entry.count,
            share
        ));
    }
    section.push('\n');

    section
}

/// Generate the report footer.
fn generate_footer() -> String {
    "---\n\n*Report generated by shopstat*\n".to_string()
}

/// Generate a JSON report.
pub fn generate_json_report(report: &Report) -> Result<String> {
    serde_json::to_string_pretty(report).map_err(Into::into)
}

/// Generate the terminal summary printed after an analytics run.
pub fn generate_summary_text(stats: &CatalogStats) -> String {
    let mut lines = Vec::new();

    lines.push(format!("Total products: {}", stats.total_count));
    lines.push(format!("Average price: ${:.2}", stats.average_price));
    lines.push(format!(
        "Price range: ${:.2} - ${:.2}",
        stats.min_price, stats.max_price
    ));
    lines.push(format!("Distinct brands: {}", stats.distinct_brands));

    if !stats.top_brands.is_empty() {
        lines.push(String::new());
        lines.push("Top brands:".to_string());
        for entry in &stats.top_brands {
            lines.push(format!("- {}: {} products", entry.brand, entry.count));
        }
    }

    lines.join("\n")
}

/// Format a recommendation result for terminal output.
pub fn format_recommendations(products: &[Product]) -> String {
    if products.is_empty() {
        return "No recommendations returned.".to_string();
    }

    let mut lines = Vec::new();
    for (i, product) in products.iter().enumerate() {
        let price = match product.price {
            Some(p) => format!("${:.2}", p),
            None => "n/a".to_string(),
        };
        let brand = product.brand_label().unwrap_or("unbranded");
        lines.push(format!(
            "{}. {} ({}, {})",
            i + 1,
            product.display_title(),
            brand,
            price
        ));
    }

    lines.join("\n")
}

/// Format the catalog title listing for terminal output.
pub fn format_titles(titles: &[String]) -> String {
    if titles.is_empty() {
        return "No titles available.".to_string();
    }

    titles
        .iter()
        .map(|t| format!("- {}", t))
        .collect::<Vec<_>>()
        .join("\n")
}
