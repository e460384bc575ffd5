//! Shopstat - Product Catalog Analytics CLI
//!
//! A CLI client for the Product Recommendation API that fetches product
//! listings, computes catalog statistics, and writes analytics reports.
//! It can also query the recommendation endpoint for a product title.
//!
//! Exit codes:
//!   0 - Success
//!   1 - Runtime error (connection, timeout, config, write failure, etc.)
//!   2 - Recommendation title not found in the catalog

mod analytics;
mod api;
mod cli;
mod config;
mod models;
mod report;
mod search;

use anyhow::{Context, Result};
use api::ApiClient;
use chrono::Utc;
use cli::{Args, OutputFormat};
use config::Config;
use indicatif::{ProgressBar, ProgressStyle};
use models::{Report, ReportMetadata};
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};
use tracing_subscriber::FmtSubscriber;

/// How many title suggestions to print after a failed recommendation lookup.
const MAX_TITLE_SUGGESTIONS: usize = 5;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        return handle_init_config();
    }

    // Initialize logging
    init_logging(&args);

    info!("Shopstat v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);

    match run(args).await {
        Ok(exit_code) => {
            std::process::exit(exit_code);
        }
        Err(e) => {
            error!("Run failed: {}", e);
            eprintln!("\n❌ Error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Handle --init-config: generate a default .shopstat.toml.
fn handle_init_config() -> Result<()> {
    let path = std::path::Path::new(".shopstat.toml");

    if path.exists() {
        eprintln!("⚠️  .shopstat.toml already exists. Remove it first or edit it manually.");
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content).context("Failed to write .shopstat.toml")?;

    println!("✅ Created .shopstat.toml with default settings.");
    println!("   Edit it to customize the API URL, fetch limit, and report options.");
    Ok(())
}

/// Initialize logging based on verbosity settings.
fn init_logging(args: &Args) {
    let level = args.log_level();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");
}

/// Load configuration from file or use defaults.
fn load_config(args: &Args) -> Result<Config> {
    // Try explicit config path
    if let Some(ref config_path) = args.config {
        info!("Loading config from: {}", config_path.display());
        return Config::load(config_path);
    }

    // Try default location
    match Config::load_default() {
        Ok(Some(config)) => {
            info!("Loaded default config from .shopstat.toml");
            Ok(config)
        }
        Ok(None) => {
            debug!("No config file found, using defaults");
            Ok(Config::default())
        }
        Err(e) => {
            warn!("Failed to load config: {}", e);
            Ok(Config::default())
        }
    }
}

/// Dispatch the selected mode. Returns the exit code.
async fn run(args: Args) -> Result<i32> {
    // Load configuration
    let mut config = load_config(&args)?;
    config.merge_with_args(&args);

    let client = ApiClient::new(&config.api.url, config.api.timeout_seconds)?;

    if args.list_titles {
        return run_list_titles(&client, &args).await;
    }

    if let Some(ref title) = args.recommend {
        return run_recommend(&client, &args, title).await;
    }

    run_analytics(&client, &args, &config).await
}

/// Analytics mode: fetch the listing, aggregate, write the report.
async fn run_analytics(client: &ApiClient, args: &Args, config: &Config) -> Result<i32> {
    let start_time = Instant::now();

    println!("📥 Fetching products from: {}", client.base_url());
    let spinner = start_spinner("Fetching product listing...", args.quiet);
    let fetched = client.fetch_products(config.api.limit).await;
    finish_spinner(spinner);

    let fetched = fetched.context("Failed to fetch product listing")?;
    info!(
        "Fetched {} products ({} skipped for invalid price)",
        fetched.products.len(),
        fetched.skipped
    );

    println!("📊 Computing catalog statistics...");
    let stats = analytics::aggregate(&fetched.products, config.report.top_brands);

    let duration = start_time.elapsed().as_secs_f64();
    let metadata = ReportMetadata {
        api_url: client.base_url().to_string(),
        fetch_date: Utc::now(),
        products_fetched: fetched.products.len(),
        products_skipped: fetched.skipped,
        limit: config.api.limit,
        duration_seconds: duration,
    };

    let report = Report { metadata, stats };

    // Generate and save the report
    println!("📝 Generating report...");
    let output = match args.format {
        OutputFormat::Json => report::generate_json_report(&report)?,
        OutputFormat::Markdown => report::generate_markdown_report(&report),
    };

    std::fs::write(&args.output, &output)
        .with_context(|| format!("Failed to write report to {}", args.output.display()))?;

    // Print summary
    println!("\n📈 Catalog Summary:");
    for line in report::generate_summary_text(&report.stats).lines() {
        println!("   {}", line);
    }
    println!("   Duration: {:.1}s", duration);
    println!(
        "\n✅ Analytics complete! Report saved to: {}",
        args.output.display()
    );

    Ok(0)
}

/// Recommendation mode: query the backend for similar products.
async fn run_recommend(client: &ApiClient, args: &Args, title: &str) -> Result<i32> {
    println!("🔎 Requesting {} recommendations for: {}", args.num_recommendations, title);

    let spinner = start_spinner("Querying recommendation endpoint...", args.quiet);
    let result = client
        .fetch_recommendations(title, args.num_recommendations)
        .await;
    finish_spinner(spinner);

    match result {
        Ok(products) => {
            info!("Received {} recommendations", products.len());
            println!("\n{}", report::format_recommendations(&products));
            Ok(0)
        }
        Err(e) if e.is_not_found() => {
            eprintln!("\n⛔ {}", e);
            suggest_alternatives(client, title).await;
            Ok(2)
        }
        Err(e) => Err(e).context("Failed to fetch recommendations"),
    }
}

/// Print close title matches after a failed recommendation lookup.
///
/// Suggestion failures are cosmetic; they are logged and swallowed so the
/// original not-found exit code survives.
async fn suggest_alternatives(client: &ApiClient, title: &str) {
    let titles = match client.fetch_titles().await {
        Ok(titles) => titles,
        Err(e) => {
            warn!("Could not fetch titles for suggestions: {}", e);
            return;
        }
    };

    let suggestions = search::suggest_titles(title, &titles, MAX_TITLE_SUGGESTIONS);
    if suggestions.is_empty() {
        return;
    }

    eprintln!("\nDid you mean:");
    for suggestion in suggestions {
        eprintln!("  - {}", suggestion);
    }
}

/// List-titles mode: print the autocomplete catalog.
async fn run_list_titles(client: &ApiClient, args: &Args) -> Result<i32> {
    println!("📥 Fetching titles from: {}", client.base_url());

    let spinner = start_spinner("Fetching catalog titles...", args.quiet);
    let titles = client.fetch_titles().await;
    finish_spinner(spinner);

    let titles = titles.context("Failed to fetch catalog titles")?;
    info!("Fetched {} titles", titles.len());

    println!("\n{}", report::format_titles(&titles));
    println!("\n   Total: {} titles", titles.len());

    Ok(0)
}

/// Start a spinner for a network call, unless running quiet.
fn start_spinner(message: &str, quiet: bool) -> Option<ProgressBar> {
    if quiet {
        return None;
    }

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    Some(pb)
}

/// Stop and clear a spinner if one is running.
fn finish_spinner(spinner: Option<ProgressBar>) {
    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }
}
