//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use clap::Parser;
use std::path::PathBuf;

/// Shopstat - catalog analytics client for the Product Recommendation API
///
/// Fetch a product listing, compute catalog statistics (counts, average
/// price, top brands), and write a Markdown/JSON report. Can also query
/// the recommendation endpoint for a given product title.
///
/// Examples:
///   shopstat
///   shopstat --api-url http://127.0.0.1:8000 --limit 500 --format json
///   shopstat --recommend "goymfk 1pc free standing shoe rack"
///   shopstat --list-titles
///   shopstat --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// Base URL of the Product Recommendation API
    #[arg(
        short,
        long,
        default_value = "http://127.0.0.1:8000",
        env = "SHOPSTAT_API_URL",
        value_name = "URL"
    )]
    pub api_url: String,

    /// Maximum number of products to fetch for analytics
    #[arg(short, long, default_value = "2000", value_name = "COUNT")]
    pub limit: usize,

    /// Output file path for the report
    #[arg(
        short,
        long,
        default_value = "shopstat_report.md",
        value_name = "FILE"
    )]
    pub output: PathBuf,

    /// Output format (markdown, json)
    #[arg(long, default_value = "markdown", value_name = "FORMAT")]
    pub format: OutputFormat,

    /// Number of brands to include in the top-brands ranking
    #[arg(long, default_value = "5", value_name = "COUNT")]
    pub top_brands: usize,

    /// Get recommendations for this product title instead of running analytics
    ///
    /// The title must match a catalog entry (case-insensitive). On a miss
    /// the CLI suggests close titles and exits with code 2.
    #[arg(short, long, value_name = "TITLE")]
    pub recommend: Option<String>,

    /// Number of recommendations to request
    #[arg(short, long, default_value = "5", value_name = "COUNT")]
    pub num_recommendations: usize,

    /// List all catalog titles and exit (no report is written)
    #[arg(long)]
    pub list_titles: bool,

    /// Request timeout in seconds
    ///
    /// Overrides the config file setting when provided.
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Path to configuration file
    ///
    /// If not specified, looks for .shopstat.toml in the current directory
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (minimal output)
    #[arg(short, long)]
    pub quiet: bool,

    /// Generate a default .shopstat.toml configuration file
    #[arg(long)]
    pub init_config: bool,
}

/// Output format for the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Markdown format (default)
    #[default]
    Markdown,
    /// JSON format
    Json,
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        // Skip validation for --init-config
        if self.init_config {
            return Ok(());
        }

        if !self.api_url.starts_with("http://") && !self.api_url.starts_with("https://") {
            return Err("API URL must start with 'http://' or 'https://'".to_string());
        }

        if self.limit == 0 {
            return Err("Limit must be at least 1".to_string());
        }

        if self.top_brands == 0 {
            return Err("Top brands count must be at least 1".to_string());
        }

        if self.num_recommendations == 0 {
            return Err("Number of recommendations must be at least 1".to_string());
        }

        // The backend expands this into a 3x candidate pool over a
        // bounded catalog; keep requests reasonable.
        if self.num_recommendations > 100 {
            return Err("Number of recommendations must be at most 100".to_string());
        }

        if let Some(recommend) = &self.recommend {
            if recommend.trim().is_empty() {
                return Err("Recommendation title must not be empty".to_string());
            }
        }

        if self.recommend.is_some() && self.list_titles {
            return Err("Cannot use both --recommend and --list-titles".to_string());
        }

        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        if let Some(timeout) = self.timeout {
            if timeout == 0 {
                return Err("Timeout must be at least 1 second".to_string());
            }
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_args() -> Args {
        Args {
            api_url: "http://127.0.0.1:8000".to_string(),
            limit: 2000,
            output: PathBuf::from("test.md"),
            format: OutputFormat::Markdown,
            top_brands: 5,
            recommend: None,
            num_recommendations: 5,
            list_titles: false,
            timeout: None,
            config: None,
            verbose: false,
            quiet: false,
            init_config: false,
        }
    }

    #[test]
    fn test_valid_defaults() {
        assert!(make_args().validate().is_ok());
    }

    #[test]
    fn test_validation_invalid_url() {
        let mut args = make_args();
        args.api_url = "localhost:8000".to_string();
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_validation_zero_limit() {
        let mut args = make_args();
        args.limit = 0;
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_validation_recommendation_bounds() {
        let mut args = make_args();
        args.num_recommendations = 0;
        assert!(args.validate().is_err());

        args.num_recommendations = 101;
        assert!(args.validate().is_err());

        args.num_recommendations = 100;
        assert!(args.validate().is_ok());
    }

    #[test]
    fn test_validation_empty_recommend_title() {
        let mut args = make_args();
        args.recommend = Some("   ".to_string());
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_validation_conflicting_modes() {
        let mut args = make_args();
        args.recommend = Some("shoe rack".to_string());
        args.list_titles = true;
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_validation_conflicting_options() {
        let mut args = make_args();
        args.verbose = true;
        args.quiet = true;
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_init_config_skips_validation() {
        let mut args = make_args();
        args.api_url = "not-a-url".to_string();
        args.init_config = true;
        assert!(args.validate().is_ok());
    }

    #[test]
    fn test_log_level() {
        let mut args = make_args();
        assert_eq!(args.log_level(), tracing::Level::INFO);

        args.verbose = true;
        assert_eq!(args.log_level(), tracing::Level::DEBUG);

        args.verbose = false;
        args.quiet = true;
        assert_eq!(args.log_level(), tracing::Level::ERROR);
    }
}
