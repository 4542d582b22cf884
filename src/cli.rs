//! Command-line interface definitions for the headline service.
//!
//! This module defines the CLI arguments and options using the `clap` crate.
//! Every option can also be supplied through the environment variable named
//! next to it, which is how deployments usually configure the service.

use std::path::PathBuf;

use clap::Parser;
use url::Url;

use crate::scrapers::DEFAULT_SOURCE_URL;

/// Command-line arguments for the headline service.
///
/// # Examples
///
/// ```sh
/// # Local defaults: port 3000, ./mongoHeadlines.db
/// headline_notes
///
/// # Hosted: port and database from the environment
/// PORT=8080 DATABASE_URL=sqlite:///var/lib/headlines/headlines.db headline_notes
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value_t = 3000)]
    pub port: u16,

    /// Address to bind
    #[arg(long, env = "BIND_HOST", default_value = "0.0.0.0")]
    pub bind_host: String,

    /// Database connection string (`sqlite://<path>`, a bare path, or `:memory:`)
    #[arg(short, long, env = "DATABASE_URL", default_value = "sqlite://mongoHeadlines.db")]
    pub database_url: String,

    /// Listing page fetched by /scrape
    #[arg(long, env = "SCRAPE_SOURCE_URL", default_value = DEFAULT_SOURCE_URL)]
    pub source_url: Url,

    /// Maximum article writes in flight during a scrape
    #[arg(long, env = "SCRAPE_CONCURRENCY", default_value_t = 8)]
    pub scrape_concurrency: usize,

    /// Directory of static assets served for unmatched paths
    #[arg(long, env = "PUBLIC_DIR", default_value = "public")]
    pub public_dir: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::parse_from([
            "headline_notes",
            "--port",
            "8080",
            "--database-url",
            ":memory:",
            "--source-url",
            "https://www.npr.org/sections/politics/",
        ]);

        assert_eq!(cli.port, 8080);
        assert_eq!(cli.database_url, ":memory:");
        assert_eq!(
            cli.source_url.as_str(),
            "https://www.npr.org/sections/politics/"
        );
    }

    #[test]
    fn test_cli_short_flags() {
        let cli = Cli::parse_from(["headline_notes", "-p", "4000", "-d", "/tmp/h.db"]);

        assert_eq!(cli.port, 4000);
        assert_eq!(cli.database_url, "/tmp/h.db");
    }

    #[test]
    fn test_cli_rejects_invalid_source_url() {
        let result = Cli::try_parse_from(["headline_notes", "--source-url", "not a url"]);
        assert!(result.is_err());
    }
}
