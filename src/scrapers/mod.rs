//! Fetch-parse-ingest pipeline for the headline listing.
//!
//! One `/scrape` request runs three phases:
//!
//! 1. **Fetching**: GET the listing page from the configured source URL
//! 2. **Parsing**: pull one [`NewArticle`] out of every listing card
//!    (see [`npr::parse_listing`])
//! 3. **Ingesting**: create one Article document per card, with up to
//!    `concurrency` creates in flight at once
//!
//! Ingest waits for every create before returning, so the caller always gets
//! a complete [`IngestReport`]. A failed create is logged and counted; it does
//! not stop the remaining creates. Nothing is deduplicated: scraping the same
//! page twice stores every card twice.

pub mod npr;

use std::time::Duration;

use futures::stream::{self, StreamExt};
use reqwest::Client;
use tracing::{debug, error, info, instrument};
use url::Url;

use crate::error::{AppError, Result};
use crate::models::NewArticle;
use crate::store::Store;
use crate::utils::truncate_for_log;

/// The listing page scraped when no other source is configured.
pub const DEFAULT_SOURCE_URL: &str = "https://www.npr.org/sections/world/";

/// Outcome of one ingest run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct IngestReport {
    /// Number of Article documents created.
    pub created: usize,
    /// One message per card whose create failed.
    pub failed: Vec<String>,
}

impl IngestReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Shared handle for running the pipeline against one source page.
#[derive(Debug, Clone)]
pub struct Scraper {
    client: Client,
    source: Url,
    concurrency: usize,
}

impl Scraper {
    pub fn new(source: Url, concurrency: usize) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(concat!("headline_notes/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self::with_client(client, source, concurrency))
    }

    /// Build a scraper around an existing HTTP client.
    pub fn with_client(client: Client, source: Url, concurrency: usize) -> Self {
        Self {
            client,
            source,
            concurrency: concurrency.max(1),
        }
    }

    pub fn source(&self) -> &Url {
        &self.source
    }

    /// Fetch the source page, parse its cards and store one article per card.
    ///
    /// # Errors
    ///
    /// Fails only when the page itself cannot be fetched. Per-card storage
    /// failures are reported in the returned [`IngestReport`].
    #[instrument(level = "info", skip_all, fields(source = %self.source))]
    pub async fn run(&self, store: &dyn Store) -> Result<IngestReport> {
        let html = fetch_listing(&self.client, &self.source).await?;
        let records = npr::parse_listing(&html, &self.source);
        info!(count = records.len(), "Parsed listing cards");

        let report = ingest(store, records, self.concurrency).await;
        info!(
            created = report.created,
            failed = report.failed.len(),
            "Ingest complete"
        );
        Ok(report)
    }
}

/// GET `url` and return the body, treating any non-2xx status as an error.
#[instrument(level = "info", skip_all, fields(%url))]
pub async fn fetch_listing(client: &Client, url: &Url) -> Result<String> {
    let response = client.get(url.clone()).send().await?;
    let status = response.status();
    if !status.is_success() {
        error!(%status, "Listing fetch returned non-success status");
        return Err(AppError::UpstreamStatus(status.as_u16()));
    }

    let html = response.text().await?;
    debug!(bytes = html.len(), "Fetched listing page");
    Ok(html)
}

/// Create one article per record, `concurrency` at a time, and wait for all
/// of them. Completion order is unspecified.
pub async fn ingest(store: &dyn Store, records: Vec<NewArticle>, concurrency: usize) -> IngestReport {
    let results: Vec<_> = stream::iter(records)
        .map(|record| async move {
            let title = record.title.clone().unwrap_or_default();
            match store.create_article(record).await {
                Ok(article) => {
                    debug!(article_id = %article.id, title = %truncate_for_log(&title, 80), "Stored article");
                    Ok(())
                }
                Err(e) => {
                    error!(error = %e, title = %truncate_for_log(&title, 80), "Failed to store article");
                    Err(e.to_string())
                }
            }
        })
        .buffer_unordered(concurrency.max(1))
        .collect()
        .await;

    let mut report = IngestReport::default();
    for result in results {
        match result {
            Ok(()) => report.created += 1,
            Err(message) => report.failed.push(message),
        }
    }
    report
}
