use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use tracing::error;

use super::AppState;
use crate::error::Result;

#[derive(Debug, Serialize)]
pub struct PartialScrape {
    pub error: String,
    pub created: usize,
    pub failed: Vec<String>,
}

/// GET /scrape
///
/// Runs the whole pipeline and answers once every article write has finished:
/// plain-text `Scraped` when all of them succeeded, a 500 with the per-card
/// failures otherwise.
pub async fn scrape(State(state): State<Arc<AppState>>) -> Result<Response> {
    let report = state.scraper.run(state.store.as_ref()).await?;

    if report.is_complete() {
        return Ok("Scraped".into_response());
    }

    error!(
        created = report.created,
        failed = report.failed.len(),
        "Scrape stored only part of the listing"
    );
    let total = report.created + report.failed.len();
    let body = PartialScrape {
        error: format!("{} of {total} articles failed to store", report.failed.len()),
        created: report.created,
        failed: report.failed,
    };
    Ok((StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response())
}
