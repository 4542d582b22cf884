//! HTTP surface of the headline service.
//!
//! | Method | Path | Handler |
//! |--------|------|---------|
//! | GET | `/scrape` | [`scrape::scrape`] |
//! | GET | `/notes` | [`notes::list_notes`] |
//! | DELETE | `/notes/deleteNote/:note_id/:article_id` | [`notes::delete_note`] |
//! | GET | `/articles` | [`articles::list_articles`] |
//! | DELETE | `/articles/deleteAll` | [`articles::delete_all_articles`] |
//! | GET | `/articles/:id` | [`articles::get_article`] |
//! | POST | `/articles/:id` | [`articles::attach_note`] |
//! | GET | `/saved` | [`saved::list_saved`] |
//! | POST | `/saved/:id` | [`saved::mark_saved`] |
//! | POST | `/deleteSaved/:id` | [`saved::mark_unsaved`] |
//!
//! Successful responses carry the entity (or `null` when nothing matched)
//! with status 200. Failures carry `{"error": "..."}` with a 4xx/5xx status,
//! see [`error`].

pub mod articles;
pub mod error;
pub mod form;
pub mod notes;
pub mod saved;
pub mod scrape;

use std::path::Path;
use std::sync::Arc;

use axum::Router;
use axum::routing::{delete, get, post};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::scrapers::Scraper;
use crate::store::Store;

/// Shared application state handed to every handler.
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub scraper: Scraper,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>, scraper: Scraper) -> Self {
        Self { store, scraper }
    }
}

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/scrape", get(scrape::scrape))
        .route("/notes", get(notes::list_notes))
        .route(
            "/notes/deleteNote/:note_id/:article_id",
            delete(notes::delete_note),
        )
        .route("/articles", get(articles::list_articles))
        .route("/articles/deleteAll", delete(articles::delete_all_articles))
        .route(
            "/articles/:id",
            get(articles::get_article).post(articles::attach_note),
        )
        .route("/saved", get(saved::list_saved))
        .route("/saved/:id", post(saved::mark_saved))
        .route("/deleteSaved/:id", post(saved::mark_unsaved))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// [`create_router`] plus static files from `public_dir` for any path no
/// route claims. The directory is skipped when it does not exist.
pub fn create_router_with_public_dir(state: Arc<AppState>, public_dir: &Path) -> Router {
    let router = create_router(state);
    if public_dir.is_dir() {
        info!(path = %public_dir.display(), "Serving static files");
        router.fallback_service(ServeDir::new(public_dir))
    } else {
        router
    }
}
