//! # Headline Notes
//!
//! A small news-clipping service: it scrapes the article listing of a news
//! section page, stores every listing item as an Article document, and lets
//! readers save articles and attach free-text notes to them over a JSON HTTP
//! API.
//!
//! ## Architecture
//!
//! - [`scrapers`]: fetch → parse → ingest pipeline behind `GET /scrape`
//! - [`store`]: the [`store::Store`] persistence seam and its SQLite backend
//! - [`routes`]: axum handlers mapping each endpoint onto store operations
//! - [`models`]: Article and Note documents
//!
//! The store handle is created once at startup, shared with every handler
//! through [`routes::AppState`], and closed after the server drains.

pub mod cli;
pub mod error;
pub mod models;
pub mod routes;
pub mod scrapers;
pub mod store;
pub mod utils;
