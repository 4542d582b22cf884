use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};

use super::AppState;
use crate::error::Result;
use crate::models::{Article, ArticleFilter, PopulatedArticle};

/// GET /saved
pub async fn list_saved(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<PopulatedArticle>>> {
    let articles = state.store.find_articles(ArticleFilter::saved()).await?;
    Ok(Json(articles))
}

/// POST /saved/:id
pub async fn mark_saved(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Option<Article>>> {
    Ok(Json(state.store.set_saved(&id, true).await?))
}

/// POST /deleteSaved/:id
///
/// Clears the saved flag; the article itself stays.
pub async fn mark_unsaved(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Option<Article>>> {
    Ok(Json(state.store.set_saved(&id, false).await?))
}
