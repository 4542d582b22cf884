use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use serde::Serialize;
use tracing::{info, warn};

use super::AppState;
use super::form::JsonOrForm;
use crate::error::Result;
use crate::models::{Article, ArticleFilter, NoteDraft, PopulatedArticle};

#[derive(Debug, Serialize)]
pub struct DeleteAllResponse {
    pub deleted: u64,
}

/// GET /articles
pub async fn list_articles(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<PopulatedArticle>>> {
    let articles = state.store.find_articles(ArticleFilter::all()).await?;
    Ok(Json(articles))
}

/// DELETE /articles/deleteAll
///
/// Irreversible. Notes are left alone.
pub async fn delete_all_articles(
    State(state): State<Arc<AppState>>,
) -> Result<Json<DeleteAllResponse>> {
    let deleted = state.store.delete_all_articles().await?;
    Ok(Json(DeleteAllResponse { deleted }))
}

/// GET /articles/:id
pub async fn get_article(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Option<PopulatedArticle>>> {
    let article = state.store.find_article(&id).await?;
    Ok(Json(article))
}

/// POST /articles/:id
///
/// Creates a note from the body and appends its id to the article. If the
/// note is invalid nothing is written. If the article does not exist the note
/// is still created and the response is `null`.
pub async fn attach_note(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    JsonOrForm(draft): JsonOrForm<NoteDraft>,
) -> Result<Json<Option<Article>>> {
    let note = state.store.create_note(draft.validate()?).await?;
    let article = state.store.push_note(&id, &note.id).await?;

    match &article {
        Some(_) => info!(article_id = %id, note_id = %note.id, "Attached note"),
        None => warn!(article_id = %id, note_id = %note.id, "Created note for unknown article"),
    }
    Ok(Json(article))
}
