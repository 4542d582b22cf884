use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use tracing::{info, warn};

use super::AppState;
use crate::error::Result;
use crate::models::{Article, Note};

/// GET /notes
pub async fn list_notes(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Note>>> {
    let notes = state.store.find_notes().await?;
    Ok(Json(notes))
}

/// DELETE /notes/deleteNote/:note_id/:article_id
///
/// Removes the note, then pulls its id out of the given article. There is no
/// reverse index, so the caller has to name the article. The detach runs even
/// when the note was already gone, which lets clients clean up stale ids.
pub async fn delete_note(
    State(state): State<Arc<AppState>>,
    Path((note_id, article_id)): Path<(String, String)>,
) -> Result<Json<Option<Article>>> {
    if state.store.remove_note(&note_id).await?.is_none() {
        warn!(%note_id, "Note to delete was not found");
    }

    let article = state.store.pull_note(&article_id, &note_id).await?;
    info!(%note_id, %article_id, detached = article.is_some(), "Deleted note");
    Ok(Json(article))
}
