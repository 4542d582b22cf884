//! Document persistence for articles and notes.
//!
//! The rest of the crate only sees the [`Store`] trait: a small set of
//! collection operations in the spirit of a document database (insert, find
//! by filter, find-one-and-update, find-one-and-remove, and "populate" which
//! inlines referenced notes into article results).
//!
//! # Semantics shared by every implementation
//!
//! - Lookups and updates by id return `Ok(None)` when nothing matches; a
//!   missing document is not an error.
//! - `Article.notes` references are weak. Removing a note never touches
//!   articles, and removing articles never touches notes.
//! - Populated results silently skip references to notes that no longer
//!   exist. The stored id list itself is left as is.
//! - Every single-document write is atomic.
//!
//! [`SqliteStore`] is the production backend.

mod schema;
mod sqlite;

pub use sqlite::SqliteStore;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{Article, ArticleFilter, NewArticle, NewNote, Note, PopulatedArticle};

#[async_trait]
pub trait Store: Send + Sync {
    /// Insert a new article with `saved = false` and no notes.
    async fn create_article(&self, article: NewArticle) -> Result<Article>;

    /// All articles matching `filter`, in insertion order, notes populated.
    async fn find_articles(&self, filter: ArticleFilter) -> Result<Vec<PopulatedArticle>>;

    /// One article by id, notes populated.
    async fn find_article(&self, id: &str) -> Result<Option<PopulatedArticle>>;

    /// Remove every article. Returns the number removed.
    async fn delete_all_articles(&self) -> Result<u64>;

    /// Append `note_id` to the article's note list and return the updated
    /// article. No duplicate check.
    async fn push_note(&self, article_id: &str, note_id: &str) -> Result<Option<Article>>;

    /// Remove the first occurrence of `note_id` from the article's note list
    /// and return the updated article. Absent ids are a no-op.
    async fn pull_note(&self, article_id: &str, note_id: &str) -> Result<Option<Article>>;

    /// Set the article's `saved` flag and return the updated article.
    async fn set_saved(&self, article_id: &str, saved: bool) -> Result<Option<Article>>;

    async fn create_note(&self, note: NewNote) -> Result<Note>;

    async fn find_notes(&self) -> Result<Vec<Note>>;

    /// Remove a note and return it as it was before removal.
    async fn remove_note(&self, id: &str) -> Result<Option<Note>>;

    /// Flush and release the underlying connection. Calls made afterwards fail.
    async fn close(&self) -> Result<()>;
}
