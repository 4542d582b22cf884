//! SQLite-backed [`Store`].
//!
//! Each collection is a table; an article's ordered note references live in
//! `article_notes` keyed by `(article_id, position)`. All statements for one
//! operation run inside a single `Connection::call`, so they execute back to
//! back on the connection thread. Multi-statement writes additionally use a
//! transaction.

use async_trait::async_trait;
use rusqlite::{Connection as SqliteConnection, OptionalExtension, Row, params};
use tokio_rusqlite::Connection;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use super::Store;
use super::schema::SCHEMA;
use crate::error::Result;
use crate::models::{Article, ArticleFilter, NewArticle, NewNote, Note, PopulatedArticle};

pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open the database named by `database_url` and apply the schema.
    ///
    /// Accepts a plain path, a `sqlite://` prefixed path, or `:memory:`.
    #[instrument(level = "info")]
    pub async fn open(database_url: &str) -> Result<Self> {
        let target = database_url
            .strip_prefix("sqlite://")
            .unwrap_or(database_url);

        let conn = if target == ":memory:" {
            Connection::open_in_memory().await?
        } else {
            Connection::open(target).await?
        };

        let store = Self::init(conn).await?;
        info!(database = target, "Opened document store");
        Ok(store)
    }

    pub async fn open_in_memory() -> Result<Self> {
        Self::init(Connection::open_in_memory().await?).await
    }

    async fn init(conn: Connection) -> Result<Self> {
        conn.call(|conn| {
            conn.execute_batch(SCHEMA)?;
            Ok(())
        })
        .await?;

        Ok(Self { conn })
    }
}

#[async_trait]
impl Store for SqliteStore {
    #[instrument(level = "debug", skip_all)]
    async fn create_article(&self, article: NewArticle) -> Result<Article> {
        let article = Article {
            id: Uuid::new_v4().to_string(),
            title: article.title,
            link: article.link,
            summary: article.summary,
            notes: Vec::new(),
            saved: false,
        };

        let row = article.clone();
        self.conn
            .call(move |conn| {
                conn.execute(
                    "INSERT INTO articles (id, title, link, summary) VALUES (?1, ?2, ?3, ?4)",
                    params![row.id, row.title, row.link, row.summary],
                )?;
                Ok(())
            })
            .await?;

        debug!(article_id = %article.id, "Inserted article");
        Ok(article)
    }

    async fn find_articles(&self, filter: ArticleFilter) -> Result<Vec<PopulatedArticle>> {
        let articles = self
            .conn
            .call(move |conn| {
                let conn: &SqliteConnection = conn;
                let articles = select_articles(conn, filter)?
                    .into_iter()
                    .map(|article| populate(conn, article))
                    .collect::<rusqlite::Result<Vec<_>>>()?;
                Ok(articles)
            })
            .await?;
        Ok(articles)
    }

    async fn find_article(&self, id: &str) -> Result<Option<PopulatedArticle>> {
        let id = id.to_string();
        let article = self
            .conn
            .call(move |conn| {
                let conn: &SqliteConnection = conn;
                let article = conn
                    .query_row(
                        "SELECT id, title, link, summary, saved FROM articles WHERE id = ?1",
                        params![id],
                        article_from_row,
                    )
                    .optional()?;
                match article {
                    Some(article) => Ok(Some(populate(conn, article)?)),
                    None => Ok(None),
                }
            })
            .await?;
        Ok(article)
    }

    #[instrument(level = "info", skip_all)]
    async fn delete_all_articles(&self) -> Result<u64> {
        let removed = self
            .conn
            .call(|conn| {
                let tx = conn.transaction()?;
                tx.execute("DELETE FROM article_notes", [])?;
                let removed = tx.execute("DELETE FROM articles", [])?;
                tx.commit()?;
                Ok(removed)
            })
            .await?;

        info!(count = removed, "Deleted all articles");
        Ok(removed as u64)
    }

    #[instrument(level = "debug", skip(self))]
    async fn push_note(&self, article_id: &str, note_id: &str) -> Result<Option<Article>> {
        let article_id = article_id.to_string();
        let note_id = note_id.to_string();
        let article = self
            .conn
            .call(move |conn| {
                let tx = conn.transaction()?;
                if !article_exists(&tx, &article_id)? {
                    return Ok(None);
                }
                tx.execute(
                    r#"INSERT INTO article_notes (article_id, position, note_id)
                       VALUES (
                           ?1,
                           (SELECT COALESCE(MAX(position), -1) + 1 FROM article_notes WHERE article_id = ?1),
                           ?2
                       )"#,
                    params![article_id, note_id],
                )?;
                let article = load_article(&tx, &article_id)?;
                tx.commit()?;
                Ok(article)
            })
            .await?;
        Ok(article)
    }

    #[instrument(level = "debug", skip(self))]
    async fn pull_note(&self, article_id: &str, note_id: &str) -> Result<Option<Article>> {
        let article_id = article_id.to_string();
        let note_id = note_id.to_string();
        let article = self
            .conn
            .call(move |conn| {
                let tx = conn.transaction()?;
                if !article_exists(&tx, &article_id)? {
                    return Ok(None);
                }
                tx.execute(
                    r#"DELETE FROM article_notes WHERE rowid = (
                           SELECT rowid FROM article_notes
                           WHERE article_id = ?1 AND note_id = ?2
                           ORDER BY position
                           LIMIT 1
                       )"#,
                    params![article_id, note_id],
                )?;
                let article = load_article(&tx, &article_id)?;
                tx.commit()?;
                Ok(article)
            })
            .await?;
        Ok(article)
    }

    #[instrument(level = "debug", skip(self))]
    async fn set_saved(&self, article_id: &str, saved: bool) -> Result<Option<Article>> {
        let article_id = article_id.to_string();
        let article = self
            .conn
            .call(move |conn| {
                let changed = conn.execute(
                    "UPDATE articles SET saved = ?1 WHERE id = ?2",
                    params![saved, article_id],
                )?;
                if changed == 0 {
                    return Ok(None);
                }
                Ok(load_article(conn, &article_id)?)
            })
            .await?;
        Ok(article)
    }

    #[instrument(level = "debug", skip_all)]
    async fn create_note(&self, note: NewNote) -> Result<Note> {
        let (title, body) = note.into_parts();
        let note = Note {
            id: Uuid::new_v4().to_string(),
            title,
            body,
        };

        let row = note.clone();
        self.conn
            .call(move |conn| {
                conn.execute(
                    "INSERT INTO notes (id, title, body) VALUES (?1, ?2, ?3)",
                    params![row.id, row.title, row.body],
                )?;
                Ok(())
            })
            .await?;

        debug!(note_id = %note.id, "Inserted note");
        Ok(note)
    }

    async fn find_notes(&self) -> Result<Vec<Note>> {
        let notes = self
            .conn
            .call(|conn| {
                let mut stmt = conn.prepare("SELECT id, title, body FROM notes ORDER BY seq")?;
                let notes = stmt
                    .query_map([], note_from_row)?
                    .collect::<rusqlite::Result<Vec<_>>>()?;
                Ok(notes)
            })
            .await?;
        Ok(notes)
    }

    #[instrument(level = "debug", skip(self))]
    async fn remove_note(&self, id: &str) -> Result<Option<Note>> {
        let id = id.to_string();
        let note = self
            .conn
            .call(move |conn| {
                let tx = conn.transaction()?;
                let note = tx
                    .query_row(
                        "SELECT id, title, body FROM notes WHERE id = ?1",
                        params![id],
                        note_from_row,
                    )
                    .optional()?;
                if note.is_some() {
                    tx.execute("DELETE FROM notes WHERE id = ?1", params![id])?;
                }
                tx.commit()?;
                Ok(note)
            })
            .await?;
        Ok(note)
    }

    async fn close(&self) -> Result<()> {
        self.conn.clone().close().await?;
        info!("Closed document store");
        Ok(())
    }
}

fn article_exists(conn: &SqliteConnection, id: &str) -> rusqlite::Result<bool> {
    let found = conn
        .query_row(
            "SELECT 1 FROM articles WHERE id = ?1",
            params![id],
            |_| Ok(()),
        )
        .optional()?;
    Ok(found.is_some())
}

fn select_articles(conn: &SqliteConnection, filter: ArticleFilter) -> rusqlite::Result<Vec<Article>> {
    let articles = match filter.saved {
        Some(saved) => {
            let mut stmt = conn.prepare(
                "SELECT id, title, link, summary, saved FROM articles WHERE saved = ?1 ORDER BY seq",
            )?;
            let rows = stmt
                .query_map(params![saved], article_from_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            rows
        }
        None => {
            let mut stmt =
                conn.prepare("SELECT id, title, link, summary, saved FROM articles ORDER BY seq")?;
            let rows = stmt
                .query_map([], article_from_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            rows
        }
    };
    Ok(articles)
}

fn load_article(conn: &SqliteConnection, id: &str) -> rusqlite::Result<Option<Article>> {
    let article = conn
        .query_row(
            "SELECT id, title, link, summary, saved FROM articles WHERE id = ?1",
            params![id],
            article_from_row,
        )
        .optional()?;

    match article {
        Some(mut article) => {
            article.notes = note_ids(conn, &article.id)?;
            Ok(Some(article))
        }
        None => Ok(None),
    }
}

fn note_ids(conn: &SqliteConnection, article_id: &str) -> rusqlite::Result<Vec<String>> {
    let mut stmt = conn.prepare_cached(
        "SELECT note_id FROM article_notes WHERE article_id = ?1 ORDER BY position",
    )?;
    let ids = stmt
        .query_map(params![article_id], |row| row.get(0))?
        .collect::<rusqlite::Result<Vec<String>>>()?;
    Ok(ids)
}

/// Replace an article's note ids with the notes they point at. References to
/// notes that no longer exist are dropped.
fn populate(conn: &SqliteConnection, article: Article) -> rusqlite::Result<PopulatedArticle> {
    let mut stmt = conn.prepare_cached(
        r#"SELECT n.id, n.title, n.body
           FROM article_notes an
           JOIN notes n ON n.id = an.note_id
           WHERE an.article_id = ?1
           ORDER BY an.position"#,
    )?;
    let notes = stmt
        .query_map(params![article.id], note_from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(Article {
        id: article.id,
        title: article.title,
        link: article.link,
        summary: article.summary,
        notes,
        saved: article.saved,
    })
}

fn article_from_row(row: &Row) -> rusqlite::Result<Article> {
    Ok(Article {
        id: row.get(0)?,
        title: row.get(1)?,
        link: row.get(2)?,
        summary: row.get(3)?,
        notes: Vec::new(),
        saved: row.get(4)?,
    })
}

fn note_from_row(row: &Row) -> rusqlite::Result<Note> {
    Ok(Note {
        id: row.get(0)?,
        title: row.get(1)?,
        body: row.get(2)?,
    })
}
