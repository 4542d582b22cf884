pub const SCHEMA: &str = r#"
-- articles collection
CREATE TABLE IF NOT EXISTS articles (
    seq INTEGER PRIMARY KEY AUTOINCREMENT,
    id TEXT NOT NULL UNIQUE,
    title TEXT,
    link TEXT,
    summary TEXT,
    saved INTEGER NOT NULL DEFAULT 0,
    created_at TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE INDEX IF NOT EXISTS idx_articles_saved ON articles(saved);

-- ordered note references held by an article; deliberately no foreign keys
CREATE TABLE IF NOT EXISTS article_notes (
    article_id TEXT NOT NULL,
    position INTEGER NOT NULL,
    note_id TEXT NOT NULL,
    PRIMARY KEY (article_id, position)
);

CREATE INDEX IF NOT EXISTS idx_article_notes_note_id ON article_notes(note_id);

-- notes collection
CREATE TABLE IF NOT EXISTS notes (
    seq INTEGER PRIMARY KEY AUTOINCREMENT,
    id TEXT NOT NULL UNIQUE,
    title TEXT NOT NULL,
    body TEXT
);
"#;
