//! Database schema and migrations for mediadeck.
//!
//! This module contains all database migrations that will be applied
//! sequentially when the database is first opened or upgraded.

/// Database migrations.
///
/// Each migration is a SQL script that will be executed in order.
/// The schema_version table tracks which migrations have been applied.
pub const MIGRATIONS: &[&str] = &[
    // v1: Initial schema - users table with storage bookkeeping
    r#"
-- Users table with per-user storage quota bookkeeping
CREATE TABLE users (
    id             INTEGER PRIMARY KEY AUTOINCREMENT,
    email          TEXT NOT NULL UNIQUE,
    name           TEXT NOT NULL,
    created_at     TEXT NOT NULL DEFAULT (datetime('now')),
    storage_used   INTEGER NOT NULL DEFAULT 0,
    storage_limit  INTEGER NOT NULL DEFAULT 1073741824
);

CREATE INDEX idx_users_email ON users(email);
"#,
    // v2: Media files table
    r#"
-- Media file metadata; bytes live on disk under the stored filename
CREATE TABLE media_files (
    id              INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id         INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    filename        TEXT NOT NULL UNIQUE,   -- generated stored name (uuid.ext)
    original_name   TEXT NOT NULL,
    mime_type       TEXT NOT NULL,
    file_size       INTEGER NOT NULL,
    file_type       TEXT NOT NULL,          -- 'IMAGE', 'VIDEO', 'AUDIO', 'PDF', 'TEXT', 'DOCUMENT'
    storage_path    TEXT NOT NULL,
    thumbnail_path  TEXT,
    title           TEXT,
    description     TEXT,
    tags            TEXT,                   -- JSON array as text
    duration        INTEGER,
    width           INTEGER,
    height          INTEGER,
    uploaded_at     TEXT NOT NULL DEFAULT (datetime('now')),
    last_accessed   TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE INDEX idx_media_files_user_id ON media_files(user_id);
CREATE INDEX idx_media_files_uploaded_at ON media_files(uploaded_at);
"#,
    // v3: Key assignments table, one file per key per user
    r#"
CREATE TABLE key_assignments (
    id                  INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id             INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    file_id             INTEGER NOT NULL REFERENCES media_files(id) ON DELETE CASCADE,
    key_number          INTEGER NOT NULL,
    custom_title        TEXT,
    custom_description  TEXT,
    assigned_at         TEXT NOT NULL DEFAULT (datetime('now')),
    UNIQUE(user_id, key_number)
);

CREATE INDEX idx_key_assignments_user_id ON key_assignments(user_id);
CREATE INDEX idx_key_assignments_file_id ON key_assignments(file_id);
"#,
];
