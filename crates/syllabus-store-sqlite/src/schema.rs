//! SQL schema for the Syllabus SQLite store.
//!
//! Executed once at connection startup. Subjects are stored as documents:
//! scalar fields in columns, the `users` reference list as a JSON array.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

CREATE TABLE IF NOT EXISTS subjects (
    subject_id  TEXT PRIMARY KEY,
    name        TEXT NOT NULL,
    teacher     TEXT NOT NULL,
    difficulty  TEXT NOT NULL,
    -- JSON array of user ids; no foreign key, references may dangle.
    users_json  TEXT NOT NULL DEFAULT '[]'
);

CREATE TABLE IF NOT EXISTS users (
    user_id  TEXT PRIMARY KEY,
    name     TEXT NOT NULL,
    age      INTEGER NOT NULL,
    email    TEXT NOT NULL
);

PRAGMA user_version = 1;
";
