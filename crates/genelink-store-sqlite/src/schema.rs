//! SQL schema for the genelink SQLite store.
//!
//! Executed once at connection startup via `PRAGMA user_version`. Future
//! migrations will be gated on that version number.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

-- Users are created once and never updated or deleted.
CREATE TABLE IF NOT EXISTS users (
    user_id    TEXT PRIMARY KEY,
    username   TEXT NOT NULL UNIQUE,
    api_key    TEXT NOT NULL,
    created_at TEXT NOT NULL     -- ISO 8601 UTC; store-assigned
);

-- Queries are strictly append-only.
-- No UPDATE or DELETE is ever issued against this table.
CREATE TABLE IF NOT EXISTS queries (
    query_id         TEXT NOT NULL PRIMARY KEY,
    user_id          TEXT NOT NULL REFERENCES users(user_id),
    gene             TEXT NOT NULL,
    disease          TEXT NOT NULL,
    association_json TEXT NOT NULL,  -- knowledge-graph payload, verbatim
    summary_json     TEXT,           -- summary record, NULL when skipped
    created_at       TEXT NOT NULL   -- ISO 8601 UTC; store-assigned
);

CREATE INDEX IF NOT EXISTS queries_user_idx ON queries(user_id);

PRAGMA user_version = 1;
";
