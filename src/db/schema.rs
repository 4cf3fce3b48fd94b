//! SQL DDL for the intake database.

/// SQLite schema with:
/// - `applications`: submitted job applications, `processed` as INTEGER 0/1,
///   `created`/`updated` as `CURRENT_TIMESTAMP` text
/// - `users`: accounts, `username` UNIQUE, `password` holds the argon2 PHC string,
///   `admin` as INTEGER 0/1
pub const SQLITE_INIT: &str = r#"
CREATE TABLE IF NOT EXISTS applications (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    email TEXT NOT NULL,
    phone TEXT NOT NULL DEFAULT '',
    text TEXT NOT NULL,
    job TEXT NOT NULL,
    processed INTEGER NOT NULL DEFAULT 0,
    created TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
    updated TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
);

CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    username TEXT NOT NULL UNIQUE,
    password TEXT NOT NULL,
    name TEXT NOT NULL,
    email TEXT NOT NULL,
    admin INTEGER NOT NULL DEFAULT 0
);
"#;
