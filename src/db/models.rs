use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

pub type UserId = i64;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, FromRow)]
pub struct Application {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub text: String,
    pub job: String,
    pub processed: bool,
    pub created: NaiveDateTime,
    pub updated: NaiveDateTime,
}

/// Sanitized application fields ready for insertion.
#[derive(Debug, Clone, PartialEq)]
pub struct NewApplication {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub text: String,
    pub job: String,
}

#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct User {
    pub id: UserId,
    pub username: String,
    /// argon2 PHC string, never the plaintext.
    pub password: String,
    pub name: String,
    pub email: String,
    pub admin: bool,
}

/// A user about to be inserted. `password_hash` must already be hashed.
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub username: String,
    pub password_hash: String,
    pub name: String,
    pub email: String,
}
