use crate::db::models::{Application, NewApplication, NewUser, User, UserId};
use crate::db::schema::SQLITE_INIT;
use crate::error::IntakeError;
use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection, SqliteRow};
use sqlx::{ConnectOptions, Connection, FromRow};
use std::str::FromStr;
use tracing::{debug, warn};

/// A positional statement parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum Param {
    Int(i64),
    Text(String),
    Bool(bool),
}

impl From<i64> for Param {
    fn from(v: i64) -> Self {
        Param::Int(v)
    }
}

impl From<&str> for Param {
    fn from(v: &str) -> Self {
        Param::Text(v.to_string())
    }
}

impl From<String> for Param {
    fn from(v: String) -> Self {
        Param::Text(v)
    }
}

impl From<bool> for Param {
    fn from(v: bool) -> Self {
        Param::Bool(v)
    }
}

const INSERT_APPLICATION: &str = r#"
    INSERT INTO applications (name, email, phone, text, job)
    VALUES (?, ?, ?, ?, ?)"#;
const SELECT_APPLICATIONS: &str = "SELECT * FROM applications ORDER BY id";
const MARK_PROCESSED: &str = r#"
    UPDATE applications
    SET processed = 1, updated = CURRENT_TIMESTAMP
    WHERE id = ?"#;
const DELETE_APPLICATION: &str = "DELETE FROM applications WHERE id = ?";
const INSERT_USER: &str = r#"
    INSERT INTO users (username, password, name, email)
    VALUES (?, ?, ?, ?)"#;
const SELECT_USERS: &str = "SELECT * FROM users ORDER BY id";
const GIVE_ADMIN: &str = "UPDATE users SET admin = 1 WHERE id = ?";
const TAKE_ADMIN: &str = "UPDATE users SET admin = 0";

/// Runs every statement on its own connection: connect, execute one statement,
/// close. There is no pool and no statement spans a transaction.
#[derive(Clone)]
pub struct Store {
    options: SqliteConnectOptions,
}

impl Store {
    pub fn new(database_url: &str) -> Result<Self, IntakeError> {
        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        Ok(Self { options })
    }

    async fn connect(&self) -> Result<SqliteConnection, IntakeError> {
        Ok(self.options.connect().await?)
    }

    /// Initialize the schema by executing the bundled DDL.
    pub async fn init_schema(&self) -> Result<(), IntakeError> {
        // sqlx::query runs a single statement, so split the script
        for stmt in SQLITE_INIT.split(';') {
            let s = stmt.trim();
            if s.is_empty() {
                continue;
            }
            self.execute(s, &[]).await?;
        }
        Ok(())
    }

    /// Execute one parameterized statement and return its rows.
    ///
    /// The connection is closed whether the statement succeeded or not; the
    /// statement error, if any, is returned unchanged.
    pub async fn execute(&self, sql: &str, params: &[Param]) -> Result<Vec<SqliteRow>, IntakeError> {
        let mut conn = self.connect().await?;

        let mut query = sqlx::query(sql);
        for param in params {
            query = match param {
                Param::Int(v) => query.bind(*v),
                Param::Text(v) => query.bind(v.clone()),
                Param::Bool(v) => query.bind(*v),
            };
        }
        let result = query.fetch_all(&mut conn).await;

        if let Err(e) = conn.close().await {
            warn!(error = %e, "failed to close database connection");
        }

        let rows = result?;
        debug!(rows = rows.len(), "statement executed");
        Ok(rows)
    }

    pub async fn insert_application(&self, app: NewApplication) -> Result<(), IntakeError> {
        self.execute(
            INSERT_APPLICATION,
            &[
                app.name.into(),
                app.email.into(),
                app.phone.into(),
                app.text.into(),
                app.job.into(),
            ],
        )
        .await?;
        Ok(())
    }

    pub async fn select_applications(&self) -> Result<Vec<Application>, IntakeError> {
        let rows = self.execute(SELECT_APPLICATIONS, &[]).await?;
        Ok(rows
            .iter()
            .map(Application::from_row)
            .collect::<Result<_, _>>()?)
    }

    pub async fn mark_processed(&self, id: i64) -> Result<(), IntakeError> {
        self.execute(MARK_PROCESSED, &[id.into()]).await?;
        Ok(())
    }

    pub async fn delete_application(&self, id: i64) -> Result<(), IntakeError> {
        self.execute(DELETE_APPLICATION, &[id.into()]).await?;
        Ok(())
    }

    pub async fn insert_user(&self, user: NewUser) -> Result<(), IntakeError> {
        self.execute(
            INSERT_USER,
            &[
                user.username.into(),
                user.password_hash.into(),
                user.name.into(),
                user.email.into(),
            ],
        )
        .await?;
        Ok(())
    }

    pub async fn select_users(&self) -> Result<Vec<User>, IntakeError> {
        let rows = self.execute(SELECT_USERS, &[]).await?;
        Ok(rows.iter().map(User::from_row).collect::<Result<_, _>>()?)
    }

    pub async fn give_admin(&self, id: UserId) -> Result<(), IntakeError> {
        self.execute(GIVE_ADMIN, &[id.into()]).await?;
        Ok(())
    }

    pub async fn take_admin(&self) -> Result<(), IntakeError> {
        self.execute(TAKE_ADMIN, &[]).await?;
        Ok(())
    }
}
