use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use sqlx::Error as SqlxError;
use thiserror::Error as ThisError;
use tracing::{error, warn};

use crate::views::{ErrorTemplate, render};

#[derive(Debug, ThisError)]
pub enum IntakeError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Configuration error: {0}")]
    Figment(#[from] figment::Error),

    #[error("Database error: {0}")]
    DatabaseError(#[from] SqlxError),

    #[error("Template error: {0}")]
    Template(#[from] askama::Error),

    #[error("Password hash error: {0}")]
    PasswordHash(String),

    #[error("Background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found")]
    NotFound,
}

impl From<argon2::password_hash::Error> for IntakeError {
    fn from(e: argon2::password_hash::Error) -> Self {
        IntakeError::PasswordHash(e.to_string())
    }
}

impl IntakeError {
    pub fn status(&self) -> StatusCode {
        match self {
            IntakeError::NotFound => StatusCode::NOT_FOUND,
            IntakeError::BadRequest(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Central error page. Internal details stay in the log.
impl IntoResponse for IntakeError {
    fn into_response(self) -> Response {
        let status = self.status();
        let (title, message) = match &self {
            IntakeError::NotFound => ("404", "404 Not found".to_string()),
            IntakeError::BadRequest(reason) => {
                warn!(reason = %reason, "rejected malformed request");
                ("400", format!("Bad request: {reason}"))
            }
            other => {
                error!(error = %other, "request failed");
                ("Error", "Something went wrong. Please try again later.".to_string())
            }
        };
        error_page(status, title, message)
    }
}

pub fn error_page(status: StatusCode, title: &str, message: String) -> Response {
    let template = ErrorTemplate {
        title: title.to_string(),
        error: message,
    };
    match render(&template) {
        Ok(html) => (status, html).into_response(),
        Err(e) => {
            error!(error = %e, "failed to render error page");
            (status, Html(html_escape::encode_text(&template.error).into_owned())).into_response()
        }
    }
}
