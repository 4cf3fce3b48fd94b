use axum::{
    extract::{Path, State},
    response::{Html, Redirect},
};
use tracing::info;

use crate::error::IntakeError;
use crate::middleware::CurrentUser;
use crate::router::AppState;
use crate::views::{ApplicationsTemplate, render};

const LIST_PATH: &str = "/applications";

/// GET /applications
pub async fn list(
    State(state): State<AppState>,
    CurrentUser { user }: CurrentUser,
) -> Result<Html<String>, IntakeError> {
    let applications = state.store.select_applications().await?;
    render(&ApplicationsTemplate {
        title: "Applications".to_string(),
        applications,
        display_name: user.name,
    })
}

/// POST /applications/{id}/process
pub async fn process(
    State(state): State<AppState>,
    CurrentUser { user }: CurrentUser,
    Path(id): Path<i64>,
) -> Result<Redirect, IntakeError> {
    state.store.mark_processed(id).await?;
    info!(application = id, by = user.id, "application processed");
    Ok(Redirect::to(LIST_PATH))
}

/// POST /applications/{id}/delete
pub async fn delete(
    State(state): State<AppState>,
    CurrentUser { user }: CurrentUser,
    Path(id): Path<i64>,
) -> Result<Redirect, IntakeError> {
    state.store.delete_application(id).await?;
    info!(application = id, by = user.id, "application deleted");
    Ok(Redirect::to(LIST_PATH))
}
