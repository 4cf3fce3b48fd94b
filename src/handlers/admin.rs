use axum::{
    body::Bytes,
    extract::State,
    response::{Html, IntoResponse, Redirect},
};
use tracing::info;

use crate::error::IntakeError;
use crate::middleware::{CurrentUser, SessionContext};
use crate::router::AppState;
use crate::types::AdminSelection;
use crate::views::{AdminTemplate, render};

/// GET /admin -> every user with an admin checkbox.
pub async fn open_admin(
    State(state): State<AppState>,
    CurrentUser { user }: CurrentUser,
) -> Result<Html<String>, IntakeError> {
    let user_list = state.store.select_users().await?;
    render(&AdminTemplate {
        title: "Admin".to_string(),
        user_list,
        is_logged_in: true,
        display_name: user.name,
        is_admin: user.admin,
    })
}

/// POST /admin -> make exactly the submitted users admins.
///
/// Clears the flag on everyone, then sets it per submitted id. The statements
/// are not wrapped in a transaction, so a concurrent reader can observe a moment
/// with no admins at all.
pub async fn update_admins(
    State(state): State<AppState>,
    CurrentUser { user }: CurrentUser,
    body: Bytes,
) -> Result<Redirect, IntakeError> {
    let selection = AdminSelection::from_form_body(&body)?;

    state.store.take_admin().await?;
    for id in selection.ids() {
        state.store.give_admin(*id).await?;
    }

    info!(by = user.id, admins = ?selection.ids(), "admin set replaced");
    Ok(Redirect::to("/admin"))
}

/// GET /admin/logout
pub async fn logout(mut session: SessionContext) -> impl IntoResponse {
    session.log_out();
    (session.into_jar(), Redirect::to("/"))
}
