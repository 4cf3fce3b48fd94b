use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use tracing::info;

use crate::error::IntakeError;
use crate::middleware::SessionContext;
use crate::router::AppState;
use crate::service::Credentials;
use crate::types::LoginForm;
use crate::views::{LoginTemplate, render};

pub const LOGIN_FAILED: &str = "Username or password incorrect.";

/// GET /login -> login form with any queued messages, which are then cleared.
pub async fn login_page(mut session: SessionContext) -> Result<Response, IntakeError> {
    if session.is_authenticated() {
        return Ok(Redirect::to("/applications").into_response());
    }

    let message = session.take_flash().join(", ");
    let page = render(&LoginTemplate {
        title: "Log in".to_string(),
        message,
    })?;
    Ok((session.into_jar(), page).into_response())
}

/// POST /login
pub async fn login_submit(
    State(state): State<AppState>,
    mut session: SessionContext,
    Form(form): Form<LoginForm>,
) -> Result<Response, IntakeError> {
    match state
        .users
        .authenticate(&form.username, &form.password)
        .await?
    {
        Credentials::Matched(user) => {
            info!(user_id = user.id, "user logged in");
            session.log_in(user);
            Ok((session.into_jar(), Redirect::to("/admin")).into_response())
        }
        Credentials::NoMatch => {
            info!(username = %form.username, "login failed");
            session.flash(LOGIN_FAILED);
            Ok((session.into_jar(), Redirect::to("/login")).into_response())
        }
    }
}
