use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::response::{IntoResponse, Redirect, Response};

use crate::db::User;
use crate::middleware::session::SessionContext;
use crate::router::AppState;

pub const LOGIN_PATH: &str = "/login";

/// Guard for protected routes.
///
/// Resolves to the logged-in user; anonymous requests are redirected to the
/// login page instead of receiving an authorization error.
pub struct CurrentUser {
    pub user: User,
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = Response;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let session = SessionContext::from_request_parts(parts, state)
            .await
            .map_err(IntoResponse::into_response)?;

        match session.user {
            Some(user) => Ok(Self { user }),
            None => Err(Redirect::to(LOGIN_PATH).into_response()),
        }
    }
}
