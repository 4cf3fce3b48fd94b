use axum::{
    Router,
    extract::FromRef,
    routing::{get, post},
};
use axum_extra::extract::cookie::Key;
use time::Duration;

use crate::config::{Config, MIN_SECRET_LEN};
use crate::db::Store;
use crate::error::IntakeError;
use crate::handlers::{admin, applications, apply, login, not_found, register};
use crate::middleware::{SessionSettings, session_key};
use crate::service::UserDirectory;

/// State shared by all routes.
#[derive(Clone)]
pub struct AppState {
    pub store: Store,
    pub users: UserDirectory,
    pub session: SessionSettings,
    key: Key,
}

impl AppState {
    /// `secret` seeds the cookie encryption key and must be at least
    /// [`MIN_SECRET_LEN`] bytes long.
    pub fn new(store: Store, secret: &str, session: SessionSettings) -> Result<Self, IntakeError> {
        if secret.len() < MIN_SECRET_LEN {
            return Err(IntakeError::Config(format!(
                "session secret must be at least {MIN_SECRET_LEN} bytes"
            )));
        }
        Ok(Self {
            key: session_key(secret)?,
            users: UserDirectory::new(store.clone()),
            store,
            session,
        })
    }

    pub fn from_config(cfg: &Config) -> Result<Self, IntakeError> {
        let store = Store::new(&cfg.database_url)?;
        let session = SessionSettings {
            ttl: Duration::minutes(cfg.session_ttl_minutes),
            secure: cfg.cookie_secure,
        };
        Self::new(store, cfg.session_secret()?, session)
    }
}

impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.key.clone()
    }
}

pub fn intake_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(apply::apply_form).post(apply::apply_submit))
        .route("/thanks", get(apply::thanks))
        .route(
            "/register",
            get(register::register_form).post(register::register_submit),
        )
        .route("/register/thanks", get(register::thanks))
        .route("/login", get(login::login_page).post(login::login_submit))
        .route("/admin", get(admin::open_admin).post(admin::update_admins))
        .route("/admin/logout", get(admin::logout))
        .route("/applications", get(applications::list))
        .route("/applications/{id}/process", post(applications::process))
        .route("/applications/{id}/delete", post(applications::delete))
        .fallback(not_found)
        .with_state(state)
}
