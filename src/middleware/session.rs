//! Cookie-backed sessions.
//!
//! The session lives in one private (encrypted and authenticated) cookie holding
//! the logged-in user id and any queued flash messages. Each request resolves
//! the id back into a full [`User`] through the [`UserDirectory`](crate::service::UserDirectory).

use argon2::Argon2;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::extract::cookie::{Cookie, Key, PrivateCookieJar, SameSite};
use serde::{Deserialize, Serialize};
use time::Duration;
use tracing::{debug, warn};

use crate::db::{User, UserId};
use crate::error::IntakeError;
use crate::router::AppState;

pub const SESSION_COOKIE: &str = "intake_session";

const KEY_SALT: &[u8] = b"job-intake.session-key";

/// Stretch `secret` into the 64-byte cookie signing and encryption key.
///
/// The same secret always yields the same key, so sessions survive a restart.
pub fn session_key(secret: &str) -> Result<Key, IntakeError> {
    let mut material = [0u8; 64];
    Argon2::default()
        .hash_password_into(secret.as_bytes(), KEY_SALT, &mut material)
        .map_err(|e| IntakeError::Config(format!("cannot derive session key: {e}")))?;
    Key::try_from(material.as_slice())
        .map_err(|e| IntakeError::Config(format!("invalid session key: {e}")))
}

/// What the session cookie stores.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<UserId>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub messages: Vec<String>,
}

impl SessionData {
    fn is_empty(&self) -> bool {
        self.user_id.is_none() && self.messages.is_empty()
    }

    /// Read the payload; a missing or undecodable cookie is an empty session.
    pub fn read(jar: &PrivateCookieJar) -> Self {
        let Some(cookie) = jar.get(SESSION_COOKIE) else {
            return Self::default();
        };
        serde_json::from_str(cookie.value()).unwrap_or_else(|e| {
            warn!(error = %e, "discarding unreadable session cookie");
            Self::default()
        })
    }
}

#[derive(Debug, Clone)]
pub struct SessionSettings {
    pub ttl: Duration,
    pub secure: bool,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            ttl: Duration::days(1),
            secure: false,
        }
    }
}

/// Per-request session context: the cookie jar, its payload and the user the
/// payload resolves to (if any).
///
/// Handlers that change the session must return [`SessionContext::into_jar`] as
/// part of their response.
pub struct SessionContext {
    jar: PrivateCookieJar,
    data: SessionData,
    settings: SessionSettings,
    pub user: Option<User>,
}

impl SessionContext {
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn log_in(&mut self, user: User) {
        debug!(user_id = user.id, "session authenticated");
        self.data.user_id = Some(user.id);
        self.user = Some(user);
    }

    pub fn log_out(&mut self) {
        self.data.user_id = None;
        self.user = None;
    }

    /// Queue a one-shot message for the next page that shows messages.
    pub fn flash(&mut self, message: impl Into<String>) {
        self.data.messages.push(message.into());
    }

    /// Remove and return all queued messages.
    pub fn take_flash(&mut self) -> Vec<String> {
        std::mem::take(&mut self.data.messages)
    }

    /// Write the payload back into the jar.
    pub fn into_jar(self) -> PrivateCookieJar {
        if self.data.is_empty() {
            return self.jar.remove(removal_cookie());
        }
        let value = match serde_json::to_string(&self.data) {
            Ok(v) => v,
            Err(e) => {
                warn!(error = %e, "failed to encode session; clearing it");
                return self.jar.remove(removal_cookie());
            }
        };
        self.jar.add(build_cookie(value, &self.settings))
    }
}

fn removal_cookie() -> Cookie<'static> {
    Cookie::build(Cookie::new(SESSION_COOKIE, "")).path("/").build()
}

fn build_cookie(value: String, settings: &SessionSettings) -> Cookie<'static> {
    Cookie::build(Cookie::new(SESSION_COOKIE, value))
        .path("/")
        .http_only(true)
        .secure(settings.secure)
        .same_site(SameSite::Lax)
        .max_age(settings.ttl)
        .build()
}

impl FromRequestParts<AppState> for SessionContext {
    type Rejection = IntakeError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = PrivateCookieJar::<Key>::from_request_parts(parts, state)
            .await
            .unwrap_or_else(|never| match never {});
        let data = SessionData::read(&jar);

        // a user deleted since login simply resolves to no identity
        let user = match data.user_id {
            Some(id) => state.users.find_by_id(id).await?,
            None => None,
        };

        Ok(Self {
            jar,
            data,
            settings: state.session.clone(),
            user,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderMap;
    use axum::http::header::{COOKIE, SET_COOKIE};
    use axum::response::IntoResponse;

    #[test]
    fn empty_payload_serializes_compactly() {
        let data = SessionData::default();
        assert_eq!(serde_json::to_string(&data).unwrap(), "{}");
        assert!(data.is_empty());
    }

    #[test]
    fn payload_round_trips() {
        let data = SessionData {
            user_id: Some(7),
            messages: vec!["hello".to_string()],
        };
        let json = serde_json::to_string(&data).unwrap();
        assert_eq!(serde_json::from_str::<SessionData>(&json).unwrap(), data);
    }

    #[test]
    fn unreadable_cookie_is_an_empty_session() {
        let key = Key::generate();
        let jar = PrivateCookieJar::new(key).add(Cookie::new(SESSION_COOKIE, "not json"));
        assert_eq!(SessionData::read(&jar), SessionData::default());
    }

    #[test]
    fn session_key_is_stable_per_secret() {
        let secret = "0123456789abcdef0123456789abcdef";
        let a = session_key(secret).unwrap();
        let b = session_key(secret).unwrap();
        let other = session_key("fedcba9876543210fedcba9876543210").unwrap();
        assert_eq!(a.master(), b.master());
        assert_ne!(a.master(), other.master());

        // a cookie sealed under one instance opens under the other
        let response = PrivateCookieJar::new(a)
            .add(Cookie::new(SESSION_COOKIE, "{}"))
            .into_response();
        let set_cookie = response.headers()[SET_COOKIE].to_str().unwrap();
        let pair = set_cookie.split(';').next().unwrap();
        assert_ne!(pair, "intake_session={}");

        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, pair.parse().unwrap());
        let opened = PrivateCookieJar::from_headers(&headers, b);
        assert_eq!(
            opened.get(SESSION_COOKIE).map(|c| c.value().to_string()),
            Some("{}".to_string())
        );
    }

    #[test]
    fn cookie_carries_settings() {
        let settings = SessionSettings {
            ttl: Duration::minutes(30),
            secure: true,
        };
        let cookie = build_cookie("{}".to_string(), &settings);
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.secure(), Some(true));
        assert_eq!(cookie.max_age(), Some(Duration::minutes(30)));
    }
}
