pub mod auth;
pub mod session;

pub use auth::CurrentUser;
pub use session::{SessionContext, SessionData, SessionSettings, session_key};
