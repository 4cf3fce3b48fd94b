use axum::{Form, extract::State, response::Html};
use tracing::info;

use crate::error::IntakeError;
use crate::router::AppState;
use crate::types::RegisterForm;
use crate::views::{LoginTemplate, RegisterTemplate, ThanksTemplate, render};

pub const USER_CREATED: &str = "User created. Please log in.";

/// GET /register
pub async fn register_form() -> Result<Html<String>, IntakeError> {
    render(&RegisterTemplate {
        title: "Register".to_string(),
        name: String::new(),
        email: String::new(),
        username: String::new(),
        errors: Vec::new(),
    })
}

/// POST /register
///
/// All rules are checked before anything is stored. Invalid input redisplays
/// the form with the raw submitted values; valid input is sanitized, the
/// password hashed and the user inserted, then the login page is shown.
pub async fn register_submit(
    State(state): State<AppState>,
    Form(form): Form<RegisterForm>,
) -> Result<Html<String>, IntakeError> {
    if let Err(errors) = form.check() {
        return render(&RegisterTemplate {
            title: "Problems registering the user:".to_string(),
            name: form.name,
            email: form.email,
            username: form.username,
            errors,
        });
    }

    let (username, name, email) = form.sanitized();
    info!(username = %username, "registering user");
    state
        .users
        .register(username, &form.password, name, email)
        .await?;

    render(&LoginTemplate {
        title: "Log in".to_string(),
        message: USER_CREATED.to_string(),
    })
}

/// GET /register/thanks
pub async fn thanks() -> Result<Html<String>, IntakeError> {
    render(&ThanksTemplate {
        title: "Thank you".to_string(),
        message: "Your account has been created.".to_string(),
    })
}
