use axum::{
    Form,
    extract::State,
    response::{Html, IntoResponse, Redirect, Response},
};
use tracing::info;

use crate::error::IntakeError;
use crate::router::AppState;
use crate::types::ApplyForm;
use crate::views::{ApplyTemplate, ThanksTemplate, render};

/// GET / -> empty application form.
pub async fn apply_form() -> Result<Html<String>, IntakeError> {
    render(&ApplyTemplate {
        title: "Job application".to_string(),
        form: ApplyForm::default(),
        errors: Vec::new(),
    })
}

/// POST / -> validate, sanitize, store, then redirect to the thank-you page.
///
/// On validation failure the form is shown again with the values as submitted.
pub async fn apply_submit(
    State(state): State<AppState>,
    Form(form): Form<ApplyForm>,
) -> Result<Response, IntakeError> {
    if let Err(errors) = form.check() {
        let page = render(&ApplyTemplate {
            title: "Problems with the application".to_string(),
            form,
            errors,
        })?;
        return Ok(page.into_response());
    }

    let application = form.sanitized();
    info!(job = %application.job, "application received");
    state.store.insert_application(application).await?;

    Ok(Redirect::to("/thanks").into_response())
}

/// GET /thanks
pub async fn thanks() -> Result<Html<String>, IntakeError> {
    render(&ThanksTemplate {
        title: "Thank you for your application".to_string(),
        message: "Your application has been received.".to_string(),
    })
}
