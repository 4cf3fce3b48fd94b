//! Askama templates for every page.
//!
//! Values that went through the sanitizer are stored HTML-escaped and are
//! emitted with `|safe`; everything else relies on askama's auto-escaping.

use askama::Template;
use axum::response::Html;

use crate::db::{Application, User};
use crate::error::IntakeError;
use crate::types::{ApplyForm, FieldError};

pub fn render<T: Template>(template: &T) -> Result<Html<String>, IntakeError> {
    Ok(Html(template.render()?))
}

fn has_error(errors: &[FieldError], field: &str) -> bool {
    errors.iter().any(|e| e.field == field)
}

#[derive(Template)]
#[template(path = "apply.html")]
pub struct ApplyTemplate {
    pub title: String,
    pub form: ApplyForm,
    pub errors: Vec<FieldError>,
}

impl ApplyTemplate {
    pub fn is_invalid(&self, field: &str) -> bool {
        has_error(&self.errors, field)
    }
}

#[derive(Template)]
#[template(path = "thanks.html")]
pub struct ThanksTemplate {
    pub title: String,
    pub message: String,
}

#[derive(Template)]
#[template(path = "register.html")]
pub struct RegisterTemplate {
    pub title: String,
    pub name: String,
    pub email: String,
    pub username: String,
    pub errors: Vec<FieldError>,
}

impl RegisterTemplate {
    pub fn is_invalid(&self, field: &str) -> bool {
        has_error(&self.errors, field)
    }
}

#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    pub title: String,
    pub message: String,
}

#[derive(Template)]
#[template(path = "admin.html")]
pub struct AdminTemplate {
    pub title: String,
    pub user_list: Vec<User>,
    pub is_logged_in: bool,
    pub display_name: String,
    pub is_admin: bool,
}

#[derive(Template)]
#[template(path = "applications.html")]
pub struct ApplicationsTemplate {
    pub title: String,
    pub applications: Vec<Application>,
    pub display_name: String,
}

#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate {
    pub title: String,
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_marks_invalid_fields() {
        let template = RegisterTemplate {
            title: "Register".to_string(),
            name: "<b>Jon</b>".to_string(),
            email: String::new(),
            username: "jon".to_string(),
            errors: vec![FieldError {
                field: "email",
                message: "Email must not be empty".to_string(),
            }],
        };
        assert!(template.is_invalid("email"));
        assert!(!template.is_invalid("name"));

        let html = template.render().unwrap();
        assert!(html.contains("Email must not be empty"));
        // raw submitted values are escaped on redisplay
        assert!(html.contains("&#60;b&#62;Jon&#60;/b&#62;") || html.contains("&lt;b&gt;Jon&lt;/b&gt;"));
    }

    #[test]
    fn error_page_shows_message() {
        let html = ErrorTemplate {
            title: "404".to_string(),
            error: "404 Not found".to_string(),
        }
        .render()
        .unwrap();
        assert!(html.contains("404 Not found"));
    }
}
