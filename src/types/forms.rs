use serde::Deserialize;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::db::NewApplication;
use crate::service::sanitize::{clean_email, clean_text, clean_username, strip_tags};

/// One failed rule, shown next to the form.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// Flatten `errors` into one entry per failed rule, ordered by `fields`.
fn collect_errors(errors: &ValidationErrors, fields: &[&'static str]) -> Vec<FieldError> {
    let by_field = errors.field_errors();
    fields
        .iter()
        .filter_map(|field| by_field.get(*field).map(|errs| (*field, errs)))
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| FieldError {
                field,
                message: e
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string()),
            })
        })
        .collect()
}

/// `Ok(())` or every failed rule, in form order.
fn check<T: Validate>(form: &T, fields: &[&'static str]) -> Result<(), Vec<FieldError>> {
    form.validate()
        .map_err(|errors| collect_errors(&errors, fields))
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct RegisterForm {
    #[validate(custom(function = "required_text", message = "Name must not be empty"))]
    pub name: String,

    #[validate(length(min = 1, message = "Email must not be empty"))]
    #[validate(email(message = "Email must be a valid email address"))]
    pub email: String,

    #[validate(custom(function = "required_text", message = "Username must not be empty"))]
    pub username: String,

    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    #[validate(must_match(other = "password2", message = "Passwords must match"))]
    pub password: String,

    pub password2: String,
}

impl RegisterForm {
    const FIELDS: [&'static str; 4] = ["name", "email", "username", "password"];

    pub fn check(&self) -> Result<(), Vec<FieldError>> {
        check(self, &Self::FIELDS)
    }

    /// Sanitized `(username, name, email)`. The password is hashed as typed and
    /// the username is stored unescaped.
    pub fn sanitized(&self) -> (String, String, String) {
        (
            clean_username(&self.username),
            clean_text(&self.name),
            clean_email(&self.email),
        )
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct ApplyForm {
    #[validate(custom(function = "required_text", message = "Name must not be empty"))]
    pub name: String,

    #[validate(length(min = 1, message = "Email must not be empty"))]
    #[validate(email(message = "Email must be a valid email address"))]
    pub email: String,

    #[validate(custom(
        function = "validate_phone",
        message = "Phone number must be seven digits"
    ))]
    pub phone: String,

    #[validate(custom(
        function = "required_text",
        message = "Application text must not be empty"
    ))]
    pub text: String,

    #[validate(custom(function = "required_text", message = "Choose a job to apply for"))]
    pub job: String,
}

impl ApplyForm {
    const FIELDS: [&'static str; 5] = ["name", "email", "phone", "text", "job"];

    pub fn check(&self) -> Result<(), Vec<FieldError>> {
        check(self, &Self::FIELDS)
    }

    pub fn sanitized(&self) -> NewApplication {
        NewApplication {
            name: clean_text(&self.name),
            email: clean_email(&self.email),
            phone: clean_text(&self.phone),
            text: clean_text(&self.text),
            job: clean_text(&self.job),
        }
    }
}

/// Non-empty once markup is stripped, so the stored value is never blank.
fn required_text(value: &str) -> Result<(), ValidationError> {
    if strip_tags(value).trim().is_empty() {
        Err(ValidationError::new("required"))
    } else {
        Ok(())
    }
}

/// Empty, or seven digits with an optional dash or space after the third.
fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    let phone = phone.trim();
    if phone.is_empty() {
        return Ok(());
    }
    let digits: String = match phone.char_indices().nth(3) {
        Some((i, sep)) if sep == '-' || sep == ' ' => {
            format!("{}{}", &phone[..i], &phone[i + 1..])
        }
        _ => phone.to_string(),
    };
    if digits.len() == 7 && digits.chars().all(|c| c.is_ascii_digit()) {
        Ok(())
    } else {
        Err(ValidationError::new("phone"))
    }
}
