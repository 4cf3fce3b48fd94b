//! Request payloads: form structs with their validation rules and the admin
//! selection parsed from a raw form body.

pub mod forms;
pub mod selection;

pub use forms::{ApplyForm, FieldError, LoginForm, RegisterForm};
pub use selection::AdminSelection;
