//! Route handlers, one module per flow.

pub mod admin;
pub mod applications;
pub mod apply;
pub mod login;
pub mod register;

use crate::error::IntakeError;

/// Fallback for unmatched routes.
pub async fn not_found() -> IntakeError {
    IntakeError::NotFound
}
