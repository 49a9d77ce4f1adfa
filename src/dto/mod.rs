//! Form bodies as they arrive, and the typed values they parse into.
//!
//! Every field is received as a string so a malformed body reaches the
//! handler and is reported as a validation message on the page.

pub mod admin;
pub mod auth;
pub mod menu;
pub mod orders;

use crate::error::{AppError, AppResult};

pub(crate) fn parse_id(field: &str, raw: &str) -> AppResult<i32> {
    match raw.trim().parse::<i32>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(AppError::Validation(format!("{field} must be a positive number"))),
    }
}

pub(crate) fn required_text(field: &str, raw: &str, max_len: usize) -> AppResult<String> {
    let value = raw.trim();
    if value.is_empty() {
        return Err(AppError::Validation(format!("{field} is required")));
    }
    if value.chars().count() > max_len {
        return Err(AppError::Validation(format!(
            "{field} must be at most {max_len} characters"
        )));
    }
    Ok(value.to_string())
}

pub(crate) fn optional_text(raw: &str) -> Option<String> {
    let value = raw.trim();
    (!value.is_empty()).then(|| value.to_string())
}
