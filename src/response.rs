use axum::Json;
use serde::Serialize;
use utoipa::ToSchema;

use crate::error::AppError;

#[derive(Debug, Serialize, ToSchema, Clone)]
pub struct Meta {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    pub total: Option<i64>,
}

impl Meta {
    pub fn new(page: i64, per_page: i64, total: i64) -> Self {
        Self {
            page: Some(page),
            per_page: Some(per_page),
            total: Some(total),
        }
    }

    pub fn empty() -> Self {
        Self {
            page: None,
            per_page: None,
            total: None,
        }
    }

    /// Single unpaginated page holding `total` rows.
    pub fn listing(total: usize) -> Self {
        let total = total as i64;
        Self::new(1, total, total)
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ApiResponse<T> {
    pub message: String,
    pub data: Option<T>,
    pub meta: Option<Meta>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(message: impl Into<String>, data: T, meta: Option<Meta>) -> Self {
        Self {
            message: message.into(),
            data: Some(data),
            meta,
        }
    }
}

/// A rendered page: its view model plus the error shown above it, if any.
pub type Page<T> = Json<ApiResponse<T>>;

pub fn page<T: Serialize>(title: &str, data: T) -> Page<T> {
    Json(ApiResponse::success(title, data, Some(Meta::empty())))
}

/// Re-renders a page with default data after `err`. Errors with a public
/// message show it; anything else shows `fallback`.
pub fn page_error<T: Serialize + Default>(fallback: &str, err: AppError) -> Page<T> {
    page_error_with(fallback, err, T::default())
}

pub fn page_error_with<T: Serialize>(fallback: &str, err: AppError, data: T) -> Page<T> {
    err.log(fallback);
    let message = err
        .public_message()
        .unwrap_or_else(|| fallback.to_string());
    Json(ApiResponse {
        message,
        data: Some(data),
        meta: Some(Meta::empty()),
    })
}
