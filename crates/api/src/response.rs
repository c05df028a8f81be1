//! Shared response envelope types for API handlers.
//!
//! Every success is `{ "success": true, "message": ..., "data": ... }`;
//! every failure is `{ "success": false, "message": ..., "error": ... }`
//! (the failure side is produced by [`crate::error::AppError`]). Paginated
//! lists put `{ "items": [...], "meta": PageMeta }` in `data`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use lisan_core::pagination::{PageMeta, PageRequest};
use serde::Serialize;

/// Success envelope.
///
/// # Example
///
/// ```ignore
/// Ok(ApiResponse::ok("Course retrieved", course))
/// ```
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    #[serde(skip)]
    status: StatusCode,
    pub success: bool,
    pub message: String,
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// 200 OK.
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            status: StatusCode::OK,
            success: true,
            message: message.into(),
            data,
        }
    }

    /// 201 Created.
    pub fn created(message: impl Into<String>, data: T) -> Self {
        Self {
            status: StatusCode::CREATED,
            ..Self::ok(message, data)
        }
    }
}

impl ApiResponse<()> {
    /// 200 OK with `"data": null`.
    pub fn message(message: impl Into<String>) -> Self {
        Self::ok(message, ())
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let status = self.status;
        (status, Json(self)).into_response()
    }
}

/// A page of rows plus pagination metadata.
#[derive(Debug, Serialize)]
pub struct Paginated<T: Serialize> {
    pub items: Vec<T>,
    pub meta: PageMeta,
}

impl<T: Serialize> Paginated<T> {
    pub fn new(items: Vec<T>, page: &PageRequest, total: i64) -> Self {
        Self {
            items,
            meta: page.meta(total),
        }
    }
}

/// Failure envelope body, built by [`crate::error::AppError`].
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
