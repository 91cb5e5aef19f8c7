/*
 * Responsibility
 * - 認証失敗 (401) / 認可拒否 (403) の response 生成
 * - pre-auth pipeline から差し替え可能な collaborator として分離
 */
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// Body shared by both failure paths: `{"error_message": <message or null>}`.
#[derive(Debug, Serialize)]
struct AuthErrorBody<'a> {
    error_message: Option<&'a str>,
}

pub type FailureResponder = fn(Option<&str>) -> Response;

/// The two short-circuit paths of the pre-auth pipeline.
///
/// Held as plain function pointers so a router can swap either path without
/// touching the resolver or the middleware.
#[derive(Clone, Copy)]
pub struct FailureResponders {
    /// Missing or malformed credential.
    pub unauthenticated: FailureResponder,
    /// Credential was understood but explicitly denied.
    pub access_denied: FailureResponder,
}

impl Default for FailureResponders {
    fn default() -> Self {
        Self {
            unauthenticated: unauthorized_json,
            access_denied: forbidden_json,
        }
    }
}

pub fn unauthorized_json(message: Option<&str>) -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(AuthErrorBody {
            error_message: message,
        }),
    )
        .into_response()
}

pub fn forbidden_json(message: Option<&str>) -> Response {
    (
        StatusCode::FORBIDDEN,
        Json(AuthErrorBody {
            error_message: message,
        }),
    )
        .into_response()
}
