/*
 * Responsibility
 * - Authorization ヘッダからの credential 抽出 (欠落はエラーではなく None)
 * - "<scheme> <token>" の検証と principal id の決定
 * - Role 解決や response 生成は middleware/services 側の責務
 */
use axum::http::{HeaderMap, header};
use thiserror::Error;

/// Sentinel token that forces the forbidden path, kept so the 403 handler can
/// be exercised end-to-end without a real authorization backend.
pub const ACCESS_DENIED_TOKEN: &str = "access_denied";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("There is no 'Authorization' header or values")]
    NoCredential,
    #[error("Bad credentials, {0}")]
    MalformedCredential(String),
    #[error("access_denied")]
    AccessDenied,
}

/// Read the raw credential from the `Authorization` header.
///
/// Absent, non-UTF8 or blank values are all `None`; no format checks happen here.
pub fn extract_credential(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

/// Parse `"<scheme> <token>"` into the pseudo-authenticated principal id.
///
/// Extra whitespace-separated segments after the token are ignored, matching
/// the split-then-index behavior of the credential format.
pub fn resolve_principal_id(raw: &str) -> Result<String, AuthError> {
    let parts: Vec<&str> = raw.split_whitespace().collect();
    if parts.len() < 2 {
        return Err(AuthError::MalformedCredential(raw.to_string()));
    }

    let (scheme, token) = (parts[0], parts[1]);
    if token.eq_ignore_ascii_case(ACCESS_DENIED_TOKEN) {
        return Err(AuthError::AccessDenied);
    }

    tracing::debug!(%scheme, %token, "credential validation");
    Ok(format!("id@{token}"))
}
