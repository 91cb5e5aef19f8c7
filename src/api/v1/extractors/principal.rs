/*
 * Responsibility
 * - Handler で resolved `Principal` を受け取るための extractor
 * - pre-auth middleware が request.extensions() に insert 済みである前提
 * - 見つからない場合は 401 (認証がかかっていない・ミドルウェア未設定)
 */
use axum::extract::FromRequestParts;
use axum::http::{StatusCode, request::Parts};

use crate::services::auth::principal::Principal;

pub struct AuthPrincipal(pub Principal);

impl<S> FromRequestParts<S> for AuthPrincipal
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Principal>()
            .cloned()
            .map(AuthPrincipal)
            .ok_or(StatusCode::UNAUTHORIZED)
    }
}
