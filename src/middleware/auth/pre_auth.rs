/*
 * Responsibility
 * - Authorization credential 抽出 → principal 解決 → request extensions へ格納
 * - 失敗時は responders 経由で 401/403 に short-circuit
 * - 解決は request につき一度 (再 dispatch されても再解決しない)
 */
use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::extract::State;
use axum::http::{Request, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};

use crate::services::auth::principal::Principal;
use crate::services::auth::resolver::{self, AuthError};
use crate::services::users::UserService;
use crate::state::AppState;

use super::responders::FailureResponders;

/// Everything the pre-auth pipeline needs, independent of the router state.
#[derive(Clone)]
pub struct PreAuthState {
    pub users: Arc<UserService>,
    pub responders: FailureResponders,
}

impl PreAuthState {
    pub fn new(users: Arc<UserService>, responders: FailureResponders) -> Self {
        Self { users, responders }
    }
}

/// `/api/v1/*` に pre-auth を掛けるための middleware を適用する。
///
/// 例：
/// ```ignore
/// let v1 = pre_auth::apply(api::v1::routes(), PreAuthState::new(users, FailureResponders::default()));
/// app = app.nest("/api/v1", v1);
/// ```
pub fn apply(router: Router<AppState>, state: PreAuthState) -> Router<AppState> {
    // axum 0.8 の from_fn は State extractor を受け取れないため、`from_fn_with_state` で明示的に state を渡す
    router.layer(middleware::from_fn_with_state(state, pre_auth_middleware))
}

async fn pre_auth_middleware(
    State(state): State<PreAuthState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    // Already resolved for this request (nested dispatch): reuse the same instance.
    if req.extensions().get::<Principal>().is_some() {
        return next.run(req).await;
    }

    let resolved = match resolver::extract_credential(req.headers()) {
        Some(raw) => resolver::resolve_principal_id(raw),
        None => Err(AuthError::NoCredential),
    };

    let principal_id = match resolved {
        Ok(id) => id,
        Err(err) => return failure_response(&state.responders, err),
    };

    // Role resolution goes through the cache-aside lookup; an unknown user
    // lands on GUEST rather than failing authentication.
    let role = match state.users.get_role(&principal_id).await {
        Ok(role) => role,
        Err(err) => {
            // Cache transport / DB errors are server-side failures, not 401s.
            tracing::error!(error = %err, "role resolution failed");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    req.extensions_mut().insert(Principal::new(principal_id, role));
    next.run(req).await
}

fn failure_response(responders: &FailureResponders, err: AuthError) -> Response {
    let message = err.to_string();
    match err {
        AuthError::AccessDenied => {
            tracing::info!("access denied by credential sentinel");
            (responders.access_denied)(Some(&message))
        }
        AuthError::NoCredential | AuthError::MalformedCredential(_) => {
            tracing::info!(%message, "unauthenticated request");
            (responders.unauthenticated)(Some(&message))
        }
    }
}
