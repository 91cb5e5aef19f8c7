/*
 * Responsibility
 * - Config読み込み → 依存生成 (PgPool / Valkey / UserService) → Router 組み立て
 * - Middleware の適用 (http/CORS/pre-auth)
 * - axum::serve() で起動
 */
use std::sync::Arc;
use std::time::Duration;
use std::{panic, process};

use anyhow::{Context, Result};
use axum::{Router, routing::get};
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::api;
use crate::api::v1::handlers::health::health;
use crate::config::Config;
use crate::middleware::auth::pre_auth::{self, PreAuthState};
use crate::middleware::auth::responders::FailureResponders;
use crate::middleware::{cors, http};
use crate::repos::user_repo::PgUserStore;
use crate::services::cache::ValkeyClient;
use crate::services::users::UserService;
use crate::state::AppState;

fn init_tracing() {
    // Prefer RUST_LOG if set; otherwise use a sensible default.
    // Ex:
    // RUST_LOG=info,preauth_api=debug,tower_http=debug cargo run
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,tower_http=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn init_panic_hook(abort_on_panic: bool) {
    // Keep the default hook as a fallback (prints to stderr with location/payload).
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        // Always surface panics via tracing so they don't get "lost"
        // (stderr can be hidden depending on how the process is launched.)
        tracing::error!(?info, "panic");

        // In development, fail fast: crash the whole process so we notice immediately.
        // In production, prefer the default behavior (stderr) and let the server keep running.
        if abort_on_panic {
            process::abort();
        } else {
            default_hook(info);
        }
    }))
}

pub async fn run() -> Result<()> {
    init_tracing();
    let config = Config::from_env()?;

    let abort_on_panic = !config.app_env.is_production();
    init_panic_hook(abort_on_panic);

    tracing::info!(
        "starting API in {:?} mode on {}",
        config.app_env,
        config.addr
    );

    let state = build_state(&config).await?;
    let app = build_router(state, &config);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

async fn build_state(config: &Config) -> Result<AppState> {
    let db = PgPoolOptions::new()
        .max_connections(10)
        .connect(&config.database_url)
        .await
        .context("failed to connect to Postgres")?;

    let cache = ValkeyClient::new(&config.redis_url)
        .await
        .context("failed to connect to role cache")?;

    let users = Arc::new(UserService::new(
        Arc::new(PgUserStore::new(db)),
        Arc::new(cache),
        Duration::from_millis(config.role_cache_read_timeout_millis),
        Duration::from_secs(config.role_cache_ttl_seconds),
    ));

    Ok(AppState::new(users))
}

fn build_router(state: AppState, config: &Config) -> Router {
    // /api/v1 だけ pre-auth を通す。/health は疎通用に素通し。
    let v1 = pre_auth::apply(
        api::v1::routes(),
        PreAuthState::new(state.users.clone(), FailureResponders::default()),
    );

    let router = Router::new()
        .route("/health", get(health))
        .nest("/api/v1", v1)
        .with_state(state);

    let router = cors::apply(router, config);
    http::apply(router)
}
