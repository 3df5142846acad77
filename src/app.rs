/*
 * Responsibility
 * - tracing / panic hook の初期化
 * - Config読み込み → 依存生成 (AuthService, RouteExemptions) → Router 組み立て
 * - Middleware の適用 (認証 gate → HTTP layers)
 * - axum::serve() で起動
 */
use std::{panic, process, sync::Arc};

use anyhow::Result;
use axum::{Router, routing::get};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{Config, ConfigError};
use crate::middleware::{self, auth::RouteExemptions};
use crate::services::auth::build_auth_service;
use crate::{api, state::AppState};

fn init_tracing() {
    // Prefer RUST_LOG if set; otherwise use a sensible default.
    // Ex:
    // RUST_LOG=info,todo_auth_gate=debug,tower_http=debug cargo run
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
        tracing::error!(?info, "panic");

        // In development, fail fast so we notice immediately.
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
    init_panic_hook(!config.app_env.is_production());

    tracing::info!(
        "starting API in {:?} mode on {}",
        config.app_env,
        config.addr
    );
    tracing::debug!(?config, "loaded configuration");

    let state = build_state(&config)?;
    let app = middleware::http::apply(build_router(state), &config);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn build_state(config: &Config) -> Result<AppState, ConfigError> {
    // Process-level, read-only after this point.
    let auth = build_auth_service(config)?;
    let exemptions = Arc::new(RouteExemptions::new(config.auth_exempt_prefixes.clone()));

    tracing::info!(prefixes = ?exemptions.prefixes(), "authentication exempt prefixes");

    Ok(AppState::new(auth, exemptions))
}

fn build_router(state: AppState) -> Router {
    let router = Router::new()
        .route("/error", get(api::error::error))
        .nest("/api/v1", api::v1::routes())
        .with_state(state.clone());

    // The gate wraps every route so exemption prefixes see the full path.
    middleware::auth::access::apply(router, state)
}
