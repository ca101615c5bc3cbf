//! Application assembly and server bootstrap

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use comments_common::{AppConfig, AppError, SessionVerifier};
use comments_core::SnowflakeGenerator;
use comments_db::{create_pool, run_migrations, PgCommentRepository};
use comments_service::ServiceContextBuilder;
use tokio::net::TcpListener;
use tracing::info;

use crate::middleware::apply_middleware_with_config;
use crate::routes::{create_router, health_routes};
use crate::state::AppState;

/// Assemble the router, middleware, and state into a serveable app
///
/// Health probes are merged in after the middleware so orchestrator
/// traffic stays out of the request logs and timeout budget.
pub fn create_app(state: AppState) -> Router {
    let config = state.config().clone();
    apply_middleware_with_config(
        create_router(),
        &config.limits,
        &config.cors,
        config.app.env.is_production(),
    )
    .merge(health_routes())
    .with_state(state)
}

/// Connect the store and wire up all dependencies
pub async fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    let pool = create_pool(&comments_db::DatabaseConfig {
        url: config.database.url.clone(),
        max_connections: config.database.max_connections,
        min_connections: config.database.min_connections,
        ..Default::default()
    })
    .await
    .map_err(|e| AppError::Database(e.to_string()))?;

    run_migrations(&pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    info!("Connected to PostgreSQL, schema up to date");

    let service_context = ServiceContextBuilder::new()
        .comment_repo(Arc::new(PgCommentRepository::new(pool)))
        .session_verifier(Arc::new(SessionVerifier::new(&config.session.secret)))
        .snowflake_generator(Arc::new(SnowflakeGenerator::new(config.snowflake.worker_id)))
        .storage_wait(Duration::from_secs(config.limits.storage_wait_secs))
        .build()
        .map_err(|e| AppError::Config(e.to_string()))?;

    Ok(AppState::new(service_context, config))
}

/// Serve the app on the given address until the process exits
pub async fn run_server(app: Router, addr: SocketAddr) -> Result<(), AppError> {
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Config(format!("cannot bind {addr}: {e}")))?;

    info!("Listening on http://{addr}");

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::Internal(e.into()))
}

/// Full bootstrap: dependencies, app, listener
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    let state = create_app_state(config).await?;
    run_server(create_app(state), addr).await
}
