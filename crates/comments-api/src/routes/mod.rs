//! Route definitions
//!
//! The comment endpoints mirror the storefront client's wire contract:
//! action-named paths under /api/comments rather than REST-style resource
//! paths.

use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::handlers::{comments, health};
use crate::state::AppState;

/// Create the main API router with all routes
pub fn create_router() -> Router<AppState> {
    Router::new().nest("/api/comments", comment_routes())
}

/// Health check routes (exported separately so probes bypass the main
/// middleware stack)
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

/// Comment routes
fn comment_routes() -> Router<AppState> {
    Router::new()
        .route("/add", post(comments::add_comment))
        .route("/get", get(comments::get_comments))
        .route("/react", post(comments::react))
        .route("/delete", delete(comments::delete_comment))
}
