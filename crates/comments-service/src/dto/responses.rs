//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output. Snowflake IDs
//! are serialized as strings for JavaScript compatibility, and field names
//! follow the camelCase wire convention.

use chrono::{DateTime, Utc};
use comments_core::value_objects::ReactionMap;
use serde::Serialize;

/// A comment with its author snapshot and reaction state
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentResponse {
    pub id: String,
    pub product_id: String,
    pub author_id: String,
    pub author_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_avatar_url: Option<String>,
    pub text: String,
    pub created_at: DateTime<Utc>,
    pub reactions: ReactionMap,
}

/// Liveness probe response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

impl HealthResponse {
    #[must_use]
    pub fn ok() -> Self {
        Self { status: "ok" }
    }
}

/// Readiness probe response
#[derive(Debug, Serialize)]
pub struct ReadinessResponse {
    pub status: &'static str,
    pub database: &'static str,
}

impl ReadinessResponse {
    #[must_use]
    pub fn ready() -> Self {
        Self {
            status: "ok",
            database: "up",
        }
    }

    #[must_use]
    pub fn not_ready() -> Self {
        Self {
            status: "degraded",
            database: "down",
        }
    }
}
