//! # comments-db
//!
//! Storage layer for the comment subsystem. Two `CommentRepository`
//! implementations live here: `PgCommentRepository` backed by SQLx and
//! PostgreSQL for production, and `MemoryCommentRepository` backed by
//! DashMap for tests and local runs.
//!
//! ```rust,ignore
//! let pool = comments_db::create_pool(&comments_db::DatabaseConfig::from_env()).await?;
//! comments_db::run_migrations(&pool).await?;
//! let repo = comments_db::PgCommentRepository::new(pool);
//! ```

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;

pub use pool::{create_pool, create_pool_from_env, run_migrations, DatabaseConfig, PgPool};
pub use repositories::{MemoryCommentRepository, PgCommentRepository};
