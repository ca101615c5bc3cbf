//! Service context - dependency container for services
//!
//! Holds the comment store, session verifier, and id generator needed by
//! the service layer.

use std::sync::Arc;
use std::time::Duration;

use comments_common::auth::SessionVerifier;
use comments_core::traits::CommentRepository;
use comments_core::SnowflakeGenerator;

const DEFAULT_STORAGE_WAIT: Duration = Duration::from_secs(10);

/// Service context containing all dependencies
///
/// This is the main dependency container that gets passed to all services.
#[derive(Clone)]
pub struct ServiceContext {
    comment_repo: Arc<dyn CommentRepository>,
    session_verifier: Arc<SessionVerifier>,
    snowflake_generator: Arc<SnowflakeGenerator>,
    /// How long a caller waits for a storage mutation before reporting a
    /// timeout. The mutation itself runs detached and is not cancelled.
    storage_wait: Duration,
}

impl ServiceContext {
    /// Create a new service context with all dependencies
    pub fn new(
        comment_repo: Arc<dyn CommentRepository>,
        session_verifier: Arc<SessionVerifier>,
        snowflake_generator: Arc<SnowflakeGenerator>,
        storage_wait: Duration,
    ) -> Self {
        Self {
            comment_repo,
            session_verifier,
            snowflake_generator,
            storage_wait,
        }
    }

    /// Get the comment repository
    pub fn comment_repo(&self) -> &dyn CommentRepository {
        self.comment_repo.as_ref()
    }

    /// Get a cloneable handle to the comment repository
    ///
    /// Used when a mutation must be spawned on a detached task so it
    /// outlives the request that started it.
    pub fn comment_repo_arc(&self) -> Arc<dyn CommentRepository> {
        Arc::clone(&self.comment_repo)
    }

    /// Get the session verifier
    pub fn session_verifier(&self) -> &SessionVerifier {
        self.session_verifier.as_ref()
    }

    /// Get the snowflake ID generator
    pub fn snowflake_generator(&self) -> &SnowflakeGenerator {
        self.snowflake_generator.as_ref()
    }

    /// Generate a new Snowflake ID
    pub fn generate_id(&self) -> comments_core::Snowflake {
        self.snowflake_generator.generate()
    }

    /// How long to wait for a detached storage mutation
    pub fn storage_wait(&self) -> Duration {
        self.storage_wait
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("comment_repo", &"dyn CommentRepository")
            .field("storage_wait", &self.storage_wait)
            .finish_non_exhaustive()
    }
}

/// Builder for creating ServiceContext with custom configuration
pub struct ServiceContextBuilder {
    comment_repo: Option<Arc<dyn CommentRepository>>,
    session_verifier: Option<Arc<SessionVerifier>>,
    snowflake_generator: Option<Arc<SnowflakeGenerator>>,
    storage_wait: Duration,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self {
            comment_repo: None,
            session_verifier: None,
            snowflake_generator: None,
            storage_wait: DEFAULT_STORAGE_WAIT,
        }
    }

    pub fn comment_repo(mut self, repo: Arc<dyn CommentRepository>) -> Self {
        self.comment_repo = Some(repo);
        self
    }

    pub fn session_verifier(mut self, verifier: Arc<SessionVerifier>) -> Self {
        self.session_verifier = Some(verifier);
        self
    }

    pub fn snowflake_generator(mut self, generator: Arc<SnowflakeGenerator>) -> Self {
        self.snowflake_generator = Some(generator);
        self
    }

    pub fn storage_wait(mut self, wait: Duration) -> Self {
        self.storage_wait = wait;
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any required dependency is missing
    pub fn build(self) -> super::error::ServiceResult<ServiceContext> {
        Ok(ServiceContext::new(
            self.comment_repo
                .ok_or_else(|| super::error::ServiceError::validation("comment_repo is required"))?,
            self.session_verifier.ok_or_else(|| {
                super::error::ServiceError::validation("session_verifier is required")
            })?,
            self.snowflake_generator.ok_or_else(|| {
                super::error::ServiceError::validation("snowflake_generator is required")
            })?,
            self.storage_wait,
        ))
    }
}

impl Default for ServiceContextBuilder {
    fn default() -> Self {
        Self::new()
    }
}
