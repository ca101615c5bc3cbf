//! Shared application state

use std::sync::Arc;

use comments_common::{AppConfig, SessionVerifier};
use comments_service::ServiceContext;

/// State handed to every handler by axum
///
/// Cloning is cheap; both halves sit behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<Inner>,
}

struct Inner {
    service_context: ServiceContext,
    config: AppConfig,
}

impl AppState {
    pub fn new(service_context: ServiceContext, config: AppConfig) -> Self {
        Self {
            inner: Arc::new(Inner {
                service_context,
                config,
            }),
        }
    }

    pub fn service_context(&self) -> &ServiceContext {
        &self.inner.service_context
    }

    pub fn config(&self) -> &AppConfig {
        &self.inner.config
    }

    /// Verifier for identity-provider session tokens
    pub fn session_verifier(&self) -> &SessionVerifier {
        self.inner.service_context.session_verifier()
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.inner.config.app.name)
            .finish_non_exhaustive()
    }
}
