//! Test helpers for integration tests
//!
//! Provides utilities for spawning test servers and making HTTP requests.
//! Servers run over the in-memory comment store so tests need no
//! PostgreSQL instance.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use comments_api::{create_app, AppState};
use comments_common::{
    AppConfig, AppSettings, CorsConfig, DatabaseConfig, Environment, LimitsConfig, ServerConfig,
    SessionConfig, SessionVerifier, SnowflakeConfig,
};
use comments_core::SnowflakeGenerator;
use comments_db::MemoryCommentRepository;
use comments_service::ServiceContextBuilder;
use reqwest::{Client, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Shared secret test session tokens are signed with
pub const TEST_SESSION_SECRET: &str = "integration-test-session-secret";

/// Test server instance that manages lifecycle
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: Client,
    _handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a test server over a fresh in-memory store
    pub async fn start() -> Result<Self> {
        let config = test_config();

        let service_context = ServiceContextBuilder::new()
            .comment_repo(Arc::new(MemoryCommentRepository::new()))
            .session_verifier(Arc::new(SessionVerifier::new(TEST_SESSION_SECRET)))
            .snowflake_generator(Arc::new(SnowflakeGenerator::new(1)))
            .storage_wait(Duration::from_secs(5))
            .build()
            .map_err(|e| anyhow::anyhow!("context error: {e}"))?;

        let state = AppState::new(service_context, config);
        let app = create_app(state);

        // Ephemeral port keeps parallel tests from colliding
        let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let addr = listener.local_addr()?;

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            addr,
            client,
            _handle: handle,
        })
    }

    /// Get base URL for the server
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Make a GET request
    pub async fn get(&self, path: &str) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self.client.get(&url).send().await?)
    }

    /// Make a POST request with JSON body
    pub async fn post<T: Serialize>(&self, path: &str, body: &T) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self.client.post(&url).json(body).send().await?)
    }

    /// Make a POST request with a session token
    pub async fn post_auth<T: Serialize>(
        &self,
        path: &str,
        token: &str,
        body: &T,
    ) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {token}"))
            .json(body)
            .send()
            .await?)
    }

    /// Make a DELETE request with a session token
    pub async fn delete_auth(&self, path: &str, token: &str) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self
            .client
            .delete(&url)
            .header("Authorization", format!("Bearer {token}"))
            .send()
            .await?)
    }
}

/// Create a test configuration
pub fn test_config() -> AppConfig {
    AppConfig {
        app: AppSettings {
            name: "comments-server-test".to_string(),
            env: Environment::Development,
        },
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        database: DatabaseConfig {
            url: "postgresql://unused".to_string(),
            max_connections: 1,
            min_connections: 1,
        },
        session: SessionConfig {
            secret: TEST_SESSION_SECRET.to_string(),
        },
        cors: CorsConfig {
            allowed_origins: Vec::new(),
        },
        limits: LimitsConfig {
            request_timeout_secs: 10,
            storage_wait_secs: 5,
        },
        snowflake: SnowflakeConfig { worker_id: 1 },
    }
}

/// Parse the JSON body after asserting the HTTP status
pub async fn assert_json<T: DeserializeOwned>(
    response: Response,
    expected_status: StatusCode,
) -> Result<T> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!("Expected status {expected_status}, got {status}. Body: {body}");
    }
    Ok(response.json().await?)
}
