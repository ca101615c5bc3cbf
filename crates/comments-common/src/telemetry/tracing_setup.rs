//! Tracing subscriber setup
//!
//! `RUST_LOG` always wins; the config only supplies the fallback filter
//! and the output format.

use tracing_subscriber::{
    fmt, fmt::format::FmtSpan, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

/// Output options for the tracing subscriber
#[derive(Debug, Clone)]
pub struct TracingConfig {
    /// Filter directive used when `RUST_LOG` is unset
    pub default_filter: String,
    /// Emit one JSON object per event instead of the pretty format
    pub json: bool,
    /// Log span open/close events (noisy; useful when timing requests)
    pub span_events: bool,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            default_filter: "info".to_string(),
            json: false,
            span_events: false,
        }
    }
}

impl TracingConfig {
    /// Verbose pretty output for local work
    #[must_use]
    pub fn development() -> Self {
        Self {
            default_filter: "debug".to_string(),
            json: false,
            span_events: true,
        }
    }

    /// JSON output for log shippers
    #[must_use]
    pub fn production() -> Self {
        Self {
            json: true,
            ..Self::default()
        }
    }
}

/// Install the global subscriber with default options
pub fn try_init_tracing() -> Result<(), TracingError> {
    try_init_tracing_with_config(&TracingConfig::default())
}

/// Install the global subscriber
///
/// Fails if a subscriber is already installed, which in practice means
/// the function was called twice.
pub fn try_init_tracing_with_config(config: &TracingConfig) -> Result<(), TracingError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.default_filter));

    let span_events = if config.span_events {
        FmtSpan::NEW | FmtSpan::CLOSE
    } else {
        FmtSpan::NONE
    };

    let registry = tracing_subscriber::registry().with(filter);
    let result = if config.json {
        registry
            .with(fmt::layer().json().with_span_events(span_events))
            .try_init()
    } else {
        registry
            .with(fmt::layer().with_span_events(span_events))
            .try_init()
    };

    result.map_err(|_| TracingError::AlreadyInitialized)
}

/// Like [`try_init_tracing`] but panics on failure
///
/// # Panics
/// Panics when a subscriber is already installed.
pub fn init_tracing() {
    if let Err(e) = try_init_tracing() {
        panic!("tracing setup failed: {e}");
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TracingError {
    #[error("a tracing subscriber is already installed")]
    AlreadyInitialized,
}
