/// Clario - a text summarization backend for student-facing study material.
///
/// Signed-in users post text to `/summarize`. The text is summarized by a
/// hosted chat model (Cohere) using a fixed educational-summary prompt. When
/// that model is missing, rate limited, failing or too slow, the raw text is
/// handed once to a hosted summarization model (Hugging Face) instead.
///
/// # Architecture
///
/// The system uses:
/// - axum + tower-http for the HTTP server and CORS
/// - reqwest for both provider APIs
/// - in-memory credential and session stores behind the `auth` module
/// - Tokio for async runtime
///
/// # Example
///
/// ```no_run
/// use clario::ai::{Dispatcher, SummarizationResult};
/// use clario::auth::CallerIdentity;
/// use clario::core::config::AppConfig;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     // Set up structured logging
///     clario::setup_logging();
///
///     let config = AppConfig::from_env()?;
///     let dispatcher = Dispatcher::from_config(&config)?;
///
///     let identity = CallerIdentity::Authenticated(uuid::Uuid::new_v4());
///     let text = "Photosynthesis converts light into chemical energy...";
///     match dispatcher.summarize(text, &identity).await {
///         SummarizationResult::Ok { summary } => println!("Summary: {}", summary),
///         SummarizationResult::Error { message, .. } => println!("Failed: {}", message),
///     }
///
///     Ok(())
/// }
/// ```
// Module declarations
pub mod ai;
pub mod api;
pub mod auth;
pub mod core;
pub mod errors;
pub mod prompt;

/// Configure structured JSON logging.
///
/// Verbosity follows `RUST_LOG` and defaults to `info`. Calling this more than
/// once is harmless; later calls leave the first subscriber in place.
///
/// # Example
///
/// ```
/// clario::setup_logging();
/// ```
pub fn setup_logging() {
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = tracing_subscriber::fmt::layer().json().with_target(true);

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}
